//! The boundary between the client and whatever presents it.
//!
//! Storefront operations have fixed user-facing side effects: a toast on
//! success or failure, a redirect after logout or session expiry, the cart
//! badge count and a global loading indicator. [`UiHooks`] lets the host
//! decide what those mean. [`LogUi`] is the headless default and routes
//! everything to `tracing`.
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use organic_store::ui::{NoticeLevel, UiHooks};
//!
//! struct Console;
//!
//! impl UiHooks for Console {
//!     fn notify(&self, level: NoticeLevel, message: &str) {
//!         println!("[{level}] {message}");
//!     }
//!
//!     fn redirect(&self, target: &str, delay: Duration) {
//!         println!("-> {target} in {delay:?}");
//!     }
//! }
//! ```

use std::fmt;
use std::time::Duration;

/// The kind of a user notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NoticeLevel {
    /// An operation succeeded.
    Success,
    /// An operation failed.
    Error,
    /// Something needs attention.
    Warning,
    /// Neutral information.
    Info,
}

impl fmt::Display for NoticeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Success => "SUCCESS",
            Self::Error => "ERROR",
            Self::Warning => "WARNING",
            Self::Info => "INFO",
        })
    }
}

/// Side effects the client asks its host to perform.
///
/// Implementations must be cheap and non-blocking: hooks run inline on the
/// request path. `redirect` only schedules navigation, it must not wait out
/// `delay`.
pub trait UiHooks: Send + Sync {
    /// Shows a notification.
    fn notify(&self, level: NoticeLevel, message: &str);

    /// Schedules navigation to `target` after `delay`.
    fn redirect(&self, target: &str, delay: Duration);

    /// Returns the current navigation path, if the host has one.
    fn current_path(&self) -> Option<String> {
        None
    }

    /// Updates the cart badge.
    fn set_cart_count(&self, _count: u64) {}

    /// Shows or hides the global loading indicator.
    fn set_loading(&self, _loading: bool) {}
}

/// Headless [`UiHooks`] that logs every side effect through `tracing`.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogUi;

impl UiHooks for LogUi {
    fn notify(&self, level: NoticeLevel, message: &str) {
        match level {
            NoticeLevel::Error => tracing::error!(%level, "{message}"),
            NoticeLevel::Warning => tracing::warn!(%level, "{message}"),
            NoticeLevel::Success | NoticeLevel::Info => tracing::info!(%level, "{message}"),
        }
    }

    fn redirect(&self, target: &str, delay: Duration) {
        tracing::info!(target_path = target, ?delay, "Redirect requested");
    }

    fn set_cart_count(&self, count: u64) {
        tracing::debug!(count, "Cart badge updated");
    }

    fn set_loading(&self, loading: bool) {
        tracing::debug!(loading, "Loading indicator toggled");
    }
}

/// Shows the loading indicator until dropped.
pub(crate) struct LoadingGuard<'a> {
    ui: &'a dyn UiHooks,
}

impl<'a> LoadingGuard<'a> {
    pub(crate) fn show(ui: &'a dyn UiHooks) -> Self {
        ui.set_loading(true);
        Self { ui }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.ui.set_loading(false);
    }
}
