//! The entry point tying configuration, session storage, UI hooks and the
//! HTTP client together.

use std::sync::Arc;

use crate::api::{
    AuthApi, CartApi, CategoryApi, OrderApi, PaymentApi, ProductApi, WishlistApi,
};
use crate::auth::{KeyValueStore, MemoryStore, TokenStore};
use crate::clients::{HttpClient, HttpError};
use crate::config::StoreConfig;
use crate::ui::{LogUi, UiHooks};

/// A configured Organic Store client.
///
/// `Storefront` owns one [`HttpClient`] and hands out borrowed facades for
/// each backend area. It is cheap to clone; clones share the session.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use organic_store::{Storefront, StoreConfig};
/// use organic_store::auth::MemoryStore;
/// use organic_store::ui::LogUi;
///
/// let store = Storefront::new(
///     &StoreConfig::default(),
///     Arc::new(MemoryStore::new()),
///     Arc::new(LogUi),
/// )
/// .unwrap();
///
/// assert!(!store.auth().is_logged_in());
/// assert_eq!(store.client().api_root(), "http://localhost:8080/api/v1");
/// ```
#[derive(Clone, Debug)]
pub struct Storefront {
    client: HttpClient,
}

// Verify Storefront is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Storefront>();
};

impl Storefront {
    /// Creates a client over the given session store and UI hooks.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the HTTP transport cannot be
    /// initialized.
    pub fn new(
        config: &StoreConfig,
        store: Arc<dyn KeyValueStore>,
        ui: Arc<dyn UiHooks>,
    ) -> Result<Self, HttpError> {
        let tokens = TokenStore::new(store, config.storage_keys().clone());
        let client = HttpClient::new(config, tokens, ui)?;
        Ok(Self { client })
    }

    /// Creates a headless client: in-memory session, UI effects logged.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the HTTP transport cannot be
    /// initialized.
    pub fn headless(config: &StoreConfig) -> Result<Self, HttpError> {
        Self::new(config, Arc::new(MemoryStore::new()), Arc::new(LogUi))
    }

    /// Returns the underlying HTTP client.
    #[must_use]
    pub const fn client(&self) -> &HttpClient {
        &self.client
    }

    /// Returns the session store.
    #[must_use]
    pub const fn tokens(&self) -> &TokenStore {
        self.client.tokens()
    }

    /// Authentication, profile and token refresh.
    #[must_use]
    pub const fn auth(&self) -> AuthApi<'_> {
        AuthApi::new(&self.client)
    }

    /// Product catalogue.
    #[must_use]
    pub const fn products(&self) -> ProductApi<'_> {
        ProductApi::new(&self.client)
    }

    /// Server-side cart.
    #[must_use]
    pub const fn cart(&self) -> CartApi<'_> {
        CartApi::new(&self.client)
    }

    /// Categories.
    #[must_use]
    pub const fn categories(&self) -> CategoryApi<'_> {
        CategoryApi::new(&self.client)
    }

    /// Checkout and order history.
    #[must_use]
    pub const fn orders(&self) -> OrderApi<'_> {
        OrderApi::new(&self.client)
    }

    /// Wishlist.
    #[must_use]
    pub const fn wishlist(&self) -> WishlistApi<'_> {
        WishlistApi::new(&self.client)
    }

    /// MoMo payments.
    #[must_use]
    pub const fn payments(&self) -> PaymentApi<'_> {
        PaymentApi::new(&self.client)
    }
}
