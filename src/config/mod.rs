//! Configuration types for the Organic Store client.
//!
//! This module provides the configuration used to reach the backend and to
//! drive the session lifecycle side effects (where to send the user when a
//! session expires, which storage keys hold the session).
//!
//! # Overview
//!
//! - [`StoreConfig`]: The main configuration struct
//! - [`StoreConfigBuilder`]: A builder for constructing [`StoreConfig`] instances
//! - [`BaseUrl`]: A validated backend base URL
//! - [`ApiPrefix`]: A validated versioned API prefix
//! - [`StorageKeys`]: The key names used in the session store
//!
//! # Example
//!
//! ```rust
//! use organic_store::{StoreConfig, BaseUrl, ApiPrefix};
//!
//! let config = StoreConfig::builder()
//!     .base_url(BaseUrl::new("https://api.organic.example").unwrap())
//!     .api_prefix(ApiPrefix::new("/api/v1").unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.api_root(), "https://api.organic.example/api/v1");
//! ```

mod newtypes;

pub use newtypes::{ApiPrefix, BaseUrl};

use std::time::Duration;

use crate::error::ConfigError;

/// Default path of the login page.
pub const DEFAULT_LOGIN_PATH: &str = "/pages/auth/login.html";

/// Default path of the storefront home page.
pub const DEFAULT_HOME_PATH: &str = "/index.html";

/// Key names under which the session lives in a [`KeyValueStore`](crate::auth::KeyValueStore).
///
/// One canonical key set is used for every component; the defaults are
/// `accessToken`, `refreshToken`, `user` and `cart`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StorageKeys {
    /// Key holding the access token.
    pub access_token: String,
    /// Key holding the refresh token.
    pub refresh_token: String,
    /// Key holding the cached user profile JSON.
    pub user: String,
    /// Key holding the guest cart JSON array.
    pub cart: String,
}

impl StorageKeys {
    /// Returns the keys that make up a session, i.e. everything `clear()` removes.
    #[must_use]
    pub fn session_keys(&self) -> [&str; 3] {
        [
            self.access_token.as_str(),
            self.refresh_token.as_str(),
            self.user.as_str(),
        ]
    }
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            access_token: "accessToken".to_string(),
            refresh_token: "refreshToken".to_string(),
            user: "user".to_string(),
            cart: "cart".to_string(),
        }
    }
}

/// Configuration for the Organic Store client.
///
/// # Thread Safety
///
/// `StoreConfig` is `Clone`, `Send`, and `Sync`, making it safe to share
/// across threads and async tasks.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use organic_store::StoreConfig;
///
/// let config = StoreConfig::builder()
///     .session_expired_redirect_delay(Duration::from_millis(250))
///     .build()
///     .unwrap();
///
/// assert_eq!(config.login_path(), "/pages/auth/login.html");
/// assert_eq!(config.session_expired_redirect_delay(), Duration::from_millis(250));
/// ```
#[derive(Clone, Debug)]
pub struct StoreConfig {
    base_url: BaseUrl,
    api_prefix: ApiPrefix,
    storage_keys: StorageKeys,
    login_path: String,
    home_path: String,
    session_expired_redirect_delay: Duration,
    logout_redirect_delay: Duration,
    user_agent_prefix: Option<String>,
}

impl StoreConfig {
    /// Creates a new builder for constructing a `StoreConfig`.
    #[must_use]
    pub fn builder() -> StoreConfigBuilder {
        StoreConfigBuilder::new()
    }

    /// Returns the backend base URL.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the API prefix.
    #[must_use]
    pub const fn api_prefix(&self) -> &ApiPrefix {
        &self.api_prefix
    }

    /// Returns `base_url + api_prefix`, the root every endpoint is joined to.
    #[must_use]
    pub fn api_root(&self) -> String {
        format!("{}{}", self.base_url, self.api_prefix)
    }

    /// Returns the storage key names.
    #[must_use]
    pub const fn storage_keys(&self) -> &StorageKeys {
        &self.storage_keys
    }

    /// Returns the path of the login page.
    #[must_use]
    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    /// Returns the path of the home page.
    #[must_use]
    pub fn home_path(&self) -> &str {
        &self.home_path
    }

    /// Returns how long to wait before redirecting to login after a `401`.
    #[must_use]
    pub const fn session_expired_redirect_delay(&self) -> Duration {
        self.session_expired_redirect_delay
    }

    /// Returns how long to wait before redirecting home after logout.
    #[must_use]
    pub const fn logout_redirect_delay(&self) -> Duration {
        self.logout_redirect_delay
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            base_url: BaseUrl::default(),
            api_prefix: ApiPrefix::default(),
            storage_keys: StorageKeys::default(),
            login_path: DEFAULT_LOGIN_PATH.to_string(),
            home_path: DEFAULT_HOME_PATH.to_string(),
            session_expired_redirect_delay: Duration::from_millis(1000),
            logout_redirect_delay: Duration::from_millis(500),
            user_agent_prefix: None,
        }
    }
}

// Verify StoreConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<StoreConfig>();
};

/// Builder for constructing [`StoreConfig`] instances.
///
/// Every field is optional.
///
/// # Defaults
///
/// - `base_url`: `http://localhost:8080`
/// - `api_prefix`: `/api/v1`
/// - `storage_keys`: [`StorageKeys::default`]
/// - `login_path`: `/pages/auth/login.html`
/// - `home_path`: `/index.html`
/// - `session_expired_redirect_delay`: 1 second
/// - `logout_redirect_delay`: 500 milliseconds
/// - `user_agent_prefix`: `None`
#[derive(Debug, Default)]
pub struct StoreConfigBuilder {
    base_url: Option<BaseUrl>,
    api_prefix: Option<ApiPrefix>,
    storage_keys: Option<StorageKeys>,
    login_path: Option<String>,
    home_path: Option<String>,
    session_expired_redirect_delay: Option<Duration>,
    logout_redirect_delay: Option<Duration>,
    user_agent_prefix: Option<String>,
}

impl StoreConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the backend base URL.
    #[must_use]
    pub fn base_url(mut self, url: BaseUrl) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the API prefix.
    #[must_use]
    pub fn api_prefix(mut self, prefix: ApiPrefix) -> Self {
        self.api_prefix = Some(prefix);
        self
    }

    /// Sets the storage key names.
    #[must_use]
    pub fn storage_keys(mut self, keys: StorageKeys) -> Self {
        self.storage_keys = Some(keys);
        self
    }

    /// Sets the login page path. Validated in [`build`](Self::build).
    #[must_use]
    pub fn login_path(mut self, path: impl Into<String>) -> Self {
        self.login_path = Some(path.into());
        self
    }

    /// Sets the home page path. Validated in [`build`](Self::build).
    #[must_use]
    pub fn home_path(mut self, path: impl Into<String>) -> Self {
        self.home_path = Some(path.into());
        self
    }

    /// Sets the delay before redirecting to login after a `401`.
    #[must_use]
    pub const fn session_expired_redirect_delay(mut self, delay: Duration) -> Self {
        self.session_expired_redirect_delay = Some(delay);
        self
    }

    /// Sets the delay before redirecting home after logout.
    #[must_use]
    pub const fn logout_redirect_delay(mut self, delay: Duration) -> Self {
        self.logout_redirect_delay = Some(delay);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`StoreConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidNavigationPath`] if `login_path` or
    /// `home_path` does not start with `/`.
    pub fn build(self) -> Result<StoreConfig, ConfigError> {
        let defaults = StoreConfig::default();

        let login_path = self
            .login_path
            .map(|p| newtypes::validate_navigation_path("login_path", p))
            .transpose()?
            .unwrap_or(defaults.login_path);
        let home_path = self
            .home_path
            .map(|p| newtypes::validate_navigation_path("home_path", p))
            .transpose()?
            .unwrap_or(defaults.home_path);

        Ok(StoreConfig {
            base_url: self.base_url.unwrap_or(defaults.base_url),
            api_prefix: self.api_prefix.unwrap_or(defaults.api_prefix),
            storage_keys: self.storage_keys.unwrap_or(defaults.storage_keys),
            login_path,
            home_path,
            session_expired_redirect_delay: self
                .session_expired_redirect_delay
                .unwrap_or(defaults.session_expired_redirect_delay),
            logout_redirect_delay: self
                .logout_redirect_delay
                .unwrap_or(defaults.logout_redirect_delay),
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_provides_sensible_defaults() {
        let config = StoreConfig::builder().build().unwrap();

        assert_eq!(config.base_url().as_ref(), "http://localhost:8080");
        assert_eq!(config.api_prefix().as_ref(), "/api/v1");
        assert_eq!(config.api_root(), "http://localhost:8080/api/v1");
        assert_eq!(config.login_path(), DEFAULT_LOGIN_PATH);
        assert_eq!(config.home_path(), DEFAULT_HOME_PATH);
        assert_eq!(
            config.session_expired_redirect_delay(),
            Duration::from_secs(1)
        );
        assert_eq!(config.logout_redirect_delay(), Duration::from_millis(500));
        assert!(config.user_agent_prefix().is_none());
    }

    #[test]
    fn test_default_storage_keys_are_canonical() {
        let keys = StorageKeys::default();
        assert_eq!(keys.access_token, "accessToken");
        assert_eq!(keys.refresh_token, "refreshToken");
        assert_eq!(keys.user, "user");
        assert_eq!(keys.cart, "cart");
        assert_eq!(keys.session_keys(), ["accessToken", "refreshToken", "user"]);
    }

    #[test]
    fn test_builder_with_all_optional_fields() {
        let config = StoreConfig::builder()
            .base_url(BaseUrl::new("https://shop.example.com").unwrap())
            .api_prefix(ApiPrefix::new("/api/v2").unwrap())
            .login_path("/login")
            .home_path("/")
            .logout_redirect_delay(Duration::ZERO)
            .user_agent_prefix("Kiosk/2.0")
            .build()
            .unwrap();

        assert_eq!(config.api_root(), "https://shop.example.com/api/v2");
        assert_eq!(config.login_path(), "/login");
        assert_eq!(config.home_path(), "/");
        assert_eq!(config.logout_redirect_delay(), Duration::ZERO);
        assert_eq!(config.user_agent_prefix(), Some("Kiosk/2.0"));
    }

    #[test]
    fn test_builder_rejects_relative_login_path() {
        let result = StoreConfig::builder().login_path("login.html").build();

        assert!(matches!(
            result,
            Err(ConfigError::InvalidNavigationPath {
                field: "login_path",
                ..
            })
        ));
    }

    #[test]
    fn test_config_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<StoreConfig>();
    }
}
