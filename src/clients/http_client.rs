//! HTTP client for the Organic Store backend.
//!
//! This module provides the [`HttpClient`] type: it turns an
//! [`HttpRequest`] into a wire request, attaches the bearer token from the
//! [`TokenStore`], and runs every response through the normalizer exactly
//! once before the caller sees it.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::auth::TokenStore;
use crate::clients::envelope::{classify, parse_body, Outcome, ResponseEnvelope};
use crate::clients::errors::HttpError;
use crate::clients::http_request::{HttpMethod, HttpRequest, MultipartForm, RequestBody};
use crate::config::StoreConfig;
use crate::ui::{NoticeLevel, UiHooks};

/// Client version from Cargo.toml.
pub const CLIENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Notification shown when the backend rejects the session.
pub const SESSION_EXPIRED_MESSAGE: &str = "Session expired, please log in again";

/// HTTP client for making requests to the Organic Store API.
///
/// The client handles:
/// - URL construction from the configured base URL and API prefix
/// - Default headers including User-Agent and Content-Type
/// - Bearer token injection for authenticated requests
/// - Response normalization, including session teardown on `401`
///
/// Requests are never retried.
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync` and cheap to clone; clones share the
/// connection pool, the token store and the UI hooks.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use organic_store::{StoreConfig, TokenStore};
/// use organic_store::clients::{HttpClient, HttpRequest, HttpMethod};
/// use organic_store::ui::LogUi;
///
/// let client = HttpClient::new(&StoreConfig::default(), TokenStore::in_memory(), Arc::new(LogUi))?;
///
/// let request = HttpRequest::builder(HttpMethod::Get, "/category")
///     .requires_auth(false)
///     .build()?;
///
/// let envelope = client.request(request).await?;
/// println!("{}", envelope.data);
/// ```
#[derive(Clone)]
pub struct HttpClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// `base_url + api_prefix`.
    api_root: String,
    /// Default headers to include in all requests.
    default_headers: HashMap<String, String>,
    config: StoreConfig,
    tokens: TokenStore,
    ui: Arc<dyn UiHooks>,
}

impl fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpClient")
            .field("api_root", &self.api_root)
            .field("default_headers", &self.default_headers)
            .field("tokens", &self.tokens)
            .finish_non_exhaustive()
    }
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the underlying transport cannot be
    /// initialized (e.g. TLS backend failure).
    pub fn new(
        config: &StoreConfig,
        tokens: TokenStore,
        ui: Arc<dyn UiHooks>,
    ) -> Result<Self, HttpError> {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent = format!(
            "{user_agent_prefix}Organic Store Client v{CLIENT_VERSION} | Rust {rust_version}"
        );

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());

        let client = reqwest::Client::builder().use_rustls_tls().build()?;

        Ok(Self {
            client,
            api_root: config.api_root(),
            default_headers,
            config: config.clone(),
            tokens,
            ui,
        })
    }

    /// Returns `base_url + api_prefix`.
    #[must_use]
    pub fn api_root(&self) -> &str {
        &self.api_root
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Returns the configuration the client was built with.
    #[must_use]
    pub const fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Returns the token store.
    #[must_use]
    pub const fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    /// Returns the UI hooks.
    #[must_use]
    pub fn ui(&self) -> &dyn UiHooks {
        self.ui.as_ref()
    }

    /// Builds the full URL for `endpoint`.
    ///
    /// Query parameters with an empty value are dropped; the rest are
    /// percent-encoded and appended in order.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::sync::Arc;
    /// use organic_store::{StoreConfig, TokenStore};
    /// use organic_store::clients::HttpClient;
    /// use organic_store::ui::LogUi;
    ///
    /// let client = HttpClient::new(&StoreConfig::default(), TokenStore::in_memory(), Arc::new(LogUi)).unwrap();
    /// let query = vec![
    ///     ("page".to_string(), "1".to_string()),
    ///     ("limit".to_string(), "12".to_string()),
    ///     ("search".to_string(), String::new()),
    /// ];
    ///
    /// assert_eq!(
    ///     client.build_url("/product/pagination", &query),
    ///     "http://localhost:8080/api/v1/product/pagination?page=1&limit=12"
    /// );
    /// ```
    #[must_use]
    pub fn build_url(&self, endpoint: &str, query: &[(String, String)]) -> String {
        let mut url = format!("{}{endpoint}", self.api_root);

        let pairs: Vec<String> = query
            .iter()
            .filter(|(_, value)| !value.is_empty())
            .map(|(key, value)| {
                format!(
                    "{}={}",
                    urlencoding::encode(key),
                    urlencoding::encode(value)
                )
            })
            .collect();

        if !pairs.is_empty() {
            url.push(if endpoint.contains('?') { '&' } else { '?' });
            url.push_str(&pairs.join("&"));
        }

        url
    }

    /// Sends a request and normalizes the response.
    ///
    /// This method handles:
    /// - Request validation
    /// - URL construction
    /// - Header merging and bearer token injection
    /// - Response parsing (unparseable bodies read as `{}`)
    /// - Session teardown and login redirect on `401`
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - Request validation fails (`InvalidRequest`)
    /// - A network error occurs (`Network`)
    /// - A non-2xx response is received (`Response`); on `401` the session
    ///   has already been cleared when this returns
    pub async fn request(&self, request: HttpRequest) -> Result<ResponseEnvelope, HttpError> {
        request.verify()?;

        let url = self.build_url(&request.endpoint, &request.query);

        let mut headers = self.default_headers.clone();
        if !request.is_multipart() {
            headers.insert("Content-Type".to_string(), "application/json".to_string());
        }
        if request.requires_auth {
            if let Some(token) = self.tokens.access_token() {
                headers.insert("Authorization".to_string(), format!("Bearer {token}"));
            }
        }
        if let Some(extra) = &request.extra_headers {
            for (key, value) in extra {
                headers.insert(key.clone(), value.clone());
            }
        }

        let mut req_builder = match request.http_method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
            HttpMethod::Put => self.client.put(&url),
            HttpMethod::Patch => self.client.patch(&url),
            HttpMethod::Delete => self.client.delete(&url),
        };

        for (key, value) in &headers {
            req_builder = req_builder.header(key, value);
        }

        match request.body {
            Some(RequestBody::Json(body)) => req_builder = req_builder.body(body.to_string()),
            Some(RequestBody::Multipart(form)) => {
                req_builder = req_builder.multipart(Self::multipart_form(form)?);
            }
            None => {}
        }

        let res = match req_builder.send().await {
            Ok(res) => res,
            Err(e) => {
                tracing::error!(
                    method = %request.http_method,
                    url = %url,
                    error = %e,
                    "API request failed"
                );
                return Err(HttpError::Network(e));
            }
        };

        let status = res.status().as_u16();
        let body = parse_body(&res.text().await.unwrap_or_default());

        tracing::debug!(
            method = %request.http_method,
            url = %url,
            status,
            "API response received"
        );

        match classify(status, body) {
            Outcome::Success(envelope) => Ok(envelope),
            Outcome::AuthExpired(error) => {
                self.expire_session();
                Err(error.into())
            }
            Outcome::Failure(error) => Err(error.into()),
        }
    }

    /// Clears the session and, unless already on the login page, tells the
    /// user and schedules the login redirect.
    fn expire_session(&self) {
        self.tokens.clear();

        let login_path = self.config.login_path();
        let on_login_page = self
            .ui
            .current_path()
            .is_some_and(|path| is_login_page(&path, login_path));

        tracing::warn!(on_login_page, "Session rejected by backend, session cleared");

        if !on_login_page {
            self.ui.notify(NoticeLevel::Error, SESSION_EXPIRED_MESSAGE);
            self.ui
                .redirect(login_path, self.config.session_expired_redirect_delay());
        }
    }

    /// Converts a [`MultipartForm`] into a transport form.
    fn multipart_form(form: MultipartForm) -> Result<reqwest::multipart::Form, HttpError> {
        let mut multipart = reqwest::multipart::Form::new();
        for (field, file) in form.files {
            let mut part = reqwest::multipart::Part::bytes(file.bytes).file_name(file.file_name);
            if let Some(mime) = &file.mime_type {
                part = part.mime_str(mime)?;
            }
            multipart = multipart.part(field, part);
        }
        Ok(multipart)
    }
}

/// Returns `true` if `current` is the login page, with or without the
/// page's file extension (`/pages/auth/login` matches `login.html`).
fn is_login_page(current: &str, login_path: &str) -> bool {
    let stem = match login_path.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.contains('/') => stem,
        _ => login_path,
    };
    current.contains(stem)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BaseUrl;
    use crate::ui::LogUi;

    fn create_test_client(config: &StoreConfig) -> HttpClient {
        HttpClient::new(config, TokenStore::in_memory(), Arc::new(LogUi)).unwrap()
    }

    fn query(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_client_uses_configured_api_root() {
        let config = StoreConfig::builder()
            .base_url(BaseUrl::new("https://api.organic.example").unwrap())
            .build()
            .unwrap();
        let client = create_test_client(&config);

        assert_eq!(client.api_root(), "https://api.organic.example/api/v1");
    }

    #[test]
    fn test_build_url_omits_empty_values() {
        let client = create_test_client(&StoreConfig::default());
        let url = client.build_url(
            "/product/pagination",
            &query(&[("page", "1"), ("limit", "12"), ("search", "")]),
        );

        assert_eq!(
            url,
            "http://localhost:8080/api/v1/product/pagination?page=1&limit=12"
        );
    }

    #[test]
    fn test_build_url_percent_encodes_values() {
        let client = create_test_client(&StoreConfig::default());
        let url = client.build_url("/product/pagination", &query(&[("search", "rau cải & hành")]));

        assert_eq!(
            url,
            "http://localhost:8080/api/v1/product/pagination?search=rau%20c%E1%BA%A3i%20%26%20h%C3%A0nh"
        );
    }

    #[test]
    fn test_build_url_without_query() {
        let client = create_test_client(&StoreConfig::default());
        assert_eq!(
            client.build_url("/cart", &[]),
            "http://localhost:8080/api/v1/cart"
        );
        assert_eq!(
            client.build_url("/cart", &query(&[("skip", "")])),
            "http://localhost:8080/api/v1/cart"
        );
    }

    #[test]
    fn test_user_agent_header_format() {
        let client = create_test_client(&StoreConfig::default());

        let user_agent = client.default_headers().get("User-Agent").unwrap();
        assert!(user_agent.contains("Organic Store Client v"));
        assert!(user_agent.contains("Rust"));
    }

    #[test]
    fn test_user_agent_with_prefix() {
        let config = StoreConfig::builder()
            .user_agent_prefix("Kiosk/1.0")
            .build()
            .unwrap();
        let client = create_test_client(&config);

        let user_agent = client.default_headers().get("User-Agent").unwrap();
        assert!(user_agent.starts_with("Kiosk/1.0 | "));
    }

    #[test]
    fn test_accept_header_is_json() {
        let client = create_test_client(&StoreConfig::default());

        assert_eq!(
            client.default_headers().get("Accept"),
            Some(&"application/json".to_string())
        );
    }

    #[test]
    fn test_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HttpClient>();
    }

    #[test]
    fn test_login_page_matches_with_or_without_extension() {
        let login = "/pages/auth/login.html";
        assert!(is_login_page("/pages/auth/login.html", login));
        assert!(is_login_page("/pages/auth/login", login));
        assert!(is_login_page("/pages/auth/login.html?next=/cart", login));
        assert!(!is_login_page("/pages/cart.html", login));

        assert!(is_login_page("/login", "/login"));
        assert!(!is_login_page("/index.html", "/login"));
    }
}
