//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A validated backend base URL.
///
/// The URL must use the `http` or `https` scheme, name a host, and carry no
/// path, query or fragment. A single trailing `/` is tolerated and stripped so
/// that joining with an [`ApiPrefix`] never produces `//`.
///
/// # Example
///
/// ```rust
/// use organic_store::BaseUrl;
///
/// let url = BaseUrl::new("http://localhost:8080/").unwrap();
/// assert_eq!(url.as_ref(), "http://localhost:8080");
/// assert_eq!(url.scheme(), "http");
/// assert_eq!(url.host_name(), "localhost");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseUrl {
    url: String,
    scheme_end: usize,
    host_start: usize,
    host_end: usize,
}

impl BaseUrl {
    /// Creates a new validated base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if the URL is invalid.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let trimmed = url.trim();
        let url = trimmed.strip_suffix('/').unwrap_or(trimmed).to_string();
        let invalid = || ConfigError::InvalidBaseUrl { url: url.clone() };

        let scheme_end = url.find("://").ok_or_else(invalid)?;
        let scheme = &url[..scheme_end];
        if !scheme.eq_ignore_ascii_case("http") && !scheme.eq_ignore_ascii_case("https") {
            return Err(invalid());
        }

        let host_start = scheme_end + 3;
        let remainder = &url[host_start..];
        if remainder.is_empty() || remainder.contains(['/', '?', '#']) {
            return Err(invalid());
        }

        // Host ends at the port separator, if any
        let host_end = remainder.find(':').map_or(url.len(), |i| host_start + i);
        if host_end == host_start {
            return Err(invalid());
        }
        if host_end < url.len() {
            let port = &url[host_end + 1..];
            if port.is_empty() || port.parse::<u16>().is_err() {
                return Err(invalid());
            }
        }

        Ok(Self {
            url,
            scheme_end,
            host_start,
            host_end,
        })
    }

    /// Returns the URL scheme (e.g., "https").
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.url[..self.scheme_end]
    }

    /// Returns the host name portion of the URL.
    #[must_use]
    pub fn host_name(&self) -> &str {
        &self.url[self.host_start..self.host_end]
    }
}

impl Default for BaseUrl {
    fn default() -> Self {
        Self {
            url: "http://localhost:8080".to_string(),
            scheme_end: 4,
            host_start: 7,
            host_end: 16,
        }
    }
}

impl AsRef<str> for BaseUrl {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

impl Serialize for BaseUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.url)
    }
}

impl<'de> Deserialize<'de> for BaseUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}

/// A validated, versioned API prefix such as `/api/v1`.
///
/// The prefix must start with `/`, must not end with `/`, and may only
/// contain URL-safe path characters. The empty prefix is allowed for
/// backends mounted at the root.
///
/// # Example
///
/// ```rust
/// use organic_store::ApiPrefix;
///
/// let prefix = ApiPrefix::new("/api/v1").unwrap();
/// assert_eq!(prefix.as_ref(), "/api/v1");
/// assert!(ApiPrefix::new("/api/v1/").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiPrefix(String);

impl ApiPrefix {
    /// Creates a new validated API prefix.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidApiPrefix`] if the prefix is invalid.
    pub fn new(prefix: impl Into<String>) -> Result<Self, ConfigError> {
        let prefix: String = prefix.into();
        let prefix = prefix.trim().to_string();
        if prefix.is_empty() {
            return Ok(Self(prefix));
        }

        let valid = prefix.starts_with('/')
            && !prefix.ends_with('/')
            && !prefix.contains("//")
            && prefix
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '/' | '-' | '_' | '.'));
        if !valid {
            return Err(ConfigError::InvalidApiPrefix { prefix });
        }

        Ok(Self(prefix))
    }
}

impl Default for ApiPrefix {
    fn default() -> Self {
        Self("/api/v1".to_string())
    }
}

impl AsRef<str> for ApiPrefix {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ApiPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Validates an in-app navigation target such as the login page path.
pub(crate) fn validate_navigation_path(
    field: &'static str,
    path: impl Into<String>,
) -> Result<String, ConfigError> {
    let path = path.into();
    if !path.starts_with('/') || path.contains(char::is_whitespace) {
        return Err(ConfigError::InvalidNavigationPath { field, path });
    }
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_accepts_host_with_port() {
        let url = BaseUrl::new("http://localhost:8080").unwrap();
        assert_eq!(url.scheme(), "http");
        assert_eq!(url.host_name(), "localhost");
        assert_eq!(url.as_ref(), "http://localhost:8080");
    }

    #[test]
    fn test_base_url_strips_single_trailing_slash() {
        let url = BaseUrl::new("https://shop.example.com/").unwrap();
        assert_eq!(url.as_ref(), "https://shop.example.com");
        assert_eq!(url.host_name(), "shop.example.com");
    }

    #[test]
    fn test_base_url_rejects_invalid() {
        assert!(BaseUrl::new("localhost:8080").is_err());
        assert!(BaseUrl::new("ftp://example.com").is_err());
        assert!(BaseUrl::new("https://").is_err());
        assert!(BaseUrl::new("https://example.com/api").is_err());
        assert!(BaseUrl::new("https://example.com?x=1").is_err());
        assert!(BaseUrl::new("http://localhost:").is_err());
        assert!(BaseUrl::new("http://localhost:99999").is_err());
        assert!(BaseUrl::new("http://:8080").is_err());
    }

    #[test]
    fn test_base_url_default_matches_parsed_value() {
        let parsed = BaseUrl::new("http://localhost:8080").unwrap();
        assert_eq!(BaseUrl::default(), parsed);
    }

    #[test]
    fn test_base_url_deserializes_with_validation() {
        let url: BaseUrl = serde_json::from_str(r#""https://api.example.com""#).unwrap();
        assert_eq!(url.host_name(), "api.example.com");

        let bad: Result<BaseUrl, _> = serde_json::from_str(r#""not a url""#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_api_prefix_validation() {
        assert_eq!(ApiPrefix::new("/api/v1").unwrap().as_ref(), "/api/v1");
        assert_eq!(ApiPrefix::new("").unwrap().as_ref(), "");
        assert!(ApiPrefix::new("api/v1").is_err());
        assert!(ApiPrefix::new("/api/v1/").is_err());
        assert!(ApiPrefix::new("/api//v1").is_err());
        assert!(ApiPrefix::new("/api v1").is_err());
    }

    #[test]
    fn test_navigation_path_validation() {
        assert_eq!(
            validate_navigation_path("login_path", "/pages/auth/login.html").unwrap(),
            "/pages/auth/login.html"
        );
        assert!(matches!(
            validate_navigation_path("home_path", "index.html"),
            Err(ConfigError::InvalidNavigationPath {
                field: "home_path",
                ..
            })
        ));
    }
}
