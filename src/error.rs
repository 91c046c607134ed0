//! Error types for the Organic Store client.
//!
//! This module contains the configuration errors raised while building a
//! [`StoreConfig`](crate::StoreConfig). Request and facade errors live next
//! to the code that produces them ([`crate::clients::HttpError`] and
//! [`crate::api::ApiError`]).
//!
//! # Example
//!
//! ```rust
//! use organic_store::{ApiPrefix, ConfigError};
//!
//! let result = ApiPrefix::new("api/v1");
//! assert!(matches!(result, Err(ConfigError::InvalidApiPrefix { .. })));
//! ```

use thiserror::Error;

/// Errors that can occur while configuring the client.
///
/// Each variant carries the offending value so the message is actionable.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The backend base URL is invalid.
    #[error("Invalid base URL '{url}'. Expected an absolute http(s) URL without a trailing path, e.g. 'http://localhost:8080'.")]
    InvalidBaseUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// The API prefix is invalid.
    #[error("Invalid API prefix '{prefix}'. Expected a path starting with '/' and without a trailing '/', e.g. '/api/v1'.")]
    InvalidApiPrefix {
        /// The invalid prefix that was provided.
        prefix: String,
    },

    /// A navigation target (login or home page) is invalid.
    #[error("Invalid navigation path '{path}' for {field}. Expected a path starting with '/'.")]
    InvalidNavigationPath {
        /// The configuration field being set.
        field: &'static str,
        /// The invalid path that was provided.
        path: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_base_url_error_message() {
        let error = ConfigError::InvalidBaseUrl {
            url: "localhost".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("'localhost'"));
        assert!(message.contains("http://localhost:8080"));
    }

    #[test]
    fn test_invalid_navigation_path_names_field() {
        let error = ConfigError::InvalidNavigationPath {
            field: "login_path",
            path: "login.html".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("login_path"));
        assert!(message.contains("login.html"));
    }

    #[test]
    fn test_error_implements_std_error() {
        let error = ConfigError::InvalidApiPrefix {
            prefix: String::new(),
        };
        let _: &dyn std::error::Error = &error;
    }
}
