//! HTTP-specific error types for the Organic Store client.
//!
//! # Error Handling
//!
//! - [`HttpResponseError`]: A non-2xx response, including `401`
//! - [`InvalidHttpRequestError`]: A request that failed validation before sending
//! - [`HttpError`]: Unified error type encompassing all HTTP-related errors
//!
//! # Example
//!
//! ```rust,ignore
//! use organic_store::clients::HttpError;
//!
//! match client.request(request).await {
//!     Ok(envelope) => println!("{}: {}", envelope.status_code, envelope.message),
//!     Err(HttpError::Response(e)) if e.code == 401 => {
//!         // The session has already been cleared
//!     }
//!     Err(HttpError::Response(e)) => println!("API error {}: {}", e.code, e.message),
//!     Err(HttpError::InvalidRequest(e)) => println!("Invalid request: {e}"),
//!     Err(HttpError::Network(e)) => println!("Network error: {e}"),
//! }
//! ```

use thiserror::Error;

/// Generic message shown for transport failures.
pub const NETWORK_ERROR_MESSAGE: &str = "Cannot reach the server, please try again";

/// Error returned when the backend answers with a non-successful status.
///
/// `code` prefers the `statusCode` field of the body and falls back to the
/// HTTP status; `http_status` is always the transport status. The two can
/// disagree, and only an HTTP `401` tears the session down.
/// `message` is the normalized `message` field of the body.
///
/// # Example
///
/// ```rust
/// use organic_store::clients::HttpResponseError;
///
/// let error = HttpResponseError {
///     code: 400,
///     http_status: 400,
///     message: "email must be an email".to_string(),
/// };
///
/// assert_eq!(error.to_string(), "email must be an email");
/// ```
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct HttpResponseError {
    /// The status code of the failure.
    pub code: u16,
    /// The HTTP status of the response.
    pub http_status: u16,
    /// Human-readable message from the backend.
    pub message: String,
}

/// Error returned when an HTTP request fails validation.
///
/// # Example
///
/// ```rust
/// use organic_store::clients::InvalidHttpRequestError;
///
/// let error = InvalidHttpRequestError::BodyNotAllowed {
///     method: "GET".to_string(),
/// };
///
/// assert_eq!(error.to_string(), "Cannot send a body with GET.");
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// A body was attached to a method that does not carry one.
    #[error("Cannot send a body with {method}.")]
    BodyNotAllowed {
        /// The HTTP method of the request.
        method: String,
    },

    /// The endpoint is not an absolute API path.
    #[error("Invalid endpoint '{endpoint}': must start with '/'.")]
    InvalidEndpoint {
        /// The endpoint that was provided.
        endpoint: String,
    },
}

/// Unified error type for all HTTP-related errors.
#[derive(Debug, Error)]
pub enum HttpError {
    /// A non-2xx response.
    #[error(transparent)]
    Response(#[from] HttpResponseError),

    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl HttpError {
    /// Returns the status code for response errors.
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Response(e) => Some(e.code),
            Self::InvalidRequest(_) | Self::Network(_) => None,
        }
    }

    /// Returns `true` if the backend rejected the session.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self.status_code(), Some(401))
    }

    /// Returns `true` if the response carried HTTP `401`, i.e. the client
    /// has already cleared the session.
    #[must_use]
    pub const fn session_expired(&self) -> bool {
        matches!(self, Self::Response(e) if e.http_status == 401)
    }

    /// Returns the message suitable for showing to a user.
    ///
    /// Transport failures map to a generic message rather than the
    /// underlying I/O error.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Response(e) => e.message.clone(),
            Self::InvalidRequest(e) => e.to_string(),
            Self::Network(_) => NETWORK_ERROR_MESSAGE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_response_error_displays_backend_message() {
        let error = HttpResponseError {
            code: 404,
            http_status: 404,
            message: "Product not found".to_string(),
        };
        assert_eq!(error.to_string(), "Product not found");
    }

    #[test]
    fn test_invalid_endpoint_message() {
        let error = InvalidHttpRequestError::InvalidEndpoint {
            endpoint: "cart".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid endpoint 'cart': must start with '/'."
        );
    }

    #[test]
    fn test_status_code_and_unauthorized_helpers() {
        let unauthorized = HttpError::Response(HttpResponseError {
            code: 401,
            http_status: 401,
            message: "Unauthorized".to_string(),
        });
        assert_eq!(unauthorized.status_code(), Some(401));
        assert!(unauthorized.is_unauthorized());
        assert!(unauthorized.session_expired());
        assert_eq!(unauthorized.user_message(), "Unauthorized");

        let invalid = HttpError::from(InvalidHttpRequestError::BodyNotAllowed {
            method: "GET".to_string(),
        });
        assert_eq!(invalid.status_code(), None);
        assert!(!invalid.is_unauthorized());
        assert!(!invalid.session_expired());
    }

    #[test]
    fn test_body_status_401_is_not_a_session_expiry() {
        let error = HttpError::Response(HttpResponseError {
            code: 401,
            http_status: 403,
            message: "Refresh token revoked".to_string(),
        });
        assert!(error.is_unauthorized());
        assert!(!error.session_expired());
    }

    #[test]
    fn test_error_types_implement_std_error() {
        let response_error: &dyn std::error::Error = &HttpResponseError {
            code: 400,
            http_status: 400,
            message: "test".to_string(),
        };
        let _ = response_error;

        let invalid_error: &dyn std::error::Error = &InvalidHttpRequestError::InvalidEndpoint {
            endpoint: String::new(),
        };
        let _ = invalid_error;
    }
}
