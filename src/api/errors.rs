//! Error types for storefront operations.
//!
//! [`ApiError`] extends [`HttpError`] with the failures that only make sense
//! once a response has been interpreted: a payload of the wrong shape, a
//! token that was expected but absent.
//!
//! # Example
//!
//! ```rust,ignore
//! use organic_store::ApiError;
//!
//! match store.cart().add("p1", 2).await {
//!     Ok(envelope) => println!("{}", envelope.message),
//!     Err(e) if e.is_unauthorized() => println!("Please log in again"),
//!     Err(ApiError::NotLoggedIn) => println!("Log in to use the wishlist"),
//!     Err(e) => println!("Failed: {}", e.user_message()),
//! }
//! ```

use thiserror::Error;

use crate::clients::HttpError;

/// Error type for storefront facade operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request failed or the backend rejected it.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// The response payload could not be read as the expected type.
    #[error("Failed to decode {what}: {source}")]
    Decode {
        /// What was being decoded (e.g. `"user profile"`).
        what: &'static str,
        /// The underlying `serde_json` error.
        #[source]
        source: serde_json::Error,
    },

    /// A refresh was requested but no refresh token is stored.
    #[error("No refresh token is stored")]
    MissingRefreshToken,

    /// The operation needs a logged-in user and no access token is stored.
    #[error("You are not logged in")]
    NotLoggedIn,

    /// A successful response lacked a field the operation depends on.
    #[error("Response is missing the '{field}' field")]
    MissingField {
        /// The name of the missing field.
        field: &'static str,
    },
}

impl ApiError {
    pub(crate) const fn decode(what: &'static str, source: serde_json::Error) -> Self {
        Self::Decode { what, source }
    }

    /// Returns the status code for backend rejections.
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Http(e) => e.status_code(),
            _ => None,
        }
    }

    /// Returns `true` if the backend rejected the session.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self.status_code(), Some(401))
    }

    /// Returns `true` if the response carried HTTP `401` and the session has
    /// therefore already been cleared.
    #[must_use]
    pub const fn session_expired(&self) -> bool {
        match self {
            Self::Http(e) => e.session_expired(),
            _ => false,
        }
    }

    /// Returns the message suitable for showing to a user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Http(e) => e.user_message(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::HttpResponseError;

    #[test]
    fn test_http_errors_expose_status() {
        let error = ApiError::from(HttpError::from(HttpResponseError {
            code: 401,
            http_status: 401,
            message: "jwt expired".to_string(),
        }));

        assert_eq!(error.status_code(), Some(401));
        assert!(error.is_unauthorized());
        assert!(error.session_expired());
        assert_eq!(error.user_message(), "jwt expired");
    }

    #[test]
    fn test_local_errors_have_no_status() {
        assert_eq!(ApiError::MissingRefreshToken.status_code(), None);
        assert_eq!(
            ApiError::MissingField { field: "accessToken" }.to_string(),
            "Response is missing the 'accessToken' field"
        );
        assert_eq!(ApiError::NotLoggedIn.user_message(), "You are not logged in");
    }

    #[test]
    fn test_decode_error_names_target() {
        let source = serde_json::from_str::<u32>("\"x\"").unwrap_err();
        let error = ApiError::decode("cart", source);
        assert!(error.to_string().starts_with("Failed to decode cart:"));
    }
}
