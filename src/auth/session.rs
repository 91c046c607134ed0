//! Session state for an authenticated storefront user.
//!
//! This module provides the [`Session`] snapshot read from the
//! [`TokenStore`](crate::auth::TokenStore), and helpers for inspecting the
//! access token's expiry claim.

use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::Deserialize;

use crate::auth::UserProfile;

/// Claims read from an access token. Only `exp` matters to the client.
#[derive(Debug, Deserialize)]
struct AccessClaims {
    #[serde(default)]
    exp: Option<i64>,
}

/// A snapshot of the client-held session: tokens plus the cached profile.
///
/// Sessions are created on successful login and destroyed on logout or on
/// any `401` response. The snapshot itself is read-only; mutate the session
/// through [`TokenStore`](crate::auth::TokenStore).
///
/// # Example
///
/// ```rust
/// use organic_store::Session;
///
/// let session = Session::new("access".to_string(), Some("refresh".to_string()), None);
///
/// assert!(session.is_active());
/// // Opaque (non-JWT) tokens carry no expiry
/// assert!(!session.expired());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    /// The bearer token attached to authenticated requests.
    pub access_token: String,

    /// The token used to obtain a new access token.
    pub refresh_token: Option<String>,

    /// The cached user profile, `None` until the profile has been fetched.
    pub user: Option<UserProfile>,
}

impl Session {
    /// Creates a new session snapshot.
    #[must_use]
    pub const fn new(
        access_token: String,
        refresh_token: Option<String>,
        user: Option<UserProfile>,
    ) -> Self {
        Self {
            access_token,
            refresh_token,
            user,
        }
    }

    /// Returns the access token's expiry time, if it is a JWT with an `exp` claim.
    ///
    /// The signature is not verified; the client only uses this to decide
    /// when to refresh, the backend remains the authority.
    #[must_use]
    pub fn access_token_expires_at(&self) -> Option<DateTime<Utc>> {
        token_expires_at(&self.access_token)
    }

    /// Returns `true` if the access token carries an expiry that has passed.
    ///
    /// Tokens without a readable `exp` claim are considered never expired.
    #[must_use]
    pub fn expired(&self) -> bool {
        self.access_token_expires_at()
            .is_some_and(|expires| Utc::now() >= expires)
    }

    /// Returns `true` if the session has an access token that has not expired.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.access_token.is_empty() && !self.expired()
    }

    /// Returns `true` if the cached user holds the admin role.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(UserProfile::is_admin)
    }
}

/// Reads the `exp` claim from a JWT without verifying its signature.
pub(crate) fn token_expires_at(token: &str) -> Option<DateTime<Utc>> {
    let mut validation = Validation::default();
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    let data = decode::<AccessClaims>(token, &DecodingKey::from_secret(&[]), &validation).ok()?;
    DateTime::from_timestamp(data.claims.exp?, 0)
}

// Verify Session is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Session>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde::Serialize;

    #[derive(Serialize)]
    struct TestClaims {
        sub: String,
        exp: i64,
    }

    fn jwt_expiring_at(exp: DateTime<Utc>) -> String {
        let claims = TestClaims {
            sub: "user-1".to_string(),
            exp: exp.timestamp(),
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"backend-secret"),
        )
        .unwrap()
    }

    #[test]
    fn test_expiry_read_from_jwt_without_secret() {
        let exp = Utc::now() + Duration::hours(1);
        let session = Session::new(jwt_expiring_at(exp), None, None);

        let read = session.access_token_expires_at().unwrap();
        assert_eq!(read.timestamp(), exp.timestamp());
        assert!(!session.expired());
        assert!(session.is_active());
    }

    #[test]
    fn test_expired_jwt_makes_session_inactive() {
        let session = Session::new(
            jwt_expiring_at(Utc::now() - Duration::minutes(5)),
            Some("refresh".to_string()),
            None,
        );

        assert!(session.expired());
        assert!(!session.is_active());
    }

    #[test]
    fn test_opaque_token_never_expires() {
        let session = Session::new("not-a-jwt".to_string(), None, None);
        assert!(session.access_token_expires_at().is_none());
        assert!(!session.expired());
    }

    #[test]
    fn test_empty_token_is_inactive() {
        let session = Session::new(String::new(), None, None);
        assert!(!session.is_active());
    }

    #[test]
    fn test_is_admin_reads_cached_user_role() {
        let admin = UserProfile {
            role: Some("admin".to_string()),
            ..UserProfile::default()
        };
        let session = Session::new("t".to_string(), None, Some(admin));
        assert!(session.is_admin());

        let anonymous = Session::new("t".to_string(), None, None);
        assert!(!anonymous.is_admin());
    }
}
