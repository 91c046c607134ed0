//! Cached user profile for an authenticated storefront session.
//!
//! The backend owns the user schema; [`UserProfile`] types the handful of
//! fields the client reads (`id`, `email`, `role`, ...) and keeps everything
//! else in [`UserProfile::extra`] so the cached copy round-trips unchanged.
//!
//! # Example
//!
//! ```rust
//! use organic_store::UserProfile;
//!
//! let user: UserProfile = serde_json::from_value(serde_json::json!({
//!     "_id": "65f0c0ffee",
//!     "email": "jane@example.com",
//!     "role": "admin",
//!     "phone": "0901234567"
//! })).unwrap();
//!
//! assert_eq!(user.id.as_deref(), Some("65f0c0ffee"));
//! assert!(user.is_admin());
//! assert_eq!(user.extra["phone"], "0901234567");
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Role name that grants access to the admin pages.
pub const ADMIN_ROLE: &str = "admin";

/// A storefront user as returned by `GET /auth/profile`.
///
/// # Serialization
///
/// `id` accepts both `id` and `_id` and both string and numeric values.
/// `full_name` accepts `fullName` as well. Unknown fields are preserved in
/// [`extra`](Self::extra).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// The user identifier.
    #[serde(
        default,
        alias = "_id",
        deserialize_with = "crate::serde_ext::opt_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,

    /// The user's email address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// The user's display name.
    #[serde(default, alias = "fullName", skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,

    /// The user's role (e.g. `"admin"` or `"user"`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// URL of the user's avatar image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,

    /// All other profile fields, preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UserProfile {
    /// Returns `true` if the user holds the admin role.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role.as_deref() == Some(ADMIN_ROLE)
    }
}

// Verify UserProfile is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<UserProfile>();
};
