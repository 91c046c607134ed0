//! Session state for the Organic Store client.
//!
//! This module owns everything the client remembers between requests: the
//! token pair, the cached user profile and the guest cart.
//!
//! # Overview
//!
//! - [`KeyValueStore`]: The persistence boundary injected by the host
//! - [`MemoryStore`] / [`JsonFileStore`]: Ready-made stores
//! - [`TokenStore`]: The single owner of the session keys
//! - [`Session`]: A read-only snapshot of the current session
//! - [`UserProfile`]: The cached profile of the logged-in user
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use organic_store::auth::{MemoryStore, TokenStore};
//! use organic_store::StorageKeys;
//!
//! let tokens = TokenStore::new(Arc::new(MemoryStore::new()), StorageKeys::default());
//! tokens.save("access", "refresh");
//!
//! let session = tokens.session().unwrap();
//! assert_eq!(session.access_token, "access");
//! assert!(!session.is_admin());
//! ```

pub mod session;
mod store;
mod user;

pub use session::Session;
pub use store::{GuestCartItem, JsonFileStore, KeyValueStore, MemoryStore, TokenStore};
pub use user::{UserProfile, ADMIN_ROLE};
