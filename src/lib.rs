//! # Organic Store client
//!
//! An async client for the Organic Store REST backend: authentication,
//! catalogue browsing, cart, orders, wishlist and MoMo payment initiation.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`StoreConfig`] and [`StoreConfigBuilder`]
//! - Session persistence behind the [`KeyValueStore`](auth::KeyValueStore) trait,
//!   owned by a single [`TokenStore`]
//! - An HTTP client that attaches the bearer token and normalizes every
//!   response into a [`ResponseEnvelope`](clients::ResponseEnvelope)
//! - Session teardown and login redirect on any `401`
//! - One facade per backend area, reached through [`Storefront`]
//! - A [`UiHooks`](ui::UiHooks) trait for notifications, redirects, the cart
//!   badge and the loading indicator
//!
//! ## Quick Start
//!
//! ```rust
//! use organic_store::{BaseUrl, StoreConfig, Storefront};
//!
//! let config = StoreConfig::builder()
//!     .base_url(BaseUrl::new("http://localhost:8080").unwrap())
//!     .build()
//!     .unwrap();
//!
//! let store = Storefront::headless(&config).unwrap();
//! assert!(!store.auth().is_logged_in());
//! ```
//!
//! ## Shopping
//!
//! ```rust,ignore
//! use organic_store::api::{PageQuery, SkipTakeQuery};
//! use serde_json::Value;
//!
//! store.auth().login("jane@example.com", "hunter2").await?;
//!
//! let products: Page<Value> = store.products().list(&PageQuery::default()).await?;
//! let first = products.items[0]["_id"].as_str().unwrap();
//!
//! store.cart().add(first, 1).await?;
//! store.orders().checkout().await?;
//!
//! let orders: Page<Value> = store.orders().list(SkipTakeQuery::default()).await?;
//! ```
//!
//! ## Hosting
//!
//! The crate has no global state. The host injects where the session lives
//! and how UI side effects are performed:
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use organic_store::auth::JsonFileStore;
//!
//! let store = Storefront::new(
//!     &config,
//!     Arc::new(JsonFileStore::open("session.json")?),
//!     Arc::new(MyToasts::new()),
//! )?;
//! ```
//!
//! ## Logging
//!
//! The crate emits `tracing` events (`debug` per request, `warn` on session
//! teardown, `error` on transport failures) and never installs a subscriber.

pub mod api;
pub mod auth;
pub mod clients;
pub mod config;
pub mod error;
mod serde_ext;
mod storefront;
pub mod ui;

// Re-export public types at crate root for convenience
pub use auth::{Session, TokenStore, UserProfile};
pub use config::{ApiPrefix, BaseUrl, StorageKeys, StoreConfig, StoreConfigBuilder};
pub use error::ConfigError;
pub use storefront::Storefront;

// Re-export HTTP client types
pub use clients::{
    HttpClient, HttpError, HttpMethod, HttpRequest, HttpRequestBuilder, HttpResponseError,
    InvalidHttpRequestError, ResponseEnvelope,
};

// Re-export facade types
pub use api::{ApiError, Page};
