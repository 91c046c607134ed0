//! HTTP client types for Organic Store API communication.
//!
//! This module provides the transport layer every storefront operation goes
//! through. It builds requests, attaches the session token and normalizes
//! responses into a single envelope shape.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`HttpClient`]: The async HTTP client for API communication
//! - [`HttpRequest`]: A request to be sent to the API
//! - [`HttpMethod`]: Supported HTTP methods (GET, POST, PUT, PATCH, DELETE)
//! - [`RequestBody`]: JSON or multipart request bodies
//! - [`ResponseEnvelope`]: The normalized result of a successful call
//! - [`HttpError`]: Everything that can go wrong on the way
//!
//! # Session Expiry
//!
//! A `401` from any endpoint clears the session before `request` returns.
//! Unless the host reports it is already on the login page, the user is
//! notified and a redirect to the login page is scheduled.
//!
//! # Example
//!
//! ```rust,ignore
//! use organic_store::clients::{HttpRequest, HttpMethod};
//! use serde_json::json;
//!
//! let request = HttpRequest::builder(HttpMethod::Patch, "/cart/item-1")
//!     .json(json!({"quantity": 3}))
//!     .build()?;
//!
//! let envelope = client.request(request).await?;
//! assert!(envelope.ok);
//! ```

mod envelope;
mod errors;
mod http_client;
mod http_request;

pub use envelope::{
    normalize_message, ResponseEnvelope, DEFAULT_ERROR_MESSAGE, DEFAULT_SUCCESS_MESSAGE,
};
pub use errors::{HttpError, HttpResponseError, InvalidHttpRequestError, NETWORK_ERROR_MESSAGE};
pub use http_client::{HttpClient, CLIENT_VERSION, SESSION_EXPIRED_MESSAGE};
pub use http_request::{
    FileUpload, HttpMethod, HttpRequest, HttpRequestBuilder, MultipartForm, RequestBody,
};
