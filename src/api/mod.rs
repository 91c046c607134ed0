//! Storefront operations, one facade per backend area.
//!
//! Each facade method maps one logical operation to one request, one pass
//! through the response normalizer and a fixed side effect: a notification,
//! a cache update in the [`TokenStore`](crate::auth::TokenStore), a cart
//! badge refresh or a redirect.
//!
//! Facades borrow the [`HttpClient`] and are obtained from
//! [`Storefront`](crate::Storefront):
//!
//! - [`AuthApi`]: registration, login/logout, profile, token refresh
//! - [`ProductApi`]: catalogue browsing and product administration
//! - [`CartApi`]: the server-side cart and the cart badge
//! - [`CategoryApi`]: categories
//! - [`OrderApi`]: checkout and order history
//! - [`WishlistApi`]: the user's wishlist
//! - [`PaymentApi`]: MoMo payment initiation
//!
//! # Notifications
//!
//! Mutating operations notify a success message when they succeed. Every
//! operation that notifies on success also notifies the error message when
//! it fails, then returns the error. Nothing is retried.

mod auth;
mod cart;
mod category;
pub mod endpoints;
mod errors;
mod order;
mod payment;
mod product;
mod types;
mod wishlist;

pub use auth::AuthApi;
pub use cart::CartApi;
pub use category::CategoryApi;
pub use errors::ApiError;
pub use order::OrderApi;
pub use payment::PaymentApi;
pub use product::ProductApi;
pub use types::{MomoPayment, OtpPurpose, Page, PageQuery, SkipTakeQuery};
pub use wishlist::WishlistApi;

use serde::de::DeserializeOwned;

use crate::clients::{
    HttpClient, HttpError, HttpRequest, HttpRequestBuilder, InvalidHttpRequestError,
    ResponseEnvelope,
};
use crate::ui::{NoticeLevel, UiHooks};

impl From<InvalidHttpRequestError> for ApiError {
    fn from(error: InvalidHttpRequestError) -> Self {
        Self::Http(HttpError::InvalidRequest(error))
    }
}

/// Builds and sends a request.
pub(crate) async fn send(
    client: &HttpClient,
    request: HttpRequestBuilder,
) -> Result<ResponseEnvelope, ApiError> {
    let request: HttpRequest = request.build()?;
    Ok(client.request(request).await?)
}

/// Reads the payload of `envelope` as a list page.
pub(crate) fn page_of<T: DeserializeOwned>(
    envelope: ResponseEnvelope,
    what: &'static str,
) -> Result<Page<T>, ApiError> {
    Page::from_payload(envelope.data).map_err(|e| ApiError::decode(what, e))
}

/// Notifies the outcome of an operation and hands the result back.
///
/// `success` is shown when the operation succeeded; failures always show
/// the error's user-facing message.
pub(crate) fn report<T>(
    ui: &dyn UiHooks,
    result: Result<T, ApiError>,
    success: Option<&str>,
) -> Result<T, ApiError> {
    match &result {
        Ok(_) => {
            if let Some(message) = success {
                ui.notify(NoticeLevel::Success, message);
            }
        }
        Err(e) => ui.notify(NoticeLevel::Error, &e.user_message()),
    }
    result
}

/// Returns the first non-empty string among `keys` in `value`.
pub(crate) fn str_field(value: &serde_json::Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| {
        value
            .get(*key)
            .and_then(serde_json::Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    })
}
