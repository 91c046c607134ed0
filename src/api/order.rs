//! Checkout and order history.

use serde::de::DeserializeOwned;
use serde_json::json;

use crate::api::cart::CartApi;
use crate::api::endpoints::{self, build_path};
use crate::api::types::{Page, SkipTakeQuery};
use crate::api::{page_of, report, send, ApiError};
use crate::clients::{HttpClient, HttpMethod, HttpRequest, ResponseEnvelope};
use crate::ui::LoadingGuard;

/// Order operations.
#[derive(Clone, Copy, Debug)]
pub struct OrderApi<'a> {
    client: &'a HttpClient,
}

impl<'a> OrderApi<'a> {
    pub(crate) const fn new(client: &'a HttpClient) -> Self {
        Self { client }
    }

    /// Turns the current cart into an order.
    ///
    /// The loading indicator is shown while the request is in flight and the
    /// cart badge is refreshed on success.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the backend refuses (e.g. empty cart).
    pub async fn checkout(&self) -> Result<ResponseEnvelope, ApiError> {
        let result = {
            let _loading = LoadingGuard::show(self.client.ui());
            send(
                self.client,
                HttpRequest::builder(HttpMethod::Post, endpoints::order::CHECKOUT_FROM_CART)
                    .json(json!({})),
            )
            .await
        };

        let result = report(self.client.ui(), result, Some("Order placed"));
        if result.is_ok() {
            CartApi::new(self.client).refresh_badge().await;
        }
        result
    }

    /// Lists the current user's orders.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the request fails, or
    /// [`ApiError::Decode`] if an item does not deserialize as `T`.
    pub async fn list<T: DeserializeOwned>(
        &self,
        query: SkipTakeQuery,
    ) -> Result<Page<T>, ApiError> {
        let envelope = send(
            self.client,
            HttpRequest::builder(HttpMethod::Get, endpoints::order::PAGINATION)
                .query(query.to_query()),
        )
        .await?;
        page_of(envelope, "order page")
    }

    /// Fetches one order.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the request fails.
    pub async fn detail(&self, id: &str) -> Result<ResponseEnvelope, ApiError> {
        send(
            self.client,
            HttpRequest::builder(
                HttpMethod::Get,
                build_path(endpoints::order::BY_ID, &[("id", id)]),
            ),
        )
        .await
    }

    /// Deletes an order.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the backend refuses.
    pub async fn delete(&self, id: &str) -> Result<ResponseEnvelope, ApiError> {
        let result = send(
            self.client,
            HttpRequest::builder(
                HttpMethod::Delete,
                build_path(endpoints::order::BY_ID, &[("id", id)]),
            ),
        )
        .await;
        report(self.client.ui(), result, Some("Order deleted"))
    }
}
