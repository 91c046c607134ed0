//! The server-side cart and the cart badge.

use serde_json::{json, Value};

use crate::api::endpoints::{self, build_path};
use crate::api::types::{Page, SkipTakeQuery};
use crate::api::{report, send, ApiError};
use crate::clients::{HttpClient, HttpMethod, HttpRequest, HttpRequestBuilder, ResponseEnvelope};

/// How many cart lines [`CartApi::get`] fetches.
const CART_PAGE: SkipTakeQuery = SkipTakeQuery::new(0, 100);

/// Cart operations.
///
/// Every successful mutation refreshes the cart badge.
///
/// # Example
///
/// ```rust,ignore
/// store.cart().add("65f0c0ffee", 2).await?;
///
/// let count = store.cart().refresh_badge().await;
/// assert_eq!(count, Some(2));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct CartApi<'a> {
    client: &'a HttpClient,
}

impl<'a> CartApi<'a> {
    pub(crate) const fn new(client: &'a HttpClient) -> Self {
        Self { client }
    }

    /// Adds `quantity` units of a product to the cart.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the backend refuses.
    pub async fn add(&self, product_id: &str, quantity: u32) -> Result<ResponseEnvelope, ApiError> {
        self.mutate(
            HttpRequest::builder(HttpMethod::Post, endpoints::cart::ROOT)
                .json(json!({ "productId": product_id, "quantity": quantity })),
            "Added to cart",
        )
        .await
    }

    /// Sets the quantity of a cart line.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the backend refuses.
    pub async fn update_item(
        &self,
        item_id: &str,
        quantity: u32,
    ) -> Result<ResponseEnvelope, ApiError> {
        self.mutate(
            HttpRequest::builder(
                HttpMethod::Patch,
                build_path(endpoints::cart::ITEM, &[("id", item_id)]),
            )
            .json(json!({ "quantity": quantity })),
            "Cart updated",
        )
        .await
    }

    /// Removes a cart line.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the backend refuses.
    pub async fn remove_item(&self, item_id: &str) -> Result<ResponseEnvelope, ApiError> {
        self.mutate(
            HttpRequest::builder(
                HttpMethod::Delete,
                build_path(endpoints::cart::ITEM, &[("id", item_id)]),
            ),
            "Removed from cart",
        )
        .await
    }

    /// Empties the cart.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the backend refuses.
    pub async fn clear(&self) -> Result<ResponseEnvelope, ApiError> {
        self.mutate(
            HttpRequest::builder(HttpMethod::Delete, endpoints::cart::ROOT),
            "Cart cleared",
        )
        .await
    }

    /// Fetches the cart (first 100 lines).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the request fails.
    pub async fn get(&self) -> Result<ResponseEnvelope, ApiError> {
        send(
            self.client,
            HttpRequest::builder(HttpMethod::Get, endpoints::cart::PAGINATION)
                .query(CART_PAGE.to_query()),
        )
        .await
    }

    /// Recomputes the total item count and pushes it to the cart badge.
    ///
    /// Returns the count, or `None` if the cart could not be read. Failures
    /// are logged and never propagated.
    pub async fn refresh_badge(&self) -> Option<u64> {
        let envelope = match self.get().await {
            Ok(envelope) => envelope,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to refresh cart badge");
                return None;
            }
        };

        let count = cart_item_count(envelope.data);
        self.client.ui().set_cart_count(count);
        Some(count)
    }

    async fn mutate(
        &self,
        request: HttpRequestBuilder,
        success: &str,
    ) -> Result<ResponseEnvelope, ApiError> {
        let result = report(self.client.ui(), send(self.client, request).await, Some(success));
        if result.is_ok() {
            self.refresh_badge().await;
        }
        result
    }
}

/// Sums `quantity` over the cart lines in a cart payload.
pub(crate) fn cart_item_count(payload: Value) -> u64 {
    Page::<Value>::from_payload(payload)
        .map(|page| {
            page.items
                .iter()
                .filter_map(|item| item.get("quantity").and_then(Value::as_u64))
                .sum()
        })
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_item_count_sums_quantities() {
        let payload = json!({"items": [{"quantity": 2}, {"quantity": 3}, {"name": "no qty"}]});
        assert_eq!(cart_item_count(payload), 5);
    }

    #[test]
    fn test_cart_item_count_of_empty_or_unknown_payload() {
        assert_eq!(cart_item_count(json!({"items": []})), 0);
        assert_eq!(cart_item_count(json!({})), 0);
        assert_eq!(cart_item_count(Value::Null), 0);
    }
}
