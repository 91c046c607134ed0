//! The logged-in user's wishlist.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::api::endpoints::{self, build_path};
use crate::api::types::{Page, PageQuery};
use crate::api::{page_of, report, send, ApiError};
use crate::clients::{HttpClient, HttpMethod, HttpRequest, ResponseEnvelope};
use crate::serde_ext::id_from_value;

/// How many wishlist entries [`WishlistApi::contains`] scans.
const CONTAINS_SCAN_LIMIT: u32 = 200;

/// Wishlist operations. All of them require a stored access token.
#[derive(Clone, Copy, Debug)]
pub struct WishlistApi<'a> {
    client: &'a HttpClient,
}

impl<'a> WishlistApi<'a> {
    pub(crate) const fn new(client: &'a HttpClient) -> Self {
        Self { client }
    }

    fn ensure_logged_in(&self) -> Result<(), ApiError> {
        if self.client.tokens().is_authenticated() {
            Ok(())
        } else {
            Err(ApiError::NotLoggedIn)
        }
    }

    /// Adds the product to the wishlist, or removes it if already there.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotLoggedIn`] without contacting the backend if no
    /// access token is stored, or [`ApiError::Http`] if the backend refuses.
    pub async fn toggle(&self, product_id: &str) -> Result<ResponseEnvelope, ApiError> {
        let result = match self.ensure_logged_in() {
            Ok(()) => {
                send(
                    self.client,
                    HttpRequest::builder(
                        HttpMethod::Post,
                        build_path(endpoints::wishlist::TOGGLE, &[("product_id", product_id)]),
                    ),
                )
                .await
            }
            Err(e) => Err(e),
        };
        report(self.client.ui(), result, Some("Wishlist updated"))
    }

    /// Lists wishlist entries.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotLoggedIn`] if no access token is stored,
    /// [`ApiError::Http`] if the request fails, or [`ApiError::Decode`] if an
    /// item does not deserialize as `T`.
    pub async fn list<T: DeserializeOwned>(&self, query: &PageQuery) -> Result<Page<T>, ApiError> {
        self.fetch(query.to_query()).await
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        query: Vec<(String, String)>,
    ) -> Result<Page<T>, ApiError> {
        self.ensure_logged_in()?;

        let envelope = send(
            self.client,
            HttpRequest::builder(HttpMethod::Get, endpoints::wishlist::LIST).query(query),
        )
        .await?;
        page_of(envelope, "wishlist page")
    }

    /// Returns `true` if the product is in the wishlist.
    ///
    /// Scans the first 200 entries. Any failure, including not being logged
    /// in, reads as `false`.
    pub async fn contains(&self, product_id: &str) -> bool {
        let query = vec![("limit".to_string(), CONTAINS_SCAN_LIMIT.to_string())];
        match self.fetch::<Value>(query).await {
            Ok(page) => page
                .items
                .iter()
                .any(|item| entry_product_id(item).as_deref() == Some(product_id)),
            Err(e) => {
                tracing::debug!(error = %e, "Wishlist lookup failed");
                false
            }
        }
    }
}

/// Reads the product id of a wishlist entry: `product._id`, `product.id`
/// or `productId`, in that order.
fn entry_product_id(entry: &Value) -> Option<String> {
    let product = entry.get("product");
    product
        .and_then(|p| p.get("_id"))
        .and_then(id_from_value)
        .or_else(|| product.and_then(|p| p.get("id")).and_then(id_from_value))
        .or_else(|| entry.get("productId").and_then(id_from_value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_entry_product_id_lookup_order() {
        assert_eq!(
            entry_product_id(&json!({"product": {"_id": "a", "id": "b"}, "productId": "c"})),
            Some("a".to_string())
        );
        assert_eq!(
            entry_product_id(&json!({"product": {"id": 5}})),
            Some("5".to_string())
        );
        assert_eq!(
            entry_product_id(&json!({"productId": "c"})),
            Some("c".to_string())
        );
        assert_eq!(entry_product_id(&json!({"product": "c"})), None);
    }
}
