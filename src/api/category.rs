//! Category operations.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::api::endpoints::{self, build_path};
use crate::api::types::{Page, PageQuery};
use crate::api::{page_of, report, send, ApiError};
use crate::clients::{HttpClient, HttpMethod, HttpRequest, ResponseEnvelope};

/// Category operations.
#[derive(Clone, Copy, Debug)]
pub struct CategoryApi<'a> {
    client: &'a HttpClient,
}

impl<'a> CategoryApi<'a> {
    pub(crate) const fn new(client: &'a HttpClient) -> Self {
        Self { client }
    }

    /// Fetches every category.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the request fails.
    pub async fn list(&self) -> Result<ResponseEnvelope, ApiError> {
        send(
            self.client,
            HttpRequest::builder(HttpMethod::Get, endpoints::category::ALL),
        )
        .await
    }

    /// Fetches one category.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the request fails.
    pub async fn get(&self, id: &str) -> Result<ResponseEnvelope, ApiError> {
        send(
            self.client,
            HttpRequest::builder(
                HttpMethod::Get,
                build_path(endpoints::category::BY_ID, &[("id", id)]),
            ),
        )
        .await
    }

    /// Lists a page of categories.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the request fails, or
    /// [`ApiError::Decode`] if an item does not deserialize as `T`.
    pub async fn paginate<T: DeserializeOwned>(
        &self,
        query: &PageQuery,
    ) -> Result<Page<T>, ApiError> {
        let envelope = send(
            self.client,
            HttpRequest::builder(HttpMethod::Get, endpoints::category::PAGINATION)
                .query(query.to_query()),
        )
        .await?;
        page_of(envelope, "category page")
    }

    /// Creates a category.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the backend rejects the category.
    pub async fn create(&self, category: Value) -> Result<ResponseEnvelope, ApiError> {
        let result = send(
            self.client,
            HttpRequest::builder(HttpMethod::Post, endpoints::category::CREATE).json(category),
        )
        .await;
        report(self.client.ui(), result, Some("Category created"))
    }

    /// Applies a partial update to a category.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the backend rejects the update.
    pub async fn update(&self, id: &str, changes: Value) -> Result<ResponseEnvelope, ApiError> {
        let result = send(
            self.client,
            HttpRequest::builder(
                HttpMethod::Patch,
                build_path(endpoints::category::BY_ID, &[("id", id)]),
            )
            .json(changes),
        )
        .await;
        report(self.client.ui(), result, Some("Category updated"))
    }

    /// Deletes a category.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the backend refuses.
    pub async fn delete(&self, id: &str) -> Result<ResponseEnvelope, ApiError> {
        let result = send(
            self.client,
            HttpRequest::builder(
                HttpMethod::Delete,
                build_path(endpoints::category::BY_ID, &[("id", id)]),
            ),
        )
        .await;
        report(self.client.ui(), result, Some("Category deleted"))
    }
}
