//! Product catalogue and product administration.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::api::endpoints::{self, build_path};
use crate::api::types::{Page, PageQuery};
use crate::api::{page_of, report, send, ApiError};
use crate::clients::{
    FileUpload, HttpClient, HttpMethod, HttpRequest, MultipartForm, ResponseEnvelope,
};

/// Product operations.
///
/// # Example
///
/// ```rust,ignore
/// use organic_store::api::PageQuery;
/// use serde_json::Value;
///
/// let page: Page<Value> = store
///     .products()
///     .list(&PageQuery::default().search("kale"))
///     .await?;
///
/// for product in &page.items {
///     println!("{}", product["name"]);
/// }
/// ```
#[derive(Clone, Copy, Debug)]
pub struct ProductApi<'a> {
    client: &'a HttpClient,
}

impl<'a> ProductApi<'a> {
    pub(crate) const fn new(client: &'a HttpClient) -> Self {
        Self { client }
    }

    /// Lists a page of products. An empty search term is not sent.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the request fails, or
    /// [`ApiError::Decode`] if an item does not deserialize as `T`.
    pub async fn list<T: DeserializeOwned>(&self, query: &PageQuery) -> Result<Page<T>, ApiError> {
        let envelope = send(
            self.client,
            HttpRequest::builder(HttpMethod::Get, endpoints::product::PAGINATION)
                .query(query.to_query()),
        )
        .await?;
        page_of(envelope, "product page")
    }

    /// Fetches one product.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the request fails.
    pub async fn get(&self, id: &str) -> Result<ResponseEnvelope, ApiError> {
        send(
            self.client,
            HttpRequest::builder(
                HttpMethod::Get,
                build_path(endpoints::product::BY_ID, &[("id", id)]),
            ),
        )
        .await
    }

    /// Fetches every product without pagination.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the request fails.
    pub async fn all(&self) -> Result<ResponseEnvelope, ApiError> {
        send(
            self.client,
            HttpRequest::builder(HttpMethod::Get, endpoints::product::ALL),
        )
        .await
    }

    /// Creates a product.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the backend rejects the product.
    pub async fn create(&self, product: Value) -> Result<ResponseEnvelope, ApiError> {
        let result = send(
            self.client,
            HttpRequest::builder(HttpMethod::Post, endpoints::product::CREATE).json(product),
        )
        .await;
        report(self.client.ui(), result, Some("Product created"))
    }

    /// Applies a partial update to a product.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the backend rejects the update.
    pub async fn update(&self, id: &str, changes: Value) -> Result<ResponseEnvelope, ApiError> {
        let result = send(
            self.client,
            HttpRequest::builder(
                HttpMethod::Patch,
                build_path(endpoints::product::BY_ID, &[("id", id)]),
            )
            .json(changes),
        )
        .await;
        report(self.client.ui(), result, Some("Product updated"))
    }

    /// Deletes a product.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the backend refuses.
    pub async fn delete(&self, id: &str) -> Result<ResponseEnvelope, ApiError> {
        let result = send(
            self.client,
            HttpRequest::builder(
                HttpMethod::Delete,
                build_path(endpoints::product::BY_ID, &[("id", id)]),
            ),
        )
        .await;
        report(self.client.ui(), result, Some("Product deleted"))
    }

    /// Uploads images for a product, each as a multipart field `files`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the upload is rejected.
    pub async fn upload_images(
        &self,
        id: &str,
        files: Vec<FileUpload>,
    ) -> Result<ResponseEnvelope, ApiError> {
        let form = files
            .into_iter()
            .fold(MultipartForm::new(), |form, file| form.file("files", file));

        let result = send(
            self.client,
            HttpRequest::builder(
                HttpMethod::Post,
                build_path(endpoints::product::IMAGES, &[("id", id)]),
            )
            .multipart(form),
        )
        .await;
        report(self.client.ui(), result, Some("Images uploaded"))
    }

    /// Lists a product's images.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the request fails.
    pub async fn images(&self, id: &str) -> Result<ResponseEnvelope, ApiError> {
        send(
            self.client,
            HttpRequest::builder(
                HttpMethod::Get,
                build_path(endpoints::product::IMAGES, &[("id", id)]),
            ),
        )
        .await
    }

    /// Marks one image as the product's primary image.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the backend refuses.
    pub async fn set_primary_image(
        &self,
        product_id: &str,
        image_id: &str,
    ) -> Result<ResponseEnvelope, ApiError> {
        let result = send(
            self.client,
            HttpRequest::builder(
                HttpMethod::Patch,
                build_path(
                    endpoints::product::PRIMARY_IMAGE,
                    &[("product_id", product_id), ("image_id", image_id)],
                ),
            ),
        )
        .await;
        report(self.client.ui(), result, Some("Primary image updated"))
    }

    /// Deletes one image of a product.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the backend refuses.
    pub async fn delete_image(
        &self,
        product_id: &str,
        image_id: &str,
    ) -> Result<ResponseEnvelope, ApiError> {
        let result = send(
            self.client,
            HttpRequest::builder(
                HttpMethod::Delete,
                build_path(
                    endpoints::product::IMAGE,
                    &[("product_id", product_id), ("image_id", image_id)],
                ),
            ),
        )
        .await;
        report(self.client.ui(), result, Some("Image deleted"))
    }
}
