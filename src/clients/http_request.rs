//! HTTP request types for the Organic Store client.
//!
//! This module provides the [`HttpRequest`] type and its builder for
//! constructing requests to the backend.

use std::collections::HashMap;
use std::fmt;

use crate::clients::errors::InvalidHttpRequestError;

/// HTTP methods used by the backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    /// HTTP GET method for retrieving resources.
    Get,
    /// HTTP POST method for creating resources and actions.
    Post,
    /// HTTP PUT method for replacing resources.
    Put,
    /// HTTP PATCH method for partial updates.
    Patch,
    /// HTTP DELETE method for removing resources.
    Delete,
}

impl HttpMethod {
    /// Returns the upper-case method name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A file to upload in a multipart request.
///
/// # Example
///
/// ```rust
/// use organic_store::clients::FileUpload;
///
/// let avatar = FileUpload::new("me.png", b"\x89PNG...".to_vec())
///     .mime_type("image/png");
///
/// assert_eq!(avatar.file_name, "me.png");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileUpload {
    /// File name reported to the backend.
    pub file_name: String,
    /// MIME type, if known.
    pub mime_type: Option<String>,
    /// File contents.
    pub bytes: Vec<u8>,
}

impl FileUpload {
    /// Creates an upload with no MIME type.
    #[must_use]
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: None,
            bytes: bytes.into(),
        }
    }

    /// Sets the MIME type.
    #[must_use]
    pub fn mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }
}

/// A multipart form made of named file fields.
///
/// Converted to a transport form only when the request is sent, so requests
/// stay cloneable.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MultipartForm {
    /// `(field name, file)` pairs in insertion order.
    pub files: Vec<(String, FileUpload)>,
}

impl MultipartForm {
    /// Creates an empty form.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a file under `field`. Repeating a field sends several files.
    #[must_use]
    pub fn file(mut self, field: impl Into<String>, file: FileUpload) -> Self {
        self.files.push((field.into(), file));
        self
    }
}

/// The body of a request.
#[derive(Clone, Debug, PartialEq)]
pub enum RequestBody {
    /// A JSON document, sent with `Content-Type: application/json`.
    Json(serde_json::Value),
    /// A multipart form; the transport sets the boundary header.
    Multipart(MultipartForm),
}

/// An HTTP request to be sent to the backend.
///
/// Use [`HttpRequest::builder`] to construct requests with the builder pattern.
///
/// # Example
///
/// ```rust
/// use organic_store::clients::{HttpRequest, HttpMethod};
/// use serde_json::json;
///
/// // GET request with query parameters
/// let list = HttpRequest::builder(HttpMethod::Get, "/product/pagination")
///     .query_param("page", "1")
///     .query_param("limit", "12")
///     .build()
///     .unwrap();
///
/// // Public POST request with JSON body
/// let login = HttpRequest::builder(HttpMethod::Post, "/auth/login")
///     .json(json!({"email": "a@b.c", "password": "secret"}))
///     .requires_auth(false)
///     .build()
///     .unwrap();
///
/// assert!(!login.requires_auth);
/// assert_eq!(list.query.len(), 2);
/// ```
#[derive(Clone, Debug)]
pub struct HttpRequest {
    /// The HTTP method for this request.
    pub http_method: HttpMethod,
    /// The endpoint, relative to the API root (e.g. `/cart`).
    pub endpoint: String,
    /// The request body, if any.
    pub body: Option<RequestBody>,
    /// Query parameters in the order they were added.
    pub query: Vec<(String, String)>,
    /// Additional headers to include in the request.
    pub extra_headers: Option<HashMap<String, String>>,
    /// Whether to attach the bearer token (default: `true`).
    pub requires_auth: bool,
}

impl HttpRequest {
    /// Creates a new builder for constructing an `HttpRequest`.
    #[must_use]
    pub fn builder(method: HttpMethod, endpoint: impl Into<String>) -> HttpRequestBuilder {
        HttpRequestBuilder::new(method, endpoint)
    }

    /// Returns `true` if the body is a multipart form.
    #[must_use]
    pub const fn is_multipart(&self) -> bool {
        matches!(self.body, Some(RequestBody::Multipart(_)))
    }

    /// Validates the request, ensuring it meets all requirements.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if:
    /// - `endpoint` does not start with `/`
    /// - `http_method` is `Get` and a body is present
    pub fn verify(&self) -> Result<(), InvalidHttpRequestError> {
        if !self.endpoint.starts_with('/') {
            return Err(InvalidHttpRequestError::InvalidEndpoint {
                endpoint: self.endpoint.clone(),
            });
        }

        if self.http_method == HttpMethod::Get && self.body.is_some() {
            return Err(InvalidHttpRequestError::BodyNotAllowed {
                method: self.http_method.to_string(),
            });
        }

        Ok(())
    }
}

/// Builder for constructing [`HttpRequest`] instances.
#[derive(Debug)]
pub struct HttpRequestBuilder {
    http_method: HttpMethod,
    endpoint: String,
    body: Option<RequestBody>,
    query: Vec<(String, String)>,
    extra_headers: Option<HashMap<String, String>>,
    requires_auth: bool,
}

impl HttpRequestBuilder {
    fn new(method: HttpMethod, endpoint: impl Into<String>) -> Self {
        Self {
            http_method: method,
            endpoint: endpoint.into(),
            body: None,
            query: Vec::new(),
            extra_headers: None,
            requires_auth: true,
        }
    }

    /// Sets a JSON body.
    #[must_use]
    pub fn json(mut self, body: impl Into<serde_json::Value>) -> Self {
        self.body = Some(RequestBody::Json(body.into()));
        self
    }

    /// Sets a multipart body.
    #[must_use]
    pub fn multipart(mut self, form: MultipartForm) -> Self {
        self.body = Some(RequestBody::Multipart(form));
        self
    }

    /// Appends query parameters, keeping their order.
    #[must_use]
    pub fn query<I, K, V>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.query
            .extend(params.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Appends a single query parameter.
    #[must_use]
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Adds a single extra header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Sets whether the bearer token is attached.
    #[must_use]
    pub const fn requires_auth(mut self, requires_auth: bool) -> Self {
        self.requires_auth = requires_auth;
        self
    }

    /// Builds the [`HttpRequest`], validating it in the process.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if the request fails validation.
    pub fn build(self) -> Result<HttpRequest, InvalidHttpRequestError> {
        let request = HttpRequest {
            http_method: self.http_method,
            endpoint: self.endpoint,
            body: self.body,
            query: self.query,
            extra_headers: self.extra_headers,
            requires_auth: self.requires_auth,
        };
        request.verify()?;
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_http_method_display() {
        assert_eq!(HttpMethod::Get.to_string(), "GET");
        assert_eq!(HttpMethod::Patch.to_string(), "PATCH");
        assert_eq!(HttpMethod::Delete.as_str(), "DELETE");
    }

    #[test]
    fn test_builder_defaults() {
        let request = HttpRequest::builder(HttpMethod::Get, "/cart")
            .build()
            .unwrap();

        assert_eq!(request.http_method, HttpMethod::Get);
        assert_eq!(request.endpoint, "/cart");
        assert!(request.body.is_none());
        assert!(request.query.is_empty());
        assert!(request.requires_auth);
        assert!(!request.is_multipart());
    }

    #[test]
    fn test_post_without_body_is_allowed() {
        let request = HttpRequest::builder(HttpMethod::Post, "/order/checkout-from-cart").build();
        assert!(request.is_ok());
    }

    #[test]
    fn test_verify_rejects_get_with_body() {
        let result = HttpRequest::builder(HttpMethod::Get, "/product")
            .json(json!({"a": 1}))
            .build();

        assert!(matches!(
            result,
            Err(InvalidHttpRequestError::BodyNotAllowed { method }) if method == "GET"
        ));
    }

    #[test]
    fn test_verify_rejects_relative_endpoint() {
        let result = HttpRequest::builder(HttpMethod::Delete, "cart").build();

        assert!(matches!(
            result,
            Err(InvalidHttpRequestError::InvalidEndpoint { endpoint }) if endpoint == "cart"
        ));
    }

    #[test]
    fn test_query_keeps_insertion_order() {
        let request = HttpRequest::builder(HttpMethod::Get, "/product/pagination")
            .query([("page", "1"), ("limit", "12")])
            .query_param("search", "")
            .build()
            .unwrap();

        let keys: Vec<&str> = request.query.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["page", "limit", "search"]);
    }

    #[test]
    fn test_multipart_body_is_detected() {
        let form = MultipartForm::new()
            .file("files", FileUpload::new("a.jpg", vec![1, 2]))
            .file("files", FileUpload::new("b.jpg", vec![3]).mime_type("image/jpeg"));
        let request = HttpRequest::builder(HttpMethod::Post, "/product/p1/images")
            .multipart(form)
            .build()
            .unwrap();

        assert!(request.is_multipart());
        match request.body {
            Some(RequestBody::Multipart(form)) => assert_eq!(form.files.len(), 2),
            other => panic!("unexpected body: {other:?}"),
        }
    }

    #[test]
    fn test_builder_with_extra_headers() {
        let request = HttpRequest::builder(HttpMethod::Get, "/product")
            .header("Accept-Language", "vi")
            .build()
            .unwrap();

        let headers = request.extra_headers.unwrap();
        assert_eq!(headers.get("Accept-Language"), Some(&"vi".to_string()));
    }
}
