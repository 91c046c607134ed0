//! Shared request and response shapes for the storefront facades.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A page of list results.
///
/// The backend is inconsistent about list envelopes; [`Page::from_payload`]
/// accepts all of the shapes it produces:
///
/// - a bare array: `[..]`
/// - `{ "data": [..], "pagination": {..} }` (or `meta` instead of `pagination`)
/// - `{ "items": [..] }`
/// - one extra level of nesting: `{ "data": { "data": [..], "pagination": {..} } }`
///
/// Anything else reads as an empty page.
///
/// # Example
///
/// ```rust
/// use organic_store::api::Page;
/// use serde_json::{json, Value};
///
/// let page: Page<Value> = Page::from_payload(json!({
///     "data": [{"_id": "o1"}, {"_id": "o2"}],
///     "meta": {"total": 7}
/// })).unwrap();
///
/// assert_eq!(page.len(), 2);
/// assert_eq!(page.total(), Some(7));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Page<T = Value> {
    /// The items on this page.
    pub items: Vec<T>,
    /// The backend's pagination block, verbatim.
    pub pagination: Option<Value>,
}

impl<T> Page<T> {
    /// Returns the number of items on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the page holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the total item count reported by the backend, if any.
    #[must_use]
    pub fn total(&self) -> Option<u64> {
        let pagination = self.pagination.as_ref()?;
        ["total", "totalItems", "count"]
            .iter()
            .find_map(|key| pagination.get(*key).and_then(Value::as_u64))
    }
}

impl<T: DeserializeOwned> Page<T> {
    /// Normalizes a list payload into a page.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error of the first item that does not
    /// deserialize as `T`.
    pub fn from_payload(payload: Value) -> Result<Self, serde_json::Error> {
        let (items, pagination) = split_list(payload);
        let items = items
            .into_iter()
            .map(serde_json::from_value)
            .collect::<Result<Vec<T>, _>>()?;

        Ok(Self { items, pagination })
    }
}

fn split_list(payload: Value) -> (Vec<Value>, Option<Value>) {
    match payload {
        Value::Array(items) => (items, None),
        Value::Object(mut map) => {
            let pagination = map
                .remove("pagination")
                .filter(|v| !v.is_null())
                .or_else(|| map.remove("meta").filter(|v| !v.is_null()));
            let (items, inner_pagination) = match map.remove("data").or_else(|| map.remove("items"))
            {
                Some(inner @ (Value::Array(_) | Value::Object(_))) => split_list(inner),
                _ => (Vec::new(), None),
            };
            (items, pagination.or(inner_pagination))
        }
        _ => (Vec::new(), None),
    }
}

/// Page-number pagination: `page`, `limit` and an optional `search` term.
///
/// Defaults to the first page of 12 with no search term. An empty search
/// term is left out of the query string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageQuery {
    /// 1-based page number.
    pub page: u32,
    /// Page size.
    pub limit: u32,
    /// Free-text search; empty means no filter.
    pub search: String,
}

impl PageQuery {
    /// Creates a query for `page` with `limit` items.
    #[must_use]
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page,
            limit,
            search: String::new(),
        }
    }

    /// Sets the search term.
    #[must_use]
    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub(crate) fn to_query(&self) -> Vec<(String, String)> {
        vec![
            ("page".to_string(), self.page.to_string()),
            ("limit".to_string(), self.limit.to_string()),
            ("search".to_string(), self.search.clone()),
        ]
    }
}

impl Default for PageQuery {
    fn default() -> Self {
        Self::new(1, 12)
    }
}

/// Offset pagination: `skip` and `take`.
///
/// Defaults to the first 10 items.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SkipTakeQuery {
    /// Number of items to skip.
    pub skip: u32,
    /// Number of items to return.
    pub take: u32,
}

impl SkipTakeQuery {
    /// Creates a query skipping `skip` items and taking `take`.
    #[must_use]
    pub const fn new(skip: u32, take: u32) -> Self {
        Self { skip, take }
    }

    pub(crate) fn to_query(self) -> Vec<(String, String)> {
        vec![
            ("skip".to_string(), self.skip.to_string()),
            ("take".to_string(), self.take.to_string()),
        ]
    }
}

impl Default for SkipTakeQuery {
    fn default() -> Self {
        Self::new(0, 10)
    }
}

/// Purpose of a one-time password.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OtpPurpose {
    /// Verifying a new account.
    #[default]
    Register,
    /// Resetting a forgotten password.
    ForgotPassword,
}

/// Links returned when a MoMo payment is created.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MomoPayment {
    /// Web checkout page.
    #[serde(default)]
    pub pay_url: Option<String>,
    /// QR code payload or image URL.
    #[serde(default)]
    pub qr_code_url: Option<String>,
    /// Deep link into the MoMo app.
    #[serde(default)]
    pub deeplink: Option<String>,
    /// Deep link into the MoMo mini app.
    #[serde(default)]
    pub deeplink_mini_app: Option<String>,
}
