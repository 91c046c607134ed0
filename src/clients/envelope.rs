//! Response normalization for the Organic Store backend.
//!
//! Every response, whatever the endpoint, is reduced to a
//! [`ResponseEnvelope`] on success or an
//! [`HttpResponseError`](crate::clients::HttpResponseError) on failure.
//!
//! # Body Shape
//!
//! The backend wraps payloads as `{ statusCode, message, data }`. Each
//! field is optional:
//!
//! - `statusCode` overrides the HTTP status when it is a non-zero number
//! - `message` may be a string, an array of validation errors or an object
//! - `data` is the payload; when absent the whole body is the payload
//!
//! Unparseable or empty bodies are treated as `{}`.

use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::clients::errors::HttpResponseError;

/// Message used for successful responses that carry none.
pub const DEFAULT_SUCCESS_MESSAGE: &str = "Success";

/// Message used for failed responses that carry none.
pub const DEFAULT_ERROR_MESSAGE: &str = "Something went wrong";

/// The uniform result of a successful call.
///
/// # Example
///
/// ```rust
/// use organic_store::clients::ResponseEnvelope;
/// use serde_json::json;
///
/// let envelope = ResponseEnvelope::from_body(200, json!({
///     "statusCode": 201,
///     "message": "Created",
///     "data": {"id": "p1"}
/// }));
///
/// assert!(envelope.ok);
/// assert_eq!(envelope.status_code, 201);
/// assert_eq!(envelope.data["id"], "p1");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ResponseEnvelope {
    /// Always `true` for envelopes returned to callers.
    pub ok: bool,
    /// `statusCode` from the body, or the HTTP status.
    pub status_code: u16,
    /// The backend's message, or `"Success"`.
    pub message: String,
    /// `data` from the body when present, otherwise the whole body.
    pub data: Value,
}

impl ResponseEnvelope {
    /// Builds a success envelope from a 2xx response body.
    #[must_use]
    pub fn from_body(http_status: u16, mut body: Value) -> Self {
        let status_code = status_code(&body, http_status);
        let message = body
            .get("message")
            .and_then(normalize_message)
            .unwrap_or_else(|| DEFAULT_SUCCESS_MESSAGE.to_string());
        let data = match body.get_mut("data").map(Value::take) {
            Some(data) if !data.is_null() => data,
            _ => body,
        };

        Self {
            ok: true,
            status_code,
            message,
            data,
        }
    }

    /// Deserializes the payload into `T`.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if the payload does not match `T`.
    pub fn data_as<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        T::deserialize(&self.data)
    }

    /// Consumes the envelope and deserializes the payload into `T`.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if the payload does not match `T`.
    pub fn into_data<T: DeserializeOwned>(self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.data)
    }
}

/// Where a response lands after normalization.
#[derive(Debug)]
pub(crate) enum Outcome {
    /// 2xx.
    Success(ResponseEnvelope),
    /// 401: the caller must tear the session down.
    AuthExpired(HttpResponseError),
    /// Any other status.
    Failure(HttpResponseError),
}

/// Classifies a response by HTTP status and builds the matching result.
pub(crate) fn classify(http_status: u16, body: Value) -> Outcome {
    if (200..300).contains(&http_status) {
        return Outcome::Success(ResponseEnvelope::from_body(http_status, body));
    }

    let error = HttpResponseError {
        code: status_code(&body, http_status),
        http_status,
        message: body
            .get("message")
            .and_then(normalize_message)
            .unwrap_or_else(|| DEFAULT_ERROR_MESSAGE.to_string()),
    };

    if http_status == 401 {
        Outcome::AuthExpired(error)
    } else {
        Outcome::Failure(error)
    }
}

/// Parses a response body, treating empty or malformed bodies as `{}`.
pub(crate) fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return json!({});
    }
    serde_json::from_str(text).unwrap_or_else(|_| json!({}))
}

/// Flattens a backend `message` field into a single string.
///
/// Strings are used as-is, arrays (validation errors) are joined with
/// `", "`, objects use their own `message` field or their JSON text.
/// Returns `None` for null and empty values.
///
/// # Example
///
/// ```rust
/// use organic_store::clients::normalize_message;
/// use serde_json::json;
///
/// let message = json!(["email must be an email", {"message": "password too short"}]);
/// assert_eq!(
///     normalize_message(&message).as_deref(),
///     Some("email must be an email, password too short")
/// );
/// ```
#[must_use]
pub fn normalize_message(message: &Value) -> Option<String> {
    let text = match message {
        Value::Null => return None,
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Object(_) => object_message(item),
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(_) => object_message(message),
        other => other.to_string(),
    };

    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

fn object_message(value: &Value) -> String {
    match value.get("message") {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        _ => value.to_string(),
    }
}

fn status_code(body: &Value, http_status: u16) -> u16 {
    body.get("statusCode")
        .and_then(Value::as_u64)
        .filter(|code| *code != 0)
        .and_then(|code| u16::try_from(code).ok())
        .unwrap_or(http_status)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_uses_data_field_when_present() {
        let envelope = ResponseEnvelope::from_body(200, json!({"message": "OK", "data": [1, 2]}));

        assert!(envelope.ok);
        assert_eq!(envelope.status_code, 200);
        assert_eq!(envelope.message, "OK");
        assert_eq!(envelope.data, json!([1, 2]));
    }

    #[test]
    fn test_success_uses_whole_body_without_data_field() {
        let body = json!({"payUrl": "https://pay.example/1"});
        let envelope = ResponseEnvelope::from_body(200, body.clone());

        assert_eq!(envelope.message, DEFAULT_SUCCESS_MESSAGE);
        assert_eq!(envelope.data, body);
    }

    #[test]
    fn test_status_code_prefers_body_field() {
        let envelope = ResponseEnvelope::from_body(200, json!({"statusCode": 201}));
        assert_eq!(envelope.status_code, 201);

        let zero = ResponseEnvelope::from_body(200, json!({"statusCode": 0}));
        assert_eq!(zero.status_code, 200);

        let text = ResponseEnvelope::from_body(204, json!({"statusCode": "201"}));
        assert_eq!(text.status_code, 204);
    }

    #[test]
    fn test_classify_failure_uses_default_message() {
        match classify(500, json!({})) {
            Outcome::Failure(e) => {
                assert_eq!(e.code, 500);
                assert_eq!(e.message, DEFAULT_ERROR_MESSAGE);
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn test_classify_401_is_auth_expired() {
        match classify(401, json!({"message": "Unauthorized", "statusCode": 401})) {
            Outcome::AuthExpired(e) => {
                assert_eq!(e.code, 401);
                assert_eq!(e.message, "Unauthorized");
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn test_classify_joins_validation_errors() {
        let body = json!({"statusCode": 400, "message": ["email must be an email", "password is too weak"]});
        match classify(400, body) {
            Outcome::Failure(e) => {
                assert_eq!(e.message, "email must be an email, password is too weak");
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn test_normalize_message_shapes() {
        assert_eq!(normalize_message(&json!(null)), None);
        assert_eq!(normalize_message(&json!("")), None);
        assert_eq!(normalize_message(&json!([])), None);
        assert_eq!(normalize_message(&json!(42)).as_deref(), Some("42"));
        assert_eq!(
            normalize_message(&json!({"message": "Nested"})).as_deref(),
            Some("Nested")
        );
        assert_eq!(
            normalize_message(&json!({"code": "E1"})).as_deref(),
            Some(r#"{"code":"E1"}"#)
        );
        assert_eq!(
            normalize_message(&json!([{"field": "x"}, 3])).as_deref(),
            Some(r#"{"field":"x"}, 3"#)
        );
    }

    #[test]
    fn test_parse_body_tolerates_garbage() {
        assert_eq!(parse_body(""), json!({}));
        assert_eq!(parse_body("<html>502</html>"), json!({}));
        assert_eq!(parse_body(r#"{"a":1}"#), json!({"a": 1}));
    }

    #[test]
    fn test_data_as_deserializes_payload() {
        #[derive(serde::Deserialize)]
        struct Item {
            quantity: u32,
        }

        let envelope = ResponseEnvelope::from_body(200, json!({"data": {"quantity": 3}}));
        let item: Item = envelope.data_as().unwrap();
        assert_eq!(item.quantity, 3);

        let items: Result<Vec<Item>, _> = envelope.into_data();
        assert!(items.is_err());
    }
}
