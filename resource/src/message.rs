//! Turning whatever a fetch failed with into a message fit for display.

use serde_json::Value;
use std::error::Error;

/// Shown when a failure carries nothing recognizable.
pub const FALLBACK_MESSAGE: &str = "An unexpected error occurred";

/// Error body sent by the backend, `{"message": ..}` or `{"error": ..}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BackendPayload {
    pub message: Option<String>,
    pub error: Option<String>,
}

impl BackendPayload {
    /// Picks the string fields out of a JSON object. Anything that is not an
    /// object yields `None`.
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let field = |name: &str| {
            object
                .get(name)
                .and_then(Value::as_str)
                .map(str::to_string)
        };
        Some(Self {
            message: field("message"),
            error: field("error"),
        })
    }

    /// Parses a response body. Bodies that are not JSON objects (plain text
    /// from a proxy, an HTML error page) yield `None`.
    pub fn from_json(body: &str) -> Option<Self> {
        serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|value| Self::from_value(&value))
    }
}

/// What a failure value exposes to [`extract_message`].
pub trait ErrorShape {
    /// Backend error body carried by the failure, if any.
    fn backend_payload(&self) -> Option<BackendPayload> {
        None
    }

    /// The value's own message, for error-like values.
    fn own_message(&self) -> Option<String> {
        None
    }
}

/// Human readable message for a failure.
///
/// First match wins: backend `message`, backend `error`, the value's own
/// message, [`FALLBACK_MESSAGE`]. Empty strings count as absent.
pub fn extract_message<E: ErrorShape + ?Sized>(err: &E) -> String {
    let non_empty = |s: &Option<String>| s.clone().filter(|s| !s.is_empty());

    if let Some(payload) = err.backend_payload() {
        if let Some(message) = non_empty(&payload.message) {
            return message;
        }
        if let Some(error) = non_empty(&payload.error) {
            return error;
        }
    }

    non_empty(&err.own_message()).unwrap_or_else(|| FALLBACK_MESSAGE.to_string())
}

/// Loosely shaped failures: `{"response": {"data": {..}}}` carries a backend
/// payload, `{"message": ".."}` is error-like, everything else is unknown.
impl ErrorShape for Value {
    fn backend_payload(&self) -> Option<BackendPayload> {
        self.pointer("/response/data")
            .and_then(BackendPayload::from_value)
    }

    fn own_message(&self) -> Option<String> {
        self.get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
    }
}

impl ErrorShape for String {
    fn own_message(&self) -> Option<String> {
        Some(self.clone())
    }
}

impl ErrorShape for str {
    fn own_message(&self) -> Option<String> {
        Some(self.to_string())
    }
}

impl ErrorShape for Box<dyn Error> {
    fn own_message(&self) -> Option<String> {
        Some(self.to_string())
    }
}

impl ErrorShape for Box<dyn Error + Send + Sync> {
    fn own_message(&self) -> Option<String> {
        Some(self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn nested_message_wins() {
        let err = json!({
            "message": "Request failed with status code 404",
            "response": { "data": { "message": "Not found", "error": "E404" } }
        });
        assert_eq!(extract_message(&err), "Not found");
    }

    #[test]
    fn nested_error_when_no_message() {
        let err = json!({ "response": { "data": { "error": "Out of stock" } } });
        assert_eq!(extract_message(&err), "Out of stock");
    }

    #[test]
    fn own_message_when_no_payload() {
        let err = json!({ "message": "Network Error" });
        assert_eq!(extract_message(&err), "Network Error");

        let err = json!({ "message": "timeout", "response": { "data": "<html>" } });
        assert_eq!(extract_message(&err), "timeout");

        let err = json!({ "message": "fallthrough", "response": { "data": { "message": "" } } });
        assert_eq!(extract_message(&err), "fallthrough");
    }

    #[test]
    fn unrecognized_shapes_fall_back() {
        for err in [
            Value::Null,
            json!("plain string"),
            json!(42),
            json!([1, 2, 3]),
            json!({}),
            json!({ "message": 7 }),
            json!({ "response": null }),
        ] {
            assert_eq!(extract_message(&err), FALLBACK_MESSAGE, "{err}");
        }
    }

    #[test]
    fn rust_error_values_use_their_own_message() {
        assert_eq!(extract_message("boom"), "boom");
        assert_eq!(extract_message(&String::new()), FALLBACK_MESSAGE);

        let io: Box<dyn Error> =
            Box::new(std::io::Error::other("connection reset"));
        assert_eq!(extract_message(&io), "connection reset");
    }

    #[test]
    fn payload_from_json_body() {
        assert_eq!(
            BackendPayload::from_json(r#"{"error":"Unauthorized"}"#),
            Some(BackendPayload {
                message: None,
                error: Some("Unauthorized".to_string()),
            })
        );
        assert_eq!(BackendPayload::from_json("Bad Gateway"), None);
        assert_eq!(BackendPayload::from_json(r#""quoted""#), None);
    }
}
