//! Decoding of remote error payloads.

use reqwest::StatusCode;
use serde_json::Value;

use crate::error::HarnessError;

/// Build a [`HarnessError::Remote`] from a non-success status and raw body.
///
/// The service answers failures with `{"error": "..."}`; some handlers
/// serialize an opaque error object instead, so the message falls back to
/// `message`, then the raw body, then the status reason.
pub fn remote_error(status: StatusCode, body: &str) -> HarnessError {
    let payload = decode_body(body);
    let message = payload_message(&payload).unwrap_or_else(|| {
        status
            .canonical_reason()
            .unwrap_or("Unknown status")
            .to_string()
    });

    HarnessError::Remote {
        status: status.as_u16(),
        message,
        payload,
    }
}

/// Decode a response body: JSON when it parses, a JSON string otherwise,
/// `null` when empty.
pub(crate) fn decode_body(body: &str) -> Value {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Value::Null;
    }
    serde_json::from_str(trimmed).unwrap_or_else(|_| Value::String(body.to_string()))
}

fn payload_message(payload: &Value) -> Option<String> {
    match payload {
        Value::Object(map) => ["error", "message"]
            .iter()
            .filter_map(|key| map.get(*key))
            .find_map(|v| match v {
                Value::String(s) if !s.is_empty() => Some(s.clone()),
                Value::Null => None,
                Value::String(_) => None,
                other => Some(other.to_string()),
            }),
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        _ => None,
    }
}
