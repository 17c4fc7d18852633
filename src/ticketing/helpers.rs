//! Backend response helpers.

use reqwest::StatusCode;
use serde_json::Value;

/// Body fields that conventionally carry an error message, in lookup order.
const MESSAGE_FIELDS: [&str; 3] = ["detail", "message", "error"];

/// Extracts a human-readable message from a failed backend response.
///
/// Prefers a string `detail`, `message` or `error` field of a JSON body, then
/// the raw body, then the status reason phrase.
pub fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(Value::Object(fields)) = serde_json::from_str::<Value>(body) {
        for key in MESSAGE_FIELDS {
            if let Some(Value::String(message)) = fields.get(key) {
                return message.clone();
            }
        }
    }

    let body = body.trim();
    if !body.is_empty() {
        return body.to_string();
    }

    status
        .canonical_reason()
        .unwrap_or("empty response body")
        .to_string()
}
