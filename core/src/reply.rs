//! Decoding of `POST /upload` bodies into an [`UploadOutcome`].
//!
//! The body is inspected as a loose JSON value rather than deserialized
//! into [`crate::UploadReply`], because the `error` check follows
//! JavaScript truthiness: `{"error": ""}` or `{"error": null}` is *not*
//! an error reply, while `{"error": 42}` is.

use serde_json::Value;

use crate::error::TransportError;
use crate::types::UploadOutcome;

/// Turn a raw response body into an outcome.
///
/// The HTTP status is deliberately not an input: error replies come
/// with 4xx/5xx codes and must still reach the user.
pub fn decode_reply(body: &str) -> UploadOutcome {
    let value: Value = match serde_json::from_str(body) {
        Ok(v) => v,
        Err(e) => return UploadOutcome::TransportError(TransportError::InvalidJson(e.to_string())),
    };

    let object = match value.as_object() {
        Some(o) => o,
        None => {
            return UploadOutcome::TransportError(TransportError::UnexpectedShape(kind_of(&value)))
        }
    };

    if let Some(error) = object.get("error").filter(|e| is_truthy(e)) {
        return UploadOutcome::ApplicationError(error_message(error));
    }

    let plate_number = match object.get("plate_number").and_then(Value::as_str) {
        Some(p) => p.to_string(),
        None => return UploadOutcome::TransportError(TransportError::MissingField("plate_number")),
    };
    let image_path = match object.get("image_path").and_then(Value::as_str) {
        Some(p) => p.to_string(),
        None => return UploadOutcome::TransportError(TransportError::MissingField("image_path")),
    };

    UploadOutcome::Recognized {
        plate_number,
        image_path,
    }
}

/// JavaScript truthiness of a JSON value.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn error_message(error: &Value) -> String {
    match error {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
