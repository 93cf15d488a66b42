pub mod human;

use serde_json::{Value, json};

use crate::error::EngineError;

/// Standard JSON envelope.
pub fn success(command: &str, data: Value) -> Value {
    json!({
        "status": "ok",
        "command": command,
        "data": data,
        "error": null
    })
}

pub fn error(command: &str, code: &str, message: &str) -> Value {
    json!({
        "status": "error",
        "command": command,
        "data": null,
        "error": {
            "code": code,
            "message": message
        }
    })
}

/// Not enough data is an informational state, not a failure: it is reported
/// through the success envelope so callers can branch on the flag.
pub fn insufficient(command: &str, err: &EngineError) -> Value {
    success(
        command,
        json!({
            "insufficient_data": true,
            "message": err.to_string()
        }),
    )
}
