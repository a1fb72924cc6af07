//! Request/response envelope of the `values` endpoint.
//!
//! The backend always answers with a well-formed body carrying a `success`
//! flag; transport status codes are not part of the contract.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluateRequest {
    pub rule: String,
    pub text: String,
}

impl EvaluateRequest {
    pub fn new(rule: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            rule: rule.into(),
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluateResponse {
    pub success: bool,
    /// Structured value on success, human-readable message on failure.
    /// `None` when the field is absent; an explicit `null` is `Some(Value::Null)`.
    #[serde(
        default,
        deserialize_with = "present_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub result: Option<Value>,
}

fn present_value<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl EvaluateResponse {
    pub fn success(result: Value) -> Self {
        Self {
            success: true,
            result: Some(result),
        }
    }

    /// Success without a result value, as sent by backends that only
    /// acknowledge the request.
    pub fn acknowledged() -> Self {
        Self {
            success: true,
            result: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            result: Some(Value::String(message.into())),
        }
    }
}
