use serde_json::Value;
use shared::protocol::EvaluateResponse;

use crate::error::EvaluateError;

/// Display pairing of the success flag and the rendered result text.
///
/// Both halves are produced together so a view never shows a flag from one
/// evaluation next to the text of another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    success: bool,
    result: String,
}

impl Default for RunOutcome {
    fn default() -> Self {
        Self {
            success: true,
            result: String::new(),
        }
    }
}

impl RunOutcome {
    /// Successful values are pretty-printed; failure messages are kept verbatim.
    /// A missing result renders as empty text.
    pub fn from_response(response: EvaluateResponse) -> Self {
        if response.success {
            let result = response
                .result
                .map(|value| {
                    serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string())
                })
                .unwrap_or_default();
            Self {
                success: true,
                result,
            }
        } else {
            let result = match response.result {
                Some(Value::String(message)) => message,
                Some(other) => other.to_string(),
                None => String::new(),
            };
            Self {
                success: false,
                result,
            }
        }
    }

    pub fn from_error(err: &EvaluateError) -> Self {
        Self::request_failed(err)
    }

    /// The evaluation never produced an envelope.
    pub fn request_failed(reason: impl std::fmt::Display) -> Self {
        Self {
            success: false,
            result: format!("Evaluation request failed: {reason}"),
        }
    }

    pub fn success(&self) -> bool {
        self.success
    }

    pub fn result(&self) -> &str {
        &self.result
    }
}
