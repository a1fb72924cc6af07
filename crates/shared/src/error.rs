use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::protocol::EvaluateResponse;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    InvalidRequest,
    PayloadTooLarge,
}

/// Failure reported by an evaluation backend inside a `success: false` envelope.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl From<ApiError> for EvaluateResponse {
    fn from(value: ApiError) -> Self {
        EvaluateResponse::failure(value.message)
    }
}
