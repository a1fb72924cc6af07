use std::time::Duration;

use thiserror::Error;

/// Failure to obtain a result envelope from the evaluation service.
///
/// Application-level failures (`success: false`) are not errors here; they
/// arrive as a regular [`shared::protocol::EvaluateResponse`].
#[derive(Debug, Error)]
pub enum EvaluateError {
    #[error("invalid server url '{url}': {source}")]
    InvalidServerUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("failed to build http client: {0}")]
    ClientBuild(#[source] reqwest::Error),
    #[error("evaluation service did not answer within {0:?}")]
    Timeout(Duration),
    #[error("failed to reach evaluation service: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("evaluation service answered with HTTP {status} instead of a result envelope")]
    UnexpectedStatus { status: u16, body: String },
    #[error("malformed evaluation response: {0}")]
    MalformedResponse(#[source] serde_json::Error),
}

impl EvaluateError {
    /// The service answered, but not in the agreed envelope shape.
    pub fn is_protocol_violation(&self) -> bool {
        matches!(
            self,
            Self::UnexpectedStatus { .. } | Self::MalformedResponse(_)
        )
    }
}
