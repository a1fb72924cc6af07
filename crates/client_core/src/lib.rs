//! Client side of the rule playground: talks to the evaluation service and
//! turns its envelopes into display outcomes.

use async_trait::async_trait;
use shared::protocol::{EvaluateRequest, EvaluateResponse};
use tracing::warn;

pub mod error;
pub mod transport;
pub mod types;

pub use error::EvaluateError;
pub use transport::{ClientConfig, PlaygroundClient};
pub use types::RunOutcome;

#[async_trait]
pub trait Evaluator: Send + Sync {
    async fn evaluate(&self, request: &EvaluateRequest) -> Result<EvaluateResponse, EvaluateError>;
}

/// Runs one evaluation and folds every result, including transport and
/// protocol failures, into a displayable outcome.
pub async fn run_evaluation<E>(evaluator: &E, request: &EvaluateRequest) -> RunOutcome
where
    E: Evaluator + ?Sized,
{
    match evaluator.evaluate(request).await {
        Ok(response) => RunOutcome::from_response(response),
        Err(err) => {
            warn!(
                rule = %request.rule,
                protocol_violation = err.is_protocol_violation(),
                "evaluation failed: {err}"
            );
            RunOutcome::from_error(&err)
        }
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
