//! Backend commands queued from UI to backend worker.

use shared::{domain::RunSeq, protocol::EvaluateRequest};

pub enum BackendCommand {
    Evaluate { seq: RunSeq, request: EvaluateRequest },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::Evaluate { .. } => "evaluate",
        }
    }
}
