//! Backend-to-UI events and error modeling for the playground controller.

use client_core::EvaluateError;
use shared::{domain::RunSeq, protocol::EvaluateResponse};

pub enum UiEvent {
    Info(String),
    Error(UiError),
    EvaluationFinished {
        seq: RunSeq,
        response: EvaluateResponse,
    },
    EvaluationFailed {
        seq: RunSeq,
        error: EvaluateError,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Configuration,
    Transport,
    Protocol,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    Evaluate,
}

impl UiErrorContext {
    fn label(self) -> &'static str {
        match self {
            UiErrorContext::BackendStartup => "during backend startup",
            UiErrorContext::Evaluate => "while evaluating",
        }
    }
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("invalid server url")
            || message_lower.contains("failed to build")
        {
            UiErrorCategory::Configuration
        } else if message_lower.contains("malformed")
            || message_lower.contains("instead of a result envelope")
        {
            UiErrorCategory::Protocol
        } else if message_lower.contains("timeout")
            || message_lower.contains("did not answer")
            || message_lower.contains("connection")
            || message_lower.contains("failed to reach")
            || message_lower.contains("disconnect")
            || message_lower.contains("queue is full")
        {
            UiErrorCategory::Transport
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn from_evaluate_error(err: &EvaluateError) -> Self {
        let category = match err {
            EvaluateError::InvalidServerUrl { .. } | EvaluateError::ClientBuild(_) => {
                UiErrorCategory::Configuration
            }
            EvaluateError::Timeout(_) | EvaluateError::Transport(_) => UiErrorCategory::Transport,
            EvaluateError::UnexpectedStatus { .. } | EvaluateError::MalformedResponse(_) => {
                UiErrorCategory::Protocol
            }
        };
        Self {
            category,
            context: UiErrorContext::Evaluate,
            message: err.to_string(),
        }
    }

    #[cfg(test)]
    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    #[cfg(test)]
    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn label(&self) -> &'static str {
        match self.category {
            UiErrorCategory::Configuration => "Configuration",
            UiErrorCategory::Transport => "Transport",
            UiErrorCategory::Protocol => "Protocol",
            UiErrorCategory::Unknown => "Unexpected",
        }
    }

    /// One-line description for the status line and banner.
    pub fn summary(&self) -> String {
        format!(
            "{} error {}: {}",
            self.label(),
            self.context.label(),
            self.message
        )
    }
}
