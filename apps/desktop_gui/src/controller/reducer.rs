//! Playground state and the transitions that mutate it.
//!
//! `rule` and `text` change only through [`PlaygroundState::on_field_change`];
//! the success flag and result text change only when a run completes, and
//! always together.

use client_core::RunOutcome;
use crossbeam_channel::Sender;
use shared::{
    domain::{RunSeq, DEFAULT_RULE},
    protocol::EvaluateRequest,
};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};
use crate::controller::orchestration::dispatch_backend_command;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Rule,
    Text,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    rule: String,
    text: String,
    outcome: RunOutcome,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            rule: DEFAULT_RULE.to_string(),
            text: String::new(),
            outcome: RunOutcome::default(),
        }
    }
}

impl FormState {
    pub fn rule(&self) -> &str {
        &self.rule
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    #[cfg(test)]
    pub fn field(&self, field: FormField) -> &str {
        match field {
            FormField::Rule => &self.rule,
            FormField::Text => &self.text,
        }
    }

    #[cfg(test)]
    pub fn outcome(&self) -> &RunOutcome {
        &self.outcome
    }

    pub fn success(&self) -> bool {
        self.outcome.success()
    }

    pub fn result(&self) -> &str {
        self.outcome.result()
    }

    fn request(&self) -> EvaluateRequest {
        EvaluateRequest::new(self.rule.clone(), self.text.clone())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    Idle,
    Requesting { seq: RunSeq },
    DisplayingSuccess,
    DisplayingError,
}

#[derive(Debug, Clone)]
pub struct PlaygroundState {
    form: FormState,
    phase: RunPhase,
    last_issued: RunSeq,
    status: String,
    banner: Option<UiError>,
}

impl Default for PlaygroundState {
    fn default() -> Self {
        Self {
            form: FormState::default(),
            phase: RunPhase::Idle,
            last_issued: RunSeq(0),
            status: "Ready".to_string(),
            banner: None,
        }
    }
}

impl PlaygroundState {
    pub fn form(&self) -> &FormState {
        &self.form
    }

    #[cfg(test)]
    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    pub fn is_requesting(&self) -> bool {
        matches!(self.phase, RunPhase::Requesting { .. })
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn banner(&self) -> Option<&UiError> {
        self.banner.as_ref()
    }

    pub fn dismiss_banner(&mut self) {
        self.banner = None;
    }

    pub fn on_field_change(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::Rule => self.form.rule = value,
            FormField::Text => self.form.text = value,
        }
    }

    /// Snapshots the form into a new run and hands it to the backend worker.
    ///
    /// A run issued while another is outstanding supersedes it: only the
    /// response tagged with the latest sequence is reduced.
    pub fn on_run(&mut self, cmd_tx: &Sender<BackendCommand>) -> RunSeq {
        let seq = self.last_issued.next();
        self.last_issued = seq;
        let request = self.form.request();

        self.status = format!("Running {} {seq}...", request.rule);
        self.banner = None;
        self.phase = RunPhase::Requesting { seq };
        tracing::debug!(%seq, rule = %request.rule, "run issued");

        let cmd = BackendCommand::Evaluate { seq, request };
        if let Err(reason) = dispatch_backend_command(cmd_tx, cmd) {
            self.banner = Some(UiError::from_message(
                UiErrorContext::Evaluate,
                reason.clone(),
            ));
            self.finish(RunOutcome::request_failed(reason));
        }
        seq
    }

    pub fn reduce(&mut self, event: UiEvent) {
        match event {
            UiEvent::Info(message) => {
                if self.is_requesting() {
                    tracing::debug!(%message, "keeping run status over worker info");
                } else {
                    self.status = message;
                }
            }
            UiEvent::Error(err) => {
                if self.is_requesting() {
                    self.finish(RunOutcome::request_failed(err.message()));
                }
                self.status = err.summary();
                self.banner = Some(err);
            }
            UiEvent::EvaluationFinished { seq, response } => {
                if self.accepts(seq) {
                    self.finish(RunOutcome::from_response(response));
                }
            }
            UiEvent::EvaluationFailed { seq, error } => {
                if self.accepts(seq) {
                    self.banner = Some(UiError::from_evaluate_error(&error));
                    self.finish(RunOutcome::from_error(&error));
                }
            }
        }
    }

    fn accepts(&self, seq: RunSeq) -> bool {
        let current = matches!(self.phase, RunPhase::Requesting { seq: pending } if pending == seq);
        if !current {
            tracing::debug!(%seq, latest = %self.last_issued, "discarding superseded evaluation result");
        }
        current
    }

    fn finish(&mut self, outcome: RunOutcome) {
        let (phase, status) = if outcome.success() {
            (RunPhase::DisplayingSuccess, "Done")
        } else {
            (RunPhase::DisplayingError, "Failed")
        };
        self.form.outcome = outcome;
        self.phase = phase;
        self.status = status.to_string();
    }
}

#[cfg(test)]
#[path = "tests/reducer_tests.rs"]
mod tests;
