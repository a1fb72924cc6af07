use super::*;

use std::sync::Mutex;

use async_trait::async_trait;
use client_core::{EvaluateError, Evaluator};
use crossbeam_channel::{bounded, Receiver};
use serde_json::json;
use shared::protocol::EvaluateResponse;

use crate::backend_bridge::runtime::evaluate_command;
use crate::controller::events::UiErrorCategory;

enum Reply {
    Envelope(EvaluateResponse),
    Status(u16),
}

struct StubEvaluator {
    reply: Reply,
    seen: Mutex<Vec<EvaluateRequest>>,
}

impl StubEvaluator {
    fn replying(response: EvaluateResponse) -> Self {
        Self {
            reply: Reply::Envelope(response),
            seen: Mutex::new(Vec::new()),
        }
    }

    fn failing_with_status(status: u16) -> Self {
        Self {
            reply: Reply::Status(status),
            seen: Mutex::new(Vec::new()),
        }
    }

    fn seen(&self) -> Vec<EvaluateRequest> {
        self.seen.lock().expect("seen lock").clone()
    }
}

#[async_trait]
impl Evaluator for StubEvaluator {
    async fn evaluate(&self, request: &EvaluateRequest) -> Result<EvaluateResponse, EvaluateError> {
        self.seen.lock().expect("seen lock").push(request.clone());
        match &self.reply {
            Reply::Envelope(response) => Ok(response.clone()),
            Reply::Status(status) => Err(EvaluateError::UnexpectedStatus {
                status: *status,
                body: String::new(),
            }),
        }
    }
}

fn queued(rx: &Receiver<BackendCommand>) -> (RunSeq, EvaluateRequest) {
    let BackendCommand::Evaluate { seq, request } = rx.try_recv().expect("queued command");
    (seq, request)
}

async fn run_to_completion(state: &mut PlaygroundState, evaluator: &StubEvaluator) -> RunSeq {
    let (tx, rx) = bounded(4);
    let seq = state.on_run(&tx);
    let (queued_seq, request) = queued(&rx);
    assert_eq!(queued_seq, seq);
    state.reduce(evaluate_command(evaluator, queued_seq, &request).await);
    seq
}

#[test]
fn default_state_has_builtin_rule_and_empty_text() {
    let state = PlaygroundState::default();
    assert_eq!(state.form().rule(), "nb-double-one-line");
    assert_eq!(state.form().text(), "");
    assert!(state.form().success());
    assert_eq!(state.form().result(), "");
    assert_eq!(state.phase(), RunPhase::Idle);
}

#[test]
fn field_change_replaces_only_the_named_field() {
    for field in [FormField::Rule, FormField::Text] {
        for value in ["", "3", "multi\nline\ttext", "ünïcode"] {
            let mut state = PlaygroundState::default();
            let before = state.form().clone();
            state.on_field_change(field, value);

            assert_eq!(state.form().field(field), value);
            let other = match field {
                FormField::Rule => FormField::Text,
                FormField::Text => FormField::Rule,
            };
            assert_eq!(state.form().field(other), before.field(other));
            assert_eq!(state.form().outcome(), before.outcome());
            assert_eq!(state.phase(), RunPhase::Idle);
        }
    }
}

#[tokio::test]
async fn successful_run_pretty_prints_result() {
    let evaluator = StubEvaluator::replying(EvaluateResponse::success(json!(6)));
    let mut state = PlaygroundState::default();
    state.on_field_change(FormField::Text, "3");

    run_to_completion(&mut state, &evaluator).await;

    assert_eq!(
        evaluator.seen(),
        vec![EvaluateRequest::new("nb-double-one-line", "3")]
    );
    assert!(state.form().success());
    assert_eq!(state.form().result(), "6");
    assert_eq!(state.phase(), RunPhase::DisplayingSuccess);
    assert_eq!(state.status(), "Done");
}

#[tokio::test]
async fn failed_run_shows_message_verbatim() {
    let evaluator =
        StubEvaluator::replying(EvaluateResponse::failure("unexpected token at line 1"));
    let mut state = PlaygroundState::default();

    run_to_completion(&mut state, &evaluator).await;

    assert!(!state.form().success());
    assert_eq!(state.form().result(), "unexpected token at line 1");
    assert_eq!(state.phase(), RunPhase::DisplayingError);
    assert!(state.banner().is_none());
}

#[tokio::test]
async fn success_after_failure_clears_the_alert() {
    let mut state = PlaygroundState::default();
    run_to_completion(
        &mut state,
        &StubEvaluator::replying(EvaluateResponse::failure("bad")),
    )
    .await;
    assert!(!state.form().success());

    run_to_completion(
        &mut state,
        &StubEvaluator::replying(EvaluateResponse::success(json!([1, 2]))),
    )
    .await;
    assert!(state.form().success());
    assert_eq!(state.form().result(), "[\n  1,\n  2\n]");
}

#[tokio::test]
async fn run_never_overwrites_rule_or_text() {
    let evaluator = StubEvaluator::replying(EvaluateResponse::success(json!(null)));
    let mut state = PlaygroundState::default();
    state.on_field_change(FormField::Rule, "l-yaml-stream");
    state.on_field_change(FormField::Text, "a: 1");

    run_to_completion(&mut state, &evaluator).await;

    assert_eq!(state.form().rule(), "l-yaml-stream");
    assert_eq!(state.form().text(), "a: 1");
}

#[tokio::test]
async fn edits_while_requesting_are_kept_and_not_sent() {
    let evaluator = StubEvaluator::replying(EvaluateResponse::success(json!(6)));
    let mut state = PlaygroundState::default();
    state.on_field_change(FormField::Text, "3");

    let (tx, rx) = bounded(4);
    state.on_run(&tx);
    assert!(state.is_requesting());
    state.on_field_change(FormField::Text, "4");

    let (seq, request) = queued(&rx);
    assert_eq!(request.text, "3");
    state.reduce(evaluate_command(&evaluator, seq, &request).await);

    assert_eq!(state.form().text(), "4");
    assert_eq!(state.form().result(), "6");
}

#[tokio::test]
async fn superseded_response_is_discarded() {
    let mut state = PlaygroundState::default();
    let (tx, rx) = bounded(4);

    state.on_field_change(FormField::Text, "first");
    let first = state.on_run(&tx);
    state.on_field_change(FormField::Text, "second");
    let second = state.on_run(&tx);
    assert!(second > first);

    let (_, first_request) = queued(&rx);
    let (_, second_request) = queued(&rx);

    let second_reply = StubEvaluator::replying(EvaluateResponse::success(json!("second")));
    state.reduce(evaluate_command(&second_reply, second, &second_request).await);
    assert_eq!(state.form().result(), "\"second\"");

    let first_reply = StubEvaluator::replying(EvaluateResponse::failure("first"));
    state.reduce(evaluate_command(&first_reply, first, &first_request).await);
    assert!(state.form().success());
    assert_eq!(state.form().result(), "\"second\"");
}

#[tokio::test]
async fn older_response_arriving_first_does_not_end_the_run() {
    let mut state = PlaygroundState::default();
    let (tx, rx) = bounded(4);
    let first = state.on_run(&tx);
    let second = state.on_run(&tx);
    let (_, request) = queued(&rx);

    let reply = StubEvaluator::replying(EvaluateResponse::success(json!(1)));
    state.reduce(evaluate_command(&reply, first, &request).await);

    assert_eq!(state.phase(), RunPhase::Requesting { seq: second });
    assert_eq!(state.form().result(), "");
}

#[tokio::test]
async fn transport_failure_is_shown_as_failed_run_with_banner() {
    let evaluator = StubEvaluator::failing_with_status(502);
    let mut state = PlaygroundState::default();

    run_to_completion(&mut state, &evaluator).await;

    assert!(!state.form().success());
    assert!(state
        .form()
        .result()
        .starts_with("Evaluation request failed:"));
    assert_eq!(state.phase(), RunPhase::DisplayingError);
    let banner = state.banner().expect("banner");
    assert_eq!(banner.category(), UiErrorCategory::Protocol);
}

#[test]
fn disconnected_worker_fails_the_run_immediately() {
    let mut state = PlaygroundState::default();
    let (tx, rx) = bounded(1);
    drop(rx);

    state.on_run(&tx);

    assert_eq!(state.phase(), RunPhase::DisplayingError);
    assert!(!state.form().success());
    assert!(state.form().result().contains("disconnected"));
    assert_eq!(
        state.banner().map(UiError::category),
        Some(UiErrorCategory::Transport)
    );
}

#[test]
fn backend_startup_error_ends_an_outstanding_run() {
    let mut state = PlaygroundState::default();
    let (tx, _rx) = bounded(1);
    state.on_run(&tx);

    state.reduce(UiEvent::Error(UiError::from_message(
        UiErrorContext::BackendStartup,
        "backend worker startup failure: failed to build runtime: no threads",
    )));

    assert_eq!(state.phase(), RunPhase::DisplayingError);
    assert!(!state.form().success());
    assert!(state.status().contains("backend worker startup failure"));
}

#[tokio::test]
async fn repeated_runs_with_unchanged_form_reduce_identically() {
    let evaluator = StubEvaluator::replying(EvaluateResponse::success(json!({ "n": 6 })));
    let mut state = PlaygroundState::default();
    state.on_field_change(FormField::Text, "3");

    run_to_completion(&mut state, &evaluator).await;
    let first = state.form().clone();
    run_to_completion(&mut state, &evaluator).await;

    assert_eq!(state.form(), &first);
    let seen = evaluator.seen();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0], seen[1]);
}

#[tokio::test]
async fn empty_text_is_forwarded_unchanged() {
    let evaluator = StubEvaluator::replying(EvaluateResponse::acknowledged());
    let mut state = PlaygroundState::default();
    state.on_field_change(FormField::Rule, "");

    run_to_completion(&mut state, &evaluator).await;

    assert_eq!(evaluator.seen(), vec![EvaluateRequest::new("", "")]);
    assert_eq!(state.form().result(), "");
}

#[tokio::test]
async fn acknowledgement_without_result_leaves_output_empty() {
    let evaluator = StubEvaluator::replying(EvaluateResponse::acknowledged());
    let mut state = PlaygroundState::default();
    state.on_field_change(FormField::Text, "3");

    run_to_completion(&mut state, &evaluator).await;

    assert!(state.form().success());
    assert_eq!(state.form().result(), "");
    assert_eq!(state.phase(), RunPhase::DisplayingSuccess);
}

#[test]
fn worker_info_does_not_replace_running_status() {
    let mut state = PlaygroundState::default();
    let (tx, _rx) = bounded(1);
    let seq = state.on_run(&tx);
    let running = state.status().to_string();
    assert!(running.starts_with("Running nb-double-one-line"));

    state.reduce(UiEvent::Info("Ready - evaluating against http://127.0.0.1:8001/values".to_string()));

    assert_eq!(state.status(), running);
    assert_eq!(state.phase(), RunPhase::Requesting { seq });
}

#[test]
fn worker_info_updates_status_when_idle() {
    let mut state = PlaygroundState::default();
    state.reduce(UiEvent::Info("Ready - evaluating against http://127.0.0.1:8001/values".to_string()));
    assert_eq!(
        state.status(),
        "Ready - evaluating against http://127.0.0.1:8001/values"
    );
}
