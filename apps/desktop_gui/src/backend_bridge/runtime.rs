//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use client_core::{ClientConfig, Evaluator, PlaygroundClient};
use crossbeam_channel::{Receiver, Sender};
use shared::{domain::RunSeq, protocol::EvaluateRequest};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

/// Wakes the UI after an event has been queued.
pub type RepaintHandle = Arc<dyn Fn() + Send + Sync>;

pub fn launch(
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    config: ClientConfig,
    repaint: RepaintHandle,
) {
    thread::spawn(move || {
        let notify = |ui_tx: &Sender<UiEvent>, event: UiEvent| {
            if ui_tx.try_send(event).is_err() {
                tracing::warn!("backend->ui event queue unavailable; dropping event");
            }
            repaint();
        };

        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                notify(
                    &ui_tx,
                    UiEvent::Error(UiError::from_message(
                        UiErrorContext::BackendStartup,
                        format!("backend worker startup failure: failed to build runtime: {err}"),
                    )),
                );
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        let client = match PlaygroundClient::new(&config) {
            Ok(client) => Arc::new(client),
            Err(err) => {
                notify(
                    &ui_tx,
                    UiEvent::Error(UiError::from_message(
                        UiErrorContext::BackendStartup,
                        format!("backend worker startup failure: {err}"),
                    )),
                );
                tracing::error!(server_url = %config.server_url, "failed to build evaluation client: {err}");
                return;
            }
        };

        tracing::info!(endpoint = %client.endpoint(), "backend worker ready");
        notify(
            &ui_tx,
            UiEvent::Info(format!("Ready - evaluating against {}", client.endpoint())),
        );

        while let Ok(cmd) = cmd_rx.recv() {
            match cmd {
                BackendCommand::Evaluate { seq, request } => {
                    let client = Arc::clone(&client);
                    let ui_tx = ui_tx.clone();
                    let repaint = Arc::clone(&repaint);
                    runtime.spawn(async move {
                        let event = evaluate_command(client.as_ref(), seq, &request).await;
                        if ui_tx.try_send(event).is_err() {
                            tracing::warn!(%seq, "backend->ui event queue unavailable; dropping result");
                        }
                        repaint();
                    });
                }
            }
        }
        tracing::debug!("ui command queue closed; backend worker exiting");
    });
}

pub async fn evaluate_command<E>(evaluator: &E, seq: RunSeq, request: &EvaluateRequest) -> UiEvent
where
    E: Evaluator + ?Sized,
{
    match evaluator.evaluate(request).await {
        Ok(response) => UiEvent::EvaluationFinished { seq, response },
        Err(error) => {
            tracing::warn!(%seq, rule = %request.rule, "evaluation failed: {error}");
            UiEvent::EvaluationFailed { seq, error }
        }
    }
}
