//! Development stand-in for the evaluation service.
//!
//! Accepts `{rule, text}` on `POST /values` and always answers with a
//! `{success, result}` envelope and HTTP 200, including for bodies it cannot
//! read. It does not evaluate rules.

use std::net::SocketAddr;

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, DefaultBodyLimit},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use shared::{
    domain::EVALUATE_PATH,
    error::{ApiError, ErrorCode},
    protocol::{EvaluateRequest, EvaluateResponse},
};
use tracing::{info, warn};

mod config;

use config::{load_settings, Settings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let settings = load_settings()?;
    let app = build_router(&settings);

    let addr: SocketAddr = settings.server_bind.parse()?;
    info!(%addr, "serving evaluation endpoint at http://{addr}/{EVALUATE_PATH}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(settings: &Settings) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route(&format!("/{EVALUATE_PATH}"), post(evaluate_values))
        .layer(DefaultBodyLimit::max(settings.max_body_bytes))
}

async fn healthz() -> &'static str {
    "ok"
}

async fn evaluate_values(body: Result<Bytes, BytesRejection>) -> Json<EvaluateResponse> {
    let body = match body {
        Ok(body) => body,
        Err(rejection) => {
            let code = if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
                ErrorCode::PayloadTooLarge
            } else {
                ErrorCode::InvalidRequest
            };
            return Json(reject(ApiError::new(
                code,
                format!("could not read request body: {}", rejection.body_text()),
            )));
        }
    };

    let request: EvaluateRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(err) => {
            return Json(reject(ApiError::new(
                ErrorCode::InvalidRequest,
                format!("invalid request body: {err}"),
            )))
        }
    };

    info!(
        rule = %request.rule,
        text_len = request.text.len(),
        "evaluation request received"
    );
    Json(EvaluateResponse::acknowledged())
}

fn reject(err: ApiError) -> EvaluateResponse {
    warn!(code = ?err.code, "rejecting evaluation request: {err}");
    err.into()
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
