//! HTTP transport for the `values` endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use shared::{
    domain::EVALUATE_PATH,
    protocol::{EvaluateRequest, EvaluateResponse},
};
use tracing::{debug, warn};
use url::Url;

use crate::{error::EvaluateError, Evaluator};

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8001/";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const ERROR_BODY_PREVIEW_CHARS: usize = 200;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the page hosting the playground; the endpoint is resolved
    /// relative to it the same way a browser resolves a relative link.
    pub server_url: String,
    pub request_timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            request_timeout: Some(DEFAULT_REQUEST_TIMEOUT),
        }
    }
}

impl ClientConfig {
    pub fn new(server_url: impl Into<String>) -> Self {
        Self {
            server_url: server_url.into(),
            ..Self::default()
        }
    }

    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }
}

pub fn resolve_endpoint(server_url: &str) -> Result<Url, EvaluateError> {
    Url::parse(server_url.trim())
        .and_then(|base| base.join(EVALUATE_PATH))
        .map_err(|source| EvaluateError::InvalidServerUrl {
            url: server_url.to_string(),
            source,
        })
}

pub struct PlaygroundClient {
    http: Client,
    endpoint: Url,
    request_timeout: Option<Duration>,
}

impl PlaygroundClient {
    pub fn new(config: &ClientConfig) -> Result<Self, EvaluateError> {
        let endpoint = resolve_endpoint(&config.server_url)?;
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(EvaluateError::ClientBuild)?;
        Ok(Self {
            http,
            endpoint,
            request_timeout: config.request_timeout,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn map_transport_error(&self, err: reqwest::Error) -> EvaluateError {
        match self.request_timeout {
            Some(timeout) if err.is_timeout() => EvaluateError::Timeout(timeout),
            _ => EvaluateError::Transport(err),
        }
    }
}

#[async_trait]
impl Evaluator for PlaygroundClient {
    async fn evaluate(&self, request: &EvaluateRequest) -> Result<EvaluateResponse, EvaluateError> {
        debug!(
            endpoint = %self.endpoint,
            rule = %request.rule,
            text_len = request.text.len(),
            "sending evaluation request"
        );
        let response = self
            .http
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await
            .map_err(|err| self.map_transport_error(err))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|err| self.map_transport_error(err))?;

        if !status.is_success() {
            let preview: String = String::from_utf8_lossy(&body)
                .chars()
                .take(ERROR_BODY_PREVIEW_CHARS)
                .collect();
            warn!(status = status.as_u16(), "evaluation endpoint returned non-success status");
            return Err(EvaluateError::UnexpectedStatus {
                status: status.as_u16(),
                body: preview,
            });
        }

        let envelope: EvaluateResponse =
            serde_json::from_slice(&body).map_err(EvaluateError::MalformedResponse)?;
        debug!(success = envelope.success, "evaluation response decoded");
        Ok(envelope)
    }
}
