use std::{
    fs,
    io::{self, Read},
    path::PathBuf,
    process::ExitCode,
    time::Duration,
};

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{
    transport::DEFAULT_SERVER_URL, ClientConfig, Evaluator, PlaygroundClient, RunOutcome,
};
use shared::{
    domain::DEFAULT_RULE,
    protocol::{EvaluateRequest, EvaluateResponse},
};

/// Evaluates one rule against one input and prints the result.
///
/// Exit status: 0 on success, 1 when the evaluator rejects the input,
/// 2 when no result envelope could be obtained.
#[derive(Parser, Debug)]
struct Args {
    #[arg(long, env = "PLAYGROUND_SERVER_URL", default_value = DEFAULT_SERVER_URL)]
    server_url: String,
    #[arg(long, default_value = DEFAULT_RULE)]
    rule: String,
    /// Input text; read from stdin when neither --text nor --file is given.
    #[arg(long, conflicts_with = "file")]
    text: Option<String>,
    #[arg(long)]
    file: Option<PathBuf>,
    /// Per-request timeout in seconds; 0 waits indefinitely.
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,
    /// Print the raw response envelope instead of the rendered result.
    #[arg(long)]
    json: bool,
}

impl Args {
    fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.server_url.clone()).with_request_timeout(
            (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs)),
        )
    }

    fn read_input(&self) -> Result<String> {
        if let Some(text) = &self.text {
            return Ok(text.clone());
        }
        if let Some(path) = &self.file {
            return fs::read_to_string(path)
                .with_context(|| format!("failed to read input file '{}'", path.display()));
        }
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("failed to read input from stdin")?;
        Ok(text)
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let request = EvaluateRequest::new(args.rule.clone(), args.read_input()?);
    let client = PlaygroundClient::new(&args.client_config())?;
    tracing::debug!(endpoint = %client.endpoint(), rule = %request.rule, "evaluating");

    match client.evaluate(&request).await {
        Ok(response) => {
            let success = response.success;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&response)?);
            } else {
                print_outcome(response);
            }
            Ok(ExitCode::from(exit_status(success)))
        }
        Err(err) => {
            eprintln!("{}", RunOutcome::from_error(&err).result());
            Ok(ExitCode::from(2))
        }
    }
}

fn print_outcome(response: EvaluateResponse) {
    let outcome = RunOutcome::from_response(response);
    if outcome.success() {
        println!("{}", outcome.result());
    } else {
        eprintln!("{}", outcome.result());
    }
}

fn exit_status(success: bool) -> u8 {
    if success {
        0
    } else {
        1
    }
}
