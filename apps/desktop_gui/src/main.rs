use std::{sync::Arc, time::Duration};

mod backend_bridge;
mod controller;
mod ui;

use clap::Parser;
use client_core::transport::DEFAULT_SERVER_URL;
use crossbeam_channel::bounded;
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::{PlaygroundApp, StartupConfig};

#[derive(Parser, Debug)]
#[command(about = "Interactive playground for evaluating grammar rules against input text")]
struct Args {
    /// Base URL of the evaluation service; requests go to `<url>/values`.
    #[arg(long, env = "PLAYGROUND_SERVER_URL", default_value = DEFAULT_SERVER_URL)]
    server_url: String,
    /// Per-request timeout in seconds; 0 waits indefinitely.
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,
}

impl Args {
    fn startup_config(&self) -> StartupConfig {
        StartupConfig {
            server_url: self.server_url.clone(),
            request_timeout: (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs)),
        }
    }
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let startup = Args::parse().startup_config();
    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(64);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("JustAnotherYamlParser Playground")
            .with_inner_size([1100.0, 700.0])
            .with_min_inner_size([640.0, 400.0]),
        ..Default::default()
    };
    eframe::run_native(
        "JustAnotherYamlParser Playground",
        options,
        Box::new(move |cc| {
            let repaint_ctx = cc.egui_ctx.clone();
            backend_bridge::runtime::launch(
                cmd_rx,
                ui_tx,
                startup.client_config(),
                Arc::new(move || repaint_ctx.request_repaint()),
            );
            Ok(Box::new(PlaygroundApp::new(cmd_tx, ui_rx, &startup)))
        }),
    )
}
