use std::time::Duration;

use client_core::{transport::DEFAULT_SERVER_URL, ClientConfig};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::controller::reducer::PlaygroundState;
use crate::ui::view::{self, ViewActions};

const REQUESTING_REPAINT_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub server_url: String,
    pub request_timeout: Option<Duration>,
}

impl Default for StartupConfig {
    fn default() -> Self {
        let client = ClientConfig::default();
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            request_timeout: client.request_timeout,
        }
    }
}

impl StartupConfig {
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.server_url.clone()).with_request_timeout(self.request_timeout)
    }
}

pub struct PlaygroundApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    server_url: String,
    state: PlaygroundState,
}

impl PlaygroundApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        startup: &StartupConfig,
    ) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            server_url: startup.server_url.clone(),
            state: PlaygroundState::default(),
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            self.state.reduce(event);
        }
    }

    fn apply(&mut self, actions: ViewActions) {
        for (field, value) in actions.edits {
            self.state.on_field_change(field, value);
        }
        if actions.dismiss_banner {
            self.state.dismiss_banner();
        }
        if actions.run {
            self.state.on_run(&self.cmd_tx);
        }
    }
}

impl eframe::App for PlaygroundApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        let actions = view::render(ctx, &self.state, &self.server_url);
        let changed = actions != ViewActions::default();
        self.apply(actions);

        if changed {
            ctx.request_repaint();
        } else if self.state.is_requesting() {
            ctx.request_repaint_after(REQUESTING_REPAINT_INTERVAL);
        }
    }
}
