//! Maps playground state to a frame and collects what the user did with it.

use eframe::egui;

use crate::controller::reducer::{FormField, PlaygroundState};
use crate::ui::theme;

const TEXT_INPUT_ID: &str = "playground_text_input";

/// User input gathered while drawing one frame.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ViewActions {
    pub edits: Vec<(FormField, String)>,
    pub run: bool,
    pub dismiss_banner: bool,
}

pub fn render(ctx: &egui::Context, state: &PlaygroundState, server_url: &str) -> ViewActions {
    let mut actions = ViewActions::default();

    egui::TopBottomPanel::top("playground_toolbar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.heading("JustAnotherYamlParser");
            if ui
                .add(egui::Button::new(egui::RichText::new("Run").strong()))
                .on_hover_text("Evaluate the input with the selected rule (Ctrl+Enter)")
                .clicked()
            {
                actions.run = true;
            }
            if state.is_requesting() {
                ui.spinner();
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.weak(server_url);
            });
        });
    });

    egui::TopBottomPanel::bottom("playground_status").show(ctx, |ui| {
        show_status_banner(ui, state, &mut actions);
        ui.horizontal_wrapped(|ui| {
            ui.small("Status:");
            ui.small(egui::RichText::new(state.status()).weak());
        });
    });

    egui::CentralPanel::default().show(ctx, |ui| {
        ui.columns(2, |columns| {
            show_inputs(&mut columns[0], state, &mut actions);
            show_output(&mut columns[1], state);
        });
    });

    actions
}

fn show_status_banner(ui: &mut egui::Ui, state: &PlaygroundState, actions: &mut ViewActions) {
    let Some(banner) = state.banner() else {
        return;
    };

    egui::Frame::new()
        .fill(theme::BANNER_FILL)
        .stroke(egui::Stroke::new(1.0, theme::BANNER_STROKE))
        .corner_radius(8.0)
        .inner_margin(egui::Margin::symmetric(10, 8))
        .show(ui, |ui| {
            ui.horizontal_wrapped(|ui| {
                ui.label(
                    egui::RichText::new(banner.summary())
                        .color(egui::Color32::WHITE),
                );
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Dismiss").clicked() {
                        actions.dismiss_banner = true;
                    }
                });
            });
        });
}

fn show_inputs(ui: &mut egui::Ui, state: &PlaygroundState, actions: &mut ViewActions) {
    let text_id = egui::Id::new(TEXT_INPUT_ID);

    ui.horizontal(|ui| {
        ui.label("Rule:");
        let mut rule = state.form().rule().to_owned();
        let response = ui.add(
            egui::TextEdit::singleline(&mut rule)
                .id_salt("playground_rule_input")
                .desired_width(f32::INFINITY),
        );
        if response.changed() {
            actions.edits.push((FormField::Rule, rule));
        }
    });

    ui.label("Input:");

    // Consumed before the editor sees it so the shortcut does not insert a newline.
    let text_focused = ui.memory(|memory| memory.has_focus(text_id));
    if text_focused
        && ui.input_mut(|input| input.consume_key(egui::Modifiers::COMMAND, egui::Key::Enter))
    {
        actions.run = true;
    }

    let mut text = state.form().text().to_owned();
    let response = ui.add_sized(
        ui.available_size(),
        egui::TextEdit::multiline(&mut text).id(text_id).code_editor(),
    );
    if response.changed() {
        actions.edits.push((FormField::Text, text));
    }
}

fn show_output(ui: &mut egui::Ui, state: &PlaygroundState) {
    let form = state.form();
    let color = theme::output_color(ui.visuals(), form.success());

    egui::ScrollArea::both()
        .id_salt("playground_output_scroll")
        .auto_shrink([false, false])
        .show(ui, |ui| {
            ui.add(
                egui::Label::new(egui::RichText::new(form.result()).monospace().color(color))
                    .extend()
                    .selectable(true),
            );
        });
}
