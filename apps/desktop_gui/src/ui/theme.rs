use eframe::egui;

pub const BANNER_FILL: egui::Color32 = egui::Color32::from_rgb(111, 53, 53);
pub const BANNER_STROKE: egui::Color32 = egui::Color32::from_rgb(175, 96, 96);

/// Output text colour: neutral for a successful run, alert otherwise.
pub fn output_color(visuals: &egui::Visuals, success: bool) -> egui::Color32 {
    if success {
        visuals.strong_text_color()
    } else {
        visuals.error_fg_color
    }
}
