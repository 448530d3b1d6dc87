use crate::interfaces::components::section::section;
use crate::interfaces::design_system::DesignSystem;
use eframe::egui;

/// One predicted price component, with its move against the last close
/// when that close is usable.
pub fn render_price_tile(ui: &mut egui::Ui, label: &str, predicted: f64, last_close: Option<f64>) {
    section(ui, label, None, None, |ui| {
        ui.set_min_height(70.0);
        ui.label(
            egui::RichText::new(format!("{:.2}", predicted))
                .size(26.0)
                .strong()
                .color(DesignSystem::TEXT),
        );

        if let Some(pct) = last_close.and_then(|close| percent_move(predicted, close)) {
            ui.label(
                egui::RichText::new(format!("{:+.2}% vs last close", pct))
                    .size(11.0)
                    .color(DesignSystem::direction_color(pct)),
            );
        }
    });
}

pub fn percent_move(predicted: f64, last_close: f64) -> Option<f64> {
    if last_close == 0.0 || !last_close.is_finite() || !predicted.is_finite() {
        return None;
    }
    Some((predicted - last_close) / last_close * 100.0)
}
