use crate::interfaces::design_system::DesignSystem;
use eframe::egui;

/// Framed block with a small uppercase heading and an optional caption.
pub fn section<R>(
    ui: &mut egui::Ui,
    heading: &str,
    caption: Option<&str>,
    accent: Option<egui::Color32>,
    add_contents: impl FnOnce(&mut egui::Ui) -> R,
) -> R {
    DesignSystem::section_frame(accent)
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(
                    egui::RichText::new(heading.to_uppercase())
                        .size(11.0)
                        .strong()
                        .color(DesignSystem::TEXT_DIM),
                );
                if let Some(caption) = caption {
                    ui.label(
                        egui::RichText::new(caption)
                            .size(11.0)
                            .color(DesignSystem::TEXT_FAINT),
                    );
                }
            });
            ui.add_space(DesignSystem::GAP);
            add_contents(ui)
        })
        .inner
}
