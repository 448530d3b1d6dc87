use eframe::egui;

/// Palette and frames for the forecast window.
pub struct DesignSystem;

impl DesignSystem {
    pub const BG_WINDOW: egui::Color32 = egui::Color32::from_rgb(10, 12, 16);
    pub const BG_SECTION: egui::Color32 = egui::Color32::from_rgb(22, 27, 34);
    pub const BG_FIELD: egui::Color32 = egui::Color32::from_rgb(15, 18, 24);
    pub const OUTLINE: egui::Color32 = egui::Color32::from_rgb(48, 54, 61);

    pub const ACCENT: egui::Color32 = egui::Color32::from_rgb(41, 121, 255);
    pub const ACCENT_SOFT: egui::Color32 = egui::Color32::from_rgb(66, 165, 245);

    pub const PRICE_UP: egui::Color32 = egui::Color32::from_rgb(0, 230, 118);
    pub const PRICE_DOWN: egui::Color32 = egui::Color32::from_rgb(255, 23, 68);
    pub const WARNING: egui::Color32 = egui::Color32::from_rgb(255, 145, 0);

    pub const TEXT: egui::Color32 = egui::Color32::from_rgb(240, 246, 252);
    pub const TEXT_DIM: egui::Color32 = egui::Color32::from_gray(160);
    pub const TEXT_FAINT: egui::Color32 = egui::Color32::from_gray(100);

    /// Line colors for the close series and the three moving averages.
    pub const SERIES_CLOSE: egui::Color32 = Self::ACCENT;
    pub const SERIES_MA_5: egui::Color32 = egui::Color32::from_rgb(100, 200, 255);
    pub const SERIES_MA_10: egui::Color32 = egui::Color32::from_rgb(255, 165, 0);
    pub const SERIES_MA_20: egui::Color32 = egui::Color32::from_rgb(186, 104, 200);

    pub const GAP: f32 = 8.0;
    pub const GAP_WIDE: f32 = 20.0;

    /// Installs the dark visuals on the context.
    pub fn apply(ctx: &egui::Context) {
        let mut visuals = egui::Visuals::dark();
        visuals.window_fill = Self::BG_WINDOW;
        visuals.panel_fill = Self::BG_WINDOW;
        visuals.extreme_bg_color = Self::BG_FIELD;
        visuals.widgets.noninteractive.bg_stroke = egui::Stroke::new(1.0, Self::OUTLINE);
        visuals.widgets.noninteractive.fg_stroke = egui::Stroke::new(1.0, Self::TEXT);
        visuals.widgets.inactive.weak_bg_fill = Self::BG_SECTION;
        visuals.selection.bg_fill = Self::ACCENT.linear_multiply(0.4);
        ctx.set_visuals(visuals);
    }

    pub fn section_frame(accent: Option<egui::Color32>) -> egui::Frame {
        let (width, color) = match accent {
            Some(color) => (1.5, color),
            None => (1.0, Self::OUTLINE),
        };
        egui::Frame::NONE
            .fill(Self::BG_SECTION)
            .stroke(egui::Stroke::new(width, color))
            .corner_radius(8)
            .inner_margin(egui::Margin::same(14))
    }

    /// Green for a rise, red for a fall.
    pub fn direction_color(change: f64) -> egui::Color32 {
        if change >= 0.0 {
            Self::PRICE_UP
        } else {
            Self::PRICE_DOWN
        }
    }
}
