use crate::domain::forecast::ForecastReport;
use crate::interfaces::design_system::DesignSystem;
use eframe::egui;
use egui_plot::{Legend, Line, Plot, PlotPoints, Points};
use rust_decimal::prelude::ToPrimitive;

/// Close and moving averages of the recent rows, plus the predicted close
/// one step to the right.
pub fn render_price_chart(ui: &mut egui::Ui, report: &ForecastReport) {
    if report.recent.is_empty() {
        ui.label(
            egui::RichText::new("Not enough data for a chart.")
                .italics()
                .color(DesignSystem::TEXT_FAINT),
        );
        return;
    }

    let mut close = Vec::with_capacity(report.recent.len());
    let mut ma_5 = Vec::with_capacity(report.recent.len());
    let mut ma_10 = Vec::with_capacity(report.recent.len());
    let mut ma_20 = Vec::with_capacity(report.recent.len());

    for (i, r) in report.recent.iter().enumerate() {
        let x = i as f64;
        close.push([x, r.close.to_f64().unwrap_or(0.0)]);
        ma_5.push([x, r.ma_5]);
        ma_10.push([x, r.ma_10]);
        ma_20.push([x, r.ma_20]);
    }
    let predicted = [report.recent.len() as f64, report.prediction.close];

    Plot::new("recent_price_plot")
        .height(220.0)
        .legend(Legend::default())
        .show_axes([false, true])
        .show_grid([true, true])
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new("Close", PlotPoints::from(close))
                    .color(DesignSystem::SERIES_CLOSE)
                    .width(2.0),
            );
            plot_ui.line(Line::new("MA_5", PlotPoints::from(ma_5)).color(DesignSystem::SERIES_MA_5));
            plot_ui.line(
                Line::new("MA_10", PlotPoints::from(ma_10)).color(DesignSystem::SERIES_MA_10),
            );
            plot_ui.line(
                Line::new("MA_20", PlotPoints::from(ma_20)).color(DesignSystem::SERIES_MA_20),
            );
            plot_ui.points(
                Points::new("Predicted close", vec![predicted])
                    .radius(5.0)
                    .color(DesignSystem::WARNING),
            );
        });
}
