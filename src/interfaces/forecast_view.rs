use crate::application::client::{ForecastClient, ForecastOutcome};
use crate::domain::forecast::{ForecastReport, OhlcTarget};
use crate::interfaces::components::charts::render_price_chart;
use crate::interfaces::components::metrics::render_price_tile;
use crate::interfaces::components::section::section;
use crate::interfaces::design_system::DesignSystem;
use eframe::egui;
use rust_decimal::prelude::ToPrimitive;
use std::time::Duration;

const MAX_LOG_LINES: usize = 500;

#[derive(Debug, Clone, PartialEq)]
enum Status {
    Idle,
    Running(String),
    Done(String),
    Failed(String),
}

pub struct ForecastApp {
    client: ForecastClient,
    symbol_input: String,
    status: Status,
    report: Option<ForecastReport>,
    logs: Vec<String>,
}

impl ForecastApp {
    pub fn new(client: ForecastClient, default_symbol: impl Into<String>) -> Self {
        Self {
            client,
            symbol_input: default_symbol.into(),
            status: Status::Idle,
            report: None,
            logs: Vec::new(),
        }
    }

    fn drain_channels(&mut self) {
        while let Some(line) = self.client.poll_log() {
            self.logs.push(line.trim_end().to_string());
        }
        if self.logs.len() > MAX_LOG_LINES {
            let excess = self.logs.len() - MAX_LOG_LINES;
            self.logs.drain(..excess);
        }

        while let Some(outcome) = self.client.poll_outcome() {
            match outcome {
                ForecastOutcome::Completed(report) => {
                    self.status = Status::Done(format!(
                        "{}: {} feature rows, last trading day {}",
                        report.symbol, report.feature_rows, report.last_trading_date
                    ));
                    self.report = Some(*report);
                }
                ForecastOutcome::Failed {
                    symbol,
                    kind,
                    message,
                } => {
                    self.status = Status::Failed(format!("{} ({}: {})", kind.headline(), symbol, message));
                    self.report = None;
                }
            }
        }
    }

    fn submit(&mut self) {
        let symbol = self.symbol_input.trim().to_string();
        if symbol.is_empty() {
            self.status = Status::Failed("Enter a stock symbol.".to_string());
            return;
        }
        match self.client.request(&symbol) {
            Ok(()) => self.status = Status::Running(symbol),
            Err(e) => self.status = Status::Failed(e.to_string()),
        }
    }

    fn render_status(&self, ui: &mut egui::Ui) {
        let (text, color) = match &self.status {
            Status::Idle => (
                "Enter a symbol and run a prediction.".to_string(),
                DesignSystem::TEXT_DIM,
            ),
            Status::Running(symbol) => (
                format!("Fetching data and predicting {}...", symbol),
                DesignSystem::ACCENT_SOFT,
            ),
            Status::Done(text) => (text.clone(), DesignSystem::PRICE_UP),
            Status::Failed(text) => (text.clone(), DesignSystem::PRICE_DOWN),
        };
        ui.label(egui::RichText::new(text).color(color));
    }

    fn render_prediction(ui: &mut egui::Ui, report: &ForecastReport) {
        ui.label(
            egui::RichText::new(format!("Predicted OHLC for {}", report.prediction.date))
                .size(18.0)
                .strong(),
        );
        ui.add_space(DesignSystem::GAP);

        let last_close = report.recent.last().and_then(|r| r.close.to_f64());

        ui.columns(4, |cols| {
            for (col, target) in cols.iter_mut().zip(OhlcTarget::ALL) {
                render_price_tile(
                    col,
                    &target.to_string(),
                    report.prediction.value(target),
                    last_close,
                );
            }
        });
    }

    fn render_recent_grid(ui: &mut egui::Ui, report: &ForecastReport) {
        let caption = format!("last {} of {} feature rows", report.recent.len(), report.feature_rows);
        section(ui, "Recent Data", Some(&caption), None, |ui| {
            egui::Grid::new("recent_data_grid")
                .striped(true)
                .num_columns(10)
                .spacing([16.0, 6.0])
                .show(ui, |ui| {
                    for header in [
                        "Date", "Open", "High", "Low", "Close", "Volume", "Return", "MA_5",
                        "MA_10", "MA_20",
                    ] {
                        ui.label(egui::RichText::new(header).strong().color(DesignSystem::TEXT_DIM));
                    }
                    ui.end_row();

                    for r in &report.recent {
                        ui.label(r.date.to_string());
                        ui.label(format!("{:.2}", r.open));
                        ui.label(format!("{:.2}", r.high));
                        ui.label(format!("{:.2}", r.low));
                        ui.label(format!("{:.2}", r.close));
                        ui.label(format!("{:.0}", r.volume));
                        ui.label(
                            egui::RichText::new(format!("{:+.3}%", r.ret * 100.0))
                                .color(DesignSystem::direction_color(r.ret)),
                        );
                        ui.label(format!("{:.2}", r.ma_5));
                        ui.label(format!("{:.2}", r.ma_10));
                        ui.label(format!("{:.2}", r.ma_20));
                        ui.end_row();
                    }
                });
        });
    }
}

impl eframe::App for ForecastApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        DesignSystem::apply(ctx);

        self.drain_channels();

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.add_space(DesignSystem::GAP);
            ui.horizontal(|ui| {
                ui.heading("Stock OHLC Prediction");
                ui.separator();

                ui.label("Symbol");
                let response = ui.add(
                    egui::TextEdit::singleline(&mut self.symbol_input)
                        .hint_text("e.g. ^NSEI or RELIANCE.NS")
                        .desired_width(180.0),
                );
                let enter = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

                let running = matches!(self.status, Status::Running(_));
                let clicked = ui
                    .add_enabled(!running, egui::Button::new("Run Prediction"))
                    .clicked();
                if (clicked || enter) && !running {
                    self.submit();
                }
            });
            ui.add_space(4.0);
            self.render_status(ui);
            ui.add_space(DesignSystem::GAP);
        });

        egui::SidePanel::right("log_panel")
            .default_width(320.0)
            .min_width(200.0)
            .resizable(true)
            .show(ctx, |ui| {
                ui.heading("Logs");
                ui.separator();
                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .stick_to_bottom(true)
                    .show(ui, |ui| {
                        for line in &self.logs {
                            let color = if line.contains("ERROR") {
                                DesignSystem::PRICE_DOWN
                            } else if line.contains("WARN") {
                                DesignSystem::WARNING
                            } else {
                                DesignSystem::TEXT_DIM
                            };
                            ui.label(egui::RichText::new(line).monospace().size(11.0).color(color));
                        }
                    });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                let Some(report) = &self.report else {
                    ui.add_space(DesignSystem::GAP_WIDE);
                    ui.label(
                        egui::RichText::new("No prediction yet.")
                            .italics()
                            .color(DesignSystem::TEXT_FAINT),
                    );
                    return;
                };

                Self::render_prediction(ui, report);
                ui.add_space(DesignSystem::GAP_WIDE);

                section(
                    ui,
                    "Close and Moving Averages",
                    Some("orange dot: predicted close"),
                    Some(DesignSystem::ACCENT),
                    |ui| render_price_chart(ui, report),
                );
                ui.add_space(DesignSystem::GAP_WIDE);

                Self::render_recent_grid(ui, report);
            });
        });

        // Keep polling the worker while a request is in flight.
        ctx.request_repaint_after(Duration::from_millis(200));
    }
}
