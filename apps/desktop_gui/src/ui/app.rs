use client_core::{CalculationOutcome, ViewController, ViewModel};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::domain::{DisplayField, FormField, Panel, ProgressBar};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{events::UiEvent, orchestration::dispatch_backend_command};

const HERO_TITLE: &str = "Carbon Footprint Calculator";
const HERO_TAGLINE: &str = "Find out how much CO2 your travel and household energy produce each year.";

pub struct CalculatorApp {
    controller: ViewController<ViewModel>,
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    status: String,
    in_flight: usize,
}

impl CalculatorApp {
    pub fn new(
        controller: ViewController<ViewModel>,
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
    ) -> Self {
        Self {
            controller,
            cmd_tx,
            ui_rx,
            status: "Starting...".to_string(),
            in_flight: 0,
        }
    }

    pub fn controller(&self) -> &ViewController<ViewModel> {
        &self.controller
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Form submit: hand the submission to the worker. Nothing is guarded
    /// against a second submit while one is outstanding.
    pub fn submit(&mut self) {
        let submission = self.controller.read_submission();
        match dispatch_backend_command(&self.cmd_tx, BackendCommand::Calculate { submission }) {
            Ok(()) => {
                self.in_flight += 1;
                self.status = "Calculating...".to_string();
            }
            Err(err) => {
                self.controller
                    .apply_outcome(&CalculationOutcome::Failure(err));
            }
        }
    }

    pub fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => self.status = message,
                UiEvent::WorkerFailed(message) => {
                    tracing::error!(%message, "backend worker unavailable");
                    self.status = message;
                }
                UiEvent::CalculationFinished(outcome) => {
                    self.in_flight = self.in_flight.saturating_sub(1);
                    self.status = if outcome.is_success() {
                        "Results updated".to_string()
                    } else {
                        "Calculation failed".to_string()
                    };
                    self.controller.apply_outcome(&outcome);
                }
            }
        }
    }

    fn show_hero(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(12.0);
            ui.heading(HERO_TITLE);
            ui.label(HERO_TAGLINE);
            ui.add_space(6.0);
            if ui.button("Calculate your footprint").clicked() {
                self.controller.scroll_to_calculator();
            }
            ui.add_space(12.0);
        });
    }

    fn show_form_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("Your monthly usage");
        ui.add_space(4.0);
        egui::Grid::new("carbon-form")
            .num_columns(2)
            .spacing([16.0, 8.0])
            .show(ui, |ui| {
                for field in FormField::ALL {
                    ui.label(field.label());
                    if let Some(value) = self.controller.view_mut().field_mut(field.key()) {
                        ui.add(egui::TextEdit::singleline(value).desired_width(160.0));
                    }
                    ui.end_row();
                }
            });
        ui.add_space(8.0);
        if ui.button("Calculate").clicked() {
            self.submit();
        }
    }

    fn show_results_panel(&mut self, ui: &mut egui::Ui) {
        let view = self.controller.view();
        let text = move |field: DisplayField| view.text(field).unwrap_or_default().to_string();

        ui.heading("Your annual carbon footprint");
        ui.label(
            egui::RichText::new(format!("{} tons CO2e", text(DisplayField::TotalFootprint)))
                .size(28.0)
                .strong(),
        );
        ui.label(format!(
            "About {} trees would be needed to offset this each year.",
            text(DisplayField::TreesOffset)
        ));
        ui.add_space(10.0);

        breakdown_section(
            ui,
            view,
            "Transportation",
            DisplayField::TransportTotal,
            ProgressBar::Transport,
            &[
                ("Car", DisplayField::CarEmissions),
                ("Public transit", DisplayField::TransitEmissions),
                ("Flights", DisplayField::FlightEmissions),
            ],
        );
        ui.add_space(10.0);
        breakdown_section(
            ui,
            view,
            "Household energy",
            DisplayField::EnergyTotal,
            ProgressBar::Energy,
            &[
                ("Electricity", DisplayField::ElectricityEmissions),
                ("Natural gas", DisplayField::NaturalGasEmissions),
            ],
        );

        ui.add_space(12.0);
        ui.horizontal(|ui| {
            if ui.button("Recalculate").clicked() {
                self.controller.show_form();
            }
            if ui.button("Start over").clicked() {
                self.controller.reset_form();
            }
        });
    }

    fn show_alert(&mut self, ctx: &egui::Context) {
        let Some(message) = self.controller.view().pending_alert().map(str::to_string) else {
            return;
        };
        egui::Window::new("Error")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(message);
                if ui.button("OK").clicked() {
                    self.controller.view_mut().dismiss_alert();
                }
            });
    }
}

fn breakdown_section(
    ui: &mut egui::Ui,
    view: &ViewModel,
    title: &str,
    total: DisplayField,
    bar: ProgressBar,
    rows: &[(&str, DisplayField)],
) {
    let text = move |field: DisplayField| view.text(field).unwrap_or_default();

    ui.label(egui::RichText::new(format!("{title}: {} tons", text(total))).strong());
    // Unparseable widths leave the bar empty; out-of-range ones are clamped only when drawn.
    let fraction = view.progress_fraction(bar).unwrap_or(0.0).clamp(0.0, 1.0);
    ui.add(egui::ProgressBar::new(fraction).text(text(bar.label())));
    egui::Grid::new(bar.element_id())
        .num_columns(2)
        .spacing([24.0, 4.0])
        .show(ui, |ui| {
            for (label, field) in rows {
                ui.label(*label);
                ui.label(text(*field));
                ui.end_row();
            }
        });
}

impl eframe::App for CalculatorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        let alert_open = self.controller.view().pending_alert().is_some();

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if self.in_flight > 0 {
                    ui.spinner();
                }
                ui.label(&self.status);
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_enabled_ui(!alert_open, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    self.show_hero(ui);
                    ui.separator();

                    let scroll_target = self.controller.view_mut().take_scroll_target();
                    let visible = self.controller.view().visible_panel();
                    if scroll_target == Some(visible) {
                        ui.scroll_to_cursor(Some(egui::Align::TOP));
                    }
                    match visible {
                        Panel::Form => self.show_form_panel(ui),
                        Panel::Results => self.show_results_panel(ui),
                    }
                });
            });
        });

        self.show_alert(ctx);

        if self.in_flight > 0 {
            ctx.request_repaint_after(std::time::Duration::from_millis(16));
        } else {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
    }
}
