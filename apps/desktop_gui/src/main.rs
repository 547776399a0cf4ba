use std::time::Duration;

mod backend_bridge;
mod controller;
mod ui;

use clap::Parser;
use client_core::{FootprintClient, ViewController, ViewModel};
use crossbeam_channel::bounded;
use eframe::egui;

use backend_bridge::commands::BackendCommand;
use controller::events::UiEvent;
use ui::CalculatorApp;

#[derive(Parser, Debug)]
struct Args {
    #[arg(long, default_value = "http://127.0.0.1:5000")]
    server_url: String,
    /// Abort a calculation request after this many seconds. No limit by default.
    #[arg(long)]
    timeout_secs: Option<u64>,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();
    let args = Args::parse();

    let client = match args.timeout_secs {
        Some(secs) => match FootprintClient::with_timeout(&args.server_url, Duration::from_secs(secs)) {
            Ok(client) => client,
            Err(err) => {
                tracing::warn!(%err, "could not apply request timeout; continuing without one");
                FootprintClient::new(&args.server_url)
            }
        },
        None => FootprintClient::new(&args.server_url),
    };

    let controller = match ViewController::initialize(ViewModel::new()) {
        Ok(controller) => controller,
        Err(err) => {
            tracing::error!(%err, "calculator view failed to initialize");
            std::process::exit(1);
        }
    };

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(16);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(64);
    backend_bridge::runtime::launch(client, cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Carbon Footprint Calculator")
            .with_inner_size([720.0, 760.0])
            .with_min_inner_size([480.0, 520.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Carbon Footprint Calculator",
        options,
        Box::new(|_cc| Ok(Box::new(CalculatorApp::new(controller, cmd_tx, ui_rx)))),
    )
}
