//! Runtime bridge between UI command queue and backend event intake.

use std::thread;

use client_core::{CalculationBackend, CalculationOutcome, FootprintClient};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;

/// Commands are handled one at a time, so outcomes reach the UI in the order
/// the submits were made.
pub fn launch(client: FootprintClient, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                tracing::error!("failed to build backend runtime: {err}");
                let _ = ui_tx.send(UiEvent::WorkerFailed(format!(
                    "backend worker startup failure: {err}"
                )));
                return;
            }
        };

        let _ = ui_tx.send(UiEvent::Info(server_status(client.server_url())));

        runtime.block_on(async move {
            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::Calculate { submission } => {
                        let outcome =
                            CalculationOutcome::from(client.calculate(&submission).await);
                        if ui_tx.send(UiEvent::CalculationFinished(outcome)).is_err() {
                            break;
                        }
                    }
                }
            }
            tracing::debug!("backend worker stopped");
        });
    });
}

/// Nothing has been sent yet, so this names the server without claiming it is reachable.
fn server_status(server_url: &str) -> String {
    format!("Server: {server_url}")
}
