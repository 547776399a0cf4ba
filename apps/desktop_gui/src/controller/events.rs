//! Events flowing from the backend worker back to the UI thread.

use client_core::CalculationOutcome;

pub enum UiEvent {
    Info(String),
    /// The worker could not start; every later submit will fail.
    WorkerFailed(String),
    CalculationFinished(CalculationOutcome),
}
