//! Client side of the footprint calculator: the view controller, the view
//! surface it drives, and the HTTP backend it calls.

pub mod controller;
pub mod error;
pub mod transport;
pub mod view;

pub use controller::{CalculationOutcome, UiAction, ViewController, GENERIC_FAILURE_MESSAGE};
pub use error::{CalculationError, ViewError};
pub use transport::{CalculationBackend, FootprintClient};
pub use view::{CalculatorView, ViewModel};

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod controller_tests;
