//! UI layer for the desktop calculator: hero, input panel, results panel.

pub mod app;

pub use app::CalculatorApp;
