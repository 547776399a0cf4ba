//! Footprint arithmetic shared by the HTTP backend and the log tool.

pub mod estimate;
pub mod factors;
pub mod footprint;

pub use estimate::{estimate_emission, EstimateError, LogActivity, TransportMode};
pub use factors::{EmissionFactors, UnknownFactor};
pub use footprint::{calculate_footprint, AnnualEmissions};
