//! Per-entry estimates for the footprint log, in kg CO2e.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// kg CO2e per kWh used for logged electricity.
pub const ENERGY_KG_PER_KWH: f64 = 0.45;

#[derive(Debug, Error, PartialEq)]
pub enum EstimateError {
    #[error("invalid mode of transport '{0}'")]
    UnknownTransportMode(String),
    #[error("amount must be a finite, non-negative number, got {0}")]
    InvalidAmount(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportMode {
    Car,
    Bus,
    Train,
}

impl TransportMode {
    pub fn kg_per_km(self) -> f64 {
        match self {
            TransportMode::Car => 0.17,
            TransportMode::Bus => 0.08,
            TransportMode::Train => 0.041,
        }
    }
}

impl FromStr for TransportMode {
    type Err = EstimateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "car" => Ok(TransportMode::Car),
            "bus" => Ok(TransportMode::Bus),
            "train" => Ok(TransportMode::Train),
            _ => Err(EstimateError::UnknownTransportMode(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LogActivity {
    Transport { mode: TransportMode, distance_km: f64 },
    Energy { kwh: f64 },
}

impl LogActivity {
    /// Category name recorded alongside the entry.
    pub fn category(&self) -> &'static str {
        match self {
            LogActivity::Transport { .. } => "Transport",
            LogActivity::Energy { .. } => "Energy",
        }
    }
}

impl fmt::Display for LogActivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogActivity::Transport { mode, distance_km } => {
                write!(f, "{distance_km} km by {mode:?}")
            }
            LogActivity::Energy { kwh } => write!(f, "{kwh} kWh"),
        }
    }
}

pub fn estimate_emission(activity: LogActivity) -> Result<f64, EstimateError> {
    let (amount, factor) = match activity {
        LogActivity::Transport { mode, distance_km } => (distance_km, mode.kg_per_km()),
        LogActivity::Energy { kwh } => (kwh, ENERGY_KG_PER_KWH),
    };
    if !amount.is_finite() || amount < 0.0 {
        return Err(EstimateError::InvalidAmount(amount));
    }
    Ok(amount * factor)
}
