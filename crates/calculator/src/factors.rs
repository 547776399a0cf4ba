use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Short tons per kilogram.
pub const KG_TO_TONS: f64 = 0.00110231;
/// Tons of CO2 one mature tree absorbs in a year (48 lbs).
pub const TONS_CO2_PER_TREE: f64 = 0.024;

/// Emission factors in kg CO2e per unit of input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmissionFactors {
    /// Per mile driven in a typical passenger car.
    pub personal_car: f64,
    /// Per mile of bus or train travel.
    pub public_transit: f64,
    /// Per passenger mile on domestic flights.
    pub flights: f64,
    /// Per kWh, US grid average.
    pub electricity: f64,
    /// Per therm.
    pub natural_gas: f64,
}

impl Default for EmissionFactors {
    fn default() -> Self {
        Self {
            personal_car: 0.404,
            public_transit: 0.089,
            flights: 0.251,
            electricity: 0.475,
            natural_gas: 5.3,
        }
    }
}

#[derive(Debug, Error)]
#[error("unknown emission factor '{0}'")]
pub struct UnknownFactor(pub String);

impl EmissionFactors {
    pub fn set(&mut self, name: &str, value: f64) -> Result<(), UnknownFactor> {
        let slot = match name.to_ascii_lowercase().as_str() {
            "personal_car" => &mut self.personal_car,
            "public_transit" => &mut self.public_transit,
            "flights" => &mut self.flights,
            "electricity" => &mut self.electricity,
            "natural_gas" => &mut self.natural_gas,
            _ => return Err(UnknownFactor(name.to_string())),
        };
        *slot = value;
        Ok(())
    }
}
