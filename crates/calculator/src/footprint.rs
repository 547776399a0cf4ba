use shared::{
    domain::FormField,
    error::ApiError,
    protocol::{FootprintResult, HouseholdEnergyBreakdown, Submission, TransportationBreakdown},
};

use crate::factors::{EmissionFactors, KG_TO_TONS, TONS_CO2_PER_TREE};

const MONTHS_PER_YEAR: f64 = 12.0;

/// Annual emissions per source, in short tons of CO2e, before rounding.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AnnualEmissions {
    pub car: f64,
    pub transit: f64,
    pub flights: f64,
    pub electricity: f64,
    pub natural_gas: f64,
}

impl AnnualEmissions {
    /// Monthly inputs are annualized; `flights` is already a yearly figure.
    pub fn from_submission(
        submission: &Submission,
        factors: &EmissionFactors,
    ) -> Result<Self, ApiError> {
        let monthly = |field: FormField, factor: f64| -> Result<f64, ApiError> {
            Ok(read_amount(submission, field)? * MONTHS_PER_YEAR * factor * KG_TO_TONS)
        };

        Ok(Self {
            car: monthly(FormField::PersonalCar, factors.personal_car)?,
            transit: monthly(FormField::PublicTransit, factors.public_transit)?,
            flights: read_amount(submission, FormField::Flights)? * factors.flights * KG_TO_TONS,
            electricity: monthly(FormField::Electricity, factors.electricity)?,
            natural_gas: monthly(FormField::NaturalGas, factors.natural_gas)?,
        })
    }

    pub fn transportation(&self) -> f64 {
        self.car + self.transit + self.flights
    }

    pub fn household_energy(&self) -> f64 {
        self.electricity + self.natural_gas
    }

    pub fn total(&self) -> f64 {
        self.transportation() + self.household_energy()
    }

    pub fn trees_to_offset(&self) -> i64 {
        let total = self.total();
        if total > 0.0 {
            (total / TONS_CO2_PER_TREE).round_ties_even() as i64
        } else {
            0
        }
    }

    fn share_of_total(&self, part: f64) -> i64 {
        let total = self.total();
        if total > 0.0 {
            (part / total * 100.0).round_ties_even() as i64
        } else {
            0
        }
    }

    pub fn into_result(self) -> FootprintResult {
        FootprintResult {
            total_annual_footprint: round2(self.total()).into(),
            trees_to_offset: self.trees_to_offset().into(),
            transportation: TransportationBreakdown {
                total: round2(self.transportation()).into(),
                percentage: self.share_of_total(self.transportation()).into(),
                car: round2(self.car).into(),
                transit: round2(self.transit).into(),
                flights: round2(self.flights).into(),
            },
            household_energy: HouseholdEnergyBreakdown {
                total: round2(self.household_energy()).into(),
                percentage: self.share_of_total(self.household_energy()).into(),
                electricity: round2(self.electricity).into(),
                natural_gas: round2(self.natural_gas).into(),
            },
        }
    }
}

pub fn calculate_footprint(
    submission: &Submission,
    factors: &EmissionFactors,
) -> Result<FootprintResult, ApiError> {
    let emissions = AnnualEmissions::from_submission(submission, factors)?;
    tracing::debug!(
        total_tons = emissions.total(),
        fields = submission.len(),
        "computed annual footprint"
    );
    Ok(emissions.into_result())
}

/// Missing and blank fields count as zero.
fn read_amount(submission: &Submission, field: FormField) -> Result<f64, ApiError> {
    let raw = submission.field(field).map(str::trim).unwrap_or_default();
    if raw.is_empty() {
        return Ok(0.0);
    }
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ApiError::validation(format!(
            "field '{}' must be a number, got '{raw}'",
            field.key()
        ))),
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use shared::error::ErrorCode;

    use super::*;

    fn sample_submission() -> Submission {
        Submission::new()
            .with("personal_car", "1000")
            .with("public_transit", "200")
            .with("flights", "2000")
            .with("electricity", "900")
            .with("natural_gas", "30")
    }

    #[test]
    fn computes_annual_breakdown_from_monthly_inputs() {
        let result = calculate_footprint(&sample_submission(), &EmissionFactors::default())
            .expect("footprint");

        assert_eq!(
            serde_json::to_value(&result).expect("json"),
            json!({
                "total_annual_footprint": 13.89,
                "trees_to_offset": 579,
                "transportation": {
                    "total": 6.13,
                    "percentage": 44,
                    "car": 5.34,
                    "transit": 0.24,
                    "flights": 0.55,
                },
                "household_energy": {
                    "total": 7.76,
                    "percentage": 56,
                    "electricity": 5.65,
                    "natural_gas": 2.1,
                },
            })
        );
    }

    #[test]
    fn empty_submission_yields_zero_footprint_and_no_trees() {
        let result =
            calculate_footprint(&Submission::new(), &EmissionFactors::default()).expect("zero");
        assert_eq!(result.trees_to_offset.text(), "0");
        assert_eq!(result.transportation.percentage.text(), "0");
        assert_eq!(result.household_energy.percentage.text(), "0");
        assert_eq!(result.total_annual_footprint.text(), "0.0");
    }

    #[test]
    fn blank_fields_count_as_zero() {
        let submission = Submission::new()
            .with("personal_car", "  ")
            .with("electricity", "100");
        let emissions =
            AnnualEmissions::from_submission(&submission, &EmissionFactors::default())
                .expect("emissions");
        assert_eq!(emissions.car, 0.0);
        assert!(emissions.electricity > 0.0);
        assert_eq!(emissions.into_result().household_energy.percentage.text(), "100");
    }

    #[test]
    fn non_numeric_field_is_a_validation_error() {
        let submission = Submission::new().with("flights", "lots");
        let err = calculate_footprint(&submission, &EmissionFactors::default())
            .expect_err("invalid input");
        assert_eq!(err.code, ErrorCode::Validation);
        assert!(err.message.contains("flights"));
    }

    #[test]
    fn custom_factors_change_the_result() {
        let submission = Submission::new().with("natural_gas", "10");
        let mut factors = EmissionFactors::default();
        factors.natural_gas = 0.0;
        let result = calculate_footprint(&submission, &factors).expect("footprint");
        assert_eq!(result.trees_to_offset.text(), "0");
    }
}
