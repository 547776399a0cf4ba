use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{domain::FormField, error::ApiError};

pub const CALCULATE_PATH: &str = "/calculate";

/// Form contents as submitted: field name to raw string value.
///
/// Values are never coerced on the client; numeric-looking fields travel as
/// strings and the backend decides what they mean.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Submission(BTreeMap<String, String>);

impl Submission {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn field(&self, field: FormField) -> Option<&str> {
        self.get(field.key())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Submission {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Backend view of a request body. Strings are kept verbatim and numbers in
/// their JSON form. A standard field holding any other type is rejected;
/// unknown keys holding one are dropped.
impl TryFrom<Map<String, Value>> for Submission {
    type Error = ApiError;

    fn try_from(body: Map<String, Value>) -> Result<Self, Self::Error> {
        let mut submission = Submission::new();
        for (name, value) in body {
            match value {
                Value::String(raw) => submission.insert(name, raw),
                Value::Number(number) => submission.insert(name, number.to_string()),
                other if FormField::ALL.iter().any(|field| field.key() == name) => {
                    return Err(ApiError::validation(format!(
                        "field '{name}' must be a number or a string, got {other}"
                    )));
                }
                _ => {}
            }
        }
        Ok(submission)
    }
}

/// A leaf of the result breakdown, already formatted by the backend.
///
/// Strings are shown as-is, numbers in their JSON form. A missing leaf decodes
/// to `null` and displays as empty text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DisplayValue(pub Value);

impl DisplayValue {
    pub fn text(&self) -> String {
        match &self.0 {
            Value::Null => String::new(),
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            other => other.to_string(),
        }
    }

    pub fn is_missing(&self) -> bool {
        self.0.is_null()
    }
}

impl From<&str> for DisplayValue {
    fn from(value: &str) -> Self {
        Self(Value::String(value.to_string()))
    }
}

impl From<String> for DisplayValue {
    fn from(value: String) -> Self {
        Self(Value::String(value))
    }
}

impl From<i64> for DisplayValue {
    fn from(value: i64) -> Self {
        Self(Value::from(value))
    }
}

impl From<f64> for DisplayValue {
    fn from(value: f64) -> Self {
        Self(Value::from(value))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportationBreakdown {
    pub total: DisplayValue,
    pub percentage: DisplayValue,
    pub car: DisplayValue,
    pub transit: DisplayValue,
    pub flights: DisplayValue,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HouseholdEnergyBreakdown {
    pub total: DisplayValue,
    pub percentage: DisplayValue,
    pub electricity: DisplayValue,
    pub natural_gas: DisplayValue,
}

/// Response body of `POST /calculate`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FootprintResult {
    pub total_annual_footprint: DisplayValue,
    pub trees_to_offset: DisplayValue,
    pub transportation: TransportationBreakdown,
    pub household_energy: HouseholdEnergyBreakdown,
}
