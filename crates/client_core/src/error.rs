use thiserror::Error;

#[derive(Debug, Error)]
pub enum CalculationError {
    #[error("request to calculation endpoint failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("calculation endpoint answered with status {0}")]
    Status(u16),
    #[error("calculation response is not a valid result: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("calculation backend unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ViewError {
    #[error("view is missing required elements: {}", .0.join(", "))]
    MissingBindPoints(Vec<&'static str>),
}
