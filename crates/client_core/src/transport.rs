use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use shared::protocol::{FootprintResult, Submission, CALCULATE_PATH};

use crate::error::CalculationError;

/// Whatever turns a submission into a footprint result.
#[async_trait]
pub trait CalculationBackend: Send + Sync {
    async fn calculate(&self, submission: &Submission)
        -> Result<FootprintResult, CalculationError>;
}

/// HTTP client for the `/calculate` endpoint.
#[derive(Debug, Clone)]
pub struct FootprintClient {
    http: Client,
    server_url: String,
}

impl FootprintClient {
    pub fn new(server_url: impl Into<String>) -> Self {
        Self::with_http_client(Client::new(), server_url)
    }

    /// Requests have no deadline unless one is configured here.
    pub fn with_timeout(
        server_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, CalculationError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_http_client(http, server_url))
    }

    pub fn with_http_client(http: Client, server_url: impl Into<String>) -> Self {
        let server_url = server_url.into().trim_end_matches('/').to_string();
        Self { http, server_url }
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    pub fn endpoint(&self) -> String {
        format!("{}{CALCULATE_PATH}", self.server_url)
    }
}

#[async_trait]
impl CalculationBackend for FootprintClient {
    async fn calculate(
        &self,
        submission: &Submission,
    ) -> Result<FootprintResult, CalculationError> {
        let response = self
            .http
            .post(self.endpoint())
            .json(submission)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(CalculationError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}
