//! HTTP client for the passdown backend
//!
//! [`DashboardApi`] is the seam between the worker and the network so the
//! worker can be exercised with a mock. [`HttpApiClient`] is the real
//! implementation on top of `reqwest`'s blocking client; it is only ever
//! called from backend threads, never from the UI thread.

use crate::config::ApiConfig;
use crate::error::{PassdownError, Result};
use crate::types::{ApiEnvelope, DownloadErrorBody, RepeatabilityDataset};

/// Longest slice of an unparseable error body kept in the error message
const MAX_ERROR_BODY_CHARS: usize = 200;

/// Operations the dashboard needs from the backend
#[cfg_attr(test, mockall::automock)]
pub trait DashboardApi: Send + Sync {
    /// Fetch the IV repeatability dataset
    fn fetch_repeatability(&self) -> Result<RepeatabilityDataset>;

    /// Download a file by name and return its bytes
    fn download_file(&self, filename: &str) -> Result<Vec<u8>>;
}

/// `reqwest`-backed implementation of [`DashboardApi`]
pub struct HttpApiClient {
    client: reqwest::blocking::Client,
    config: ApiConfig,
}

impl HttpApiClient {
    /// Build a client with the configured timeout
    pub fn new(config: ApiConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("passdown-vis/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, config })
    }

    /// API configuration in use
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }
}

impl DashboardApi for HttpApiClient {
    fn fetch_repeatability(&self) -> Result<RepeatabilityDataset> {
        let url = self.config.repeatability_url();
        tracing::debug!("GET {}", url);

        let response = self.client.get(&url).send()?;
        let status = response.status().as_u16();
        let body = response.text()?;

        parse_repeatability_response(status, &body)
    }

    fn download_file(&self, filename: &str) -> Result<Vec<u8>> {
        let url = self.config.download_url();
        tracing::debug!("GET {}?filename={}", url, filename);

        let response = self
            .client
            .get(&url)
            .query(&[("filename", filename)])
            .send()?;
        let status = response.status();

        if status.is_success() {
            let bytes = response.bytes()?;
            return Ok(bytes.to_vec());
        }

        let body = response.text().unwrap_or_default();
        Err(parse_download_error(status.as_u16(), &body))
    }
}

/// Interpret a repeatability response body.
///
/// Non-success payloads, missing data and datasets without rows are all
/// errors; the caller treats them identically.
pub fn parse_repeatability_response(status: u16, body: &str) -> Result<RepeatabilityDataset> {
    let envelope: ApiEnvelope<RepeatabilityDataset> = match serde_json::from_str(body) {
        Ok(envelope) => envelope,
        Err(e) if (200..300).contains(&status) => return Err(e.into()),
        Err(_) => {
            return Err(PassdownError::Status {
                status,
                message: truncate_body(body),
            })
        }
    };

    if !envelope.success {
        let message = envelope
            .error
            .unwrap_or_else(|| "request was not successful".to_string());
        return Err(PassdownError::Api(message));
    }

    match envelope.data {
        Some(dataset) if !dataset.is_empty() => Ok(dataset),
        _ => Err(PassdownError::EmptyDataset),
    }
}

/// Build the error for a failed download response
pub fn parse_download_error(status: u16, body: &str) -> PassdownError {
    let message = serde_json::from_str::<DownloadErrorBody>(body)
        .map(|b| b.message)
        .unwrap_or_else(|_| truncate_body(body));

    PassdownError::Status { status, message }
}

fn truncate_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "empty response".to_string();
    }
    trimmed.chars().take(MAX_ERROR_BODY_CHARS).collect()
}
