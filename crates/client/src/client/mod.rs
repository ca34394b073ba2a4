//! HTTP client for the tasktrack API.

pub mod health;
pub mod tasks;

use serde::de::DeserializeOwned;

use tasktrack_core::api::ApiResponse;

use crate::error::{ClientError, Result};

/// HTTP client for the tasktrack API.
#[derive(Debug, Clone)]
pub struct TasktrackClient {
    client: reqwest::Client,
    base_url: String,
}

impl TasktrackClient {
    /// Create a new client with the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Create from environment (TASKTRACK_URL or default).
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("TASKTRACK_URL").unwrap_or_else(|_| "http://localhost:8080".to_string());
        Self::new(base_url)
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a URL for an endpoint.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Unwraps the `data` of an envelope response.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status().as_u16();
        let body = response.text().await?;
        envelope_data(status, &body)
    }

    /// Checks an envelope response that carries no data (e.g. delete).
    async fn handle_empty_response(&self, response: reqwest::Response) -> Result<()> {
        let status = response.status().as_u16();
        let body = response.text().await?;
        envelope_ack(status, &body)
    }
}

/// Extracts `data` from an envelope body, mapping failures to client errors.
pub fn envelope_data<T: DeserializeOwned>(status: u16, body: &str) -> Result<T> {
    check_status(status, body)?;

    let envelope: ApiResponse<T> = serde_json::from_str(body)?;
    envelope
        .data
        .ok_or_else(|| ClientError::InvalidResponse("response carried no data".to_string()))
}

/// Accepts any successful envelope, ignoring `data`.
pub fn envelope_ack(status: u16, body: &str) -> Result<()> {
    check_status(status, body)
}

fn check_status(status: u16, body: &str) -> Result<()> {
    if (200..300).contains(&status) {
        return Ok(());
    }

    let message = serde_json::from_str::<ApiResponse<serde_json::Value>>(body)
        .map(|envelope| envelope.message)
        .unwrap_or_else(|_| {
            if body.is_empty() {
                "Unknown error".to_string()
            } else {
                body.to_string()
            }
        });

    if status == 404 {
        Err(ClientError::NotFound { message })
    } else {
        Err(ClientError::ServerError { status, message })
    }
}
