//! Health check operations.

use super::TasktrackClient;
use crate::error::Result;
use tasktrack_core::api::{HealthInfo, ReadinessReport};

impl TasktrackClient {
    /// Application status.
    pub async fn health(&self) -> Result<HealthInfo> {
        let response = self.client.get(self.url("/v1/health")).send().await?;
        self.handle_response(response).await
    }

    /// Liveness probe. Returns whether the server answered 200.
    pub async fn live(&self) -> Result<bool> {
        let response = self.client.get(self.url("/livez")).send().await?;
        Ok(response.status().is_success())
    }

    /// Readiness probe. The report is returned for both 200 and 503.
    pub async fn ready(&self) -> Result<ReadinessReport> {
        let response = self.client.get(self.url("/readyz")).send().await?;
        Ok(response.json().await?)
    }
}
