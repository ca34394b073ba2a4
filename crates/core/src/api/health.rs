use serde::{Deserialize, Serialize};

/// Payload of `GET /v1/health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthInfo {
    pub status: String,
    pub application: String,
    pub version: String,
    pub environment: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
}

/// Payload of `GET /readyz`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadinessReport {
    /// `"ready"` or `"not_ready"`.
    pub status: String,
    /// `"up"` or `"down"`.
    pub store: String,
    /// `"up"`, `"down"` or `"disabled"`. Never affects readiness.
    pub cache: String,
}

impl ReadinessReport {
    /// Builds a report from the probe outcomes. `cache` is `None` when caching
    /// is disabled.
    pub fn from_probes(store_up: bool, cache: Option<bool>) -> Self {
        let up_down = |up: bool| if up { "up" } else { "down" }.to_string();
        Self {
            status: if store_up { "ready" } else { "not_ready" }.to_string(),
            store: up_down(store_up),
            cache: cache.map(up_down).unwrap_or_else(|| "disabled".to_string()),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
