//! Health endpoints.
//!
//! - `/v1/health` - Application facts in the response envelope
//! - `/livez` - Basic liveness probe (immediate 200, no checks)
//! - `/readyz` - Readiness probe (store must answer, cache is informational)

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;

use tasktrack_core::api::{ApiResponse, HealthInfo, ReadinessReport};

use crate::state::AppState;

/// GET /v1/health - Application status.
pub async fn health(State(state): State<AppState>) -> Json<ApiResponse<HealthInfo>> {
    let info = HealthInfo {
        status: "UP".to_string(),
        application: state.info.name.clone(),
        version: state.info.version.clone(),
        environment: state.info.environment.clone(),
        timestamp: Utc::now().timestamp_millis(),
    };

    Json(ApiResponse::success(info, "Application is healthy"))
}

/// GET /livez - Basic liveness probe.
///
/// Returns 200 immediately. Used to check if the server is accepting connections.
pub async fn livez() -> StatusCode {
    StatusCode::OK
}

/// GET /readyz - Readiness probe.
///
/// Probes the store (and the cache, when enabled) through the task service.
/// Returns 200 when the store answers, 503 otherwise; a cache outage is
/// reported but never fails readiness.
pub async fn readyz(State(state): State<AppState>) -> Response {
    let (store_up, cache_up) = tokio::join!(state.tasks.store_ready(), state.tasks.cache_ready());
    let report = ReadinessReport::from_probes(store_up, cache_up);

    let status = if report.is_ready() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(report)).into_response()
}
