//! Wire types for the HTTP API.

mod health;
mod response;

pub use health::{HealthInfo, ReadinessReport};
pub use response::ApiResponse;
