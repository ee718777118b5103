use axum::{Router, extract::State, routing::get};
use serde::Serialize;

use crate::{ApiResponse, Ctx};

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub uptime_secs: u64,
}

/// Liveness probe
async fn health(State(ctx): State<Ctx>) -> ApiResponse<HealthStatus> {
    ApiResponse {
        code: 200,
        message: "Service is healthy".to_string(),
        data: Some(HealthStatus {
            status: "ok",
            uptime_secs: ctx.started_at.elapsed().as_secs(),
        }),
    }
}

pub fn mount() -> Router<Ctx> {
    Router::new().route("/health", get(health))
}
