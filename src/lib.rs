pub mod about;
pub mod bot;
pub mod config;
pub mod error;
pub mod gate;
pub mod logging;
pub mod routes;
pub mod scraper;
pub mod services;
pub mod translate;

#[cfg(test)]
mod test_util;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::time::Instant;

/// Shared state of the liveness server
#[derive(Debug, Clone)]
pub struct Ctx {
    pub started_at: Instant,
}

impl Ctx {
    pub fn new() -> Self {
        Self {
            started_at: Instant::now(),
        }
    }
}

impl Default for Ctx {
    fn default() -> Self {
        Self::new()
    }
}

/// JSON envelope for HTTP responses
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub code: u16,
    pub message: String,
    pub data: Option<T>,
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}
