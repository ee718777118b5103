//! Liveness HTTP server run alongside the gateway client.

use axum::{Router, routing::get};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::Ctx;

pub mod api;

pub const BANNER: &str = "Anime Master Bot is Running! (Open Source Version)";

/// Build the liveness router
pub fn router(ctx: Ctx) -> Router {
    Router::new()
        .route("/", get(|| async { BANNER }))
        .merge(api::mount())
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}

/// Serve the liveness router on every interface until the process exits
pub async fn serve(port: u16, ctx: Ctx) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;

    info!("Liveness endpoint listening on {}", addr);
    axum::serve(listener, router(ctx)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    async fn get_body(uri: &str) -> (StatusCode, Vec<u8>) {
        let response = router(Ctx::new())
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, body.to_vec())
    }

    #[tokio::test]
    async fn test_root_banner() {
        let (status, body) = get_body("/").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, BANNER.as_bytes());
    }

    #[tokio::test]
    async fn test_health_json() {
        let (status, body) = get_body("/health").await;
        let json: Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["code"], 200);
        assert_eq!(json["data"]["status"], "ok");
        assert!(json["data"]["uptime_secs"].is_u64());
    }

    #[tokio::test]
    async fn test_unknown_path() {
        let (status, _) = get_body("/nope").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
