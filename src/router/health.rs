//! Health check route

use crate::shop::SharedState;
use axum::{http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;

/// Service name reported by the health check
pub const SERVICE_NAME: &str = "Shopify-storefront-mcp-server";

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
}

pub fn routes() -> Router<SharedState> {
    Router::new().route("/health", get(health_check))
}

/// Endpoint: GET /health
async fn health_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy",
            service: SERVICE_NAME,
        }),
    )
}
