//! # Routes
//!
//! Axum router configuration for the labreport backend.

use crate::handlers::{self, MAX_UPLOAD_BYTES};
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the main application router
///
/// Routes:
/// - GET  /health         - Health check
/// - POST /auth/register  - Simulated registration
/// - POST /uploads        - Upload a lab report, returns demo extraction
/// - POST /stripe/webhook - Stripe webhook stub (always acknowledges)
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_origins);

    // Webhook must receive the raw body, so it sits outside any JSON layers.
    Router::new()
        .route("/health", get(handlers::health))
        .route("/auth/register", post(handlers::register))
        .route(
            "/uploads",
            post(handlers::upload_report)
                // Multipart framing adds overhead on top of the file itself
                .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES + 64 * 1024)),
        )
        .route("/stripe/webhook", post(handlers::stripe_webhook))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Build the CORS boundary from the configured origin list.
///
/// "*" opens the boundary to any origin (no credentials, per CORS rules);
/// otherwise only the listed origins are granted, with credentials allowed.
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let allowed: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();

    CorsLayer::new()
        .allow_origin(allowed)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
}
