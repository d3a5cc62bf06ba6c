//! # Labreport
//!
//! Backend for the lab-report upload service.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables (all optional, defaults shown)
//! export STORAGE_DIR=./storage
//! export CORS_ORIGINS=http://localhost:5173
//! export STRIPE_SECRET_KEY=sk_test_...
//! export STRIPE_WEBHOOK_SECRET=whsec_...
//!
//! # Run the server
//! labreport
//! ```

use report_api::{routes, state::AppState};
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    // Initialize application state
    let state = AppState::new().await?;

    let addr = state.config.socket_addr()?;
    let is_prod = state.config.is_production();

    info!("Environment: {}", state.config.environment);
    info!("Storage directory: {}", state.store.root().display());
    match &state.stripe {
        Some(stripe) => info!(
            "Stripe configured (test_mode={}), webhook signature check advisory",
            stripe.is_test_mode()
        ),
        None => info!("Stripe not configured, webhook runs as plain stub"),
    }

    // Create router
    let app = routes::create_router(state);

    // Start server
    info!("Labreport starting on http://{}", addr);

    if !is_prod {
        info!("Health:   GET  http://{}/health", addr);
        info!("Register: POST http://{}/auth/register", addr);
        info!("Uploads:  POST http://{}/uploads", addr);
        info!("Webhook:  POST http://{}/stripe/webhook", addr);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
