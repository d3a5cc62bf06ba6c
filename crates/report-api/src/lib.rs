//! # report-api
//!
//! HTTP API layer for labreport-rs.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - REST endpoints for health, registration, and report upload
//! - Stripe webhook stub
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | POST | `/auth/register` | Simulated registration |
//! | POST | `/uploads` | Upload lab report, returns demo extraction |
//! | POST | `/stripe/webhook` | Stripe webhook stub |

pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppConfig, AppState};
