//! # Application State
//!
//! Shared state for the Axum application: immutable settings loaded once at
//! startup, the report file store, and the optional Stripe configuration.
//! Handlers receive everything through `State` — no ambient globals.

use report_core::{ApiResult, ReportStore};
use report_stripe::StripeConfig;
use tracing::warn;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Environment (development, staging, production)
    pub environment: String,
    /// Root directory for stored uploads
    pub storage_dir: String,
    /// Allowed CORS origins; "*" means any origin
    pub cors_origins: Vec<String>,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            storage_dir: std::env::var("STORAGE_DIR").unwrap_or_else(|_| "./storage".to_string()),
            cors_origins: parse_origins(
                &std::env::var("CORS_ORIGINS")
                    .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            ),
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> ApiResult<std::net::SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| {
                report_core::ApiError::Configuration(format!(
                    "Invalid bind address: {}:{}",
                    self.host, self.port
                ))
            })
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(String::from)
        .collect()
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Application config
    pub config: AppConfig,
    /// File store for uploaded reports
    pub store: ReportStore,
    /// Stripe configuration, if the env vars are set
    pub stripe: Option<StripeConfig>,
}

impl AppState {
    /// Create a new AppState from the environment
    pub async fn new() -> ApiResult<Self> {
        let config = AppConfig::from_env();
        Self::with_config(config).await
    }

    /// Create state from an explicit config (also used by tests)
    pub async fn with_config(config: AppConfig) -> ApiResult<Self> {
        let store = ReportStore::open(&config.storage_dir).await?;

        // The webhook endpoint is a stub, so a missing Stripe config is not
        // fatal; the advisory signature check just stays off.
        let stripe = match StripeConfig::from_env() {
            Ok(stripe) => Some(stripe),
            Err(e) => {
                warn!("Stripe not configured ({}), webhook signature check disabled", e);
                None
            }
        };

        Ok(Self {
            config,
            store,
            stripe,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origins() {
        let origins = parse_origins("http://localhost:5173, https://app.example.com,");
        assert_eq!(
            origins,
            vec![
                "http://localhost:5173".to_string(),
                "https://app.example.com".to_string()
            ]
        );
    }

    #[test]
    fn test_socket_addr() {
        let config = AppConfig {
            host: "0.0.0.0".to_string(),
            port: 3000,
            environment: "test".to_string(),
            storage_dir: "./storage".to_string(),
            cors_origins: vec!["*".to_string()],
        };

        let addr = config.socket_addr().unwrap();
        assert_eq!(addr.to_string(), "0.0.0.0:3000");
    }

    #[test]
    fn test_invalid_socket_addr() {
        let config = AppConfig {
            host: "not a host".to_string(),
            port: 3000,
            environment: "test".to_string(),
            storage_dir: "./storage".to_string(),
            cors_origins: vec![],
        };

        assert!(config.socket_addr().is_err());
    }
}
