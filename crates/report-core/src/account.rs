//! # Registration Types
//!
//! Simulated practitioner registration. The flow validates the payload and
//! hands back a generated user id without creating a durable account; the
//! response message says so explicitly so clients cannot mistake it for a
//! real signup.

use crate::error::{ApiError, ApiResult};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

fn default_country() -> String {
    "ES".to_string()
}

/// Registration payload
#[derive(Debug, Clone, Deserialize)]
pub struct RegistrationRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,

    /// ISO country code, defaults to Spain
    #[serde(default = "default_country")]
    pub country: String,

    /// Medical license number (optional)
    #[serde(default)]
    pub license_number: Option<String>,
}

impl RegistrationRequest {
    /// Validate required fields. Intentionally shallow: registration is
    /// simulated, so this only rejects payloads no real signup could accept.
    pub fn validate(&self) -> ApiResult<()> {
        for (name, value) in [
            ("first_name", &self.first_name),
            ("last_name", &self.last_name),
            ("email", &self.email),
            ("password", &self.password),
        ] {
            if value.trim().is_empty() {
                return Err(ApiError::MissingField { name: name.into() });
            }
        }

        if !self.email.contains('@') {
            return Err(ApiError::InvalidRequest(format!(
                "Invalid email address: {}",
                self.email
            )));
        }

        Ok(())
    }
}

/// Simulated registration result
#[derive(Debug, Clone, Serialize)]
pub struct RegisteredUser {
    /// Generated user id (not backed by any account record)
    pub user_id: String,

    /// Human-readable notice that this registration is simulated
    pub message: String,
}

impl RegisteredUser {
    /// Produce a simulated registration for a validated request
    pub fn simulated() -> Self {
        Self {
            user_id: Uuid::new_v4().to_string(),
            message: "Registered (simulated). No account was persisted.".to_string(),
        }
    }
}
