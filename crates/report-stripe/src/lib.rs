//! # report-stripe
//!
//! Stripe integration layer for labreport-rs.
//!
//! The integration is intentionally thin for now: configuration loading with
//! key-format validation, and webhook plumbing for the stub endpoint
//! (`{"received": true}` acknowledgement plus an advisory, log-only
//! signature check). There is no outbound Stripe API client yet.
//!
//! ## Webhook handling
//!
//! ```rust,ignore
//! use report_stripe::{check_signature, EventEnvelope, SignatureCheck, WebhookAck};
//!
//! // In the webhook endpoint:
//! match check_signature(&config.webhook_secret, &body, signature_header) {
//!     SignatureCheck::Valid => info!("signature ok"),
//!     other => warn!("advisory signature check: {:?}", other),
//! }
//! // Always acknowledge — the endpoint is a stub.
//! Json(WebhookAck::received())
//! ```

pub mod config;
pub mod webhook;

// Re-exports
pub use config::StripeConfig;
pub use webhook::{
    check_signature, compute_hmac_sha256, EventEnvelope, SignatureCheck, WebhookAck,
    SIGNATURE_HEADER,
};
