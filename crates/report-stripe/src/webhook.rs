//! # Stripe Webhook Plumbing
//!
//! The webhook endpoint is a stub: every payload is acknowledged with
//! `{"received": true}` and no event is processed. The signature check here
//! is advisory — its outcome is logged by the handler but never causes a
//! rejection, so the external contract stays "ack everything" until event
//! processing lands.
//!
//! TODO: enforce signature verification once webhook events drive real
//! fulfillment (flip the handler to reject `SignatureCheck::Mismatch`).

use chrono::Utc;
use report_core::{ApiError, ApiResult};
use serde::{Deserialize, Serialize};

/// Header Stripe signs webhook deliveries with
pub const SIGNATURE_HEADER: &str = "stripe-signature";

/// Clock skew allowed between the signed timestamp and now
const TIMESTAMP_TOLERANCE_SECS: u64 = 300;

/// Acknowledgement body returned for every webhook delivery
#[derive(Debug, Clone, Serialize)]
pub struct WebhookAck {
    pub received: bool,
}

impl WebhookAck {
    pub fn received() -> Self {
        Self { received: true }
    }
}

/// Minimal event envelope, parsed best-effort for logging
#[derive(Debug, Clone, Deserialize)]
pub struct EventEnvelope {
    /// Event id (evt_...)
    pub id: String,

    /// Event type (e.g., "checkout.session.completed")
    #[serde(rename = "type")]
    pub event_type: String,

    /// Unix timestamp the event was created at
    #[serde(default)]
    pub created: Option<i64>,

    /// Whether the event came from live mode
    #[serde(default)]
    pub livemode: bool,
}

impl EventEnvelope {
    /// Parse the envelope out of a raw webhook payload
    pub fn parse(payload: &[u8]) -> ApiResult<Self> {
        serde_json::from_slice(payload)
            .map_err(|e| ApiError::WebhookParse(format!("Failed to parse webhook: {}", e)))
    }
}

/// Outcome of the advisory signature check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignatureCheck {
    /// Signature matched the payload
    Valid,

    /// Signature present but did not match (or timestamp out of tolerance)
    Mismatch(String),

    /// No Stripe-Signature header on the request
    Missing,
}

/// Run the signature check without enforcing it.
///
/// Computes HMAC-SHA256 over `"{timestamp}.{payload}"` with the webhook
/// secret and compares against every `v1` signature in the header,
/// constant-time, with a 5-minute timestamp tolerance.
pub fn check_signature(secret: &str, payload: &[u8], header: Option<&str>) -> SignatureCheck {
    let Some(header) = header else {
        return SignatureCheck::Missing;
    };

    let parts = match parse_signature_header(header) {
        Ok(parts) => parts,
        Err(e) => return SignatureCheck::Mismatch(e.to_string()),
    };

    // The header timestamp is attacker-controlled and may sit at the i64
    // extremes; checked math keeps the always-ack route panic-free.
    let now = Utc::now().timestamp();
    let within_tolerance = now
        .checked_sub(parts.timestamp)
        .map(i64::unsigned_abs)
        .is_some_and(|age| age <= TIMESTAMP_TOLERANCE_SECS);
    if !within_tolerance {
        return SignatureCheck::Mismatch("Timestamp outside tolerance".to_string());
    }

    let signed_payload = format!("{}.{}", parts.timestamp, String::from_utf8_lossy(payload));
    let expected = compute_hmac_sha256(secret, &signed_payload);

    let valid = parts
        .signatures
        .iter()
        .any(|sig| constant_time_compare(sig, &expected));

    if valid {
        SignatureCheck::Valid
    } else {
        SignatureCheck::Mismatch("Signature mismatch".to_string())
    }
}

struct SignatureHeader {
    timestamp: i64,
    signatures: Vec<String>,
}

fn parse_signature_header(header: &str) -> ApiResult<SignatureHeader> {
    let mut timestamp = None;
    let mut signatures = Vec::new();

    for part in header.split(',') {
        let kv: Vec<&str> = part.split('=').collect();
        if kv.len() != 2 {
            continue;
        }
        match kv[0] {
            "t" => {
                timestamp = kv[1].parse().ok();
            }
            "v1" => {
                signatures.push(kv[1].to_string());
            }
            _ => {}
        }
    }

    let timestamp = timestamp.ok_or_else(|| {
        ApiError::WebhookParse("Missing timestamp in signature header".to_string())
    })?;

    if signatures.is_empty() {
        return Err(ApiError::WebhookParse("No v1 signature found".to_string()));
    }

    Ok(SignatureHeader {
        timestamp,
        signatures,
    })
}

/// HMAC-SHA256 of a message, hex-encoded
pub fn compute_hmac_sha256(secret: &str, message: &str) -> String {
    use hmac::{Hmac, Mac};
    use sha2::Sha256;

    type HmacSha256 = Hmac<Sha256>;

    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(message.as_bytes());
    let result = mac.finalize();
    hex::encode(result.into_bytes())
}

fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.bytes()
        .zip(b.bytes())
        .fold(0, |acc, (x, y)| acc | (x ^ y))
        == 0
}
