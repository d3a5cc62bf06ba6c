//! # Request Handlers
//!
//! Axum request handlers for the labreport backend: health, simulated
//! registration, report upload with demo extraction, and the Stripe
//! webhook stub.

use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::{Multipart, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use report_core::{
    file_extension, is_allowed_extension, ApiError, Extraction, RegisteredUser,
    RegistrationRequest, StoredReport,
};
use report_stripe::{check_signature, EventEnvelope, SignatureCheck, WebhookAck, SIGNATURE_HEADER};
use serde::Serialize;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

/// Upload size cap per file
pub const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

// =============================================================================
// Request/Response Types
// =============================================================================

/// Upload response
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub ok: bool,
    /// Server-assigned file id
    pub file_id: String,
    /// Path the file was stored at
    pub file_path: String,
    /// Demo extraction for the uploaded report
    pub extraction: Extraction,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: u16) -> Self {
        Self {
            error: error.into(),
            code,
            details: None,
        }
    }
}

fn api_error_to_response(err: ApiError) -> (StatusCode, Json<ErrorResponse>) {
    let code = err.status_code();
    let response = ErrorResponse::new(err.to_string(), code);
    (
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        Json(response),
    )
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "labreport",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Simulated registration: validates the payload and returns a generated
/// user id without persisting anything.
#[instrument(skip(request), fields(country = %request.country))]
pub async fn register(
    Json(request): Json<RegistrationRequest>,
) -> Result<Json<RegisteredUser>, (StatusCode, Json<ErrorResponse>)> {
    request.validate().map_err(api_error_to_response)?;

    let user = RegisteredUser::simulated();
    info!("Simulated registration: user_id={}", user.user_id);

    Ok(Json(user))
}

/// Upload a lab report. Stores the file under the storage directory and
/// returns the demo extraction.
#[instrument(skip(state, multipart))]
pub async fn upload_report(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, (StatusCode, Json<ErrorResponse>)> {
    let mut patient_alias: Option<String> = None;
    let mut file: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        api_error_to_response(ApiError::InvalidRequest(format!(
            "Failed to read multipart field: {}",
            e
        )))
    })? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("patient_alias") => {
                let text = field.text().await.map_err(|e| {
                    api_error_to_response(ApiError::InvalidRequest(format!(
                        "Failed to read patient_alias: {}",
                        e
                    )))
                })?;
                patient_alias = Some(text);
            }
            Some("file") => {
                let original_name = field.file_name().unwrap_or("unnamed").to_string();
                let data = field.bytes().await.map_err(|e| {
                    api_error_to_response(ApiError::InvalidRequest(format!(
                        "Failed to read file bytes: {}",
                        e
                    )))
                })?;
                file = Some((original_name, data.to_vec()));
            }
            _ => {}
        }
    }

    let patient_alias = patient_alias
        .filter(|a| !a.trim().is_empty())
        .ok_or_else(|| {
            api_error_to_response(ApiError::MissingField {
                name: "patient_alias".to_string(),
            })
        })?;

    let (original_filename, data) = file.ok_or_else(|| {
        api_error_to_response(ApiError::MissingField {
            name: "file".to_string(),
        })
    })?;

    if data.is_empty() {
        return Err(api_error_to_response(ApiError::InvalidRequest(
            "Uploaded file is empty".to_string(),
        )));
    }

    if data.len() > MAX_UPLOAD_BYTES {
        return Err(api_error_to_response(ApiError::PayloadTooLarge {
            max_bytes: MAX_UPLOAD_BYTES,
        }));
    }

    let extension = file_extension(&original_filename)
        .filter(|ext| is_allowed_extension(ext))
        .ok_or_else(|| {
            api_error_to_response(ApiError::UnsupportedFileType {
                extension: file_extension(&original_filename)
                    .unwrap_or_else(|| "none".to_string()),
            })
        })?;

    let file_id = Uuid::new_v4().to_string();

    let stored_path = state
        .store
        .save(&file_id, &extension, &data)
        .await
        .map_err(|e| {
            error!("Failed to store upload: {}", e);
            api_error_to_response(e)
        })?;

    let report = StoredReport::new(&file_id, &original_filename, stored_path, data.len());
    info!(
        "Stored report: id={}, original={}, {} bytes",
        report.file_id, report.original_filename, report.size_bytes
    );

    // Extraction is a fixed demo set until real document analysis exists.
    let extraction = Extraction::demo(&patient_alias, &file_id);

    Ok(Json(UploadResponse {
        ok: true,
        file_id: report.file_id,
        file_path: report.stored_path.display().to_string(),
        extraction,
    }))
}

/// Stripe webhook stub. Acknowledges every payload; the signature check is
/// advisory only and its outcome is logged, never enforced.
#[instrument(skip(state, headers, body))]
pub async fn stripe_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Json<WebhookAck> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok());

    match &state.stripe {
        Some(stripe) => match check_signature(&stripe.webhook_secret, &body, signature) {
            SignatureCheck::Valid => info!("Webhook signature valid"),
            SignatureCheck::Missing => warn!("Webhook delivered without Stripe-Signature header"),
            SignatureCheck::Mismatch(reason) => {
                warn!("Webhook signature check failed (not enforced): {}", reason)
            }
        },
        None => warn!("Webhook received but Stripe is not configured"),
    }

    match EventEnvelope::parse(&body) {
        Ok(envelope) => info!(
            "Received webhook: type={}, id={}, livemode={}",
            envelope.event_type, envelope.id, envelope.livemode
        ),
        Err(e) => warn!("Unparseable webhook payload: {}", e),
    }

    Json(WebhookAck::received())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response() {
        let err = ErrorResponse::new("Test error", 400);
        assert_eq!(err.error, "Test error");
        assert_eq!(err.code, 400);
    }

    #[test]
    fn test_api_error_conversion() {
        let err = ApiError::InvalidRequest("Bad data".to_string());
        let (status, _json) = api_error_to_response(err);
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let err = ApiError::PayloadTooLarge {
            max_bytes: MAX_UPLOAD_BYTES,
        };
        let (status, _json) = api_error_to_response(err);
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    }
}
