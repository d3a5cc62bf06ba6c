//! # report-core
//!
//! Core types for the labreport backend.
//!
//! This crate provides:
//! - `ApiError` for typed error handling
//! - `Marker`, `Extraction`, and `StoredReport` for uploaded lab reports
//! - `RegistrationRequest` and `RegisteredUser` for the simulated signup flow
//! - `ReportStore`, the directory-backed file store for uploads
//!
//! ## Example
//!
//! ```rust,ignore
//! use report_core::{Extraction, ReportStore};
//!
//! // Store an uploaded report
//! let store = ReportStore::open("./storage").await?;
//! let path = store.save(&file_id, "pdf", &bytes).await?;
//!
//! // Produce the placeholder extraction for the response
//! let extraction = Extraction::demo(&patient_alias, &file_id);
//! ```

pub mod account;
pub mod error;
pub mod report;
pub mod storage;

// Re-exports for convenience
pub use account::{RegisteredUser, RegistrationRequest};
pub use error::{ApiError, ApiResult};
pub use report::{
    file_extension, is_allowed_extension, Extraction, Marker, StoredReport, ALLOWED_EXTENSIONS,
};
pub use storage::ReportStore;
