//! # Report Types
//!
//! Uploaded lab-report types and the demo extraction returned by the
//! upload endpoint. The extraction is a placeholder marker set, not the
//! result of real document analysis.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// File extensions accepted by the upload endpoint (lowercase, no dot)
pub const ALLOWED_EXTENSIONS: &[&str] = &["pdf", "png", "jpg", "jpeg"];

/// Extract the lowercased extension of a filename, if it has one
pub fn file_extension(filename: &str) -> Option<String> {
    let (_, ext) = filename.rsplit_once('.')?;
    if ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// Check whether an extension is in the accepted set
pub fn is_allowed_extension(extension: &str) -> bool {
    ALLOWED_EXTENSIONS.contains(&extension)
}

/// A single analyte measurement in an extraction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Marker {
    /// Analyte name (e.g., "Glucose")
    pub name: String,

    /// Measured value
    pub value: f64,

    /// Measurement unit (e.g., "mg/dL")
    pub unit: String,

    /// Lower bound of the reference range
    pub ref_min: f64,

    /// Upper bound of the reference range
    pub ref_max: f64,
}

impl Marker {
    pub fn new(
        name: impl Into<String>,
        value: f64,
        unit: impl Into<String>,
        ref_min: f64,
        ref_max: f64,
    ) -> Self {
        Self {
            name: name.into(),
            value,
            unit: unit.into(),
            ref_min,
            ref_max,
        }
    }

    /// Whether the value falls inside the reference range (inclusive)
    pub fn in_range(&self) -> bool {
        self.value >= self.ref_min && self.value <= self.ref_max
    }
}

/// Extraction result returned for an uploaded report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Extraction {
    /// Alias of the patient the report belongs to
    pub patient_alias: String,

    /// Id of the stored file this extraction was produced for
    pub file_id: String,

    /// Extracted markers
    pub markers: Vec<Marker>,
}

impl Extraction {
    /// Build the demo extraction: a fixed marker set standing in until
    /// real document analysis is wired up.
    pub fn demo(patient_alias: impl Into<String>, file_id: impl Into<String>) -> Self {
        Self {
            patient_alias: patient_alias.into(),
            file_id: file_id.into(),
            markers: vec![
                Marker::new("Glucose", 102.0, "mg/dL", 70.0, 100.0),
                Marker::new("LDL Cholesterol", 142.0, "mg/dL", 0.0, 130.0),
                Marker::new("TSH", 3.2, "µIU/mL", 0.27, 4.2),
            ],
        }
    }

    /// Count of markers outside their reference range
    pub fn out_of_range_count(&self) -> usize {
        self.markers.iter().filter(|m| !m.in_range()).count()
    }
}

/// A report that was written to the file store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredReport {
    /// Server-assigned id (UUID), also the stem of the stored filename
    pub file_id: String,

    /// Filename as submitted by the client
    pub original_filename: String,

    /// Where the file landed under the storage directory
    pub stored_path: PathBuf,

    /// Size of the stored payload in bytes
    pub size_bytes: usize,

    /// When the upload was accepted
    pub uploaded_at: DateTime<Utc>,
}

impl StoredReport {
    pub fn new(
        file_id: impl Into<String>,
        original_filename: impl Into<String>,
        stored_path: PathBuf,
        size_bytes: usize,
    ) -> Self {
        Self {
            file_id: file_id.into(),
            original_filename: original_filename.into(),
            stored_path,
            size_bytes,
            uploaded_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_extension() {
        assert_eq!(file_extension("report.PDF"), Some("pdf".to_string()));
        assert_eq!(file_extension("scan.final.jpeg"), Some("jpeg".to_string()));
        assert_eq!(file_extension("noext"), None);
        assert_eq!(file_extension("trailing."), None);
    }

    #[test]
    fn test_allowed_extensions() {
        assert!(is_allowed_extension("pdf"));
        assert!(is_allowed_extension("jpg"));
        assert!(!is_allowed_extension("exe"));
        assert!(!is_allowed_extension("pdf ")); // whitespace is not trimmed
    }

    #[test]
    fn test_marker_in_range() {
        let marker = Marker::new("TSH", 3.2, "µIU/mL", 0.27, 4.2);
        assert!(marker.in_range());

        let marker = Marker::new("Glucose", 102.0, "mg/dL", 70.0, 100.0);
        assert!(!marker.in_range());
    }

    #[test]
    fn test_demo_extraction() {
        let extraction = Extraction::demo("blue-falcon", "file-123");

        assert_eq!(extraction.patient_alias, "blue-falcon");
        assert_eq!(extraction.file_id, "file-123");
        assert_eq!(extraction.markers.len(), 3);
        // Glucose and LDL are deliberately out of range in the demo set
        assert_eq!(extraction.out_of_range_count(), 2);
    }

    #[test]
    fn test_extraction_serializes_markers() {
        let extraction = Extraction::demo("alias", "id");
        let json = serde_json::to_value(&extraction).unwrap();

        assert_eq!(json["markers"][0]["name"], "Glucose");
        assert_eq!(json["markers"][0]["unit"], "mg/dL");
        assert_eq!(json["markers"][2]["ref_max"], 4.2);
    }
}
