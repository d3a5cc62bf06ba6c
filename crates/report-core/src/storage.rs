//! # Report File Store
//!
//! Directory-backed storage for uploaded reports. Files are written as
//! `<file_id>.<extension>` directly under the storage root; there is no
//! locking or dedup since ids are server-generated UUIDs.

use crate::error::{ApiError, ApiResult};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Filesystem store rooted at the configured storage directory
#[derive(Debug, Clone)]
pub struct ReportStore {
    root: PathBuf,
}

impl ReportStore {
    /// Open the store, creating the root directory if it does not exist
    pub async fn open(root: impl Into<PathBuf>) -> ApiResult<Self> {
        let root = root.into();
        if !root.exists() {
            fs::create_dir_all(&root).await?;
        }
        Ok(Self { root })
    }

    /// Storage root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Stored filename for a file id and extension
    pub fn file_name(file_id: &str, extension: &str) -> String {
        format!("{}.{}", file_id, extension)
    }

    /// Write an uploaded report, returning the path it was stored at
    pub async fn save(&self, file_id: &str, extension: &str, data: &[u8]) -> ApiResult<PathBuf> {
        if extension.contains(['/', '\\', '.']) {
            return Err(ApiError::Storage(format!(
                "Invalid extension: {}",
                extension
            )));
        }

        let path = self.root.join(Self::file_name(file_id, extension));
        fs::write(&path, data).await?;
        debug!("Stored report: {} ({} bytes)", path.display(), data.len());
        Ok(path)
    }

    /// Read a stored report back by its stored filename
    pub async fn read(&self, file_name: &str) -> ApiResult<Vec<u8>> {
        let data = fs::read(self.root.join(file_name)).await?;
        Ok(data)
    }

    /// Whether a stored filename exists under the root
    pub async fn contains(&self, file_name: &str) -> bool {
        fs::try_exists(self.root.join(file_name))
            .await
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_open_creates_root() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("nested").join("storage");

        let store = ReportStore::open(&root).await.unwrap();
        assert!(store.root().exists());
    }

    #[tokio::test]
    async fn test_save_and_read() {
        let dir = TempDir::new().unwrap();
        let store = ReportStore::open(dir.path()).await.unwrap();

        let path = store.save("abc-123", "pdf", b"%PDF-1.4 demo").await.unwrap();
        assert_eq!(path, dir.path().join("abc-123.pdf"));
        assert!(store.contains("abc-123.pdf").await);

        let data = store.read("abc-123.pdf").await.unwrap();
        assert_eq!(data, b"%PDF-1.4 demo");
    }

    #[tokio::test]
    async fn test_missing_file_errors() {
        let dir = TempDir::new().unwrap();
        let store = ReportStore::open(dir.path()).await.unwrap();

        assert!(!store.contains("nope.pdf").await);
        let err = store.read("nope.pdf").await.unwrap_err();
        assert!(matches!(err, ApiError::Storage(_)));
    }

    #[tokio::test]
    async fn test_extension_traversal_rejected() {
        let dir = TempDir::new().unwrap();
        let store = ReportStore::open(dir.path()).await.unwrap();

        let err = store.save("abc", "pdf/../../etc", b"x").await.unwrap_err();
        assert!(matches!(err, ApiError::Storage(_)));
    }
}
