//! Object storage port.

use async_trait::async_trait;

/// Object storage errors, kept distinct from persistence errors so a failed
/// upload can abort a create/update before anything is persisted.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    Upload(String),
}

/// External object storage for post images.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Upload a file and return its public URL.
    async fn upload(&self, bytes: Vec<u8>, content_type: &str) -> Result<String, StorageError>;
}
