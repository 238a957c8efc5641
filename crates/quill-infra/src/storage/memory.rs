//! In-memory object storage - used as fallback when S3 is not configured.
//! Uploads are held in process memory and served from nowhere; the returned
//! URLs are stable identifiers only.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use quill_core::ports::{ObjectStorage, StorageError};

#[derive(Default)]
pub struct InMemoryStorage {
    objects: RwLock<HashMap<String, (Vec<u8>, String)>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }
}

#[async_trait]
impl ObjectStorage for InMemoryStorage {
    async fn upload(&self, bytes: Vec<u8>, content_type: &str) -> Result<String, StorageError> {
        let key = format!("memory://images/{}", Uuid::new_v4());
        self.objects
            .write()
            .await
            .insert(key.clone(), (bytes, content_type.to_string()));
        Ok(key)
    }
}
