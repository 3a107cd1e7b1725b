//! In-process blob store

use super::BlobStore;
use crate::{CoreError, CoreResult};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

pub struct MemoryBlobStore {
    base_url: String,
    quota: Option<usize>,
    blobs: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryBlobStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            quota: None,
            blobs: RwLock::new(HashMap::new()),
        }
    }

    /// Refuse writes once `max_blobs` objects are held.
    pub fn with_quota(mut self, max_blobs: usize) -> Self {
        self.quota = Some(max_blobs);
        self
    }

    pub async fn len(&self) -> usize {
        self.blobs.read().await.len()
    }

    pub async fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.blobs.read().await.get(key).cloned()
    }
}

impl Default for MemoryBlobStore {
    fn default() -> Self {
        Self::new("/files")
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn put(&self, key: &str, bytes: &[u8]) -> CoreResult<()> {
        let mut blobs = self.blobs.write().await;
        if let Some(quota) = self.quota {
            if blobs.len() >= quota {
                return Err(CoreError::Blob(format!("quota of {} objects reached", quota)));
            }
        }
        if blobs.contains_key(key) {
            return Err(CoreError::Blob(format!("{} already exists", key)));
        }
        blobs.insert(key.to_string(), bytes.to_vec());
        Ok(())
    }

    async fn remove(&self, key: &str) -> CoreResult<()> {
        self.blobs.write().await.remove(key);
        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), key)
    }
}
