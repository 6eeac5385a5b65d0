use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::BlobError;
use crate::store::BlobStore;
use crate::types::{StoredObject, Visibility};

/// A blob store whose writes always fail.
///
/// Counts attempted puts so callers can assert how far a pipeline got.
#[derive(Debug)]
pub struct FailingBlobStore {
    error_message: String,
    put_attempts: AtomicU64,
}

impl FailingBlobStore {
    /// Create a failing store with the given error message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error_message: message.into(),
            put_attempts: AtomicU64::new(0),
        }
    }

    /// Number of `put` calls made so far.
    pub fn put_attempts(&self) -> u64 {
        self.put_attempts.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl BlobStore for FailingBlobStore {
    async fn put(
        &self,
        _key: &str,
        _data: Bytes,
        _content_type: &str,
        _visibility: Visibility,
    ) -> Result<(), BlobError> {
        self.put_attempts.fetch_add(1, Ordering::Relaxed);
        Err(BlobError::Storage(self.error_message.clone()))
    }

    fn public_url(&self, key: &str) -> String {
        format!("failing://{key}")
    }

    async fn get(&self, _key: &str) -> Result<Option<StoredObject>, BlobError> {
        Ok(None)
    }

    async fn delete(&self, _key: &str) -> Result<bool, BlobError> {
        Err(BlobError::Storage(self.error_message.clone()))
    }
}
