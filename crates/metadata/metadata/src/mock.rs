use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;

use intake_core::FileRecord;

use crate::error::MetadataError;
use crate::store::MetadataStore;

/// A metadata store whose writes always fail.
#[derive(Debug)]
pub struct FailingMetadataStore {
    error_message: String,
    put_attempts: AtomicU64,
}

impl FailingMetadataStore {
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
impl MetadataStore for FailingMetadataStore {
    async fn put(&self, _record: &FileRecord) -> Result<(), MetadataError> {
        self.put_attempts.fetch_add(1, Ordering::Relaxed);
        Err(MetadataError::Storage(self.error_message.clone()))
    }

    async fn get(&self, _id: &str) -> Result<Option<FileRecord>, MetadataError> {
        Ok(None)
    }
}
