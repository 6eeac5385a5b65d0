use async_trait::async_trait;

use intake_core::FileRecord;

use crate::error::MetadataError;

/// Trait for file metadata storage backends.
///
/// Records are keyed by [`FileRecord::id`]. Implementations must be
/// `Send + Sync` to be shared across async tasks.
#[async_trait]
pub trait MetadataStore: Send + Sync {
    /// Persist a record, replacing any existing record with the same id.
    async fn put(&self, record: &FileRecord) -> Result<(), MetadataError>;

    /// Retrieve a record by id.
    async fn get(&self, id: &str) -> Result<Option<FileRecord>, MetadataError>;
}
