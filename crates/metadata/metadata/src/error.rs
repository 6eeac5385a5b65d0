/// Errors that can occur during metadata store operations.
#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    /// An error from the underlying storage backend.
    #[error("metadata storage error: {0}")]
    Storage(String),

    /// A stored item could not be mapped back to a [`FileRecord`](intake_core::FileRecord).
    #[error("invalid metadata item: {0}")]
    InvalidItem(String),
}
