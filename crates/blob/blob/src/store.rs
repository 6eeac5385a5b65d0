use async_trait::async_trait;
use bytes::Bytes;

use crate::error::BlobError;
use crate::types::{StoredObject, Visibility};

/// Pluggable blob storage backend for uploaded files.
///
/// Implementors provide the actual storage mechanism (S3, in-memory, ...).
/// A store is built once at startup and shared across requests, so every
/// method takes `&self`.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store `data` under `key` as a single atomic put.
    ///
    /// An existing object with the same key is overwritten.
    async fn put(
        &self,
        key: &str,
        data: Bytes,
        content_type: &str,
        visibility: Visibility,
    ) -> Result<(), BlobError>;

    /// The public address at which an object stored under `key` can be read.
    ///
    /// Always the store's public base address followed by the key, with no
    /// escaping applied.
    fn public_url(&self, key: &str) -> String;

    /// Retrieve an object. Returns `None` if it does not exist.
    async fn get(&self, key: &str) -> Result<Option<StoredObject>, BlobError>;

    /// Delete an object. Returns `true` if the object existed (or the
    /// backend cannot tell).
    async fn delete(&self, key: &str) -> Result<bool, BlobError>;
}
