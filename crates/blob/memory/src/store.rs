use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use bytes::Bytes;
use dashmap::DashMap;

use intake_blob::{BlobError, BlobStore, StoredObject, Visibility, normalize_base_url};

/// Base address used when none is configured.
const DEFAULT_BASE_URL: &str = "memory://intake/";

/// In-memory blob store using `DashMap`. Suitable for development and testing.
///
/// Objects live in a concurrent hash map keyed by storage key. Put and delete
/// calls are counted so tests can assert exactly which store operations a
/// pipeline performed.
pub struct MemoryBlobStore {
    objects: DashMap<String, StoredObject>,
    base_url: String,
    puts: AtomicU64,
    deletes: AtomicU64,
}

impl MemoryBlobStore {
    /// Create an empty store whose public URLs start with `base_url`.
    pub fn new(base_url: &str) -> Self {
        Self {
            objects: DashMap::new(),
            base_url: normalize_base_url(base_url),
            puts: AtomicU64::new(0),
            deletes: AtomicU64::new(0),
        }
    }

    /// Number of stored objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the store holds no objects.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Whether an object exists under `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.objects.contains_key(key)
    }

    /// Number of `put` calls made so far.
    pub fn put_count(&self) -> u64 {
        self.puts.load(Ordering::Relaxed)
    }

    /// Number of `delete` calls made so far.
    pub fn delete_count(&self) -> u64 {
        self.deletes.load(Ordering::Relaxed)
    }
}

impl Default for MemoryBlobStore {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn put(
        &self,
        key: &str,
        data: Bytes,
        content_type: &str,
        visibility: Visibility,
    ) -> Result<(), BlobError> {
        self.puts.fetch_add(1, Ordering::Relaxed);
        self.objects.insert(
            key.to_owned(),
            StoredObject {
                key: key.to_owned(),
                content_type: content_type.to_owned(),
                visibility: Some(visibility),
                data,
            },
        );
        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}{key}", self.base_url)
    }

    async fn get(&self, key: &str) -> Result<Option<StoredObject>, BlobError> {
        Ok(self.objects.get(key).map(|o| o.value().clone()))
    }

    async fn delete(&self, key: &str) -> Result<bool, BlobError> {
        self.deletes.fetch_add(1, Ordering::Relaxed);
        Ok(self.objects.remove(key).is_some())
    }
}
