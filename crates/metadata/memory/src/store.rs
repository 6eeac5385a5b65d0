use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;

use intake_core::FileRecord;
use intake_metadata::{MetadataError, MetadataStore};

/// In-memory metadata store using `DashMap`. Suitable for development and
/// testing.
pub struct MemoryMetadataStore {
    records: DashMap<String, FileRecord>,
    puts: AtomicU64,
}

impl MemoryMetadataStore {
    /// Create a new empty in-memory metadata store.
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
            puts: AtomicU64::new(0),
        }
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of `put` calls made so far.
    pub fn put_count(&self) -> u64 {
        self.puts.load(Ordering::Relaxed)
    }
}

impl Default for MemoryMetadataStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MetadataStore for MemoryMetadataStore {
    async fn put(&self, record: &FileRecord) -> Result<(), MetadataError> {
        self.puts.fetch_add(1, Ordering::Relaxed);
        self.records.insert(record.id.clone(), record.clone());
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<FileRecord>, MetadataError> {
        Ok(self.records.get(id).map(|r| r.value().clone()))
    }
}
