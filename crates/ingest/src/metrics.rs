use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Atomic counters tracking upload outcomes.
///
/// Relaxed ordering throughout; call [`snapshot`](Self::snapshot) for a
/// point-in-time view.
#[derive(Debug, Default)]
pub struct UploadMetrics {
    /// Calls to `handle_upload`.
    pub received: AtomicU64,
    /// Uploads that stored both blob and metadata.
    pub stored: AtomicU64,
    /// Requests without a file.
    pub missing_file: AtomicU64,
    /// Blob store failures.
    pub storage_failures: AtomicU64,
    /// Metadata store failures (blob already written).
    pub metadata_failures: AtomicU64,
    /// Orphaned blobs deleted after a metadata failure.
    pub orphans_removed: AtomicU64,
    /// Total bytes handed to the blob store successfully.
    pub bytes_stored: AtomicU64,
}

impl UploadMetrics {
    pub(crate) fn increment(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn add_bytes(&self, n: usize) {
        self.bytes_stored
            .fetch_add(u64::try_from(n).unwrap_or(u64::MAX), Ordering::Relaxed);
    }

    /// Take a point-in-time snapshot of all counters.
    pub fn snapshot(&self) -> UploadMetricsSnapshot {
        UploadMetricsSnapshot {
            received: self.received.load(Ordering::Relaxed),
            stored: self.stored.load(Ordering::Relaxed),
            missing_file: self.missing_file.load(Ordering::Relaxed),
            storage_failures: self.storage_failures.load(Ordering::Relaxed),
            metadata_failures: self.metadata_failures.load(Ordering::Relaxed),
            orphans_removed: self.orphans_removed.load(Ordering::Relaxed),
            bytes_stored: self.bytes_stored.load(Ordering::Relaxed),
        }
    }
}

/// Plain-data copy of [`UploadMetrics`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct UploadMetricsSnapshot {
    pub received: u64,
    pub stored: u64,
    pub missing_file: u64,
    pub storage_failures: u64,
    pub metadata_failures: u64,
    pub orphans_removed: u64,
    pub bytes_stored: u64,
}
