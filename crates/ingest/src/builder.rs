use std::sync::Arc;

use intake_blob::BlobStore;
use intake_metadata::MetadataStore;

use crate::error::UploadError;
use crate::metrics::UploadMetrics;
use crate::uploader::Uploader;

/// Fluent builder for constructing an [`Uploader`].
///
/// A [`BlobStore`] and a [`MetadataStore`] must be supplied. Orphan
/// compensation is off unless requested.
#[derive(Default)]
pub struct UploaderBuilder {
    blob_store: Option<Arc<dyn BlobStore>>,
    metadata_store: Option<Arc<dyn MetadataStore>>,
    compensate_orphans: bool,
    metrics: Option<Arc<UploadMetrics>>,
}

impl UploaderBuilder {
    /// Create a new builder with no stores attached.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the store that receives file content.
    #[must_use]
    pub fn blob_store(mut self, store: Arc<dyn BlobStore>) -> Self {
        self.blob_store = Some(store);
        self
    }

    /// Set the store that receives file records.
    #[must_use]
    pub fn metadata_store(mut self, store: Arc<dyn MetadataStore>) -> Self {
        self.metadata_store = Some(store);
        self
    }

    /// Delete the stored blob when the metadata write fails.
    ///
    /// The caller still receives the metadata failure.
    #[must_use]
    pub fn compensate_orphans(mut self, enabled: bool) -> Self {
        self.compensate_orphans = enabled;
        self
    }

    /// Share an existing metrics instance instead of creating a new one.
    #[must_use]
    pub fn metrics(mut self, metrics: Arc<UploadMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Consume the builder and produce an [`Uploader`].
    ///
    /// # Errors
    ///
    /// Returns [`UploadError::Configuration`] if either store is missing.
    pub fn build(self) -> Result<Uploader, UploadError> {
        let blob_store = self
            .blob_store
            .ok_or_else(|| UploadError::Configuration("blob store is required".into()))?;
        let metadata_store = self
            .metadata_store
            .ok_or_else(|| UploadError::Configuration("metadata store is required".into()))?;

        Ok(Uploader {
            blob_store,
            metadata_store,
            compensate_orphans: self.compensate_orphans,
            metrics: self.metrics.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use intake_blob_memory::MemoryBlobStore;
    use intake_metadata_memory::MemoryMetadataStore;

    use super::*;

    #[test]
    fn build_requires_blob_store() {
        let err = UploaderBuilder::new()
            .metadata_store(Arc::new(MemoryMetadataStore::new()))
            .build()
            .unwrap_err();
        assert!(matches!(err, UploadError::Configuration(ref m) if m.contains("blob")));
    }

    #[test]
    fn build_requires_metadata_store() {
        let err = UploaderBuilder::new()
            .blob_store(Arc::new(MemoryBlobStore::default()))
            .build()
            .unwrap_err();
        assert!(matches!(err, UploadError::Configuration(ref m) if m.contains("metadata")));
    }

    #[test]
    fn compensation_defaults_off() {
        let uploader = UploaderBuilder::new()
            .blob_store(Arc::new(MemoryBlobStore::default()))
            .metadata_store(Arc::new(MemoryMetadataStore::new()))
            .build()
            .unwrap();
        assert!(!uploader.compensates_orphans());
    }

    #[test]
    fn shared_metrics_are_used() {
        let metrics = Arc::new(UploadMetrics::default());
        let uploader = UploaderBuilder::new()
            .blob_store(Arc::new(MemoryBlobStore::default()))
            .metadata_store(Arc::new(MemoryMetadataStore::new()))
            .metrics(Arc::clone(&metrics))
            .build()
            .unwrap();
        assert!(Arc::ptr_eq(uploader.metrics(), &metrics));
    }
}
