use std::sync::Arc;

use chrono::Utc;
use tracing::{Span, debug, error, field, info, instrument, warn};

use intake_blob::{BlobStore, Visibility};
use intake_core::{FileRecord, StorageKey, UploadRequest};
use intake_metadata::MetadataStore;

use crate::error::UploadError;
use crate::metrics::UploadMetrics;

/// Runs the upload pipeline against a blob store and a metadata store.
///
/// Steps run strictly in order: presence check, key derivation, blob write,
/// record construction, metadata write. A failure at any step aborts the
/// rest. Nothing is retried.
pub struct Uploader {
    pub(crate) blob_store: Arc<dyn BlobStore>,
    pub(crate) metadata_store: Arc<dyn MetadataStore>,
    pub(crate) compensate_orphans: bool,
    pub(crate) metrics: Arc<UploadMetrics>,
}

impl std::fmt::Debug for Uploader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Uploader")
            .field("compensate_orphans", &self.compensate_orphans)
            .finish_non_exhaustive()
    }
}

impl Uploader {
    /// Store one uploaded file and its metadata record.
    ///
    /// `None` means the request carried no file; that fails with
    /// [`UploadError::MissingFile`] before either store is touched.
    ///
    /// When the metadata write fails the blob stays in the blob store unless
    /// orphan compensation is enabled, in which case it is deleted. Either way
    /// the caller gets [`UploadError::MetadataFailure`].
    #[instrument(
        name = "ingest.handle_upload",
        skip_all,
        fields(filename = field::Empty, key = field::Empty, size = field::Empty)
    )]
    pub async fn handle_upload(
        &self,
        request: Option<UploadRequest>,
    ) -> Result<FileRecord, UploadError> {
        UploadMetrics::increment(&self.metrics.received);

        let Some(request) = request else {
            UploadMetrics::increment(&self.metrics.missing_file);
            debug!("request carried no file");
            return Err(UploadError::MissingFile);
        };

        let key = StorageKey::generate(&request.filename);
        let size = request.size();
        let span = Span::current();
        span.record("filename", request.filename.as_str());
        span.record("key", key.as_str());
        span.record("size", size);

        if let Err(e) = self
            .blob_store
            .put(
                key.as_str(),
                request.data,
                &request.content_type,
                Visibility::PublicRead,
            )
            .await
        {
            UploadMetrics::increment(&self.metrics.storage_failures);
            error!(key = %key, error = %e, "blob write failed");
            return Err(UploadError::StorageFailure(e));
        }
        self.metrics.add_bytes(size);
        debug!(key = %key, "blob stored");

        let url = self.blob_store.public_url(key.as_str());
        let record = FileRecord::new(&key, request.filename, url, Utc::now());

        if let Err(e) = self.metadata_store.put(&record).await {
            UploadMetrics::increment(&self.metrics.metadata_failures);
            error!(key = %key, error = %e, "metadata write failed");
            if self.compensate_orphans {
                self.remove_orphan(&key).await;
            } else {
                warn!(key = %key, "blob left without a metadata record");
            }
            return Err(UploadError::MetadataFailure(e));
        }

        UploadMetrics::increment(&self.metrics.stored);
        info!(key = %key, url = %record.url, "file uploaded");
        Ok(record)
    }

    async fn remove_orphan(&self, key: &StorageKey) {
        match self.blob_store.delete(key.as_str()).await {
            Ok(true) => {
                UploadMetrics::increment(&self.metrics.orphans_removed);
                info!(key = %key, "orphaned blob removed");
            }
            Ok(false) => {
                warn!(key = %key, "orphaned blob already absent, nothing removed");
            }
            Err(e) => {
                error!(key = %key, error = %e, "failed to remove orphaned blob");
            }
        }
    }

    /// Whether blobs are deleted after a failed metadata write.
    pub fn compensates_orphans(&self) -> bool {
        self.compensate_orphans
    }

    /// Outcome counters for this uploader.
    pub fn metrics(&self) -> &Arc<UploadMetrics> {
        &self.metrics
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicU64, Ordering};

    use async_trait::async_trait;
    use bytes::Bytes;
    use intake_blob::{BlobError, FailingBlobStore, StoredObject};
    use intake_blob_memory::MemoryBlobStore;
    use intake_metadata::FailingMetadataStore;
    use intake_metadata_memory::MemoryMetadataStore;

    use super::*;
    use crate::builder::UploaderBuilder;
    use crate::error::UploadErrorKind;

    const BASE: &str = "https://files.s3.amazonaws.com/";

    struct Harness {
        blobs: Arc<MemoryBlobStore>,
        records: Arc<MemoryMetadataStore>,
        uploader: Uploader,
    }

    fn harness() -> Harness {
        let blobs = Arc::new(MemoryBlobStore::new(BASE));
        let records = Arc::new(MemoryMetadataStore::new());
        let uploader = UploaderBuilder::new()
            .blob_store(Arc::clone(&blobs) as Arc<dyn BlobStore>)
            .metadata_store(Arc::clone(&records) as Arc<dyn MetadataStore>)
            .build()
            .unwrap();
        Harness {
            blobs,
            records,
            uploader,
        }
    }

    fn request(filename: &str, content_type: &str, data: &'static [u8]) -> UploadRequest {
        UploadRequest::new(filename, content_type, Bytes::from_static(data))
    }

    // Accepts puts, refuses deletes.
    #[derive(Default)]
    struct UndeletableBlobStore {
        inner: MemoryBlobStore,
        delete_attempts: AtomicU64,
    }

    #[async_trait]
    impl BlobStore for UndeletableBlobStore {
        async fn put(
            &self,
            key: &str,
            data: Bytes,
            content_type: &str,
            visibility: Visibility,
        ) -> Result<(), BlobError> {
            self.inner.put(key, data, content_type, visibility).await
        }

        fn public_url(&self, key: &str) -> String {
            self.inner.public_url(key)
        }

        async fn get(&self, key: &str) -> Result<Option<StoredObject>, BlobError> {
            self.inner.get(key).await
        }

        async fn delete(&self, _key: &str) -> Result<bool, BlobError> {
            self.delete_attempts.fetch_add(1, Ordering::Relaxed);
            Err(BlobError::Storage("AccessDenied".into()))
        }
    }

    // Accepts puts but keeps nothing, so deletes find no object.
    struct VanishingBlobStore;

    #[async_trait]
    impl BlobStore for VanishingBlobStore {
        async fn put(
            &self,
            _key: &str,
            _data: Bytes,
            _content_type: &str,
            _visibility: Visibility,
        ) -> Result<(), BlobError> {
            Ok(())
        }

        fn public_url(&self, key: &str) -> String {
            format!("{BASE}{key}")
        }

        async fn get(&self, _key: &str) -> Result<Option<StoredObject>, BlobError> {
            Ok(None)
        }

        async fn delete(&self, _key: &str) -> Result<bool, BlobError> {
            Ok(false)
        }
    }

    #[tokio::test]
    async fn stores_blob_and_record() {
        let h = harness();
        let record = h
            .uploader
            .handle_upload(Some(request("report.pdf", "application/pdf", b"%PDF-1.7")))
            .await
            .unwrap();

        assert_eq!(record.filename, "report.pdf");
        assert_eq!(record.url, format!("{BASE}{}", record.id));
        assert!(record.id.ends_with("-report.pdf"));

        let stored = h.records.get(&record.id).await.unwrap().unwrap();
        assert_eq!(stored.filename, record.filename);
        assert_eq!(stored.url, record.url);
        assert_eq!(stored, record);

        let blob = h.blobs.get(&record.id).await.unwrap().unwrap();
        assert_eq!(blob.data.as_ref(), b"%PDF-1.7");
        assert_eq!(blob.content_type, "application/pdf");
        assert_eq!(blob.visibility, Some(Visibility::PublicRead));
    }

    #[tokio::test]
    async fn record_id_has_uuid_prefix() {
        let h = harness();
        let record = h
            .uploader
            .handle_upload(Some(request("a.txt", "text/plain", b"hello")))
            .await
            .unwrap();

        let (prefix, rest) = record.id.split_at(36);
        assert!(uuid::Uuid::parse_str(prefix).is_ok());
        assert_eq!(rest, "-a.txt");
        assert!(record.created_at.ends_with('Z'));
    }

    #[tokio::test]
    async fn same_filename_gets_distinct_ids() {
        let h = harness();
        let mut ids = HashSet::new();
        for _ in 0..50 {
            let record = h
                .uploader
                .handle_upload(Some(request("dup.bin", "application/octet-stream", b"x")))
                .await
                .unwrap();
            ids.insert(record.id);
        }
        assert_eq!(ids.len(), 50);
        assert_eq!(h.blobs.len(), 50);
        assert_eq!(h.records.len(), 50);
    }

    #[tokio::test]
    async fn missing_file_touches_no_store() {
        let h = harness();
        let err = h.uploader.handle_upload(None).await.unwrap_err();

        assert_eq!(err.kind(), UploadErrorKind::MissingFile);
        assert_eq!(h.blobs.put_count(), 0);
        assert_eq!(h.records.put_count(), 0);

        let snap = h.uploader.metrics().snapshot();
        assert_eq!(snap.received, 1);
        assert_eq!(snap.missing_file, 1);
    }

    #[tokio::test]
    async fn blob_failure_skips_metadata() {
        let blobs = Arc::new(FailingBlobStore::new("NoSuchBucket"));
        let records = Arc::new(MemoryMetadataStore::new());
        let uploader = UploaderBuilder::new()
            .blob_store(Arc::clone(&blobs) as Arc<dyn BlobStore>)
            .metadata_store(Arc::clone(&records) as Arc<dyn MetadataStore>)
            .build()
            .unwrap();

        let err = uploader
            .handle_upload(Some(request("a.txt", "text/plain", b"hello")))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), UploadErrorKind::StorageFailure);
        assert!(err.to_string().contains("NoSuchBucket"));
        assert_eq!(blobs.put_attempts(), 1);
        assert_eq!(records.put_count(), 0);
        assert_eq!(uploader.metrics().snapshot().storage_failures, 1);
    }

    #[tokio::test]
    async fn metadata_failure_leaves_blob_in_place() {
        let blobs = Arc::new(MemoryBlobStore::new(BASE));
        let records = Arc::new(FailingMetadataStore::new("ResourceNotFoundException"));
        let uploader = UploaderBuilder::new()
            .blob_store(Arc::clone(&blobs) as Arc<dyn BlobStore>)
            .metadata_store(Arc::clone(&records) as Arc<dyn MetadataStore>)
            .build()
            .unwrap();

        let err = uploader
            .handle_upload(Some(request("a.txt", "text/plain", b"hello")))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), UploadErrorKind::MetadataFailure);
        assert!(err.to_string().contains("ResourceNotFoundException"));
        assert_eq!(records.put_attempts(), 1);
        assert_eq!(blobs.len(), 1);
        assert_eq!(blobs.delete_count(), 0);

        let snap = uploader.metrics().snapshot();
        assert_eq!(snap.metadata_failures, 1);
        assert_eq!(snap.orphans_removed, 0);
        assert_eq!(snap.stored, 0);
    }

    #[tokio::test]
    async fn metadata_failure_with_compensation_removes_blob() {
        let blobs = Arc::new(MemoryBlobStore::new(BASE));
        let uploader = UploaderBuilder::new()
            .blob_store(Arc::clone(&blobs) as Arc<dyn BlobStore>)
            .metadata_store(Arc::new(FailingMetadataStore::new("throttled")))
            .compensate_orphans(true)
            .build()
            .unwrap();

        let err = uploader
            .handle_upload(Some(request("a.txt", "text/plain", b"hello")))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), UploadErrorKind::MetadataFailure);
        assert_eq!(blobs.put_count(), 1);
        assert_eq!(blobs.delete_count(), 1);
        assert!(blobs.is_empty());
        assert_eq!(uploader.metrics().snapshot().orphans_removed, 1);
    }

    #[tokio::test]
    async fn failed_compensation_keeps_metadata_error() {
        let blobs = Arc::new(UndeletableBlobStore::default());
        let uploader = UploaderBuilder::new()
            .blob_store(Arc::clone(&blobs) as Arc<dyn BlobStore>)
            .metadata_store(Arc::new(FailingMetadataStore::new("table gone")))
            .compensate_orphans(true)
            .build()
            .unwrap();

        let err = uploader
            .handle_upload(Some(request("a.txt", "text/plain", b"hello")))
            .await
            .unwrap_err();

        assert!(matches!(err, UploadError::MetadataFailure(_)));
        assert_eq!(blobs.delete_attempts.load(Ordering::Relaxed), 1);
        assert_eq!(blobs.inner.len(), 1);
        assert_eq!(uploader.metrics().snapshot().orphans_removed, 0);
    }

    #[tokio::test]
    async fn compensation_with_absent_blob_counts_nothing() {
        let uploader = UploaderBuilder::new()
            .blob_store(Arc::new(VanishingBlobStore))
            .metadata_store(Arc::new(FailingMetadataStore::new("table gone")))
            .compensate_orphans(true)
            .build()
            .unwrap();

        let err = uploader
            .handle_upload(Some(request("a.txt", "text/plain", b"hello")))
            .await
            .unwrap_err();

        assert!(matches!(err, UploadError::MetadataFailure(_)));
        let snap = uploader.metrics().snapshot();
        assert_eq!(snap.metadata_failures, 1);
        assert_eq!(snap.orphans_removed, 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_same_filename_gets_distinct_ids() {
        let h = harness();
        let uploader = Arc::new(h.uploader);

        let tasks: Vec<_> = (0..64)
            .map(|_| {
                let uploader = Arc::clone(&uploader);
                tokio::spawn(async move {
                    uploader
                        .handle_upload(Some(request("same.txt", "text/plain", b"x")))
                        .await
                        .unwrap()
                        .id
                })
            })
            .collect();

        let mut ids = HashSet::new();
        for task in tasks {
            ids.insert(task.await.unwrap());
        }
        assert_eq!(ids.len(), 64);
        assert_eq!(h.blobs.len(), 64);
        assert_eq!(h.records.len(), 64);
    }

    #[tokio::test]
    async fn filename_is_not_sanitized() {
        let h = harness();
        let record = h
            .uploader
            .handle_upload(Some(request("../etc/pass wd", "text/plain", b"")))
            .await
            .unwrap();

        assert!(record.id.ends_with("-../etc/pass wd"));
        assert_eq!(record.filename, "../etc/pass wd");
        assert!(h.blobs.contains(&record.id));
    }

    #[tokio::test]
    async fn success_updates_metrics() {
        let h = harness();
        h.uploader
            .handle_upload(Some(request("a.txt", "text/plain", b"hello")))
            .await
            .unwrap();

        let snap = h.uploader.metrics().snapshot();
        assert_eq!(snap.received, 1);
        assert_eq!(snap.stored, 1);
        assert_eq!(snap.bytes_stored, 5);
    }
}
