use std::fmt;

use intake_blob::BlobError;
use intake_metadata::MetadataError;
use thiserror::Error;

/// Errors returned by [`Uploader::handle_upload`](crate::Uploader::handle_upload).
#[derive(Debug, Error)]
pub enum UploadError {
    /// The request carried no file.
    #[error("no file was uploaded")]
    MissingFile,

    /// The blob store rejected the object. No metadata was written.
    #[error(transparent)]
    StorageFailure(BlobError),

    /// The blob was stored but the metadata record was not.
    #[error(transparent)]
    MetadataFailure(MetadataError),

    /// The uploader was assembled without a required component.
    #[error("uploader configuration error: {0}")]
    Configuration(String),
}

/// Discriminant of an [`UploadError`], for logging and metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadErrorKind {
    MissingFile,
    StorageFailure,
    MetadataFailure,
    Configuration,
}

impl UploadError {
    /// The kind of failure, without its payload.
    pub fn kind(&self) -> UploadErrorKind {
        match self {
            Self::MissingFile => UploadErrorKind::MissingFile,
            Self::StorageFailure(_) => UploadErrorKind::StorageFailure,
            Self::MetadataFailure(_) => UploadErrorKind::MetadataFailure,
            Self::Configuration(_) => UploadErrorKind::Configuration,
        }
    }
}

impl fmt::Display for UploadErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::MissingFile => "missing_file",
            Self::StorageFailure => "storage_failure",
            Self::MetadataFailure => "metadata_failure",
            Self::Configuration => "configuration",
        };
        f.write_str(s)
    }
}
