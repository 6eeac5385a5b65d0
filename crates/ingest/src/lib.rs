//! Upload orchestration: presence check, key derivation, blob persistence,
//! metadata persistence.
//!
//! The [`Uploader`] is assembled once at startup with [`UploaderBuilder`] and
//! shared across requests.

pub mod builder;
pub mod error;
pub mod metrics;
pub mod uploader;

pub use builder::UploaderBuilder;
pub use error::{UploadError, UploadErrorKind};
pub use metrics::{UploadMetrics, UploadMetricsSnapshot};
pub use uploader::Uploader;
