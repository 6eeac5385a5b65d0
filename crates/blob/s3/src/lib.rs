//! AWS S3 backend for the Intake blob store.
//!
//! Objects are written with a single `PutObject` call. Public URLs follow the
//! virtual-hosted S3 form `https://{bucket}.s3.amazonaws.com/{key}` unless a
//! `public_base_url` override is configured (e.g. for `LocalStack`).

mod config;
mod error;
mod store;

pub use config::S3BlobConfig;
pub use error::classify_sdk_error;
pub use store::{S3BlobStore, build_client};
