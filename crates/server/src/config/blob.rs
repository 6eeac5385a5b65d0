use serde::Deserialize;

/// Blob store backend selection.
#[derive(Debug, Deserialize)]
pub struct BlobConfig {
    /// Which backend to use: `"memory"` or `"s3"`.
    #[serde(default = "default_blob_backend")]
    pub backend: String,
    /// AWS region for the `s3` backend.
    #[serde(default)]
    pub region: Option<String>,
    /// Bucket for the `s3` backend.
    #[serde(default)]
    pub bucket: Option<String>,
    /// Endpoint override (e.g. `LocalStack`).
    #[serde(default)]
    pub endpoint_url: Option<String>,
    /// Base address returned in file records. Defaults to the bucket's
    /// virtual-hosted S3 address for `s3` and `memory://intake/` for `memory`.
    #[serde(default)]
    pub public_base_url: Option<String>,
    /// Path-style S3 addressing.
    #[serde(default)]
    pub force_path_style: bool,
}

impl Default for BlobConfig {
    fn default() -> Self {
        Self {
            backend: default_blob_backend(),
            region: None,
            bucket: None,
            endpoint_url: None,
            public_base_url: None,
            force_path_style: false,
        }
    }
}

fn default_blob_backend() -> String {
    "memory".to_owned()
}
