use serde::{Deserialize, Serialize};

use intake_blob::normalize_base_url;

/// Configuration for the S3 blob store backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct S3BlobConfig {
    /// AWS region (e.g. `"us-east-1"`).
    pub region: String,

    /// Bucket that receives uploaded objects.
    pub bucket: String,

    /// Optional endpoint URL override for local development (e.g. `LocalStack`).
    #[serde(default)]
    pub endpoint_url: Option<String>,

    /// Optional public base address override. Defaults to the bucket's
    /// virtual-hosted S3 address.
    #[serde(default)]
    pub public_base_url: Option<String>,

    /// Use path-style addressing (`{endpoint}/{bucket}/{key}`). Needed by most
    /// S3-compatible emulators.
    #[serde(default)]
    pub force_path_style: bool,
}

impl S3BlobConfig {
    /// Create a new `S3BlobConfig` for `bucket` in `region`.
    pub fn new(region: impl Into<String>, bucket: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            bucket: bucket.into(),
            endpoint_url: None,
            public_base_url: None,
            force_path_style: false,
        }
    }

    /// Set the endpoint URL override.
    #[must_use]
    pub fn with_endpoint_url(mut self, endpoint_url: impl Into<String>) -> Self {
        self.endpoint_url = Some(endpoint_url.into());
        self
    }

    /// Set the public base address override.
    #[must_use]
    pub fn with_public_base_url(mut self, base: impl Into<String>) -> Self {
        self.public_base_url = Some(base.into());
        self
    }

    /// Enable or disable path-style addressing.
    #[must_use]
    pub fn with_force_path_style(mut self, enabled: bool) -> Self {
        self.force_path_style = enabled;
        self
    }

    /// The public base address objects are served from, always ending in `/`.
    pub fn resolved_public_base_url(&self) -> String {
        match &self.public_base_url {
            Some(base) => normalize_base_url(base),
            None => format!("https://{}.s3.amazonaws.com/", self.bucket),
        }
    }
}
