mod blob;
mod metadata;
mod server;
mod telemetry;
mod tls;
mod upload;


use std::path::Path;

pub use blob::*;
pub use metadata::*;
pub use server::*;
pub use telemetry::*;
pub use tls::*;
pub use upload::*;

use serde::Deserialize;

use crate::error::ServerError;

/// Top-level configuration for the Intake server, loaded from a TOML file.
#[derive(Debug, Default, Deserialize)]
pub struct IntakeConfig {
    /// HTTP server bind configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// HTTPS termination.
    #[serde(default)]
    pub tls: TlsConfig,
    /// Where file content is stored.
    #[serde(default)]
    pub blob: BlobConfig,
    /// Where file records are stored.
    #[serde(default)]
    pub metadata: MetadataConfig,
    /// Upload pipeline behavior.
    #[serde(default)]
    pub upload: UploadConfig,
    /// Console log output.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// OpenTelemetry distributed tracing configuration.
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl IntakeConfig {
    /// Load configuration from a TOML file.
    ///
    /// A missing file yields the defaults; the returned flag reports whether
    /// the file was found.
    pub fn load(path: impl AsRef<Path>) -> Result<(Self, bool), ServerError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok((Self::default(), false));
        }
        let contents = std::fs::read_to_string(path)?;
        let config = toml::from_str(&contents)
            .map_err(|e| ServerError::Config(format!("{}: {e}", path.display())))?;
        Ok((config, true))
    }

    /// Apply the deployment environment variables on top of the file values.
    ///
    /// | Variable        | Effect                                              |
    /// |-----------------|-----------------------------------------------------|
    /// | `AWS_REGION`    | region for both stores                              |
    /// | `BUCKET_NAME`   | S3 bucket; selects the `s3` blob backend            |
    /// | `FILE_TABLE`    | `DynamoDB` table; selects the `dynamodb` backend    |
    /// | `PORT`          | listen port                                         |
    /// | `TLS_CERT_PATH` | certificate chain; enables TLS                      |
    /// | `TLS_KEY_PATH`  | private key; enables TLS                            |
    ///
    /// `lookup` is usually `|k| std::env::var(k).ok()`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ServerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(region) = var("AWS_REGION") {
            self.blob.region = Some(region.clone());
            self.metadata.region = Some(region);
        }
        if let Some(bucket) = var("BUCKET_NAME") {
            self.blob.bucket = Some(bucket);
            "s3".clone_into(&mut self.blob.backend);
        }
        if let Some(table) = var("FILE_TABLE") {
            self.metadata.table_name = Some(table);
            "dynamodb".clone_into(&mut self.metadata.backend);
        }
        if let Some(port) = var("PORT") {
            self.server.port = port
                .trim()
                .parse()
                .map_err(|e| ServerError::Config(format!("invalid PORT {port:?}: {e}")))?;
        }
        if let Some(cert) = var("TLS_CERT_PATH") {
            self.tls.cert_path = Some(cert);
            self.tls.enabled = true;
        }
        if let Some(key) = var("TLS_KEY_PATH") {
            self.tls.key_path = Some(key);
            self.tls.enabled = true;
        }
        Ok(())
    }
}
