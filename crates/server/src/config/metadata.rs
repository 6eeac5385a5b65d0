use serde::Deserialize;

/// Metadata store backend selection.
#[derive(Debug, Deserialize)]
pub struct MetadataConfig {
    /// Which backend to use: `"memory"` or `"dynamodb"`.
    #[serde(default = "default_metadata_backend")]
    pub backend: String,
    /// AWS region for the `dynamodb` backend.
    #[serde(default)]
    pub region: Option<String>,
    /// `DynamoDB` table name.
    #[serde(default)]
    pub table_name: Option<String>,
    /// Endpoint override (e.g. `DynamoDB` Local).
    #[serde(default)]
    pub endpoint_url: Option<String>,
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            backend: default_metadata_backend(),
            region: None,
            table_name: None,
            endpoint_url: None,
        }
    }
}

fn default_metadata_backend() -> String {
    "memory".to_owned()
}
