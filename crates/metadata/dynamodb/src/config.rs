/// Configuration for the `DynamoDB` metadata store backend.
#[derive(Debug, Clone)]
pub struct DynamoDbMetadataConfig {
    /// `DynamoDB` table name.
    pub table_name: String,

    /// AWS region (e.g. `"us-east-1"`).
    pub region: String,

    /// Optional endpoint URL for local development (e.g. `DynamoDB` Local).
    pub endpoint_url: Option<String>,
}

impl Default for DynamoDbMetadataConfig {
    fn default() -> Self {
        Self {
            table_name: String::from("files"),
            region: String::from("us-east-1"),
            endpoint_url: None,
        }
    }
}
