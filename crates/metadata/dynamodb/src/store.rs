use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::AttributeValue;
use tracing::{debug, error, info, instrument};

use intake_core::FileRecord;
use intake_metadata::{MetadataError, MetadataStore};

use crate::config::DynamoDbMetadataConfig;

/// `DynamoDB`-backed implementation of [`MetadataStore`].
///
/// One item per uploaded file, keyed by the `id` partition key. Every
/// attribute is stored as a string.
pub struct DynamoDbMetadataStore {
    client: Client,
    table_name: String,
}

impl std::fmt::Debug for DynamoDbMetadataStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DynamoDbMetadataStore")
            .field("table_name", &self.table_name)
            .field("client", &"<DynamoDbClient>")
            .finish()
    }
}

impl DynamoDbMetadataStore {
    /// Create a new `DynamoDbMetadataStore` from the provided configuration.
    ///
    /// Loads AWS credentials and configuration from the environment and
    /// optionally overrides the endpoint URL for local development.
    pub async fn new(config: &DynamoDbMetadataConfig) -> Self {
        let client = build_client(config).await;
        Self::from_client(client, config)
    }

    /// Create a new `DynamoDbMetadataStore` from an existing `DynamoDB` client.
    pub fn from_client(client: Client, config: &DynamoDbMetadataConfig) -> Self {
        Self {
            client,
            table_name: config.table_name.clone(),
        }
    }

    /// The table records are written to.
    pub fn table_name(&self) -> &str {
        &self.table_name
    }
}

fn sdk_failure<E>(operation: &str, err: &E) -> MetadataError
where
    E: std::error::Error,
{
    let err_str = DisplayErrorContext(err).to_string();
    error!(operation, error = %err_str, "DynamoDB request failed");
    MetadataError::Storage(err_str)
}

#[async_trait]
impl MetadataStore for DynamoDbMetadataStore {
    #[instrument(skip(self, record), fields(table = %self.table_name, id = %record.id))]
    async fn put(&self, record: &FileRecord) -> Result<(), MetadataError> {
        debug!("writing file record");

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(record_to_item(record)))
            .send()
            .await
            .map_err(|e| sdk_failure("put_item", &e))?;

        info!(table = %self.table_name, id = %record.id, "file record stored");
        Ok(())
    }

    #[instrument(skip(self), fields(table = %self.table_name))]
    async fn get(&self, id: &str) -> Result<Option<FileRecord>, MetadataError> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key("id", AttributeValue::S(id.to_owned()))
            .send()
            .await
            .map_err(|e| sdk_failure("get_item", &e))?;

        output.item().map(item_to_record).transpose()
    }
}

/// Convert a [`FileRecord`] into a `DynamoDB` item.
fn record_to_item(record: &FileRecord) -> HashMap<String, AttributeValue> {
    HashMap::from([
        ("id".to_owned(), AttributeValue::S(record.id.clone())),
        (
            "filename".to_owned(),
            AttributeValue::S(record.filename.clone()),
        ),
        ("url".to_owned(), AttributeValue::S(record.url.clone())),
        (
            "createdAt".to_owned(),
            AttributeValue::S(record.created_at.clone()),
        ),
    ])
}

/// Convert a `DynamoDB` item back into a [`FileRecord`].
fn item_to_record(item: &HashMap<String, AttributeValue>) -> Result<FileRecord, MetadataError> {
    let get_s = |key: &str| -> Result<String, MetadataError> {
        match item.get(key) {
            Some(AttributeValue::S(v)) => Ok(v.clone()),
            _ => Err(MetadataError::InvalidItem(format!(
                "missing or invalid string attribute: {key}"
            ))),
        }
    };

    Ok(FileRecord {
        id: get_s("id")?,
        filename: get_s("filename")?,
        url: get_s("url")?,
        created_at: get_s("createdAt")?,
    })
}

/// Build a `DynamoDB` client from configuration.
pub async fn build_client(config: &DynamoDbMetadataConfig) -> Client {
    let mut loader =
        aws_config::from_env().region(aws_config::Region::new(config.region.clone()));

    if let Some(endpoint) = &config.endpoint_url {
        debug!(endpoint = %endpoint, "using custom DynamoDB endpoint");
        loader = loader.endpoint_url(endpoint);
    }

    let sdk_config = loader.load().await;
    Client::new(&sdk_config)
}
