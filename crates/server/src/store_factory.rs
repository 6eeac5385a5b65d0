use std::sync::Arc;

use intake_blob::BlobStore;
use intake_blob_memory::MemoryBlobStore;
#[cfg(feature = "s3")]
use intake_blob_s3::{S3BlobConfig, S3BlobStore};
use intake_metadata::MetadataStore;
#[cfg(feature = "dynamodb")]
use intake_metadata_dynamodb::{DynamoDbMetadataConfig, DynamoDbMetadataStore};
use intake_metadata_memory::MemoryMetadataStore;
use tracing::info;

use crate::config::{BlobConfig, MetadataConfig};
use crate::error::ServerError;

#[cfg(feature = "s3")]
const DEFAULT_REGION: &str = "us-east-1";

/// Create a blob store from the given configuration.
#[allow(clippy::unused_async)]
pub async fn create_blob_store(config: &BlobConfig) -> Result<Arc<dyn BlobStore>, ServerError> {
    let store: Arc<dyn BlobStore> = match config.backend.as_str() {
        "memory" => match &config.public_base_url {
            Some(base) => Arc::new(MemoryBlobStore::new(base)),
            None => Arc::new(MemoryBlobStore::default()),
        },
        #[cfg(feature = "s3")]
        "s3" => {
            let s3_config = s3_config(config)?;
            info!(bucket = %s3_config.bucket, region = %s3_config.region, "using S3 blob store");
            Arc::new(S3BlobStore::new(&s3_config).await)
        }
        other => {
            return Err(ServerError::Config(format!(
                "unsupported blob backend: {other}"
            )));
        }
    };
    Ok(store)
}

#[cfg(feature = "s3")]
fn s3_config(config: &BlobConfig) -> Result<S3BlobConfig, ServerError> {
    let bucket = config.bucket.as_deref().ok_or_else(|| {
        ServerError::Config("s3 blob backend requires [blob] bucket or BUCKET_NAME".into())
    })?;

    let mut s3_config = S3BlobConfig::new(
        config.region.as_deref().unwrap_or(DEFAULT_REGION),
        bucket,
    )
    .with_force_path_style(config.force_path_style);
    if let Some(endpoint) = &config.endpoint_url {
        s3_config = s3_config.with_endpoint_url(endpoint);
    }
    if let Some(base) = &config.public_base_url {
        s3_config = s3_config.with_public_base_url(base);
    }
    Ok(s3_config)
}

/// Create a metadata store from the given configuration.
#[allow(clippy::unused_async)]
pub async fn create_metadata_store(
    config: &MetadataConfig,
) -> Result<Arc<dyn MetadataStore>, ServerError> {
    let store: Arc<dyn MetadataStore> = match config.backend.as_str() {
        "memory" => Arc::new(MemoryMetadataStore::new()),
        #[cfg(feature = "dynamodb")]
        "dynamodb" => {
            let dynamo_config = dynamodb_config(config);
            info!(
                table = %dynamo_config.table_name,
                region = %dynamo_config.region,
                "using DynamoDB metadata store"
            );
            Arc::new(DynamoDbMetadataStore::new(&dynamo_config).await)
        }
        other => {
            return Err(ServerError::Config(format!(
                "unsupported metadata backend: {other}"
            )));
        }
    };
    Ok(store)
}

#[cfg(feature = "dynamodb")]
fn dynamodb_config(config: &MetadataConfig) -> DynamoDbMetadataConfig {
    let defaults = DynamoDbMetadataConfig::default();
    DynamoDbMetadataConfig {
        table_name: config.table_name.clone().unwrap_or(defaults.table_name),
        region: config.region.clone().unwrap_or(defaults.region),
        endpoint_url: config.endpoint_url.clone(),
    }
}

/// Provision the metadata table for backends that need one.
#[allow(clippy::unused_async)]
pub async fn migrate_metadata(config: &MetadataConfig) -> Result<(), ServerError> {
    match config.backend.as_str() {
        #[cfg(feature = "dynamodb")]
        "dynamodb" => {
            let dynamo_config = dynamodb_config(config);
            let client = intake_metadata_dynamodb::build_client(&dynamo_config).await;
            intake_metadata_dynamodb::create_file_table(&client, &dynamo_config.table_name)
                .await
                .map_err(|e| ServerError::Config(format!("metadata table creation: {e}")))?;
            Ok(())
        }
        other => {
            info!(backend = %other, "metadata backend needs no migration");
            Ok(())
        }
    }
}
