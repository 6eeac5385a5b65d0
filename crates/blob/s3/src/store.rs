use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::operation::get_object::GetObjectError;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::ObjectCannedAcl;
use bytes::Bytes;
use tracing::{debug, error, info, instrument};

use intake_blob::{BlobError, BlobStore, StoredObject, Visibility};

use crate::config::S3BlobConfig;
use crate::error::classify_sdk_error;

/// S3-backed implementation of [`BlobStore`].
///
/// All objects go to a single bucket. Public-read objects are written with the
/// `public-read` canned ACL; the bucket must allow ACLs for that to succeed.
pub struct S3BlobStore {
    client: Client,
    bucket: String,
    public_base_url: String,
}

impl std::fmt::Debug for S3BlobStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("S3BlobStore")
            .field("bucket", &self.bucket)
            .field("public_base_url", &self.public_base_url)
            .field("client", &"<S3Client>")
            .finish()
    }
}

impl S3BlobStore {
    /// Create a new `S3BlobStore` by building an AWS SDK client from the
    /// environment credential chain.
    pub async fn new(config: &S3BlobConfig) -> Self {
        let client = build_client(config).await;
        Self::from_client(client, config)
    }

    /// Create an `S3BlobStore` with a pre-built client.
    pub fn from_client(client: Client, config: &S3BlobConfig) -> Self {
        Self {
            client,
            bucket: config.bucket.clone(),
            public_base_url: config.resolved_public_base_url(),
        }
    }

    /// The bucket objects are written to.
    pub fn bucket(&self) -> &str {
        &self.bucket
    }
}

/// Map a failed SDK call to a [`BlobError`], keeping the full error chain in
/// the message.
fn sdk_failure<E>(operation: &str, err: &E) -> BlobError
where
    E: std::error::Error,
{
    let err_str = DisplayErrorContext(err).to_string();
    error!(operation, error = %err_str, "S3 request failed");
    classify_sdk_error(&err_str)
}

#[async_trait]
impl BlobStore for S3BlobStore {
    #[instrument(skip(self, data), fields(bucket = %self.bucket, size = data.len()))]
    async fn put(
        &self,
        key: &str,
        data: Bytes,
        content_type: &str,
        visibility: Visibility,
    ) -> Result<(), BlobError> {
        debug!("uploading object to S3");

        let mut request = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(data));

        if visibility == Visibility::PublicRead {
            request = request.acl(ObjectCannedAcl::PublicRead);
        }

        request
            .send()
            .await
            .map_err(|e| sdk_failure("put_object", &e))?;

        info!(bucket = %self.bucket, key = %key, "S3 object uploaded");
        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}{key}", self.public_base_url)
    }

    #[instrument(skip(self), fields(bucket = %self.bucket))]
    async fn get(&self, key: &str) -> Result<Option<StoredObject>, BlobError> {
        let result = match self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
        {
            Ok(output) => output,
            Err(err) => {
                if err
                    .as_service_error()
                    .is_some_and(GetObjectError::is_no_such_key)
                {
                    return Ok(None);
                }
                return Err(sdk_failure("get_object", &err));
            }
        };

        let content_type = result
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_owned();

        let data = result
            .body
            .collect()
            .await
            .map_err(|e| BlobError::Storage(format!("failed to read S3 body: {e}")))?
            .into_bytes();

        Ok(Some(StoredObject {
            key: key.to_owned(),
            content_type,
            visibility: None,
            data,
        }))
    }

    /// S3 does not report whether the object existed, so a successful delete
    /// always returns `true`.
    #[instrument(skip(self), fields(bucket = %self.bucket))]
    async fn delete(&self, key: &str) -> Result<bool, BlobError> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| sdk_failure("delete_object", &e))?;

        info!(bucket = %self.bucket, key = %key, "S3 object deleted");
        Ok(true)
    }
}

/// Build an S3 client from configuration.
///
/// Credentials come from the standard AWS SDK environment chain
/// (`AWS_ACCESS_KEY_ID`/`AWS_SECRET_ACCESS_KEY`, profiles, instance roles).
pub async fn build_client(config: &S3BlobConfig) -> Client {
    let mut loader = aws_config::from_env().region(aws_config::Region::new(config.region.clone()));

    if let Some(endpoint) = &config.endpoint_url {
        debug!(endpoint = %endpoint, "using custom S3 endpoint");
        loader = loader.endpoint_url(endpoint);
    }

    let sdk_config = loader.load().await;
    let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
        .force_path_style(config.force_path_style)
        .build();
    Client::from_conf(s3_config)
}
