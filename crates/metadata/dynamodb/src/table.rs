use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types::{
    AttributeDefinition, BillingMode, KeySchemaElement, KeyType, ScalarAttributeType,
};
use tracing::info;

/// Create the `DynamoDB` file metadata table programmatically.
///
/// The table has a single string partition key `id` and uses
/// `PAY_PER_REQUEST` billing. The remaining attributes (`filename`, `url`,
/// `createdAt`) are schemaless.
///
/// This is intended for tests and local development. In production you would
/// typically provision the table via Infrastructure-as-Code tooling.
///
/// # Errors
///
/// Returns an error if the `CreateTable` call fails for reasons other than
/// the table already existing.
pub async fn create_file_table(
    client: &Client,
    table_name: &str,
) -> Result<(), aws_sdk_dynamodb::Error> {
    let key_schema = KeySchemaElement::builder()
        .attribute_name("id")
        .key_type(KeyType::Hash)
        .build()?;
    let id_attribute = AttributeDefinition::builder()
        .attribute_name("id")
        .attribute_type(ScalarAttributeType::S)
        .build()?;

    let result = client
        .create_table()
        .table_name(table_name)
        .key_schema(key_schema)
        .attribute_definitions(id_attribute)
        .billing_mode(BillingMode::PayPerRequest)
        .send()
        .await;

    match result {
        Ok(_) => {
            info!(table = %table_name, "created file metadata table");
            Ok(())
        }
        Err(err) => {
            // Tolerate "table already exists" errors so the call is idempotent.
            let service_err = err.into_service_error();
            if service_err.is_resource_in_use_exception() {
                info!(table = %table_name, "file metadata table already exists");
                Ok(())
            } else {
                Err(service_err.into())
            }
        }
    }
}
