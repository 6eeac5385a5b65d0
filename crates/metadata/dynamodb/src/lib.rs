mod config;
mod store;
mod table;

pub use config::DynamoDbMetadataConfig;
pub use store::{DynamoDbMetadataStore, build_client};
pub use table::create_file_table;
