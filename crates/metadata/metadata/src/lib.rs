pub mod error;
pub mod mock;
pub mod store;

pub use error::MetadataError;
pub use mock::FailingMetadataStore;
pub use store::MetadataStore;
