pub mod error;
pub mod mock;
pub mod store;
pub mod types;

pub use error::BlobError;
pub use mock::FailingBlobStore;
pub use store::BlobStore;
pub use types::{StoredObject, Visibility, normalize_base_url};
