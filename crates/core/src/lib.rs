pub mod key;
pub mod record;
pub mod request;

pub use key::StorageKey;
pub use record::{FileRecord, format_timestamp};
pub use request::UploadRequest;
