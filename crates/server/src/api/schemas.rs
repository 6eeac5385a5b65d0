use serde::{Deserialize, Serialize};

use intake_core::FileRecord;

/// Body of a successful `POST /upload`.
#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    pub message: String,
    pub data: FileRecord,
}

/// Body carrying only a message (missing file).
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Body of a failed request, with the underlying error text.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
    pub error: String,
}
