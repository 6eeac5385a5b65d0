use thiserror::Error;

/// Errors that can occur during blob storage operations.
#[derive(Debug, Error)]
pub enum BlobError {
    /// The backend rejected the request or failed to process it.
    #[error("blob storage error: {0}")]
    Storage(String),

    /// The backend throttled the request.
    #[error("blob storage request throttled")]
    Throttled,

    /// The request timed out.
    #[error("blob storage request timed out")]
    Timeout,

    /// A network or connection error occurred talking to the backend.
    #[error("blob storage connection error: {0}")]
    Connection(String),

    /// The backend is misconfigured (missing bucket, bad credentials, ...).
    #[error("blob storage configuration error: {0}")]
    Configuration(String),
}
