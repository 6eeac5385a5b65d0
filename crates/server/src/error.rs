use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use intake_ingest::UploadError;

use crate::api::schemas::{ErrorResponse, MessageResponse};

/// Body text for a request that carried no file.
pub const MISSING_FILE_MESSAGE: &str = "No file was uploaded";

/// Body text for every server-side failure.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Errors that can occur when running the Intake server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// A configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// An I/O error (e.g. binding the listener).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// TLS could not be set up.
    #[error("tls error: {0}")]
    Tls(#[from] intake_tls::TlsError),

    /// The upload pipeline failed.
    #[error(transparent)]
    Upload(#[from] UploadError),

    /// The multipart body could not be read.
    #[error("{0}")]
    Multipart(String),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        if matches!(self, Self::Upload(UploadError::MissingFile)) {
            let body = MessageResponse {
                message: MISSING_FILE_MESSAGE.to_owned(),
            };
            return (StatusCode::BAD_REQUEST, axum::Json(body)).into_response();
        }

        let body = ErrorResponse {
            message: INTERNAL_ERROR_MESSAGE.to_owned(),
            error: self.to_string(),
        };
        (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(body)).into_response()
    }
}
