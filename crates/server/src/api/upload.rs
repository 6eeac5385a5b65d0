use axum::Json;
use axum::extract::multipart::{Multipart, MultipartError, MultipartRejection};
use axum::extract::State;
use tracing::debug;

use intake_core::UploadRequest;

use super::AppState;
use super::schemas::UploadResponse;
use crate::error::ServerError;

/// Multipart part that carries the uploaded file.
pub const FILE_FIELD: &str = "file";

/// Body text of a successful upload.
pub const SUCCESS_MESSAGE: &str = "File uploaded successfully";

/// `POST /upload` -- store one file and return its record.
///
/// A body that is not multipart, or that has no `file` part with a filename,
/// is answered with 400.
pub async fn upload(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, ServerError> {
    let request = match multipart {
        Ok(multipart) => read_file_part(multipart).await?,
        Err(rejection) => {
            debug!(error = %rejection, "request body is not multipart");
            None
        }
    };

    let record = state.uploader.handle_upload(request).await?;

    Ok(Json(UploadResponse {
        message: SUCCESS_MESSAGE.to_owned(),
        data: record,
    }))
}

/// Pull the single `file` part out of the body, buffering its content.
///
/// Parts without a filename are plain text fields and are skipped. A file
/// under any name other than `file`, or a second `file` part, is an error.
async fn read_file_part(mut multipart: Multipart) -> Result<Option<UploadRequest>, ServerError> {
    let mut file = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let Some(filename) = field.file_name().map(str::to_owned) else {
            continue;
        };
        let name = field.name().unwrap_or_default();
        if name != FILE_FIELD || file.is_some() {
            return Err(ServerError::Multipart(format!("unexpected field: {name}")));
        }

        let content_type = field
            .content_type()
            .unwrap_or(UploadRequest::DEFAULT_CONTENT_TYPE)
            .to_owned();
        let data = field.bytes().await.map_err(multipart_error)?;
        debug!(%filename, %content_type, size = data.len(), "received file part");

        file = Some(UploadRequest::new(filename, content_type, data));
    }

    Ok(file)
}

fn multipart_error(err: MultipartError) -> ServerError {
    ServerError::Multipart(err.body_text())
}
