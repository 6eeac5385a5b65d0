use bytes::Bytes;

/// A single inbound file, alive for the duration of one upload call.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    /// Raw file content.
    pub data: Bytes,
    /// Filename as sent by the client. May contain arbitrary characters.
    pub filename: String,
    /// Content type declared by the client.
    pub content_type: String,
}

impl UploadRequest {
    /// Content type used when the client does not declare one.
    pub const DEFAULT_CONTENT_TYPE: &'static str = "application/octet-stream";

    pub fn new(
        filename: impl Into<String>,
        content_type: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        Self {
            data: data.into(),
            filename: filename.into(),
            content_type: content_type.into(),
        }
    }

    /// Size of the payload in bytes.
    pub fn size(&self) -> usize {
        self.data.len()
    }
}
