use serde::Deserialize;

/// Upload pipeline behavior.
#[derive(Debug, Default, Deserialize)]
pub struct UploadConfig {
    /// Delete the stored blob when its metadata record cannot be written.
    ///
    /// Off by default: a failed metadata write leaves the blob in place.
    #[serde(default)]
    pub compensate_orphans: bool,
}
