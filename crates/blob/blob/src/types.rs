use bytes::Bytes;

/// Who may read a stored object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    /// Only the store's credentials can read the object.
    #[default]
    Private,
    /// Anyone can read the object at its public URL.
    PublicRead,
}

/// An object read back from a blob store.
#[derive(Debug, Clone)]
pub struct StoredObject {
    /// Key the object is stored under.
    pub key: String,
    /// MIME content type recorded with the object.
    pub content_type: String,
    /// Visibility the object was stored with, when the backend reports it.
    pub visibility: Option<Visibility>,
    /// The raw binary content.
    pub data: Bytes,
}

/// Ensure a public base address ends with exactly one trailing `/`, so that
/// `base + key` is always a well-formed object address.
pub fn normalize_base_url(base: &str) -> String {
    format!("{}/", base.trim_end_matches('/'))
}
