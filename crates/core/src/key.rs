use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Length of a hyphenated UUID in its canonical textual form.
const UUID_LEN: usize = 36;

/// Composite identifier used both as the blob key and as the metadata
/// record's primary key.
///
/// Format: `{uuid}-{filename}`
///
/// The filename is carried through verbatim. Path separators, control
/// characters and anything else the client sent end up in the key as-is;
/// [`StorageKey::from_parts`] is the single place a sanitization policy would
/// go.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StorageKey(String);

impl StorageKey {
    /// Generate a fresh key for `filename` from a random v4 UUID.
    pub fn generate(filename: &str) -> Self {
        Self::from_parts(Uuid::new_v4(), filename)
    }

    /// Build a key from an explicit UUID and filename.
    pub fn from_parts(id: Uuid, filename: &str) -> Self {
        Self(format!("{}-{filename}", id.hyphenated()))
    }

    /// The key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The UUID prefix, if the key starts with one.
    pub fn uuid(&self) -> Option<Uuid> {
        self.0
            .get(..UUID_LEN)
            .and_then(|prefix| Uuid::parse_str(prefix).ok())
    }

    /// The original filename portion of the key.
    pub fn filename(&self) -> &str {
        self.0.get(UUID_LEN + 1..).unwrap_or_default()
    }

    /// Consume the key and return the owned string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for StorageKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<StorageKey> for String {
    fn from(key: StorageKey) -> Self {
        key.0
    }
}
