use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::key::StorageKey;

/// Metadata persisted for every successfully stored file.
///
/// Field names are camelCase on the wire and in the metadata table
/// (`createdAt`), matching the JSON returned to uploaders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    /// Storage key; also the record's primary key.
    pub id: String,
    /// Filename as sent by the client.
    pub filename: String,
    /// Public address of the stored blob.
    pub url: String,
    /// ISO-8601 creation timestamp (UTC, millisecond precision).
    pub created_at: String,
}

impl FileRecord {
    /// Build a record for a blob stored under `key`.
    pub fn new(
        key: &StorageKey,
        filename: impl Into<String>,
        url: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: key.as_str().to_owned(),
            filename: filename.into(),
            url: url.into(),
            created_at: format_timestamp(created_at),
        }
    }
}

/// Render a timestamp as `YYYY-MM-DDTHH:MM:SS.mmmZ`.
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use uuid::Uuid;

    use super::*;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 8, 15, 0).unwrap()
    }

    #[test]
    fn timestamp_format() {
        assert_eq!(format_timestamp(fixed_time()), "2026-10-19T08:15:00.000Z");
    }

    #[test]
    fn new_uses_key_as_id() {
        let key = StorageKey::from_parts(Uuid::nil(), "a.txt");
        let record = FileRecord::new(&key, "a.txt", "https://b/x", fixed_time());
        assert_eq!(record.id, key.as_str());
        assert_eq!(record.filename, "a.txt");
        assert_eq!(record.url, "https://b/x");
        assert_eq!(record.created_at, "2026-10-19T08:15:00.000Z");
    }

    #[test]
    fn serializes_camel_case() {
        let key = StorageKey::from_parts(Uuid::nil(), "a.txt");
        let record = FileRecord::new(&key, "a.txt", "u", fixed_time());
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["createdAt"], "2026-10-19T08:15:00.000Z");
        assert!(json.get("created_at").is_none());
        assert_eq!(json.as_object().unwrap().len(), 4);
    }
}
