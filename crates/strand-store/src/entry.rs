use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strand_types::Digest;

use crate::properties::Properties;

/// A stored string together with its derived properties.
///
/// Entries are immutable once built. The store only ever replaces or removes
/// an entry as a whole.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Content digest of `value`; the store key.
    pub id: Digest,
    /// The original string.
    pub value: String,
    /// Properties computed at insertion time.
    pub properties: Properties,
    /// When the string was first stored.
    pub created_at: DateTime<Utc>,
}

impl Entry {
    /// Build an entry for `value`, stamped with the current time.
    pub fn new(value: impl Into<String>) -> Self {
        Self::with_timestamp(value, Utc::now())
    }

    /// Build an entry with an explicit creation time.
    pub fn with_timestamp(value: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        let value = value.into();
        let properties = Properties::compute(&value);
        Self {
            id: properties.content_hash,
            value,
            properties,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use strand_crypto::ContentHasher;

    #[test]
    fn id_matches_content_hash() {
        let entry = Entry::new("level");
        assert_eq!(entry.id, ContentHasher::digest("level"));
        assert_eq!(entry.id, entry.properties.content_hash);
        assert_eq!(entry.value, "level");
    }

    #[test]
    fn serializes_created_at_as_rfc3339() {
        let ts = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();
        let entry = Entry::with_timestamp("abc", ts);
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["created_at"], "2024-05-01T12:30:00Z");
        assert_eq!(json["id"], ContentHasher::digest("abc").to_hex());
        assert_eq!(json["value"], "abc");
        assert_eq!(json["properties"]["length"], 3);
    }

    #[test]
    fn json_roundtrip_preserves_entry() {
        let ts = Utc.with_ymd_and_hms(2023, 1, 2, 3, 4, 5).unwrap();
        let entry = Entry::with_timestamp("a man a plan", ts);
        let json = serde_json::to_string(&entry).unwrap();
        let parsed: Entry = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, entry);
    }
}
