//! Persisted and in-memory records.

use chrono::{Local, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// Current local time without offset, the timestamp format used on disk
/// (`2024-05-01T10:00:00.123456`), truncated to microseconds.
pub fn now_local() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(now.nanosecond() / 1_000 * 1_000)
        .unwrap_or(now)
}

/// Timestamps as `isoformat()` writes them: microsecond fraction with six
/// digits, omitted when zero. Any fraction length is accepted on read.
pub mod timestamp {
    use chrono::{NaiveDateTime, Timelike};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn format(ts: &NaiveDateTime) -> String {
        if ts.nanosecond() == 0 {
            ts.format("%Y-%m-%dT%H:%M:%S").to_string()
        } else {
            ts.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
        }
    }

    pub fn serialize<S: Serializer>(ts: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format(ts))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        NaiveDateTime::deserialize(deserializer)
    }

    pub mod option {
        use chrono::NaiveDateTime;
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            ts: &Option<NaiveDateTime>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match ts {
                Some(ts) => serializer.serialize_some(&super::format(ts)),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<NaiveDateTime>, D::Error> {
            Option::<NaiveDateTime>::deserialize(deserializer)
        }
    }
}

/// A registered user, keyed by username in the credential store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Hex SHA-256 or Argon2 PHC string.
    #[serde(rename = "password")]
    pub password_hash: String,
    #[serde(with = "timestamp")]
    pub created_at: NaiveDateTime,
    #[serde(default, with = "timestamp::option")]
    pub last_login: Option<NaiveDateTime>,
    #[serde(default)]
    pub is_admin: bool,
}

impl UserRecord {
    /// A fresh, never-logged-in user.
    pub fn new(password_hash: String, is_admin: bool) -> Self {
        Self {
            password_hash,
            created_at: now_local(),
            last_login: None,
            is_admin,
        }
    }
}

/// Metadata for one uploaded file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Registry position, starting at 1.
    pub id: u64,
    /// Collision-free name under the upload directory.
    #[serde(rename = "name")]
    pub stored_name: String,
    /// Filename as supplied by the uploader.
    pub original_name: String,
    pub sender: String,
    pub receiver: String,
    /// Hex SHA-256 of the stored bytes.
    #[serde(rename = "sha256")]
    pub content_hash: String,
    #[serde(with = "timestamp")]
    pub upload_time: NaiveDateTime,
    pub size: u64,
}
