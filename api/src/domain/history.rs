use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::{NoContext, Timestamp, Uuid};

use crate::domain::request::{HttpMethod, KeyValue};
use crate::domain::response::ResponseStatus;

/// History entry identifier. A UUIDv7 minted from the entry's own timestamp, so
/// ids sort the same way entries do.
#[derive(Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(Uuid);

impl EntryId {
    pub fn at(timestamp_ms: i64) -> Self {
        let millis = u64::try_from(timestamp_ms).unwrap_or(0);
        let ts = Timestamp::from_unix(NoContext, millis / 1000, ((millis % 1000) * 1_000_000) as u32);
        Self(Uuid::new_v7(ts))
    }

    /// First 8 hex characters, for display only.
    pub fn short(&self) -> String {
        self.0.as_simple().to_string()[..8].to_string()
    }
}

impl fmt::Debug for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntryId({})", self.short())
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RequestSnapshot {
    pub headers: Vec<KeyValue>,
    pub cookies: Vec<KeyValue>,
    pub body: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Default)]
pub struct ResponseSnapshot {
    pub headers: String,
    pub body: String,
}

/// One completed send. Never mutated after creation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: EntryId,
    /// Epoch milliseconds.
    pub timestamp: i64,
    pub method: HttpMethod,
    pub url: String,
    pub status: ResponseStatus,
    pub status_text: String,
    pub request: RequestSnapshot,
    pub response: ResponseSnapshot,
}
