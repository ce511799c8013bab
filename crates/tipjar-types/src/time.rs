use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// Wall-clock seconds since the UNIX epoch.
///
/// Second precision matches what donation receipts need; the ledger only
/// uses timestamps for ordering within a donor's history, never for
/// identity or uniqueness.
#[derive(
    Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Timestamp(u64);

impl Timestamp {
    /// Create a timestamp from explicit epoch seconds.
    pub const fn from_secs(secs: u64) -> Self {
        Self(secs)
    }

    /// The epoch timestamp (zero).
    pub const fn zero() -> Self {
        Self(0)
    }

    /// The current wall-clock time.
    pub fn now() -> Self {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        Self(secs)
    }

    /// Seconds since the UNIX epoch.
    pub const fn secs(&self) -> u64 {
        self.0
    }

    /// RFC 3339 rendering for logs and receipts.
    pub fn to_rfc3339(&self) -> String {
        match chrono::DateTime::<chrono::Utc>::from_timestamp(self.0 as i64, 0) {
            Some(dt) => dt.to_rfc3339(),
            None => format!("{}s", self.0),
        }
    }
}

impl fmt::Debug for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Timestamp({}s)", self.0)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
