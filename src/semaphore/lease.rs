//! Lease records and their classification.

use chrono::{DateTime, Utc};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// The content of a lease record: an absolute expiry in UNIX seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeaseRecord {
    pub expires_at: i64,
}

impl LeaseRecord {
    /// A lease taken at `now` for `lease_seconds`.
    pub fn starting_at(now: i64, lease_seconds: u64) -> Self {
        Self {
            expires_at: lease_expiry(now, lease_seconds),
        }
    }

    /// Parse record content. Surrounding whitespace is tolerated.
    pub fn parse(content: &str) -> Option<Self> {
        content
            .trim()
            .parse::<i64>()
            .ok()
            .map(|expires_at| Self { expires_at })
    }

    /// The record's on-disk content.
    pub fn to_content(&self) -> String {
        self.expires_at.to_string()
    }
}

/// `now + lease_seconds`, saturating instead of overflowing.
pub fn lease_expiry(now: i64, lease_seconds: u64) -> i64 {
    now.saturating_add(i64::try_from(lease_seconds).unwrap_or(i64::MAX))
}

/// State of a key at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaseState {
    /// No lease record exists.
    Absent,
    /// The record's expiry is strictly in the future.
    Held { expires_at: i64 },
    /// The record's expiry has passed; the next acquire reclaims it.
    Expired { expires_at: i64 },
    /// The record exists but cannot be read or parsed; treated as expired.
    Corrupt,
}

impl LeaseState {
    /// Classify the lease record at `path` against `now`.
    pub fn read(path: &Path, now: i64) -> Self {
        match fs::read_to_string(path) {
            Ok(content) => match LeaseRecord::parse(&content) {
                Some(record) => Self::classify(record, now),
                None => LeaseState::Corrupt,
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => LeaseState::Absent,
            Err(_) => LeaseState::Corrupt,
        }
    }

    pub fn classify(record: LeaseRecord, now: i64) -> Self {
        if record.expires_at > now {
            LeaseState::Held {
                expires_at: record.expires_at,
            }
        } else {
            LeaseState::Expired {
                expires_at: record.expires_at,
            }
        }
    }

    pub fn is_held(&self) -> bool {
        matches!(self, LeaseState::Held { .. })
    }

    /// Whether an acquire at this instant would write a new record.
    pub fn is_acquirable(&self) -> bool {
        !self.is_held()
    }

    pub fn expires_at(&self) -> Option<i64> {
        match self {
            LeaseState::Held { expires_at } | LeaseState::Expired { expires_at } => {
                Some(*expires_at)
            }
            LeaseState::Absent | LeaseState::Corrupt => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LeaseState::Absent => "absent",
            LeaseState::Held { .. } => "held",
            LeaseState::Expired { .. } => "expired",
            LeaseState::Corrupt => "corrupt",
        }
    }
}

impl fmt::Display for LeaseState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.expires_at() {
            Some(ts) => write!(f, "{} (expires {})", self.as_str(), format_timestamp(ts)),
            None => write!(f, "{}", self.as_str()),
        }
    }
}

/// RFC3339 rendering of a UNIX timestamp, or the raw number if out of range.
pub fn format_timestamp(ts: i64) -> String {
    DateTime::<Utc>::from_timestamp(ts, 0)
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_else(|| ts.to_string())
}

/// A lease record found in the root directory.
#[derive(Debug, Clone)]
pub struct LeaseInfo {
    pub key: String,
    pub path: PathBuf,
    pub state: LeaseState,
}

impl fmt::Display for LeaseInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.key, self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_accepts_trailing_newline() {
        assert_eq!(
            LeaseRecord::parse("1700000000\n"),
            Some(LeaseRecord {
                expires_at: 1700000000
            })
        );
        assert_eq!(LeaseRecord::parse("-5").map(|r| r.expires_at), Some(-5));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(LeaseRecord::parse(""), None);
        assert_eq!(LeaseRecord::parse("soon"), None);
        assert_eq!(LeaseRecord::parse("12abc"), None);
    }

    #[test]
    fn test_lease_expiry_saturates() {
        assert_eq!(lease_expiry(100, 60), 160);
        assert_eq!(lease_expiry(100, 0), 100);
        assert_eq!(lease_expiry(i64::MAX - 1, 10), i64::MAX);
        assert_eq!(lease_expiry(0, u64::MAX), i64::MAX);
    }

    #[test]
    fn test_classify_boundary_is_expired() {
        let record = LeaseRecord { expires_at: 1000 };

        assert_eq!(
            LeaseState::classify(record, 999),
            LeaseState::Held { expires_at: 1000 }
        );
        // Expiry equal to now is no longer held
        assert_eq!(
            LeaseState::classify(record, 1000),
            LeaseState::Expired { expires_at: 1000 }
        );
    }

    #[test]
    fn test_read_states() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("jobs");

        assert_eq!(LeaseState::read(&path, 0), LeaseState::Absent);

        fs::write(&path, "500").unwrap();
        assert!(LeaseState::read(&path, 499).is_held());
        assert_eq!(
            LeaseState::read(&path, 600),
            LeaseState::Expired { expires_at: 500 }
        );

        fs::write(&path, "garbage").unwrap();
        assert_eq!(LeaseState::read(&path, 0), LeaseState::Corrupt);
        assert!(LeaseState::Corrupt.is_acquirable());
    }

    #[test]
    fn test_display_includes_expiry() {
        let state = LeaseState::Held { expires_at: 0 };
        assert_eq!(state.to_string(), "held (expires 1970-01-01T00:00:00+00:00)");
        assert_eq!(LeaseState::Absent.to_string(), "absent");
    }
}
