//! Customer records and line-level parsing.
//!
//! A line has the shape `id,first_name,last_name,epoch_seconds`. Fields past
//! the fourth are ignored. How a malformed line is treated is decided by
//! [`MalformedPolicy`]; every strategy in [`crate::parse`] applies the same
//! policy through [`parse_line`].

use crate::error::{LineError, LineErrorKind};
use crate::source::RawLine;
use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// One parsed input line.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub timestamp: SystemTime,
}

impl Record {
    pub fn new(
        id: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        timestamp: SystemTime,
    ) -> Self {
        Self {
            id: id.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            timestamp,
        }
    }

    /// Whole seconds relative to the Unix epoch (negative before 1970).
    #[must_use]
    pub fn epoch_seconds(&self) -> i64 {
        match self.timestamp.duration_since(UNIX_EPOCH) {
            Ok(after) => i64::try_from(after.as_secs()).unwrap_or(i64::MAX),
            Err(before) => i64::try_from(before.duration().as_secs())
                .map(|s| -s)
                .unwrap_or(i64::MIN),
        }
    }
}

/// Convert signed Unix seconds to a `SystemTime`, if the platform can represent it.
#[must_use]
pub fn time_from_epoch_seconds(seconds: i64) -> Option<SystemTime> {
    if seconds >= 0 {
        UNIX_EPOCH.checked_add(Duration::from_secs(seconds.unsigned_abs()))
    } else {
        UNIX_EPOCH.checked_sub(Duration::from_secs(seconds.unsigned_abs()))
    }
}

/// What to do with a line that is not a well-formed record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MalformedPolicy {
    /// Drop the line and report it in [`ParseOutput::rejected`](crate::ParseOutput::rejected).
    #[default]
    Skip,
    /// Keep a line whose only defect is its timestamp, stamped at `UNIX_EPOCH`.
    /// The defect is still reported. Lines with missing fields are skipped.
    ZeroTimestamp,
    /// Abort the whole parse on the first malformed line.
    Fail,
}

/// Result of parsing a single line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LineOutcome {
    Parsed(Record),
    /// A record was produced with a zero timestamp; the error explains why.
    Degraded(Record, LineError),
    Rejected(LineError),
    /// Whitespace-only line. Not a record and not an error.
    Blank,
}

/// Parse one line (terminator already stripped) under `policy`.
///
/// `number` is the 1-based line number used in any [`LineError`].
#[must_use]
pub fn parse_line(number: u64, line: &str, policy: MalformedPolicy) -> LineOutcome {
    if line.trim().is_empty() {
        return LineOutcome::Blank;
    }

    let mut fields = line.split(',');
    let (Some(id), Some(first_name), Some(last_name), Some(raw_ts)) =
        (fields.next(), fields.next(), fields.next(), fields.next())
    else {
        let found = line.split(',').count();
        return LineOutcome::Rejected(LineError::new(
            number,
            LineErrorKind::MissingFields { found },
        ));
    };

    match parse_timestamp(raw_ts) {
        Ok(timestamp) => LineOutcome::Parsed(Record::new(id, first_name, last_name, timestamp)),
        Err(kind) => {
            let err = LineError::new(number, kind);
            match policy {
                MalformedPolicy::ZeroTimestamp => {
                    LineOutcome::Degraded(Record::new(id, first_name, last_name, UNIX_EPOCH), err)
                }
                MalformedPolicy::Skip | MalformedPolicy::Fail => LineOutcome::Rejected(err),
            }
        }
    }
}

/// Parse a raw line as handed out by [`LineReader`](crate::source::LineReader).
pub(crate) fn parse_raw(raw: RawLine, policy: MalformedPolicy) -> LineOutcome {
    match String::from_utf8(raw.bytes) {
        Ok(line) => parse_line(raw.number, &line, policy),
        Err(_) => LineOutcome::Rejected(LineError::new(raw.number, LineErrorKind::InvalidUtf8)),
    }
}

fn parse_timestamp(raw: &str) -> Result<SystemTime, LineErrorKind> {
    let seconds: i64 = raw.parse().map_err(|_| LineErrorKind::InvalidTimestamp {
        value: raw.to_string(),
    })?;
    time_from_epoch_seconds(seconds).ok_or(LineErrorKind::TimestampOutOfRange { seconds })
}
