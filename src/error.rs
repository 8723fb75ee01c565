//! Error taxonomy for the record parser.
//!
//! Two layers:
//! - [`LineError`] describes a single malformed line. Whether it aborts the
//!   parse depends on the [`MalformedPolicy`](crate::record::MalformedPolicy).
//! - [`ParseError`] is the single terminal error a parse call returns.
//!
//! Sorting has no error type; it cannot fail.

use std::io;
use thiserror::Error;

/// Why a single line could not become a [`Record`](crate::Record).
#[derive(Error, Debug, Clone, PartialEq, Eq, Hash)]
#[error("line {line}: {kind}")]
pub struct LineError {
    /// 1-based line number in the input stream.
    pub line: u64,
    pub kind: LineErrorKind,
}

impl LineError {
    pub fn new(line: u64, kind: LineErrorKind) -> Self {
        Self { line, kind }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq, Hash)]
pub enum LineErrorKind {
    #[error("expected at least 4 comma-separated fields, found {found}")]
    MissingFields { found: usize },

    #[error("timestamp field {value:?} is not a base-10 integer")]
    InvalidTimestamp { value: String },

    #[error("timestamp {seconds} is outside the representable range")]
    TimestampOutOfRange { seconds: i64 },

    #[error("line is not valid UTF-8")]
    InvalidUtf8,
}

/// Terminal error of a parse call.
///
/// On any of these the caller receives no records.
#[derive(Error, Debug)]
pub enum ParseError {
    /// The input stream failed for a reason other than clean end-of-stream.
    #[error("failed to read line {line}")]
    Read {
        line: u64,
        #[source]
        source: io::Error,
    },

    /// A malformed line under [`MalformedPolicy::Fail`](crate::record::MalformedPolicy::Fail).
    #[error("malformed input: {0}")]
    Malformed(#[from] LineError),

    #[error("parse cancelled")]
    Cancelled,

    #[error("{count} parse worker(s) panicked")]
    WorkerPanicked { count: usize },

    #[error("failed to spawn parse thread")]
    Spawn(#[source] io::Error),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
