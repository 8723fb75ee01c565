//! # ironpool
//!
//! Concurrent parsing of line-oriented customer records and a stable parallel
//! merge sort, both built around one idea: **bounded** concurrency beats
//! unbounded fan-out.
//!
//! ## Key Features
//!
//! - **Three parse strategies** with identical output sets - sequential,
//!   one-task-per-line fan-out, and a bounded scatter/gather worker pool
//! - **Explicit malformed-line policy** - skip and report, zero timestamp and
//!   report, or fail fast
//! - **Cooperative cancellation** of in-flight parses
//! - **Transparent decompression** of input files (gzip, zstd, bzip2, xz via feature flags)
//! - **Stable in-place merge sort** - sequential, always-parallel, or
//!   parallel above a size cutoff
//!
//! ## Quick Start
//!
//! ```
//! use ironpool::*;
//! use std::io::Cursor;
//!
//! # fn main() -> anyhow::Result<()> {
//! let input = Cursor::new("1,John,Doe,1000000000\n2,Jane,Roe,1000000100\n");
//!
//! let parser = RecordParser::new(Strategy::WorkerPool { workers: Some(4) });
//! let mut output = parser.parse(input)?;
//! assert_eq!(output.records.len(), 2);
//!
//! // Worker-pool output order is unspecified; sort by an explicit field.
//! sort_by_key(&mut output.records, SortPolicy::default(), |r| r.id.clone());
//! assert_eq!(output.records[0].id, "1");
//! # Ok(())
//! # }
//! ```
//!
//! ## Record Format
//!
//! One record per line: `id,first_name,last_name,epoch_seconds`. Extra fields
//! are ignored; whitespace-only lines are skipped. See [`MalformedPolicy`] for
//! everything else.
//!
//! ## Parse Strategies
//!
//! - [`parse_sequential`] - single-threaded, in input order
//! - [`parse_unbounded`] - one rayon task per line, no backpressure.
//!   Kept to illustrate why admission control matters; never the default
//! - [`parse_worker_pool`] - a fixed number of worker threads fed through
//!   bounded queues, one gather thread, one supervisor. The default via
//!   [`Strategy::default`]
//!
//! Every strategy owns its threads and queues and returns only after all of
//! them are joined. A stream failure aborts the parse with [`ParseError::Read`]
//! and no records.
//!
//! ## Sorting
//!
//! [`sort`], [`sort_by`] and [`sort_by_key`] sort a caller-owned slice in
//! place. Ties keep their input order under every [`SortPolicy`].
//!
//! ```
//! use ironpool::{sort, SortPolicy};
//!
//! let mut v = vec![5, 8, 9, 5, 0, 10, 1, 6];
//! sort(&mut v, SortPolicy::AlwaysParallel);
//! assert_eq!(v, vec![0, 1, 5, 5, 6, 8, 9, 10]);
//! ```
//!
//! ## Logging
//!
//! The crate logs through the [`log`] facade and never installs a logger.
//!
//! ## Module Overview
//!
//! - [`record`] - `Record` and line parsing
//! - [`source`] - numbered line reader over any `BufRead`
//! - [`parse`] - the three strategies and `ParseOutput`
//! - [`runner`] - `Strategy` and the `RecordParser` façade
//! - [`config`] - `ParseOptions`
//! - [`cancel`] - `CancelToken`
//! - [`error`] - `ParseError` and `LineError`
//! - [`sort`] - parallel merge sort
//! - [`io`] - file input with decompression
//! - [`testing`] - assertions, fixtures and mock I/O for tests

pub mod cancel;
pub mod config;
pub mod error;
pub mod io;
pub mod parse;
pub mod record;
pub mod runner;
pub mod sort;
pub mod source;
pub mod testing;

pub use cancel::CancelToken;
pub use config::{DEFAULT_QUEUE_CAPACITY, ParseOptions};
pub use error::{LineError, LineErrorKind, ParseError};
pub use io::open_input;
pub use parse::{ParseOutput, parse_sequential, parse_unbounded, parse_worker_pool};
pub use record::{LineOutcome, MalformedPolicy, Record, parse_line};
pub use runner::{RecordParser, Strategy};
pub use sort::{DEFAULT_CUTOFF, SortPolicy, sort, sort_by, sort_by_key};
