//! Line-oriented record parsing with three concurrency strategies.
//!
//! | Strategy | Concurrency | Backpressure |
//! |---|---|---|
//! | [`parse_sequential`] | none | n/a |
//! | [`parse_unbounded`] | one rayon task per line | none |
//! | [`parse_worker_pool`] | fixed worker threads, bounded queues | yes |
//!
//! All three return the same *set* of records and the same rejected lines for
//! a given input; only the order differs. Nothing is returned to the caller
//! until every worker has been joined.

mod fanout;
mod pool;
mod sequential;

pub use fanout::parse_unbounded;
pub use pool::parse_worker_pool;
pub use sequential::parse_sequential;

use crate::error::LineError;
use crate::record::{LineOutcome, MalformedPolicy, Record};
use crate::sort::{SortPolicy, sort_by, sort_by_key};
use std::time::Duration;

/// Everything a successful parse produced.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParseOutput {
    /// Parsed records. Order is unspecified for concurrent strategies.
    pub records: Vec<Record>,
    /// Lines that were skipped or degraded, in discovery order.
    pub rejected: Vec<LineError>,
    /// Lines pulled from the stream, blank lines included.
    pub lines_read: u64,
}

impl ParseOutput {
    /// Sort records by id, then timestamp, to restore a deterministic order.
    pub fn sort_by_id(&mut self) {
        sort_by(&mut self.records, SortPolicy::Sequential, |a, b| {
            a.id.cmp(&b.id).then(a.timestamp.cmp(&b.timestamp))
        });
        sort_by_key(&mut self.rejected, SortPolicy::Sequential, |e| e.line);
    }
}

/// Folds line outcomes into a [`ParseOutput`] under one policy.
pub(crate) struct Accumulator {
    policy: MalformedPolicy,
    records: Vec<Record>,
    rejected: Vec<LineError>,
}

impl Accumulator {
    pub(crate) fn new(policy: MalformedPolicy) -> Self {
        Self {
            policy,
            records: Vec::new(),
            rejected: Vec::new(),
        }
    }

    /// Returns the line error when the policy says it must abort the parse.
    pub(crate) fn push(&mut self, outcome: LineOutcome) -> Result<(), LineError> {
        match outcome {
            LineOutcome::Parsed(record) => self.records.push(record),
            LineOutcome::Degraded(record, err) => {
                log::warn!("{err}; timestamp set to the Unix epoch");
                self.records.push(record);
                self.rejected.push(err);
            }
            LineOutcome::Rejected(err) => {
                if self.policy == MalformedPolicy::Fail {
                    return Err(err);
                }
                log::warn!("skipping {err}");
                self.rejected.push(err);
            }
            LineOutcome::Blank => {}
        }
        Ok(())
    }

    pub(crate) fn finish(self, lines_read: u64) -> ParseOutput {
        ParseOutput {
            records: self.records,
            rejected: self.rejected,
            lines_read,
        }
    }
}

/// Keep the fatal line error with the lowest line number.
pub(crate) fn keep_first(fatal: &mut Option<LineError>, err: LineError) {
    if fatal.as_ref().is_none_or(|kept| err.line < kept.line) {
        *fatal = Some(err);
    }
}

pub(crate) fn log_summary(strategy: &str, output: &ParseOutput, elapsed: Duration) {
    log::info!(
        "{strategy} parse: {} line(s), {} record(s), {} rejected in {elapsed:?}",
        output.lines_read,
        output.records.len(),
        output.rejected.len(),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LineErrorKind;
    use std::time::UNIX_EPOCH;

    fn missing(line: u64) -> LineError {
        LineError::new(line, LineErrorKind::MissingFields { found: 1 })
    }

    #[test]
    fn skip_collects_rejections() {
        let mut acc = Accumulator::new(MalformedPolicy::Skip);
        acc.push(LineOutcome::Parsed(Record::new("1", "a", "b", UNIX_EPOCH)))
            .unwrap();
        acc.push(LineOutcome::Rejected(missing(2))).unwrap();
        acc.push(LineOutcome::Blank).unwrap();
        let out = acc.finish(3);
        assert_eq!(out.records.len(), 1);
        assert_eq!(out.rejected, vec![missing(2)]);
        assert_eq!(out.lines_read, 3);
    }

    #[test]
    fn fail_returns_the_line_error() {
        let mut acc = Accumulator::new(MalformedPolicy::Fail);
        assert_eq!(acc.push(LineOutcome::Rejected(missing(5))), Err(missing(5)));
    }

    #[test]
    fn keep_first_prefers_the_lowest_line() {
        let mut fatal = None;
        keep_first(&mut fatal, missing(9));
        keep_first(&mut fatal, missing(4));
        keep_first(&mut fatal, missing(6));
        assert_eq!(fatal, Some(missing(4)));
    }

    #[test]
    fn sort_by_id_orders_records_and_rejections() {
        let mut out = ParseOutput {
            records: vec![
                Record::new("b", "x", "y", UNIX_EPOCH),
                Record::new("a", "x", "y", UNIX_EPOCH),
            ],
            rejected: vec![missing(8), missing(2)],
            lines_read: 4,
        };
        out.sort_by_id();
        assert_eq!(out.records[0].id, "a");
        assert_eq!(out.rejected, vec![missing(2), missing(8)]);
    }

    #[test]
    fn degraded_keeps_record_and_reports() {
        let mut acc = Accumulator::new(MalformedPolicy::ZeroTimestamp);
        acc.push(LineOutcome::Degraded(
            Record::new("1", "a", "b", UNIX_EPOCH),
            missing(1),
        ))
        .unwrap();
        let out = acc.finish(1);
        assert_eq!(out.records.len(), 1);
        assert_eq!(out.rejected.len(), 1);
    }
}
