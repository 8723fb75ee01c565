//! Bounded scatter/gather worker pool.
//!
//! ```text
//! caller ──scatter──> [work queue] ──> worker 0..n ──> [result queue] ──> gather
//!                                          │
//!                          supervisor joins all workers, then closes results
//! ```
//!
//! Both queues are bounded by [`ParseOptions::queue_capacity`], so a slow
//! consumer throttles the reader. Queues are the only shared state.

use super::{Accumulator, ParseOutput, keep_first, log_summary};
use crate::cancel::StopSignal;
use crate::config::ParseOptions;
use crate::error::{LineError, ParseError};
use crate::record::{LineOutcome, MalformedPolicy, parse_raw};
use crate::source::{LineReader, RawLine};
use crossbeam_channel::{Receiver, Sender, bounded};
use std::io::BufRead;
use std::thread;
use std::time::Instant;

/// What the scoped threads hand back once everything is joined.
struct Joined {
    acc: Accumulator,
    fatal: Option<LineError>,
    read_error: Option<ParseError>,
    cancelled: bool,
    panicked: usize,
}

/// Parse with exactly `workers` long-lived worker threads.
///
/// The calling thread reads and scatters lines; a gather thread collects
/// results. On a stream failure, a fatal malformed line, or cancellation the
/// work queue is closed early and workers drain it without parsing the lines
/// that no longer matter. Every thread is joined before this returns.
///
/// Under [`MalformedPolicy::Fail`] the reported line is always the first
/// malformed one, as with [`parse_sequential`](super::parse_sequential).
///
/// # Errors
/// [`ParseError::InvalidConfig`] if `workers` is zero, [`ParseError::Spawn`]
/// if a thread cannot be started, [`ParseError::WorkerPanicked`] if a worker
/// panicked, otherwise as [`parse_sequential`](super::parse_sequential).
pub fn parse_worker_pool<R: BufRead>(
    reader: R,
    workers: usize,
    options: &ParseOptions,
) -> Result<ParseOutput, ParseError> {
    if workers == 0 {
        return Err(ParseError::InvalidConfig(
            "worker pool needs at least one worker".into(),
        ));
    }

    let started = Instant::now();
    let policy = options.on_malformed;
    let stop = StopSignal::new(options.cancel.clone());
    let mut lines = LineReader::new(reader);

    let joined = thread::scope(|s| -> Result<Joined, ParseError> {
        let (work_tx, work_rx) = bounded::<RawLine>(options.queue_capacity);
        let (result_tx, result_rx) = bounded::<LineOutcome>(options.queue_capacity);

        let mut handles = Vec::with_capacity(workers);
        for id in 0..workers {
            let work_rx = work_rx.clone();
            let result_tx = result_tx.clone();
            let stop = stop.clone();
            let handle = thread::Builder::new()
                .name(format!("parse-worker-{id}"))
                .spawn_scoped(s, move || run_worker(id, &work_rx, &result_tx, policy, &stop))
                .map_err(ParseError::Spawn)?;
            handles.push(handle);
        }
        drop(work_rx);

        // Results disconnect only after this thread drops the last sender,
        // which happens once every worker has been joined.
        let supervisor = thread::Builder::new()
            .name("parse-supervisor".into())
            .spawn_scoped(s, move || {
                let panicked = handles
                    .into_iter()
                    .map(|h| h.join())
                    .filter(Result::is_err)
                    .count();
                drop(result_tx);
                panicked
            })
            .map_err(ParseError::Spawn)?;

        let gather_stop = stop.clone();
        let gather = thread::Builder::new()
            .name("parse-gather".into())
            .spawn_scoped(s, move || {
                let mut acc = Accumulator::new(policy);
                let mut fatal = None;
                // Keep draining after a fatal line so no worker blocks on send.
                for outcome in result_rx.iter() {
                    if let Err(err) = acc.push(outcome) {
                        gather_stop.trigger(err.line);
                        keep_first(&mut fatal, err);
                    }
                }
                (acc, fatal)
            })
            .map_err(ParseError::Spawn)?;

        let mut read_error = None;
        while let Some(line) = lines.next() {
            if stop.is_set() {
                break;
            }
            match line {
                Ok(raw) => {
                    if work_tx.send(raw).is_err() {
                        // every worker is gone
                        break;
                    }
                }
                Err(source) => {
                    read_error = Some(ParseError::Read {
                        line: lines.lines_read() + 1,
                        source,
                    });
                    break;
                }
            }
        }
        drop(work_tx);

        let (acc, fatal) = gather
            .join()
            .map_err(|_| ParseError::WorkerPanicked { count: 1 })?;
        let panicked = supervisor
            .join()
            .map_err(|_| ParseError::WorkerPanicked { count: workers })?;
        // Checked after the joins: a token that fires once the last line was
        // read still makes workers drop queued lines.
        let cancelled = stop.externally_cancelled();

        Ok(Joined {
            acc,
            fatal,
            read_error,
            cancelled,
            panicked,
        })
    })?;

    if let Some(err) = joined.fatal {
        return Err(err.into());
    }
    if let Some(err) = joined.read_error {
        return Err(err);
    }
    if joined.panicked > 0 {
        return Err(ParseError::WorkerPanicked {
            count: joined.panicked,
        });
    }
    if joined.cancelled {
        return Err(ParseError::Cancelled);
    }

    let output = joined.acc.finish(lines.lines_read());
    log_summary("worker pool", &output, started.elapsed());
    Ok(output)
}

fn run_worker(
    id: usize,
    work: &Receiver<RawLine>,
    results: &Sender<LineOutcome>,
    policy: MalformedPolicy,
    stop: &StopSignal,
) {
    log::debug!("parse worker {id} started");
    let mut parsed = 0u64;
    for raw in work.iter() {
        if stop.skips(raw.number) {
            continue;
        }
        if results.send(parse_raw(raw, policy)).is_err() {
            break;
        }
        parsed += 1;
    }
    log::debug!("parse worker {id} exiting after {parsed} line(s)");
}
