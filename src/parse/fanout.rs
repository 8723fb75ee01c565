use super::{Accumulator, ParseOutput, keep_first, log_summary};
use crate::cancel::StopSignal;
use crate::config::ParseOptions;
use crate::error::ParseError;
use crate::record::{LineOutcome, parse_raw};
use crate::source::LineReader;
use crossbeam_channel::unbounded;
use std::io::BufRead;
use std::thread;
use std::time::Instant;

/// Spawn one rayon task per line and gather their results.
///
/// **Illustrative only.** There is no admission control: every line becomes a
/// queued task and the completion queue is unbounded, so memory grows with
/// the input whenever parsing falls behind reading. Prefer
/// [`parse_worker_pool`](super::parse_worker_pool).
///
/// The reader runs inside the rayon pool, hence `R: Send`. A gather thread
/// drains the completion queue while tasks are still running.
///
/// # Errors
/// Same as [`parse_sequential`](super::parse_sequential). Under
/// [`MalformedPolicy::Fail`](crate::MalformedPolicy::Fail) the reported line
/// is the first malformed one, whatever order the tasks finish in.
pub fn parse_unbounded<R: BufRead + Send>(
    reader: R,
    options: &ParseOptions,
) -> Result<ParseOutput, ParseError> {
    let started = Instant::now();
    let policy = options.on_malformed;
    let stop = StopSignal::new(options.cancel.clone());
    let mut lines = LineReader::new(reader);
    let (tx, rx) = unbounded::<LineOutcome>();

    let (acc, fatal, scattered) = thread::scope(|s| -> Result<_, ParseError> {
        let gather_stop = stop.clone();
        let gather = thread::Builder::new()
            .name("fanout-gather".into())
            .spawn_scoped(s, move || {
                let mut acc = Accumulator::new(policy);
                let mut fatal = None;
                for outcome in rx.iter() {
                    if let Err(err) = acc.push(outcome) {
                        gather_stop.trigger(err.line);
                        keep_first(&mut fatal, err);
                    }
                }
                (acc, fatal)
            })
            .map_err(ParseError::Spawn)?;

        // rayon::scope returns only once every spawned task has finished.
        let scattered: Result<(), ParseError> = rayon::scope(|rs| {
            while let Some(line) = lines.next() {
                if stop.externally_cancelled() {
                    return Err(ParseError::Cancelled);
                }
                if stop.is_set() {
                    // a fatal line was found; earlier lines are already spawned
                    break;
                }
                let raw = line.map_err(|source| ParseError::Read {
                    line: lines.lines_read() + 1,
                    source,
                })?;
                let tx = tx.clone();
                rs.spawn(move |_| {
                    // The gather thread holds the receiver until every sender
                    // is gone; a failed send means it panicked.
                    tx.send(parse_raw(raw, policy)).ok();
                });
            }
            Ok(())
        });
        drop(tx);

        let (acc, fatal) = gather
            .join()
            .map_err(|_| ParseError::WorkerPanicked { count: 1 })?;
        Ok((acc, fatal, scattered))
    })?;

    if let Some(err) = fatal {
        return Err(err.into());
    }
    scattered?;

    let output = acc.finish(lines.lines_read());
    log_summary("unbounded fan-out", &output, started.elapsed());
    Ok(output)
}
