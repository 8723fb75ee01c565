use super::{Accumulator, ParseOutput, log_summary};
use crate::cancel::StopSignal;
use crate::config::ParseOptions;
use crate::error::ParseError;
use crate::record::parse_raw;
use crate::source::LineReader;
use std::io::BufRead;
use std::time::Instant;

/// Read and parse one line at a time on the calling thread.
///
/// Output order matches input order.
///
/// # Errors
/// [`ParseError::Read`] on a stream failure, [`ParseError::Malformed`] under
/// [`MalformedPolicy::Fail`](crate::MalformedPolicy::Fail), and
/// [`ParseError::Cancelled`] if the options' token fires.
pub fn parse_sequential<R: BufRead>(
    reader: R,
    options: &ParseOptions,
) -> Result<ParseOutput, ParseError> {
    let started = Instant::now();
    let stop = StopSignal::new(options.cancel.clone());
    let mut lines = LineReader::new(reader);
    let mut acc = Accumulator::new(options.on_malformed);

    while let Some(line) = lines.next() {
        if stop.is_set() {
            return Err(ParseError::Cancelled);
        }
        let raw = line.map_err(|source| ParseError::Read {
            line: lines.lines_read() + 1,
            source,
        })?;
        acc.push(parse_raw(raw, options.on_malformed))?;
    }

    let output = acc.finish(lines.lines_read());
    log_summary("sequential", &output, started.elapsed());
    Ok(output)
}
