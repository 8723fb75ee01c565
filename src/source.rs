//! Pull-style line reader over any [`BufRead`].
//!
//! Yields one numbered [`RawLine`] per `\n`-terminated line (the last line may
//! be unterminated). `\n` and `\r\n` are stripped. End of stream ends the
//! iterator; any other I/O failure is yielded once and the reader stops.

use std::io::{self, BufRead};

/// A line as read from the stream, before UTF-8 validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawLine {
    /// 1-based.
    pub number: u64,
    pub bytes: Vec<u8>,
}

pub struct LineReader<R> {
    inner: R,
    next_number: u64,
    done: bool,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            next_number: 1,
            done: false,
        }
    }

    /// Number of lines handed out so far.
    #[must_use]
    pub fn lines_read(&self) -> u64 {
        self.next_number - 1
    }
}

impl<R: BufRead> Iterator for LineReader<R> {
    type Item = io::Result<RawLine>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let mut bytes = Vec::new();
        match self.inner.read_until(b'\n', &mut bytes) {
            Ok(0) => {
                self.done = true;
                None
            }
            Ok(_) => {
                if bytes.last() == Some(&b'\n') {
                    bytes.pop();
                    if bytes.last() == Some(&b'\r') {
                        bytes.pop();
                    }
                }
                let number = self.next_number;
                self.next_number += 1;
                Some(Ok(RawLine { number, bytes }))
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
