//! File input for the record parser.
//!
//! [`open_input`] opens a path, transparently decompresses it (see
//! [`compression`]) and buffers it for line reading.
//! [`RecordParser::parse_path`] combines that with a parse.

pub mod compression;

use crate::parse::ParseOutput;
use crate::runner::RecordParser;
use anyhow::{Context, Result};
use compression::{DynRead, auto_detect_reader};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Open `path` for parsing, decompressing it if needed.
///
/// # Errors
/// Returns an error if the file cannot be opened or its codec fails to initialize.
pub fn open_input(path: impl AsRef<Path>) -> Result<BufReader<DynRead>> {
    let path = path.as_ref();
    let f = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let rdr = auto_detect_reader(f, path)
        .with_context(|| format!("setup decompression for {}", path.display()))?;
    Ok(BufReader::new(rdr))
}

impl RecordParser {
    /// Parse every line of the file at `path`.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened, or the parse fails; the
    /// underlying [`ParseError`](crate::ParseError) is kept as the error source.
    pub fn parse_path(&self, path: impl AsRef<Path>) -> Result<ParseOutput> {
        let path = path.as_ref();
        let input = open_input(path)?;
        self.parse(input)
            .with_context(|| format!("parse records from {}", path.display()))
    }
}
