//! Mock I/O helpers: failing streams and temporary input files.

use std::io::{self, BufRead, Cursor, Read, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// A reader that serves some lines and then fails instead of reaching EOF.
///
/// The failure is reported on line `lines.len() + 1`.
///
/// # Example
///
/// ```
/// use ironpool::testing::FailingReader;
/// use ironpool::{ParseError, ParseOptions, parse_sequential};
///
/// let reader = FailingReader::after_lines(&["1,John,Doe,1000000000"]);
/// let err = parse_sequential(reader, &ParseOptions::default()).unwrap_err();
/// assert!(matches!(err, ParseError::Read { line: 2, .. }));
/// ```
pub struct FailingReader {
    data: Cursor<Vec<u8>>,
    kind: io::ErrorKind,
}

impl FailingReader {
    #[must_use]
    pub fn after_lines<S: AsRef<str>>(lines: &[S]) -> Self {
        let mut buf = Vec::new();
        for line in lines {
            buf.extend_from_slice(line.as_ref().as_bytes());
            buf.push(b'\n');
        }
        Self {
            data: Cursor::new(buf),
            kind: io::ErrorKind::BrokenPipe,
        }
    }

    /// Use a different error kind. `Interrupted` is retried by readers, so avoid it.
    #[must_use]
    pub fn with_kind(mut self, kind: io::ErrorKind) -> Self {
        self.kind = kind;
        self
    }

    fn exhausted(&self) -> bool {
        self.data.position() >= self.data.get_ref().len() as u64
    }

    fn error(&self) -> io::Error {
        io::Error::new(self.kind, "injected read failure")
    }
}

impl Read for FailingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.exhausted() && !buf.is_empty() {
            return Err(self.error());
        }
        self.data.read(buf)
    }
}

impl BufRead for FailingReader {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        if self.exhausted() {
            return Err(self.error());
        }
        self.data.fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        self.data.consume(amt);
    }
}

/// A temporary input file that is deleted when dropped.
pub struct TempInput {
    file: NamedTempFile,
}

impl TempInput {
    /// Write `lines` (newline-terminated) to a temp file ending in `suffix`.
    ///
    /// # Errors
    ///
    /// Returns an error if the temporary file cannot be created or written.
    pub fn plain<S: AsRef<str>>(lines: &[S], suffix: &str) -> io::Result<Self> {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile()?;
        for line in lines {
            writeln!(file, "{}", line.as_ref())?;
        }
        file.flush()?;
        Ok(Self { file })
    }

    /// Write `lines` gzip-compressed to a temp file ending in `suffix`.
    ///
    /// # Errors
    ///
    /// Returns an error if the temporary file cannot be created or written.
    #[cfg(feature = "compression-gzip")]
    pub fn gzip<S: AsRef<str>>(lines: &[S], suffix: &str) -> io::Result<Self> {
        use flate2::Compression;
        use flate2::write::GzEncoder;

        let file = tempfile::Builder::new().suffix(suffix).tempfile()?;
        let mut enc = GzEncoder::new(file.reopen()?, Compression::default());
        for line in lines {
            writeln!(enc, "{}", line.as_ref())?;
        }
        enc.finish()?.flush()?;
        Ok(Self { file })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        self.file.path()
    }
}
