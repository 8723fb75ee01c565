//! Transparent decompression of parser input.
//!
//! ## Built-in Codecs
//!
//! When enabled via feature flags:
//! - **Gzip** (`.gz`) - via `flate2` (feature: `compression-gzip`), multi-member aware
//! - **Zstd** (`.zst`) - via `zstd` (feature: `compression-zstd`)
//! - **Bzip2** (`.bz2`) - via `bzip2` (feature: `compression-bzip2`)
//! - **Xz** (`.xz`) - via `xz2` (feature: `compression-xz`)
//!
//! Detection checks the path extension first and falls back to magic bytes.
//! There is no global registry: callers with their own codecs pass them to
//! [`auto_detect_reader_with`].
//!
//! All readers are `Send` so a decompressing stream can feed any parse strategy.

use anyhow::{Context, Result};
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::sync::Arc;

/// A boxed, thread-transferable byte stream.
pub type DynRead = Box<dyn Read + Send>;

/// Pluggable decompression codec.
pub trait CompressionCodec: Send + Sync {
    /// Human-readable codec name (e.g., "gzip", "zstd").
    fn name(&self) -> &str;

    /// Lowercase extensions including the leading dot (e.g., `&[".gz"]`).
    fn extensions(&self) -> &[&str];

    /// Magic byte signature, if the format has a reliable one.
    fn magic_bytes(&self) -> Option<&[u8]>;

    /// Wrap a reader with decompression.
    fn wrap_reader(&self, reader: DynRead) -> std::io::Result<DynRead>;
}

/// Codecs compiled in through feature flags.
#[must_use]
pub fn builtin_codecs() -> Vec<Arc<dyn CompressionCodec>> {
    vec![
        #[cfg(feature = "compression-gzip")]
        Arc::new(GzipCodec),
        #[cfg(feature = "compression-zstd")]
        Arc::new(ZstdCodec),
        #[cfg(feature = "compression-bzip2")]
        Arc::new(Bzip2Codec),
        #[cfg(feature = "compression-xz")]
        Arc::new(XzCodec),
    ]
}

fn detect_from_extension(
    path: &Path,
    codecs: &[Arc<dyn CompressionCodec>],
) -> Option<Arc<dyn CompressionCodec>> {
    let path_str = path.to_string_lossy().to_lowercase();
    codecs
        .iter()
        .find(|codec| codec.extensions().iter().any(|ext| path_str.ends_with(ext)))
        .cloned()
}

/// Peeks without consuming.
fn detect_from_magic<R: BufRead>(
    reader: &mut R,
    codecs: &[Arc<dyn CompressionCodec>],
) -> Option<Arc<dyn CompressionCodec>> {
    let buf = reader.fill_buf().ok()?;
    if buf.is_empty() {
        return None;
    }
    codecs
        .iter()
        .find(|codec| codec.magic_bytes().is_some_and(|magic| buf.starts_with(magic)))
        .cloned()
}

/// Wrap `reader` with the matching built-in codec, or return it buffered as-is.
///
/// # Errors
/// Returns an error if the codec fails to initialize on the stream.
pub fn auto_detect_reader<R: Read + Send + 'static>(
    reader: R,
    path_hint: impl AsRef<Path>,
) -> Result<DynRead> {
    auto_detect_reader_with(reader, path_hint, &builtin_codecs())
}

/// [`auto_detect_reader`] over an explicit codec list.
///
/// # Errors
/// Returns an error if the codec fails to initialize on the stream.
pub fn auto_detect_reader_with<R: Read + Send + 'static>(
    reader: R,
    path_hint: impl AsRef<Path>,
    codecs: &[Arc<dyn CompressionCodec>],
) -> Result<DynRead> {
    if let Some(codec) = detect_from_extension(path_hint.as_ref(), codecs) {
        return codec
            .wrap_reader(Box::new(reader))
            .with_context(|| format!("wrap reader with {} codec", codec.name()));
    }

    let mut buf_reader = BufReader::new(reader);
    if let Some(codec) = detect_from_magic(&mut buf_reader, codecs) {
        log::debug!("detected {} input from magic bytes", codec.name());
        return codec
            .wrap_reader(Box::new(buf_reader))
            .with_context(|| format!("wrap reader with {} codec", codec.name()));
    }

    Ok(Box::new(buf_reader))
}

#[cfg(feature = "compression-gzip")]
struct GzipCodec;

#[cfg(feature = "compression-gzip")]
impl CompressionCodec for GzipCodec {
    fn name(&self) -> &str {
        "gzip"
    }

    fn extensions(&self) -> &[&str] {
        &[".gz", ".gzip"]
    }

    fn magic_bytes(&self) -> Option<&[u8]> {
        Some(&[0x1f, 0x8b])
    }

    fn wrap_reader(&self, reader: DynRead) -> std::io::Result<DynRead> {
        Ok(Box::new(flate2::read::MultiGzDecoder::new(reader)))
    }
}

#[cfg(feature = "compression-zstd")]
struct ZstdCodec;

#[cfg(feature = "compression-zstd")]
impl CompressionCodec for ZstdCodec {
    fn name(&self) -> &str {
        "zstd"
    }

    fn extensions(&self) -> &[&str] {
        &[".zst", ".zstd"]
    }

    fn magic_bytes(&self) -> Option<&[u8]> {
        Some(&[0x28, 0xb5, 0x2f, 0xfd])
    }

    fn wrap_reader(&self, reader: DynRead) -> std::io::Result<DynRead> {
        zstd::stream::read::Decoder::new(reader).map(|d| Box::new(d) as DynRead)
    }
}

#[cfg(feature = "compression-bzip2")]
struct Bzip2Codec;

#[cfg(feature = "compression-bzip2")]
impl CompressionCodec for Bzip2Codec {
    fn name(&self) -> &str {
        "bzip2"
    }

    fn extensions(&self) -> &[&str] {
        &[".bz2", ".bzip2"]
    }

    fn magic_bytes(&self) -> Option<&[u8]> {
        Some(b"BZh")
    }

    fn wrap_reader(&self, reader: DynRead) -> std::io::Result<DynRead> {
        Ok(Box::new(bzip2::read::MultiBzDecoder::new(reader)))
    }
}

#[cfg(feature = "compression-xz")]
struct XzCodec;

#[cfg(feature = "compression-xz")]
impl CompressionCodec for XzCodec {
    fn name(&self) -> &str {
        "xz"
    }

    fn extensions(&self) -> &[&str] {
        &[".xz"]
    }

    fn magic_bytes(&self) -> Option<&[u8]> {
        Some(&[0xfd, 0x37, 0x7a, 0x58, 0x5a, 0x00])
    }

    fn wrap_reader(&self, reader: DynRead) -> std::io::Result<DynRead> {
        Ok(Box::new(xz2::read::XzDecoder::new_multi_decoder(reader)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    struct Rot13Codec;

    impl CompressionCodec for Rot13Codec {
        fn name(&self) -> &str {
            "rot13"
        }
        fn extensions(&self) -> &[&str] {
            &[".rot13"]
        }
        fn magic_bytes(&self) -> Option<&[u8]> {
            None
        }
        fn wrap_reader(&self, mut reader: DynRead) -> std::io::Result<DynRead> {
            let mut buf = Vec::new();
            reader.read_to_end(&mut buf)?;
            for b in &mut buf {
                if b.is_ascii_lowercase() {
                    *b = (*b - b'a' + 13) % 26 + b'a';
                }
            }
            Ok(Box::new(Cursor::new(buf)))
        }
    }

    fn read_all(mut r: DynRead) -> String {
        let mut s = String::new();
        r.read_to_string(&mut s).unwrap();
        s
    }

    #[test]
    fn plain_input_passes_through() {
        let r = auto_detect_reader(Cursor::new(b"1,a,b,2\n".to_vec()), "input.csv").unwrap();
        assert_eq!(read_all(r), "1,a,b,2\n");
    }

    #[test]
    fn custom_codec_matches_extension_case_insensitively() {
        let codecs: Vec<Arc<dyn CompressionCodec>> = vec![Arc::new(Rot13Codec)];
        let r = auto_detect_reader_with(Cursor::new(b"nop".to_vec()), "IN.ROT13", &codecs).unwrap();
        assert_eq!(read_all(r), "abc");
    }

    #[cfg(feature = "compression-gzip")]
    #[test]
    fn gzip_is_detected_by_magic_without_extension() {
        use flate2::Compression;
        use flate2::write::GzEncoder;
        use std::io::Write;

        let mut enc = GzEncoder::new(Vec::new(), Compression::default());
        enc.write_all(b"1,John,Doe,1000000000\n").unwrap();
        let gz = enc.finish().unwrap();

        let r = auto_detect_reader(Cursor::new(gz), "no-extension").unwrap();
        assert_eq!(read_all(r), "1,John,Doe,1000000000\n");
    }
}
