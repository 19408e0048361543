//! Line reader for vector input.

use crate::errors::InputError;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use unf_core::{Diagnostic, FingerprintReport, VectorValue};

/// Longest accepted line in bytes, excluding the newline.
pub const MAX_LINE_BYTES: usize = 32766;

/// How over-long lines are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadMode {
    /// Over-long lines are errors.
    Strict,
    /// Over-long lines are truncated with a warning.
    #[default]
    Permissive,
}

/// Reads one value per line.
///
/// A line is everything up to `\n`; the newline is dropped and nothing
/// else is, so a `\r` before it stays part of the value. Lines are raw bytes
/// and need not be UTF-8. An empty line is a missing value. A final line
/// without a newline still counts; a final newline does not start another
/// value.
///
/// # Example
///
/// ```rust
/// use unf_input::VectorReader;
///
/// let values = VectorReader::new(&b"1\n\n3\n"[..]).collect::<Result<Vec<_>, _>>()?;
/// assert_eq!(values.len(), 3);
/// assert!(values[1].missing);
/// # Ok::<(), unf_input::InputError>(())
/// ```
pub struct VectorReader<R> {
    inner: R,
    mode: ReadMode,
    max_line_bytes: usize,
    line: usize,
    report: FingerprintReport,
}

impl VectorReader<BufReader<File>> {
    /// Opens a file for reading.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, InputError> {
        Ok(Self::new(BufReader::new(File::open(path)?)))
    }
}

impl<R: BufRead> VectorReader<R> {
    /// Wraps a buffered reader in permissive mode.
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            mode: ReadMode::Permissive,
            max_line_bytes: MAX_LINE_BYTES,
            line: 0,
            report: FingerprintReport::new(),
        }
    }

    /// Sets the read mode.
    pub fn with_mode(mut self, mode: ReadMode) -> Self {
        self.mode = mode;
        self
    }

    /// Overrides the line length limit.
    pub fn with_max_line_bytes(mut self, max: usize) -> Self {
        self.max_line_bytes = max;
        self
    }

    /// Number of lines read so far.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Diagnostics raised while reading.
    pub fn report(&self) -> &FingerprintReport {
        &self.report
    }

    /// Consumes the reader, returning its diagnostics.
    pub fn into_report(self) -> FingerprintReport {
        self.report
    }

    /// Reads the next value. Returns `Ok(None)` at end of input.
    pub fn read_value(&mut self) -> Result<Option<VectorValue>, InputError> {
        let mut buf = Vec::new();
        if self.inner.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }
        self.line += 1;
        if buf.last() == Some(&b'\n') {
            buf.pop();
        }

        if buf.len() > self.max_line_bytes {
            match self.mode {
                ReadMode::Strict => {
                    return Err(InputError::LineTooLong {
                        line: self.line,
                        len: buf.len(),
                        max: self.max_line_bytes,
                    })
                }
                ReadMode::Permissive => {
                    buf.truncate(self.max_line_bytes);
                    self.report.warn(Diagnostic::LineTruncated {
                        line: self.line,
                        limit: self.max_line_bytes,
                    });
                }
            }
        }

        let value = if buf.is_empty() {
            VectorValue::missing(self.line)
        } else {
            VectorValue::present(self.line, buf)
        };
        Ok(Some(value))
    }
}

impl<R: BufRead> Iterator for VectorReader<R> {
    type Item = Result<VectorValue, InputError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_value().transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_all(input: &[u8]) -> Vec<VectorValue> {
        VectorReader::new(input).map(|v| v.unwrap()).collect()
    }

    #[test]
    fn final_newline_is_optional() {
        assert_eq!(read_all(b"a\nb"), read_all(b"a\nb\n"));
        assert!(read_all(b"").is_empty());
    }

    #[test]
    fn empty_lines_are_missing() {
        let values = read_all(b"\n\nx\n");
        assert_eq!(values.len(), 3);
        assert!(values[0].missing && values[1].missing);
        assert_eq!(values[2], VectorValue::present(3, "x"));
    }

    #[test]
    fn carriage_return_is_data() {
        assert_eq!(read_all(b"1\r\n")[0].text, b"1\r".to_vec());
    }

    #[test]
    fn long_lines_truncate_in_permissive_mode() {
        let mut reader = VectorReader::new(&b"abcdef\nxy\n"[..]).with_max_line_bytes(4);
        assert_eq!(reader.read_value().unwrap().unwrap().text, b"abcd".to_vec());
        assert_eq!(reader.read_value().unwrap().unwrap().text, b"xy".to_vec());
        assert_eq!(
            reader.report().warnings,
            vec![Diagnostic::LineTruncated { line: 1, limit: 4 }]
        );
    }

    #[test]
    fn long_lines_fail_in_strict_mode() {
        let mut reader = VectorReader::new(&b"abcdef\n"[..])
            .with_mode(ReadMode::Strict)
            .with_max_line_bytes(4);
        assert!(matches!(
            reader.read_value(),
            Err(InputError::LineTooLong { line: 1, len: 6, max: 4 })
        ));
    }
}
