use thiserror::Error;

use unf_core::FingerprintError;

/// Errors that can occur while reading vector input.
#[derive(Error, Debug)]
pub enum InputError {
    /// I/O error during read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Over-long line in strict mode.
    #[error("line {line} is {len} bytes, more than the maximum {max}")]
    LineTooLong {
        /// 1-based line number.
        line: usize,
        /// Actual length without the terminator.
        len: usize,
        /// Maximum allowed length.
        max: usize,
    },
    /// A column specification is not `TYPE:PATH`.
    #[error("invalid column specification {0:?}, expected TYPE:PATH")]
    InvalidColumn(String),
    /// The values read could not be fingerprinted.
    #[error(transparent)]
    Fingerprint(#[from] FingerprintError),
}
