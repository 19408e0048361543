use thiserror::Error;

use unf_canonical::{CanonicalizationError, RoundingError};

/// Fatal errors for a fingerprint computation.
///
/// Anything recoverable is reported as a [`Diagnostic`](crate::Diagnostic)
/// instead; an error here means no descriptor is produced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FingerprintError {
    /// The rounding context could not be built from the parameters.
    #[error("invalid rounding parameters: {0}")]
    Rounding(#[from] RoundingError),
    /// A value's canonical text could not be transcoded.
    #[error("line {line} cannot be fingerprinted: {source}")]
    Canonicalization {
        /// 1-based line number of the value in its vector.
        line: usize,
        /// Underlying conversion failure.
        #[source]
        source: CanonicalizationError,
    },
}
