use serde::{Deserialize, Serialize};
use std::fmt;

/// A recoverable anomaly. The computation continues and the fingerprint is
/// still produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum Diagnostic {
    /// A parameter was out of range and replaced by its default.
    ParameterCorrected {
        /// Parameter name.
        field: String,
        /// Rejected value as given.
        value: String,
        /// Value used instead.
        replacement: String,
    },
    /// A parameter does not apply to this vector type and was ignored.
    ParameterIgnored {
        /// Parameter name.
        field: String,
    },
    /// A composite input line is not a UNF string and was skipped.
    NotAUnf {
        /// 1-based input line.
        line: usize,
        /// The offending input.
        input: String,
    },
    /// A numeric line was only partially parsed (or overflowed); the partial
    /// value was digested.
    UnparsedNumeric {
        /// 1-based input line.
        line: usize,
        /// The offending input.
        text: String,
    },
    /// A composite input was computed with different parameters than the
    /// first input.
    MixedComposite {
        /// 1-based input line.
        line: usize,
        /// The disagreeing descriptor.
        input: String,
    },
    /// More composite inputs than the limit; the remainder was dropped.
    CompositeLimitExceeded {
        /// Number of inputs kept.
        limit: usize,
    },
    /// An input line was longer than the reader accepts and was cut.
    LineTruncated {
        /// 1-based input line.
        line: usize,
        /// Bytes kept.
        limit: usize,
    },
}

impl Diagnostic {
    /// Stable warning code.
    pub fn code(&self) -> &'static str {
        match self {
            Diagnostic::ParameterCorrected { .. } => "parameter_corrected",
            Diagnostic::ParameterIgnored { .. } => "parameter_ignored",
            Diagnostic::NotAUnf { .. } => "not_a_unf",
            Diagnostic::UnparsedNumeric { .. } => "unparsed_numeric",
            Diagnostic::MixedComposite { .. } => "mixed_composite",
            Diagnostic::CompositeLimitExceeded { .. } => "composite_limit_exceeded",
            Diagnostic::LineTruncated { .. } => "line_truncated",
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::ParameterCorrected {
                field,
                value,
                replacement,
            } => write!(f, "invalid {} {}, using {}", field, value, replacement),
            Diagnostic::ParameterIgnored { field } => {
                write!(f, "{} does not apply here and was ignored", field)
            }
            Diagnostic::NotAUnf { line, input } => {
                write!(f, "line {}: not a UNF, skipped: {:?}", line, input)
            }
            Diagnostic::UnparsedNumeric { line, text } => {
                write!(f, "line {}: could not fully parse {:?} as a number", line, text)
            }
            Diagnostic::MixedComposite { line, input } => write!(
                f,
                "line {}: {} was computed with different parameters than the first input",
                line, input
            ),
            Diagnostic::CompositeLimitExceeded { limit } => write!(
                f,
                "too many composite inputs, only the first {} were used",
                limit
            ),
            Diagnostic::LineTruncated { line, limit } => {
                write!(f, "line {}: truncated to {} bytes", line, limit)
            }
        }
    }
}

/// Diagnostics collected during one computation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FingerprintReport {
    /// Warnings in the order they were raised.
    pub warnings: Vec<Diagnostic>,
}

impl FingerprintReport {
    /// Creates an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Logs `diagnostic` and records it.
    pub fn warn(&mut self, diagnostic: Diagnostic) {
        tracing::warn!(code = diagnostic.code(), "{}", diagnostic);
        self.warnings.push(diagnostic);
    }

    /// True when nothing was reported.
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Appends another report's warnings without logging them again.
    pub fn extend(&mut self, other: FingerprintReport) {
        self.warnings.extend(other.warnings);
    }

    /// Whether any warning carries `code`.
    pub fn has(&self, code: &str) -> bool {
        self.warnings.iter().any(|w| w.code() == code)
    }
}
