use thiserror::Error;

/// Validation errors for canonical primitives.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// When a value does not match the required pattern.
    #[error("{field} ('{value}') is not allowed")]
    PatternMismatch {
        /// Field name that failed validation.
        field: &'static str,
        /// Offending value.
        value: String,
    },
    /// When a string is not a UNF descriptor.
    #[error("not a UNF ({reason}): {value}")]
    NotAUnf {
        /// Which structural check failed.
        reason: &'static str,
        /// Offending input.
        value: String,
    },
}
