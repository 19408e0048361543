//! Line-oriented input for Universal Numeric Fingerprints.
//!
//! This crate provides:
//! - A reader that turns text lines into vector values, one per line
//! - Strict and permissive handling of over-long lines
//! - Helpers that read and fingerprint a vector or a dataset column
//!
//! ## Quick Start
//!
//! ```rust
//! use unf_core::{FingerprintConfig, VectorType};
//! use unf_input::{fingerprint_reader, ReadMode};
//!
//! let config = FingerprintConfig::default();
//! let unf = fingerprint_reader(&config, VectorType::Integer, &b"1\n2\n.\n"[..], ReadMode::Strict)?;
//! assert_eq!(unf.to_string(), "UNF:4.1:3sOx0oiDD7c0eff/yV8VRi9hv6YWShjYW684wT+OrRU=");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![deny(missing_docs)]

/// Error types for input operations.
pub mod errors;
/// Vector reader implementation.
pub mod reader;
/// Fingerprinting straight from readers and files.
pub mod source;

pub use errors::InputError;
pub use reader::{ReadMode, VectorReader, MAX_LINE_BYTES};
pub use source::{fingerprint_file, fingerprint_reader, ColumnSpec};
