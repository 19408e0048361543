//! Fingerprint computation for Universal Numeric Fingerprints.
//!
//! This crate provides:
//! - The four accumulator families behind UNF versions 1 to 4.1
//! - Parameter correction and a diagnostics report for recoverable anomalies
//! - Composite assembly of several fingerprints into one
//! - The vector driver that turns typed input lines into a descriptor
//! - Dataset fingerprinting over several typed columns
//!
//! Core invariants:
//! - Ingestion order is significant within a vector, irrelevant in a composite
//! - Missing values digest a fixed marker distinct from any present value
//! - Recoverable anomalies never abort; fatal ones never yield a descriptor
//!
#![deny(missing_docs)]

/// Accumulators and single-pass fingerprinting.
pub mod algorithm;
/// Order-independent composite fingerprints.
pub mod composite;
/// Requested parameters and their correction.
pub mod config;
pub mod crc;
/// Multi-column fingerprints.
pub mod dataset;
/// Typed vector fingerprinting.
pub mod driver;
/// Error types for fingerprint computations.
pub mod errors;
/// Diagnostics for recoverable anomalies.
pub mod report;

pub use algorithm::{algorithm_for, FingerprintAlgorithm, Fingerprinter};
pub use composite::{compose, CompositeAssembler};
pub use config::{FingerprintConfig, Parameters, UNF_BUFFER};
pub use dataset::{fingerprint_dataset, Column, ColumnFingerprint, DatasetFingerprint};
pub use driver::{fingerprint_vector, Fingerprint, VectorFingerprinter, VectorType, VectorValue};
pub use errors::FingerprintError;
pub use report::{Diagnostic, FingerprintReport};
