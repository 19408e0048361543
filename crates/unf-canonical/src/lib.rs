//! Canonical primitives for Universal Numeric Fingerprints.
//!
//! A UNF is `FingerPrint(Canonicalize(Round(value, digits)))` folded over a
//! vector. This crate owns every step that decides which bytes get
//! digested: rounding to canonical text, transcoding that text into a
//! platform-independent byte encoding, base64 output, and the
//! `UNF:<version>[:<ndigits>,<cdigits>]:<base64>` descriptor format.
//! Nothing here reads locale or floating point environment state.
//!
#![deny(missing_docs)]

/// Canonical byte encodings for rounded text.
pub mod canonicalizer;
/// UNF descriptor parsing and formatting.
pub mod descriptor;
/// Base64 encoding of raw digests.
pub mod encoding;
pub mod numeric;
/// Canonical rounding of values to digit budgets.
pub mod rounding;
/// Validation helpers used by canonical types.
pub mod validation;
/// UNF algorithm versions.
pub mod version;

pub use canonicalizer::{CanonicalizationError, Canonicalizer, TextEncoding};
pub use descriptor::{UnfDescriptor, DEFAULT_CDIGITS, DEFAULT_NDIGITS};
pub use encoding::{decode_digest, encode_digest};
pub use rounding::{round_value, CanonicalText, Rounder, RoundingError, Value};
pub use validation::ValidationError;
pub use version::UnfVersion;
