use md5::Md5;
use sha2::{Digest, Sha256};

use unf_canonical::{encode_digest, CanonicalText, CanonicalizationError, Canonicalizer, UnfVersion};

use crate::crc::Crc64;

/// Byte appended after every non-missing value from version 2 on.
pub const VALUE_TERMINATOR: u8 = 0x00;

/// Bytes digested for a missing value from version 2 on.
pub const MISSING_MARKER: [u8; 3] = [0x00, 0x00, 0x00];

/// Bytes digested for a missing value under version 1: `miss` in UTF-32BE.
pub const V1_MISSING_MARKER: [u8; 16] = [
    0, 0, 0, b'm', 0, 0, 0, b'i', 0, 0, 0, b's', 0, 0, 0, b's',
];

/// An incremental digest over canonical bytes.
///
/// Ingestion order is significant; implementations never reorder input.
pub trait FingerprintAlgorithm {
    /// Folds `bytes` into the running state.
    fn ingest(&mut self, bytes: &[u8]);

    /// Consumes the accumulator and returns the raw digest bytes.
    fn finalize(self: Box<Self>) -> Vec<u8>;
}

/// Version 1: wrapping sum of byte values.
#[derive(Debug, Clone, Copy, Default)]
pub struct Checksum {
    sum: u64,
}

impl FingerprintAlgorithm for Checksum {
    fn ingest(&mut self, bytes: &[u8]) {
        self.sum = bytes
            .iter()
            .fold(self.sum, |acc, &b| acc.wrapping_add(u64::from(b)));
    }

    fn finalize(self: Box<Self>) -> Vec<u8> {
        self.sum.to_be_bytes().to_vec()
    }
}

impl FingerprintAlgorithm for Crc64 {
    fn ingest(&mut self, bytes: &[u8]) {
        self.update(bytes);
    }

    fn finalize(self: Box<Self>) -> Vec<u8> {
        self.to_bytes().to_vec()
    }
}

/// Versions 3 and up: a standard message digest.
#[derive(Debug, Clone, Default)]
pub struct Hashing<D> {
    hasher: D,
}

impl<D: Digest> FingerprintAlgorithm for Hashing<D> {
    fn ingest(&mut self, bytes: &[u8]) {
        self.hasher.update(bytes);
    }

    fn finalize(self: Box<Self>) -> Vec<u8> {
        self.hasher.finalize().to_vec()
    }
}

/// Fresh accumulator for `version`.
pub fn algorithm_for(version: UnfVersion) -> Box<dyn FingerprintAlgorithm> {
    match version {
        UnfVersion::V1 => Box::<Checksum>::default(),
        UnfVersion::V2 => Box::new(Crc64::new()),
        UnfVersion::V3 => Box::<Hashing<Md5>>::default(),
        UnfVersion::V4 | UnfVersion::V4_1 => Box::<Hashing<Sha256>>::default(),
    }
}

/// One fingerprint pass: canonicalizes rounded values for a version and
/// feeds them, with that version's framing, into its accumulator.
pub struct Fingerprinter {
    version: UnfVersion,
    canonicalizer: Canonicalizer,
    algorithm: Box<dyn FingerprintAlgorithm>,
    ingested: usize,
}

impl Fingerprinter {
    /// Starts an empty pass.
    pub fn new(version: UnfVersion) -> Self {
        Self {
            version,
            canonicalizer: Canonicalizer::new(version.text_encoding()),
            algorithm: algorithm_for(version),
            ingested: 0,
        }
    }

    /// Version this pass computes.
    pub fn version(&self) -> UnfVersion {
        self.version
    }

    /// Number of values (missing included) ingested so far.
    pub fn ingested(&self) -> usize {
        self.ingested
    }

    /// Digests one present value. Nothing is ingested when the text cannot
    /// be canonicalized.
    pub fn ingest_value(&mut self, text: &CanonicalText) -> Result<(), CanonicalizationError> {
        let mut bytes = self.canonicalizer.canonicalize(text.as_bytes())?;
        if self.version != UnfVersion::V1 {
            bytes.push(VALUE_TERMINATOR);
        }
        self.algorithm.ingest(&bytes);
        self.ingested += 1;
        Ok(())
    }

    /// Digests the missing-value marker.
    pub fn ingest_missing(&mut self) {
        match self.version {
            UnfVersion::V1 => self.algorithm.ingest(&V1_MISSING_MARKER),
            _ => self.algorithm.ingest(&MISSING_MARKER),
        }
        self.ingested += 1;
    }

    /// Raw digest bytes.
    pub fn finish_raw(self) -> Vec<u8> {
        self.algorithm.finalize()
    }

    /// Base64 digest.
    pub fn finish(self) -> String {
        encode_digest(&self.finish_raw())
    }
}

impl std::fmt::Debug for Fingerprinter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fingerprinter")
            .field("version", &self.version)
            .field("ingested", &self.ingested)
            .finish_non_exhaustive()
    }
}
