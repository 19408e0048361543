use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::validation::ValidationError;

/// Encodes raw digest bytes as standard padded base64 (RFC 4648, no wrapping).
pub fn encode_digest(digest: &[u8]) -> String {
    STANDARD.encode(digest)
}

/// Decodes a base64 digest back to raw bytes.
pub fn decode_digest(b64: &str) -> Result<Vec<u8>, ValidationError> {
    STANDARD
        .decode(b64)
        .map_err(|_| ValidationError::PatternMismatch {
            field: "digest",
            value: b64.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_partial_groups() {
        assert_eq!(encode_digest(b"f"), "Zg==");
        assert_eq!(encode_digest(b"fo"), "Zm8=");
        assert_eq!(encode_digest(b"foo"), "Zm9v");
    }

    #[test]
    fn accumulator_is_big_endian() {
        assert_eq!(encode_digest(&107u64.to_be_bytes()), "AAAAAAAAAGs=");
        assert_eq!(decode_digest("AAAAAAAAAGs=").unwrap(), 107u64.to_be_bytes().to_vec());
    }

    #[test]
    fn rejects_garbage() {
        assert!(decode_digest("not base64!").is_err());
    }
}
