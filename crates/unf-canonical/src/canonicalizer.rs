use serde::{Deserialize, Serialize};
use std::fmt;

/// Target byte encoding for canonical text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TextEncoding {
    /// Fixed width: four big-endian bytes per character (versions 1 to 4).
    #[serde(rename = "utf-32be")]
    Utf32Be,
    /// Variable width (version 4.1).
    #[serde(rename = "utf-8")]
    Utf8,
}

impl TextEncoding {
    /// Encoded width of one ASCII character in bytes.
    pub fn unit_width(self) -> usize {
        match self {
            TextEncoding::Utf32Be => 4,
            TextEncoding::Utf8 => 1,
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextEncoding::Utf32Be => write!(f, "UTF-32BE"),
            TextEncoding::Utf8 => write!(f, "UTF-8"),
        }
    }
}

/// Error returned when canonical text cannot be transcoded.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CanonicalizationError {
    /// The input held a byte outside the ASCII range.
    #[error("byte 0x{byte:02x} at offset {offset} cannot be converted from ASCII to {target}")]
    Unconvertible {
        /// Offset of the offending byte in the canonical text.
        offset: usize,
        /// The offending byte.
        byte: u8,
        /// Encoding that was requested.
        target: TextEncoding,
    },
}

/// Transcodes rounded ASCII text into the platform-independent byte form
/// that gets digested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Canonicalizer {
    encoding: TextEncoding,
}

impl Canonicalizer {
    /// Creates a canonicalizer for the provided target encoding.
    pub fn new(encoding: TextEncoding) -> Self {
        Self { encoding }
    }

    /// Target encoding of this canonicalizer.
    pub fn encoding(&self) -> TextEncoding {
        self.encoding
    }

    /// Produces the canonical bytes for `text`. The length of the returned
    /// vector is the exact number of bytes to digest.
    pub fn canonicalize(&self, text: &[u8]) -> Result<Vec<u8>, CanonicalizationError> {
        if let Some(offset) = text.iter().position(|b| !b.is_ascii()) {
            return Err(CanonicalizationError::Unconvertible {
                offset,
                byte: text[offset],
                target: self.encoding,
            });
        }

        let bytes = match self.encoding {
            TextEncoding::Utf8 => text.to_vec(),
            TextEncoding::Utf32Be => {
                let mut out = Vec::with_capacity(text.len() * 4);
                for &b in text {
                    out.extend_from_slice(&u32::from(b).to_be_bytes());
                }
                out
            }
        };
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utf32be_widens_each_byte() {
        let bytes = Canonicalizer::new(TextEncoding::Utf32Be)
            .canonicalize(b"+1.e+\n")
            .unwrap();
        assert_eq!(bytes.len(), 6 * TextEncoding::Utf32Be.unit_width());
        assert_eq!(&bytes[..8], &[0, 0, 0, b'+', 0, 0, 0, b'1']);
    }

    #[test]
    fn utf8_is_identity_for_ascii() {
        let bytes = Canonicalizer::new(TextEncoding::Utf8)
            .canonicalize(b"abc\n")
            .unwrap();
        assert_eq!(bytes, b"abc\n".to_vec());
    }

    #[test]
    fn non_ascii_is_rejected_with_offset() {
        let err = Canonicalizer::new(TextEncoding::Utf8)
            .canonicalize("caf\u{e9}\n".as_bytes())
            .unwrap_err();
        assert_eq!(
            err,
            CanonicalizationError::Unconvertible {
                offset: 3,
                byte: 0xc3,
                target: TextEncoding::Utf8,
            }
        );
    }

    #[test]
    fn empty_text_is_empty() {
        let bytes = Canonicalizer::new(TextEncoding::Utf32Be)
            .canonicalize(b"")
            .unwrap();
        assert!(bytes.is_empty());
    }
}
