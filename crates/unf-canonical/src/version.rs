use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::canonicalizer::TextEncoding;
use crate::validation::ValidationError;

/// UNF algorithm generations.
///
/// All five stay computable so that fingerprints published with any of them
/// can be recomputed and compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnfVersion {
    /// Running byte checksum.
    #[serde(rename = "1")]
    V1,
    /// Running CRC-64.
    #[serde(rename = "2")]
    V2,
    /// MD5 over UTF-32BE canonical text.
    #[serde(rename = "3")]
    V3,
    /// SHA-256 over UTF-32BE canonical text.
    #[serde(rename = "4")]
    V4,
    /// SHA-256 over UTF-8 canonical text.
    #[serde(rename = "4.1")]
    V4_1,
}

impl UnfVersion {
    /// Version used when none (or an unsupported one) is requested.
    pub const DEFAULT: UnfVersion = UnfVersion::V4_1;

    /// Every supported version, oldest first.
    pub const ALL: [UnfVersion; 5] = [
        UnfVersion::V1,
        UnfVersion::V2,
        UnfVersion::V3,
        UnfVersion::V4,
        UnfVersion::V4_1,
    ];

    /// Maps the real-valued version number carried by descriptors.
    pub fn from_number(version: f64) -> Option<Self> {
        UnfVersion::ALL
            .into_iter()
            .find(|candidate| candidate.as_number() == version)
    }

    /// Real-valued version number as printed in descriptors.
    pub fn as_number(self) -> f64 {
        match self {
            UnfVersion::V1 => 1.0,
            UnfVersion::V2 => 2.0,
            UnfVersion::V3 => 3.0,
            UnfVersion::V4 => 4.0,
            UnfVersion::V4_1 => 4.1,
        }
    }

    /// Version label (`"1"` .. `"4.1"`).
    pub fn as_str(self) -> &'static str {
        match self {
            UnfVersion::V1 => "1",
            UnfVersion::V2 => "2",
            UnfVersion::V3 => "3",
            UnfVersion::V4 => "4",
            UnfVersion::V4_1 => "4.1",
        }
    }

    /// Encoding the canonical text is transcoded to before digesting.
    pub fn text_encoding(self) -> TextEncoding {
        match self {
            UnfVersion::V4_1 => TextEncoding::Utf8,
            _ => TextEncoding::Utf32Be,
        }
    }

    /// Size of the raw digest in bytes.
    pub fn digest_len(self) -> usize {
        match self {
            UnfVersion::V1 | UnfVersion::V2 => 8,
            UnfVersion::V3 => 16,
            UnfVersion::V4 | UnfVersion::V4_1 => 32,
        }
    }
}

impl Default for UnfVersion {
    fn default() -> Self {
        UnfVersion::DEFAULT
    }
}

impl fmt::Display for UnfVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UnfVersion {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<f64>()
            .ok()
            .and_then(UnfVersion::from_number)
            .ok_or_else(|| ValidationError::PatternMismatch {
                field: "version",
                value: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_round_trip() {
        for version in UnfVersion::ALL {
            assert_eq!(UnfVersion::from_number(version.as_number()), Some(version));
        }
        assert_eq!(UnfVersion::from_number(5.0), None);
        assert_eq!(UnfVersion::from_number(4.01), None);
    }

    #[test]
    fn parses_numeric_spellings() {
        assert_eq!("4.1".parse::<UnfVersion>().unwrap(), UnfVersion::V4_1);
        assert_eq!("4.10".parse::<UnfVersion>().unwrap(), UnfVersion::V4_1);
        assert_eq!("3".parse::<UnfVersion>().unwrap(), UnfVersion::V3);
        assert!("six".parse::<UnfVersion>().is_err());
    }

    #[test]
    fn only_v4_1_is_variable_width() {
        assert_eq!(UnfVersion::V4_1.text_encoding(), TextEncoding::Utf8);
        assert_eq!(UnfVersion::V4.text_encoding(), TextEncoding::Utf32Be);
        assert_eq!(UnfVersion::V1.text_encoding(), TextEncoding::Utf32Be);
    }
}
