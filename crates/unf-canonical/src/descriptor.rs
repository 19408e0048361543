use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::numeric::{atof, atoi};
use crate::rounding::ExactDecimal;
use crate::validation::ValidationError;
use crate::version::UnfVersion;

/// Default significant digits for numeric rounding.
pub const DEFAULT_NDIGITS: i32 = 7;

/// Default byte budget for character and composite rounding.
pub const DEFAULT_CDIGITS: i32 = 128;

/// Literal prefix of every UNF string.
pub const UNF_PREFIX: &str = "UNF:";

/// Shortest input accepted as a UNF string.
pub const MIN_UNF_LEN: usize = 30;

/// External representation of a fingerprint:
/// `UNF:<version>[:<ndigits>,<cdigits>]:<base64>`.
///
/// `version` is kept as the real number found in the string so that a
/// descriptor carrying an unsupported version still formats back to what
/// was parsed; [`UnfDescriptor::unf_version`] maps it onto the supported set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnfDescriptor {
    /// Algorithm version number.
    pub version: f64,
    /// Significant digits used for numeric rounding.
    pub ndigits: i32,
    /// Byte budget used for character and composite rounding.
    pub cdigits: i32,
    /// Base64 digest.
    pub digest: String,
}

impl UnfDescriptor {
    /// Builds a descriptor for a computed digest.
    pub fn new(version: UnfVersion, ndigits: i32, cdigits: i32, digest: impl Into<String>) -> Self {
        Self {
            version: version.as_number(),
            ndigits,
            cdigits,
            digest: digest.into(),
        }
    }

    /// Parses a UNF string.
    ///
    /// Follows the historical reader: the string must start with `UNF:` and
    /// be at least 30 bytes long; empty colon-separated fields are skipped;
    /// a digits field without a comma sets both budgets to the same value;
    /// numbers are read leniently.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        if input.len() < MIN_UNF_LEN {
            return Err(not_a_unf("shorter than 30 bytes", input));
        }
        if !input.starts_with(UNF_PREFIX) {
            return Err(not_a_unf("missing UNF: prefix", input));
        }

        let mut fields = input.split(':').filter(|field| !field.is_empty()).skip(1);
        let version = fields
            .next()
            .map(atof)
            .ok_or_else(|| not_a_unf("missing version", input))?;
        let second = fields
            .next()
            .ok_or_else(|| not_a_unf("missing digest", input))?;

        let descriptor = match fields.next() {
            Some(digest) => {
                let (ndigits, cdigits) = match second.rfind(',') {
                    Some(idx) => (atoi(&second[..idx]), atoi(&second[idx + 1..])),
                    None => {
                        let both = atoi(second);
                        (both, both)
                    }
                };
                UnfDescriptor {
                    version,
                    ndigits,
                    cdigits,
                    digest: digest.to_string(),
                }
            }
            None => UnfDescriptor {
                version,
                ndigits: DEFAULT_NDIGITS,
                cdigits: DEFAULT_CDIGITS,
                digest: second.to_string(),
            },
        };
        Ok(descriptor)
    }

    /// Supported version this descriptor was computed with, if any.
    pub fn unf_version(&self) -> Option<UnfVersion> {
        UnfVersion::from_number(self.version)
    }

    /// True when both digit budgets are at their defaults, in which case the
    /// formatted string omits them.
    pub fn has_default_digits(&self) -> bool {
        self.ndigits == DEFAULT_NDIGITS && self.cdigits == DEFAULT_CDIGITS
    }
}

fn not_a_unf(reason: &'static str, input: &str) -> ValidationError {
    ValidationError::NotAUnf {
        reason,
        value: input.to_string(),
    }
}

impl fmt::Display for UnfDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let version = format_general(self.version);
        if self.has_default_digits() {
            write!(f, "{}{}:{}", UNF_PREFIX, version, self.digest)
        } else {
            write!(
                f,
                "{}{}:{},{}:{}",
                UNF_PREFIX, version, self.ndigits, self.cdigits, self.digest
            )
        }
    }
}

impl FromStr for UnfDescriptor {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UnfDescriptor::parse(s)
    }
}

/// `%g` rendering: six significant digits, trailing zeros removed,
/// scientific notation outside `1e-4 <= |x| < 1e6`.
pub fn format_general(value: f64) -> String {
    const PRECISION: usize = 6;

    if value.is_nan() {
        return if value.is_sign_negative() { "-nan" } else { "nan" }.to_string();
    }
    if value.is_infinite() {
        return if value < 0.0 { "-inf" } else { "inf" }.to_string();
    }

    let sig = ExactDecimal::from_f64(value).to_significant(PRECISION);
    let sign = if sig.negative { "-" } else { "" };
    let end = sig
        .mantissa
        .iter()
        .rposition(|&d| d != b'0')
        .map_or(1, |idx| idx + 1);
    let digits = String::from_utf8_lossy(&sig.mantissa[..end]).into_owned();
    let exponent = if sig.mantissa.iter().all(|&d| d == b'0') {
        0
    } else {
        sig.exponent
    };

    if (-4..PRECISION as i64).contains(&exponent) {
        if exponent >= 0 {
            let int_len = exponent as usize + 1;
            if digits.len() <= int_len {
                format!("{}{}{}", sign, digits, "0".repeat(int_len - digits.len()))
            } else {
                format!("{}{}.{}", sign, &digits[..int_len], &digits[int_len..])
            }
        } else {
            let zeros = "0".repeat(exponent.unsigned_abs() as usize - 1);
            format!("{}0.{}{}", sign, zeros, digits)
        }
    } else {
        let (lead, rest) = digits.split_at(1);
        let point = if rest.is_empty() { "" } else { "." };
        let exp_sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}{}{}{}e{}{:02}",
            sign,
            lead,
            point,
            rest,
            exp_sign,
            exponent.unsigned_abs()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn general_format_matches_printf() {
        assert_eq!(format_general(4.1), "4.1");
        assert_eq!(format_general(4.0), "4");
        assert_eq!(format_general(3.0), "3");
        assert_eq!(format_general(0.0), "0");
        assert_eq!(format_general(-0.0), "-0");
        assert_eq!(format_general(0.0001), "0.0001");
        assert_eq!(format_general(0.00001), "1e-05");
        assert_eq!(format_general(123456.0), "123456");
        assert_eq!(format_general(1234567.0), "1.23457e+06");
        assert_eq!(format_general(100000.0), "100000");
        assert_eq!(format_general(1e6), "1e+06");
        assert_eq!(format_general(2.5e-7), "2.5e-07");
        assert_eq!(format_general(999999.5), "1e+06");
    }

    #[test]
    fn comma_less_digits_field_sets_both_budgets() {
        let d = UnfDescriptor::parse("UNF:3:9:ZNQRI14053UZq389QcpA6g==").unwrap();
        assert_eq!(d.ndigits, 9);
        assert_eq!(d.cdigits, 9);
    }
}
