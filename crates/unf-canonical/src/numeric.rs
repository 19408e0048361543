//! Lenient numeric prefix parsing.
//!
//! Input vectors are text, and numeric columns are read with C library
//! conventions: leading whitespace is skipped, the longest numeric prefix is
//! taken, and whatever follows is left unconsumed. Callers decide whether an
//! incomplete parse deserves a diagnostic; the partial value is still used.

use regex::bytes::Regex;
use std::sync::OnceLock;

/// Result of a prefix parse.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericPrefix<T> {
    /// Parsed value (zero when nothing could be parsed).
    pub value: T,
    /// Number of input bytes consumed, including skipped whitespace.
    /// Zero when no number was found.
    pub consumed: usize,
    /// The literal was numeric but outside the representable range.
    pub out_of_range: bool,
}

impl<T> NumericPrefix<T> {
    /// True when the whole input was consumed and the value is in range.
    pub fn is_complete(&self, input: &[u8]) -> bool {
        self.consumed == input.len() && !self.out_of_range
    }
}

fn integer_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[ \t\n\x0B\x0C\r]*([+-]?)([0-9]+)").expect("invalid regex")
    })
}

fn real_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"(?i)^[ \t\n\x0B\x0C\r]*([+-]?)(infinity|inf|nan|(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:e[+-]?[0-9]+)?)",
        )
        .expect("invalid regex")
    })
}

/// Parses a base-10 integer prefix (`strtol` conventions). Overflow
/// saturates to the `i64` bounds and sets `out_of_range`.
pub fn parse_integer_prefix(input: &[u8]) -> NumericPrefix<i64> {
    let Some(caps) = integer_pattern().captures(input) else {
        return NumericPrefix {
            value: 0,
            consumed: 0,
            out_of_range: false,
        };
    };
    let negative = &caps[1] == b"-";
    let consumed = caps.get(0).map_or(0, |m| m.end());

    let limit = i128::from(i64::MAX) + 1;
    let mut magnitude: i128 = 0;
    let mut saturated = false;
    for &d in &caps[2] {
        magnitude = magnitude * 10 + i128::from(d - b'0');
        if magnitude > limit {
            saturated = true;
            break;
        }
    }

    let signed = if negative { -magnitude } else { magnitude };
    let value = signed.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64;
    let out_of_range = saturated || i128::from(value) != signed;

    NumericPrefix {
        value,
        consumed,
        out_of_range,
    }
}

/// Parses a decimal floating point prefix (`strtod` conventions, without
/// hexadecimal literals). The conversion is correctly rounded.
pub fn parse_real_prefix(input: &[u8]) -> NumericPrefix<f64> {
    let Some(caps) = real_pattern().captures(input) else {
        return NumericPrefix {
            value: 0.0,
            consumed: 0,
            out_of_range: false,
        };
    };
    let negative = &caps[1] == b"-";
    let consumed = caps.get(0).map_or(0, |m| m.end());
    let body = String::from_utf8_lossy(&caps[2]).to_ascii_lowercase();

    let (magnitude, literal_special) = match body.as_str() {
        "inf" | "infinity" => (f64::INFINITY, true),
        "nan" => (f64::NAN, true),
        _ => (normalize_decimal(&body).parse::<f64>().unwrap_or(0.0), false),
    };
    let value = if negative { -magnitude } else { magnitude };
    let underflow = value == 0.0 && !mantissa_is_zero(&body);
    let out_of_range = !literal_special && (value.is_infinite() || underflow);

    NumericPrefix {
        value,
        consumed,
        out_of_range,
    }
}

/// True when the mantissa of `body` has no non-zero digit, so a zero result
/// is exact rather than an underflow.
fn mantissa_is_zero(body: &str) -> bool {
    let mantissa = body.split('e').next().unwrap_or("");
    !mantissa.bytes().any(|b| matches!(b, b'1'..=b'9'))
}

/// Rewrites `5.` and `.5` style mantissas into `5.0` and `0.5`.
fn normalize_decimal(body: &str) -> String {
    let (mantissa, exponent) = match body.find('e') {
        Some(idx) => (&body[..idx], &body[idx..]),
        None => (body, ""),
    };
    let mut out = String::with_capacity(body.len() + 2);
    if mantissa.starts_with('.') {
        out.push('0');
    }
    out.push_str(mantissa);
    if mantissa.ends_with('.') {
        out.push('0');
    }
    out.push_str(exponent);
    out
}

/// `atoi`: integer prefix, zero when absent, saturated to `i32`.
pub fn atoi(input: &str) -> i32 {
    let parsed = parse_integer_prefix(input.as_bytes());
    parsed.value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// `atof`: real prefix, zero when absent.
pub fn atof(input: &str) -> f64 {
    parse_real_prefix(input.as_bytes()).value
}
