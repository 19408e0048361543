use num_bigint::BigUint;
use thiserror::Error;

/// A native value in one of the three roundable shapes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value<'a> {
    /// Character data. Rounded by truncation to the digit budget in bytes.
    Str(&'a [u8]),
    /// Integer data. Rounded from its exact decimal digits.
    Int(i64),
    /// Real data. Rounded from the exact decimal expansion of the binary value.
    Real(f64),
}

/// Error returned when a rounding context cannot be built.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RoundingError {
    /// A digit budget of zero leaves no room for the leading digit.
    #[error("{field} must be at least 1")]
    ZeroDigits {
        /// Which budget was zero (`ndigits` or `cdigits`).
        field: &'static str,
    },
}

/// Canonical text of a rounded value, including its trailing newline.
///
/// The bytes are printable ASCII for numeric values. For character data
/// they are the caller's bytes, truncated but never re-encoded.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalText(Vec<u8>);

impl CanonicalText {
    /// Borrows the canonical bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consumes the text, returning the canonical bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }
}

impl AsRef<[u8]> for CanonicalText {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Explicit rounding context.
///
/// Rounding is ties-to-even on the exact decimal value and reads no
/// process-wide floating point or locale state, so results do not depend on
/// what the host thread had configured before the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rounder {
    ndigits: usize,
    cdigits: usize,
}

impl Rounder {
    /// Creates a context with `ndigits` significant digits for numbers and a
    /// `cdigits` byte budget for character data.
    pub fn new(ndigits: usize, cdigits: usize) -> Result<Self, RoundingError> {
        if ndigits == 0 {
            return Err(RoundingError::ZeroDigits { field: "ndigits" });
        }
        if cdigits == 0 {
            return Err(RoundingError::ZeroDigits { field: "cdigits" });
        }
        Ok(Self { ndigits, cdigits })
    }

    /// Significant digits used for numeric values.
    pub fn ndigits(&self) -> usize {
        self.ndigits
    }

    /// Byte budget used for character values.
    pub fn cdigits(&self) -> usize {
        self.cdigits
    }

    /// Renders `value` in canonical form.
    pub fn round(&self, value: Value<'_>) -> CanonicalText {
        match value {
            Value::Str(bytes) => CanonicalText(truncate_bytes(bytes, self.cdigits)),
            Value::Int(n) => CanonicalText(render_scientific(
                &ExactDecimal::from_i64(n).to_significant(self.ndigits),
            )),
            Value::Real(x) => CanonicalText(render_real(x, self.ndigits)),
        }
    }
}

/// Rounds a single value with one digit budget, used for whichever variant
/// `value` is.
pub fn round_value(value: Value<'_>, digits: usize) -> Result<CanonicalText, RoundingError> {
    if digits == 0 {
        return Err(RoundingError::ZeroDigits { field: "digits" });
    }
    Ok(Rounder {
        ndigits: digits,
        cdigits: digits,
    }
    .round(value))
}

/// Keeps at most `limit` bytes, stopping early at an embedded NUL.
///
/// This is a byte cap, not a character cap: a multi-byte sequence may be cut
/// in half, and the canonicalizer then rejects the remainder.
fn truncate_bytes(bytes: &[u8], limit: usize) -> Vec<u8> {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    let take = end.min(limit);
    let mut out = Vec::with_capacity(take + 1);
    out.extend_from_slice(&bytes[..take]);
    out.push(b'\n');
    out
}

fn render_real(x: f64, digits: usize) -> Vec<u8> {
    if x.is_nan() {
        return b"+nan\n".to_vec();
    }
    if x.is_infinite() {
        return if x.is_sign_negative() {
            b"-inf\n".to_vec()
        } else {
            b"+inf\n".to_vec()
        };
    }
    render_scientific(&ExactDecimal::from_f64(x).to_significant(digits))
}

/// `<sign><d>.<fraction without trailing zeros>e<sign><exponent without leading zeros>\n`
fn render_scientific(sig: &Significand) -> Vec<u8> {
    let mut out = Vec::with_capacity(sig.mantissa.len() + 10);
    out.push(if sig.negative { b'-' } else { b'+' });
    out.push(sig.mantissa[0]);
    out.push(b'.');
    let fraction = &sig.mantissa[1..];
    let kept = fraction
        .iter()
        .rposition(|&d| d != b'0')
        .map_or(0, |idx| idx + 1);
    out.extend_from_slice(&fraction[..kept]);
    out.push(b'e');
    out.push(if sig.exponent < 0 { b'-' } else { b'+' });
    if sig.exponent != 0 {
        out.extend_from_slice(sig.exponent.unsigned_abs().to_string().as_bytes());
    }
    out.push(b'\n');
    out
}

/// A finite value written as `digits * 10^scale`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ExactDecimal {
    negative: bool,
    /// ASCII digits without leading zeros; `"0"` for zero.
    digits: Vec<u8>,
    scale: i64,
}

/// A value rounded to a fixed count of significant digits:
/// `0.d1d2...dn * 10^(exponent + 1)`, i.e. `d1.d2...dn * 10^exponent`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Significand {
    pub(crate) negative: bool,
    pub(crate) mantissa: Vec<u8>,
    pub(crate) exponent: i64,
}

impl ExactDecimal {
    pub(crate) fn from_i64(n: i64) -> Self {
        Self {
            negative: n < 0,
            digits: n.unsigned_abs().to_string().into_bytes(),
            scale: 0,
        }
    }

    /// Expands a finite double exactly. The sign bit is kept for zero.
    pub(crate) fn from_f64(x: f64) -> Self {
        let bits = x.to_bits();
        let negative = bits >> 63 == 1;
        let biased = ((bits >> 52) & 0x7ff) as i64;
        let fraction = bits & ((1u64 << 52) - 1);
        let (mantissa, exp2) = if biased == 0 {
            (fraction, -1074)
        } else {
            (fraction | (1u64 << 52), biased - 1075)
        };

        if mantissa == 0 {
            return Self {
                negative,
                digits: b"0".to_vec(),
                scale: 0,
            };
        }

        let (digits, scale) = if exp2 >= 0 {
            let n = BigUint::from(mantissa) << (exp2 as usize);
            (n.to_string(), 0)
        } else {
            // m * 2^-k == m * 5^k * 10^-k
            let k = exp2.unsigned_abs() as u32;
            let n = BigUint::from(mantissa) * BigUint::from(5u32).pow(k);
            (n.to_string(), exp2)
        };

        Self {
            negative,
            digits: digits.into_bytes(),
            scale,
        }
    }

    /// Rounds to `n` significant digits, ties to even.
    pub(crate) fn to_significant(&self, n: usize) -> Significand {
        if self.digits == b"0" {
            return Significand {
                negative: self.negative,
                mantissa: vec![b'0'; n],
                exponent: 0,
            };
        }

        let len = self.digits.len();
        let mut exponent = len as i64 - 1 + self.scale;
        let mantissa = if len <= n {
            let mut mantissa = self.digits.clone();
            mantissa.resize(n, b'0');
            mantissa
        } else {
            let mut mantissa = self.digits[..n].to_vec();
            let rest = &self.digits[n..];
            let round_up = match rest[0] {
                b'6'..=b'9' => true,
                b'5' => rest[1..].iter().any(|&d| d != b'0') || (mantissa[n - 1] - b'0') % 2 == 1,
                _ => false,
            };
            if round_up && increment(&mut mantissa) {
                mantissa.insert(0, b'1');
                mantissa.truncate(n);
                exponent += 1;
            }
            mantissa
        };

        Significand {
            negative: self.negative,
            mantissa,
            exponent,
        }
    }
}

/// Adds one in the last place. Returns `true` when the carry ran off the front.
fn increment(digits: &mut [u8]) -> bool {
    for d in digits.iter_mut().rev() {
        if *d == b'9' {
            *d = b'0';
        } else {
            *d += 1;
            return false;
        }
    }
    true
}
