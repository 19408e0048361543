use serde::{Deserialize, Serialize};

use unf_canonical::{Rounder, RoundingError, UnfDescriptor, UnfVersion, DEFAULT_CDIGITS, DEFAULT_NDIGITS};

use crate::report::{Diagnostic, FingerprintReport};

/// Working buffer size of the historical tool chain. Bounds composite input
/// counts and, less a margin, the character budget.
pub const UNF_BUFFER: usize = 32767;

/// Largest accepted `ndigits`.
pub const MAX_NDIGITS: i32 = 15;

/// Largest accepted `cdigits`.
pub const MAX_CDIGITS: i32 = UNF_BUFFER as i32 - 100;

/// Requested fingerprint parameters, as given by a caller.
///
/// Nothing is validated here; [`FingerprintConfig::normalize`] applies the
/// correction rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FingerprintConfig {
    /// Algorithm version number.
    pub version: f64,
    /// Significant digits for numeric values.
    pub ndigits: i32,
    /// Byte budget for character and composite values.
    pub cdigits: i32,
    /// Composite inputs beyond this count are dropped.
    pub max_composite_inputs: usize,
}

impl Default for FingerprintConfig {
    fn default() -> Self {
        Self {
            version: UnfVersion::DEFAULT.as_number(),
            ndigits: DEFAULT_NDIGITS,
            cdigits: DEFAULT_CDIGITS,
            max_composite_inputs: UNF_BUFFER,
        }
    }
}

impl FingerprintConfig {
    /// Configuration for a version with default digit budgets.
    pub fn for_version(version: UnfVersion) -> Self {
        Self {
            version: version.as_number(),
            ..Self::default()
        }
    }

    /// Configuration carrying the parameters a descriptor was computed with.
    pub fn from_descriptor(descriptor: &UnfDescriptor) -> Self {
        Self {
            version: descriptor.version,
            ndigits: descriptor.ndigits,
            cdigits: descriptor.cdigits,
            ..Self::default()
        }
    }

    /// Replaces out-of-range values by their defaults, reporting each
    /// correction.
    pub fn normalize(&self, report: &mut FingerprintReport) -> Parameters {
        let version = match UnfVersion::from_number(self.version) {
            Some(version) => version,
            None => {
                report.warn(corrected("version", self.version, UnfVersion::DEFAULT));
                UnfVersion::DEFAULT
            }
        };
        let ndigits = checked_digits("ndigits", self.ndigits, MAX_NDIGITS, DEFAULT_NDIGITS, report);
        let cdigits = checked_digits("cdigits", self.cdigits, MAX_CDIGITS, DEFAULT_CDIGITS, report);
        Parameters {
            version,
            ndigits,
            cdigits,
        }
    }
}

fn checked_digits(
    field: &str,
    value: i32,
    max: i32,
    default: i32,
    report: &mut FingerprintReport,
) -> usize {
    let accepted = if (1..=max).contains(&value) {
        value
    } else {
        report.warn(corrected(field, value, default));
        default
    };
    accepted.unsigned_abs() as usize
}

fn corrected(field: &str, value: impl ToString, replacement: impl ToString) -> Diagnostic {
    Diagnostic::ParameterCorrected {
        field: field.to_string(),
        value: value.to_string(),
        replacement: replacement.to_string(),
    }
}

/// Validated parameters of one computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameters {
    /// Algorithm version.
    pub version: UnfVersion,
    /// Significant digits for numeric values, 1 to 15.
    pub ndigits: usize,
    /// Byte budget for character and composite values.
    pub cdigits: usize,
}

impl Parameters {
    /// Rounding context for these budgets.
    pub fn rounder(&self) -> Result<Rounder, RoundingError> {
        Rounder::new(self.ndigits, self.cdigits)
    }

    /// Descriptor for a digest computed with these parameters.
    pub fn descriptor(&self, digest: impl Into<String>) -> UnfDescriptor {
        UnfDescriptor::new(
            self.version,
            self.ndigits as i32,
            self.cdigits as i32,
            digest,
        )
    }
}

impl Default for Parameters {
    fn default() -> Self {
        FingerprintConfig::default().normalize(&mut FingerprintReport::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_pass_unchanged() {
        let mut report = FingerprintReport::new();
        let params = FingerprintConfig::default().normalize(&mut report);
        assert!(report.is_clean());
        assert_eq!(params.version, UnfVersion::V4_1);
        assert_eq!(params.ndigits, 7);
        assert_eq!(params.cdigits, 128);
    }

    #[test]
    fn out_of_range_values_fall_back_to_defaults() {
        let config = FingerprintConfig {
            version: 5.0,
            ndigits: 16,
            cdigits: 0,
            ..FingerprintConfig::default()
        };
        let mut report = FingerprintReport::new();
        let params = config.normalize(&mut report);
        assert_eq!(params, Parameters::default());
        assert_eq!(report.warnings.len(), 3);
        assert_eq!(
            report.warnings[0],
            Diagnostic::ParameterCorrected {
                field: "version".into(),
                value: "5".into(),
                replacement: "4.1".into(),
            }
        );
    }

    #[test]
    fn budget_bounds_are_inclusive() {
        let config = FingerprintConfig {
            ndigits: 15,
            cdigits: MAX_CDIGITS,
            ..FingerprintConfig::for_version(UnfVersion::V3)
        };
        let mut report = FingerprintReport::new();
        let params = config.normalize(&mut report);
        assert!(report.is_clean());
        assert_eq!(params.ndigits, 15);
        assert_eq!(params.cdigits, 32667);
        assert_eq!(params.version, UnfVersion::V3);
    }

    #[test]
    fn partial_config_deserializes_over_defaults() {
        let config: FingerprintConfig = serde_json::from_str(r#"{"version":3}"#).unwrap();
        assert_eq!(config.version, 3.0);
        assert_eq!(config.ndigits, 7);
        assert_eq!(config.max_composite_inputs, UNF_BUFFER);
    }
}
