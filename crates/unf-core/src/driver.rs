use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use unf_canonical::numeric::{parse_integer_prefix, parse_real_prefix};
use unf_canonical::{Rounder, UnfDescriptor, ValidationError, Value};

use crate::algorithm::Fingerprinter;
use crate::composite::CompositeAssembler;
use crate::config::{FingerprintConfig, Parameters};
use crate::errors::FingerprintError;
use crate::report::{Diagnostic, FingerprintReport};

/// Kind of data held by one vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VectorType {
    /// Character data.
    String,
    /// Integer data.
    Integer,
    /// Real data.
    Real,
    /// One UNF string per value, combined into a composite.
    #[serde(rename = "unf")]
    Composite,
}

impl VectorType {
    /// True for the types whose values are parsed as numbers.
    pub fn is_numeric(self) -> bool {
        matches!(self, VectorType::Integer | VectorType::Real)
    }
}

impl fmt::Display for VectorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            VectorType::String => "character",
            VectorType::Integer => "integer",
            VectorType::Real => "real",
            VectorType::Composite => "unf",
        };
        f.write_str(name)
    }
}

impl FromStr for VectorType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "c" | "character" | "string" => Ok(VectorType::String),
            "i" | "integer" => Ok(VectorType::Integer),
            "r" | "f" | "real" => Ok(VectorType::Real),
            "u" | "unf" => Ok(VectorType::Composite),
            _ => Err(ValidationError::PatternMismatch {
                field: "vector type",
                value: s.to_string(),
            }),
        }
    }
}

/// One input value as read from a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VectorValue {
    /// Raw text of the value, without the line terminator.
    pub text: Vec<u8>,
    /// Whether the value is flagged missing.
    pub missing: bool,
    /// 1-based line number.
    pub line: usize,
}

impl VectorValue {
    /// A present value.
    pub fn present(line: usize, text: impl Into<Vec<u8>>) -> Self {
        Self {
            text: text.into(),
            missing: false,
            line,
        }
    }

    /// A missing value.
    pub fn missing(line: usize) -> Self {
        Self {
            text: Vec::new(),
            missing: true,
            line,
        }
    }

    /// Builds a vector from text lines, with the empty-line convention for
    /// missing values.
    pub fn from_lines<'a, I>(lines: I) -> Vec<VectorValue>
    where
        I: IntoIterator<Item = &'a str>,
    {
        lines
            .into_iter()
            .enumerate()
            .map(|(idx, text)| {
                if text.is_empty() {
                    VectorValue::missing(idx + 1)
                } else {
                    VectorValue::present(idx + 1, text)
                }
            })
            .collect()
    }
}

/// Result of a vector computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fingerprint {
    /// The fingerprint.
    pub descriptor: UnfDescriptor,
    /// For composite vectors, the accepted inputs in input order.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub components: Vec<UnfDescriptor>,
    /// Recoverable anomalies met on the way.
    pub report: FingerprintReport,
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.descriptor, f)
    }
}

enum State {
    Values {
        rounder: Rounder,
        pass: Fingerprinter,
    },
    Composite(CompositeAssembler),
}

/// Incremental fingerprint of one vector.
pub struct VectorFingerprinter {
    vector_type: VectorType,
    parameters: Parameters,
    state: State,
    report: FingerprintReport,
}

impl VectorFingerprinter {
    /// Validates `config` and starts an empty vector.
    pub fn new(config: &FingerprintConfig, vector_type: VectorType) -> Result<Self, FingerprintError> {
        let mut report = FingerprintReport::new();
        let parameters = config.normalize(&mut report);
        let mut vector =
            Self::with_parameters(parameters, config.max_composite_inputs, vector_type)?;
        vector.report = report;
        Ok(vector)
    }

    /// Starts an empty vector from parameters that were already corrected.
    /// `max_composite_inputs` only matters for composite vectors.
    pub fn with_parameters(
        parameters: Parameters,
        max_composite_inputs: usize,
        vector_type: VectorType,
    ) -> Result<Self, FingerprintError> {
        let state = match vector_type {
            VectorType::Composite => State::Composite(CompositeAssembler::new(max_composite_inputs)),
            _ => State::Values {
                rounder: parameters.rounder()?,
                pass: Fingerprinter::new(parameters.version),
            },
        };
        tracing::debug!(
            vector_type = %vector_type,
            version = %parameters.version,
            ndigits = parameters.ndigits,
            cdigits = parameters.cdigits,
            "starting vector"
        );
        Ok(Self {
            vector_type,
            parameters,
            state,
            report: FingerprintReport::new(),
        })
    }

    /// Parameters in effect after correction.
    pub fn parameters(&self) -> Parameters {
        self.parameters
    }

    /// Diagnostics so far.
    pub fn report(&self) -> &FingerprintReport {
        &self.report
    }

    /// Mutable access for callers that add their own diagnostics, such as
    /// input readers.
    pub fn report_mut(&mut self) -> &mut FingerprintReport {
        &mut self.report
    }

    /// Adds the next value.
    pub fn push(&mut self, value: &VectorValue) -> Result<(), FingerprintError> {
        match &mut self.state {
            State::Composite(assembler) => {
                if !value.missing {
                    let input = String::from_utf8_lossy(&value.text);
                    assembler.push_line(value.line, &input, &mut self.report);
                }
                Ok(())
            }
            State::Values { rounder, pass } => {
                let missing = value.missing
                    || (self.vector_type.is_numeric() && value.text.as_slice() == b".");
                if missing {
                    pass.ingest_missing();
                    return Ok(());
                }
                let text = match self.vector_type {
                    VectorType::Integer => {
                        let parsed = parse_integer_prefix(&value.text);
                        if !parsed.is_complete(&value.text) {
                            self.report.warn(unparsed(value));
                        }
                        rounder.round(Value::Int(parsed.value))
                    }
                    VectorType::Real => {
                        let parsed = parse_real_prefix(&value.text);
                        if !parsed.is_complete(&value.text) {
                            self.report.warn(unparsed(value));
                        }
                        rounder.round(Value::Real(parsed.value))
                    }
                    _ => rounder.round(Value::Str(&value.text)),
                };
                pass.ingest_value(&text)
                    .map_err(|source| FingerprintError::Canonicalization {
                        line: value.line,
                        source,
                    })
            }
        }
    }

    /// Finalizes the vector.
    pub fn finish(self) -> Result<Fingerprint, FingerprintError> {
        let (descriptor, components) = match self.state {
            State::Values { pass, .. } => (self.parameters.descriptor(pass.finish()), Vec::new()),
            State::Composite(assembler) => {
                let components = assembler.components().to_vec();
                (assembler.finish(self.parameters)?, components)
            }
        };
        tracing::debug!(unf = %descriptor, warnings = self.report.warnings.len(), "finished vector");
        Ok(Fingerprint {
            descriptor,
            components,
            report: self.report,
        })
    }
}

fn unparsed(value: &VectorValue) -> Diagnostic {
    Diagnostic::UnparsedNumeric {
        line: value.line,
        text: String::from_utf8_lossy(&value.text).into_owned(),
    }
}

/// Fingerprints a whole vector.
pub fn fingerprint_vector<'a, I>(
    config: &FingerprintConfig,
    vector_type: VectorType,
    values: I,
) -> Result<Fingerprint, FingerprintError>
where
    I: IntoIterator<Item = &'a VectorValue>,
{
    let mut vector = VectorFingerprinter::new(config, vector_type)?;
    for value in values {
        vector.push(value)?;
    }
    vector.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_names() {
        assert_eq!("character".parse::<VectorType>().unwrap(), VectorType::String);
        assert_eq!("I".parse::<VectorType>().unwrap(), VectorType::Integer);
        assert_eq!("f".parse::<VectorType>().unwrap(), VectorType::Real);
        assert_eq!("unf".parse::<VectorType>().unwrap(), VectorType::Composite);
        assert!("x".parse::<VectorType>().is_err());
        assert_eq!(VectorType::Composite.to_string(), "unf");
    }

    #[test]
    fn empty_lines_are_missing() {
        let values = VectorValue::from_lines(["1", "", "3"]);
        assert!(!values[0].missing);
        assert!(values[1].missing);
        assert_eq!(values[2].line, 3);
    }

    #[test]
    fn dot_is_missing_only_for_numbers() {
        let dot = [VectorValue::present(1, ".")];
        let flagged = [VectorValue::missing(1)];
        let config = FingerprintConfig::default();

        let numeric = fingerprint_vector(&config, VectorType::Real, &dot).unwrap();
        let missing = fingerprint_vector(&config, VectorType::Real, &flagged).unwrap();
        assert_eq!(numeric.descriptor, missing.descriptor);
        assert!(numeric.report.is_clean());

        let text = fingerprint_vector(&config, VectorType::String, &dot).unwrap();
        assert_ne!(text.descriptor, missing.descriptor);
    }

    #[test]
    fn partial_numbers_warn_and_still_digest() {
        let config = FingerprintConfig::default();
        let junk = fingerprint_vector(&config, VectorType::Integer, &[VectorValue::present(1, "12abc")]).unwrap();
        let clean = fingerprint_vector(&config, VectorType::Integer, &[VectorValue::present(1, "12")]).unwrap();
        assert_eq!(junk.descriptor, clean.descriptor);
        assert_eq!(
            junk.report.warnings,
            vec![Diagnostic::UnparsedNumeric {
                line: 1,
                text: "12abc".into()
            }]
        );
    }
}
