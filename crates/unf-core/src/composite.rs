//! Order-independent combination of fingerprints.
//!
//! Fragments are sorted bytewise and re-digested as character data with
//! the composite's `cdigits` budget. A single input is its own composite.

use unf_canonical::{UnfDescriptor, Value};

use crate::algorithm::Fingerprinter;
use crate::config::{FingerprintConfig, Parameters};
use crate::errors::FingerprintError;
use crate::report::{Diagnostic, FingerprintReport};

/// Collects UNF inputs for one composite fingerprint.
#[derive(Debug, Clone)]
pub struct CompositeAssembler {
    limit: usize,
    parameters: Option<Parameters>,
    first: Option<UnfDescriptor>,
    fragments: Vec<(String, usize)>,
    components: Vec<UnfDescriptor>,
    overflowed: bool,
}

impl CompositeAssembler {
    /// Accepts up to `limit` inputs.
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            parameters: None,
            first: None,
            fragments: Vec::new(),
            components: Vec::new(),
            overflowed: false,
        }
    }

    /// Number of inputs accepted so far.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// True before the first input is accepted.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// True once `limit` inputs were accepted.
    pub fn is_full(&self) -> bool {
        self.components.len() >= self.limit
    }

    /// Parameters fixed by the first input, if any.
    pub fn parameters(&self) -> Option<Parameters> {
        self.parameters
    }

    /// Accepted inputs, in input order.
    pub fn components(&self) -> &[UnfDescriptor] {
        &self.components
    }

    /// Parses and adds one input line. Lines that are not UNF strings are
    /// skipped with a warning.
    pub fn push_line(&mut self, line: usize, input: &str, report: &mut FingerprintReport) {
        match UnfDescriptor::parse(input) {
            Ok(descriptor) => self.push(line, descriptor, report),
            Err(_) => report.warn(Diagnostic::NotAUnf {
                line,
                input: input.to_string(),
            }),
        }
    }

    /// Adds one parsed input.
    pub fn push(&mut self, line: usize, descriptor: UnfDescriptor, report: &mut FingerprintReport) {
        if self.is_full() {
            if !self.overflowed {
                report.warn(Diagnostic::CompositeLimitExceeded { limit: self.limit });
                self.overflowed = true;
            }
            return;
        }

        match &self.first {
            None => {
                self.parameters =
                    Some(FingerprintConfig::from_descriptor(&descriptor).normalize(report));
                self.first = Some(descriptor.clone());
            }
            Some(first) => {
                if !same_parameters(first, &descriptor) {
                    report.warn(Diagnostic::MixedComposite {
                        line,
                        input: descriptor.to_string(),
                    });
                }
            }
        }

        self.fragments.push((descriptor.digest.clone(), line));
        self.components.push(descriptor);
    }

    /// Computes the composite. `fallback` supplies the parameters when no
    /// input was accepted.
    pub fn finish(self, fallback: Parameters) -> Result<UnfDescriptor, FingerprintError> {
        let parameters = self.parameters.unwrap_or(fallback);
        let digest = compose_fragments(parameters, self.fragments)?;
        Ok(parameters.descriptor(digest))
    }
}

fn same_parameters(a: &UnfDescriptor, b: &UnfDescriptor) -> bool {
    a.version == b.version && a.ndigits == b.ndigits && a.cdigits == b.cdigits
}

/// Digest over base64 fragments paired with their input line.
fn compose_fragments(
    parameters: Parameters,
    mut fragments: Vec<(String, usize)>,
) -> Result<String, FingerprintError> {
    if let [(only, _)] = fragments.as_slice() {
        return Ok(only.clone());
    }

    fragments.sort();
    let rounder = parameters.rounder()?;
    let mut pass = Fingerprinter::new(parameters.version);
    for (fragment, line) in &fragments {
        let text = rounder.round(Value::Str(fragment.as_bytes()));
        pass.ingest_value(&text)
            .map_err(|source| FingerprintError::Canonicalization {
                line: *line,
                source,
            })?;
    }
    Ok(pass.finish())
}

/// Composite descriptor of already parsed fingerprints.
///
/// The result does not depend on the order of `descriptors`.
pub fn compose(
    descriptors: &[UnfDescriptor],
    config: &FingerprintConfig,
    report: &mut FingerprintReport,
) -> Result<UnfDescriptor, FingerprintError> {
    let mut assembler = CompositeAssembler::new(config.max_composite_inputs);
    for (idx, descriptor) in descriptors.iter().enumerate() {
        assembler.push(idx + 1, descriptor.clone(), report);
    }
    let fallback = config.normalize(report);
    assembler.finish(fallback)
}
