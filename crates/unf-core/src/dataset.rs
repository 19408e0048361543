use serde::{Deserialize, Serialize};

use unf_canonical::UnfDescriptor;

use crate::composite::CompositeAssembler;
use crate::config::FingerprintConfig;
use crate::driver::{VectorFingerprinter, VectorType, VectorValue};
use crate::errors::FingerprintError;
use crate::report::FingerprintReport;

/// One typed column of a dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Column label, used only for reporting.
    pub name: String,
    /// How values are interpreted.
    pub vector_type: VectorType,
    /// Values in row order.
    pub values: Vec<VectorValue>,
    /// Diagnostics raised while the values were read.
    pub report: FingerprintReport,
}

impl Column {
    /// A column with a clean read report.
    pub fn new(name: impl Into<String>, vector_type: VectorType, values: Vec<VectorValue>) -> Self {
        Self {
            name: name.into(),
            vector_type,
            values,
            report: FingerprintReport::new(),
        }
    }
}

/// Fingerprint of one column within a dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnFingerprint {
    /// Column label.
    pub name: String,
    /// Column fingerprint.
    pub descriptor: UnfDescriptor,
}

/// Per-column fingerprints and their composite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetFingerprint {
    /// Column fingerprints in column order.
    pub columns: Vec<ColumnFingerprint>,
    /// Composite over all columns, independent of column order.
    pub composite: UnfDescriptor,
    /// Diagnostics from every column and from the composite pass.
    pub report: FingerprintReport,
}

/// Fingerprints every column with shared parameters, then combines them.
///
/// Parameters are corrected once for the whole dataset. Each column's read
/// diagnostics come first in the report, followed by those of its values.
pub fn fingerprint_dataset(
    config: &FingerprintConfig,
    columns: &[Column],
) -> Result<DatasetFingerprint, FingerprintError> {
    let mut report = FingerprintReport::new();
    let parameters = config.normalize(&mut report);
    let mut assembler = CompositeAssembler::new(config.max_composite_inputs);
    let mut fingerprints = Vec::with_capacity(columns.len());

    for (idx, column) in columns.iter().enumerate() {
        let span = tracing::debug_span!("column", name = %column.name);
        let _enter = span.enter();

        report.extend(column.report.clone());
        let mut vector = VectorFingerprinter::with_parameters(
            parameters,
            config.max_composite_inputs,
            column.vector_type,
        )?;
        for value in &column.values {
            vector.push(value)?;
        }
        let fingerprint = vector.finish()?;
        report.extend(fingerprint.report);
        assembler.push(idx + 1, fingerprint.descriptor.clone(), &mut report);
        fingerprints.push(ColumnFingerprint {
            name: column.name.clone(),
            descriptor: fingerprint.descriptor,
        });
    }

    let composite = assembler.finish(parameters)?;
    Ok(DatasetFingerprint {
        columns: fingerprints,
        composite,
        report,
    })
}
