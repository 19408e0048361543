use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use unf_core::{Column, Fingerprint, FingerprintConfig, VectorFingerprinter, VectorType};

use crate::errors::InputError;
use crate::reader::{ReadMode, VectorReader};

/// Reads and fingerprints one vector.
pub fn fingerprint_reader<R: BufRead>(
    config: &FingerprintConfig,
    vector_type: VectorType,
    input: R,
    mode: ReadMode,
) -> Result<Fingerprint, InputError> {
    let mut vector = VectorFingerprinter::new(config, vector_type)?;
    let mut reader = VectorReader::new(input).with_mode(mode);
    while let Some(value) = reader.read_value()? {
        vector.push(&value)?;
    }
    let lines = reader.line();
    vector.report_mut().extend(reader.into_report());
    let fingerprint = vector.finish()?;
    tracing::debug!(lines, unf = %fingerprint, "read vector");
    Ok(fingerprint)
}

/// Reads and fingerprints one vector from a file.
pub fn fingerprint_file<P: AsRef<Path>>(
    config: &FingerprintConfig,
    vector_type: VectorType,
    path: P,
) -> Result<Fingerprint, InputError> {
    let reader = std::io::BufReader::new(std::fs::File::open(path)?);
    fingerprint_reader(config, vector_type, reader, ReadMode::Permissive)
}

/// A `TYPE:PATH` column argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    /// How the file's lines are interpreted.
    pub vector_type: VectorType,
    /// File holding one value per line.
    pub path: PathBuf,
}

impl ColumnSpec {
    /// Reads the column's values. Diagnostics raised while reading, such
    /// as truncated lines, are kept on the column.
    pub fn read(&self) -> Result<Column, InputError> {
        let mut reader = VectorReader::open(&self.path)?;
        let mut values = Vec::new();
        while let Some(value) = reader.read_value()? {
            values.push(value);
        }
        let mut column = Column::new(self.path.display().to_string(), self.vector_type, values);
        column.report = reader.into_report();
        Ok(column)
    }
}

impl FromStr for ColumnSpec {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, path) = s
            .split_once(':')
            .ok_or_else(|| InputError::InvalidColumn(s.to_string()))?;
        let vector_type = kind
            .parse::<VectorType>()
            .map_err(|_| InputError::InvalidColumn(s.to_string()))?;
        if path.is_empty() {
            return Err(InputError::InvalidColumn(s.to_string()));
        }
        Ok(Self {
            vector_type,
            path: PathBuf::from(path),
        })
    }
}
