pub mod compose;
pub mod dataset;
pub mod inspect;
pub mod vector;

use unf_canonical::numeric::atof;

/// Reads a version argument leniently; unknown versions are corrected
/// with a warning later, during normalization.
pub fn parse_version(version: &str) -> f64 {
    atof(version)
}
