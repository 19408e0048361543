//! Compose command implementation.

use unf_core::{FingerprintConfig, VectorType, VectorValue};

use crate::output;

pub fn run(unfs: Vec<String>, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let values = VectorValue::from_lines(unfs.iter().map(String::as_str));
    let fingerprint = unf_core::fingerprint_vector(
        &FingerprintConfig::default(),
        VectorType::Composite,
        &values,
    )?;

    if json {
        println!("{}", output::format_json(&fingerprint)?);
    } else {
        println!("{}", fingerprint);
    }
    Ok(())
}
