//! Vector command implementation.

use std::io::{self, BufReader};

use unf_core::{Diagnostic, FingerprintConfig, VectorType};
use unf_input::{fingerprint_reader, ReadMode};

use super::parse_version;
use crate::output;

pub fn run(
    input: Option<String>,
    vector_type: String,
    digits: Option<i32>,
    version: String,
    components: bool,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let vector_type: VectorType = vector_type
        .parse()
        .map_err(|e| format!("Invalid vector type: {}", e))?;

    let mut config = FingerprintConfig {
        version: parse_version(&version),
        ..FingerprintConfig::default()
    };
    let mut ignored = None;
    match digits {
        Some(d) if d > 0 => match vector_type {
            VectorType::Integer | VectorType::Real => config.ndigits = d,
            VectorType::String => config.cdigits = d,
            VectorType::Composite => {
                ignored = Some(Diagnostic::ParameterIgnored {
                    field: "digits".to_string(),
                })
            }
        },
        _ => {}
    }

    let mut fingerprint = match input {
        Some(path) => {
            let file = std::fs::File::open(&path)
                .map_err(|e| format!("Failed to read file {}: {}", path, e))?;
            fingerprint_reader(&config, vector_type, BufReader::new(file), ReadMode::Permissive)?
        }
        None => fingerprint_reader(&config, vector_type, io::stdin().lock(), ReadMode::Permissive)?,
    };
    if let Some(diagnostic) = ignored {
        fingerprint.report.warn(diagnostic);
    }

    if json {
        println!("{}", output::format_json(&fingerprint)?);
        return Ok(());
    }

    if components {
        for component in &fingerprint.components {
            println!("{}", component);
        }
    }
    println!("{}", fingerprint);
    Ok(())
}
