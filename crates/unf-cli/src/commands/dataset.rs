//! Dataset command implementation.

use unf_core::{fingerprint_dataset, FingerprintConfig};
use unf_input::ColumnSpec;

use super::parse_version;
use crate::output;

pub fn run(
    columns: Vec<String>,
    version: String,
    ndigits: Option<i32>,
    cdigits: Option<i32>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let defaults = FingerprintConfig::default();
    let config = FingerprintConfig {
        version: parse_version(&version),
        ndigits: ndigits.unwrap_or(defaults.ndigits),
        cdigits: cdigits.unwrap_or(defaults.cdigits),
        ..defaults
    };

    let columns = columns
        .iter()
        .map(|arg| arg.parse::<ColumnSpec>()?.read())
        .collect::<Result<Vec<_>, _>>()?;

    let result = fingerprint_dataset(&config, &columns)?;

    if json {
        println!("{}", output::format_json(&result)?);
        return Ok(());
    }

    output::print_table_header();
    for column in &result.columns {
        println!("{}", output::format_table_row(&column.name, &column.descriptor));
    }
    println!("{}", output::format_table_row("(composite)", &result.composite));
    Ok(())
}
