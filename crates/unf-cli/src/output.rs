//! Output formatting utilities.

use serde::Serialize;
use unf_canonical::UnfDescriptor;

/// Formats a result as pretty JSON.
pub fn format_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}

/// Formats a named fingerprint as a table row.
pub fn format_table_row(name: &str, descriptor: &UnfDescriptor) -> String {
    format!("{:<30} {}", truncate(name, 30), descriptor)
}

/// Prints table header.
#[allow(clippy::print_literal)]
pub fn print_table_header() {
    println!("{:<30} {}", "COLUMN", "UNF");
    println!("{}", "-".repeat(80));
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let keep: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", keep)
    }
}
