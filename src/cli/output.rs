//! Shared output formatting utilities for CLI commands
//!
//! JSON and YAML go through serde; tables are rendered per data type.

use std::str::FromStr;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::decode::{Diagnostic, DiagnosticKind, Diagnostics};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Yaml,
    Table,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "yaml" => Ok(OutputFormat::Yaml),
            "table" => Ok(OutputFormat::Table),
            _ => anyhow::bail!(
                "Unsupported output format: '{}'. Use 'json', 'yaml', or 'table'.",
                s
            ),
        }
    }
}

/// Print data in the specified OutputFormat
pub fn print_output_format<T: Serialize>(data: &T, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(data),
        OutputFormat::Yaml => print_yaml(data),
        OutputFormat::Table => {
            anyhow::bail!("Table format requires custom implementation per data type")
        }
    }
}

/// Print data as JSON
pub fn print_json<T: Serialize>(data: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(data).context("Failed to serialize to JSON")?;
    println!("{}", json);
    Ok(())
}

/// Print data as YAML
pub fn print_yaml<T: Serialize>(data: &T) -> Result<()> {
    let yaml = serde_yaml::to_string(data).context("Failed to serialize to YAML")?;
    print!("{}", yaml);
    Ok(())
}

/// Truncate string to maximum length (in characters) with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Print a table header
pub fn print_table_header(columns: &[(&str, usize)]) {
    let mut header = String::new();
    for (name, width) in columns {
        header.push_str(&format!("{:<width$} ", name, width = width));
    }
    println!("{}", header.trim());

    let total_width: usize = columns.iter().map(|(_, w)| w + 1).sum();
    println!("{}", "-".repeat(total_width.saturating_sub(1)));
}

const DIAGNOSTIC_COLUMNS: [(&str, usize); 3] = [("Path", 40), ("Kind", 20), ("Detail", 50)];

/// Print diagnostics as a table
pub fn print_diagnostics_table(diagnostics: &Diagnostics) {
    if diagnostics.is_empty() {
        println!("No diagnostics");
        return;
    }

    print_table_header(&DIAGNOSTIC_COLUMNS);
    for diagnostic in diagnostics {
        let path = if diagnostic.path.is_empty() { "/" } else { diagnostic.path.as_str() };
        println!(
            "{:<40} {:<20} {}",
            truncate(path, 38),
            kind_label(diagnostic),
            truncate(&diagnostic.message(), 50)
        );
    }
}

fn kind_label(diagnostic: &Diagnostic) -> &'static str {
    match diagnostic.kind {
        DiagnosticKind::UnprojectedField { .. } if diagnostic.is_missing_field() => "missing field",
        DiagnosticKind::UnprojectedField { .. } => "type mismatch",
        DiagnosticKind::UnrecognizedEntry { .. } => "unrecognized entry",
        DiagnosticKind::MalformedContainer { .. } => "malformed",
    }
}
