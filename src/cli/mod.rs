//! # Command Line Interface
//!
//! `as3decl` reads an AS3 declaration (or AS3 request envelope) from a file
//! or stdin, decodes it and prints a summary, the virtual server names, the
//! decoded declaration, or the decoder's diagnostics.

pub mod output;

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde_json::Value;
use tracing::debug;

use crate::config::{DecodeConfig, KeyOrder, ObservabilityConfig};
use crate::decode::{Decoded, Decoder};
use crate::domain::Declaration;
use crate::errors::{Error, Result};
use crate::observability::init_logging;

use output::{print_diagnostics_table, print_output_format, OutputFormat};

#[derive(Parser)]
#[command(name = "as3decl")]
#[command(about = "Decode AS3 declarations into typed tenants, applications and services")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Child key order: sorted or document
    #[arg(long, global = true, value_name = "ORDER")]
    pub key_order: Option<KeyOrder>,

    /// Do not report fields that are simply absent
    #[arg(long, global = true)]
    pub no_report_missing: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print a text summary of the declaration
    Summary {
        /// Declaration file, or - for stdin
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Print every virtual server name, one per line
    Names {
        /// Declaration file, or - for stdin
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Print the decoded declaration
    #[command(
        after_help = "EXAMPLES:\n    # Re-emit a declaration as YAML\n    as3decl dump declaration.json --output yaml\n\n    # Decode from stdin\n    cat declaration.json | as3decl dump -"
    )]
    Dump {
        /// Declaration file, or - for stdin
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output format (json or yaml)
        #[arg(short, long, default_value = "json", value_parser = ["json", "yaml"])]
        output: String,
    },

    /// Print the decoder's diagnostics
    #[command(
        after_help = "EXAMPLES:\n    # Fail in CI when anything was skipped or mistyped\n    as3decl check declaration.json --strict\n\n    # Machine-readable diagnostics\n    as3decl --no-report-missing check declaration.json --output json"
    )]
    Check {
        /// Declaration file, or - for stdin
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output format (json or table)
        #[arg(short, long, default_value = "table", value_parser = ["json", "table"])]
        output: String,

        /// Exit with status 1 on type mismatches, skipped entries or malformed containers
        #[arg(long)]
        strict: bool,
    },
}

/// Run CLI commands
pub fn run_cli() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    initialise_logging(cli.verbose)?;

    let mut config = DecodeConfig::from_env().context("Invalid decoder configuration")?;
    if let Some(key_order) = cli.key_order {
        config.key_order = key_order;
    }
    if cli.no_report_missing {
        config.report_missing = false;
    }
    let decoder = Decoder::new(config);

    match cli.command {
        Commands::Summary { file } => {
            let decoded = decode_file(&decoder, &file)?;
            print!("{}", decoded.value.summary());
        }
        Commands::Names { file } => {
            let decoded = decode_file(&decoder, &file)?;
            for name in decoded.value.virtual_server_names() {
                println!("{}", name);
            }
        }
        Commands::Dump { file, output } => {
            let decoded = decode_file(&decoder, &file)?;
            print_output_format(&decoded.value, output.parse::<OutputFormat>()?)?;
        }
        Commands::Check { file, output, strict } => {
            let decoded = decode_file(&decoder, &file)?;
            match output.parse::<OutputFormat>()? {
                OutputFormat::Table => print_diagnostics_table(&decoded.diagnostics),
                format => print_output_format(&decoded.diagnostics, format)?,
            }
            if strict && decoded.diagnostics.has_mismatches() {
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn initialise_logging(verbose: bool) -> anyhow::Result<()> {
    let mut config = ObservabilityConfig::from_env().context("Invalid logging configuration")?;
    if verbose {
        config.log_level = "debug".to_string();
    }
    // Already installed elsewhere (e.g. integration tests); ignore.
    let _ = init_logging(&config);
    Ok(())
}

fn decode_file(decoder: &Decoder, path: &Path) -> anyhow::Result<Decoded<Declaration>> {
    let document = read_document(path)
        .with_context(|| format!("Failed to load declaration from {}", path.display()))?;
    let decoded = decoder.decode_document(&document);
    debug!(
        file = %path.display(),
        diagnostics = decoded.diagnostics.len(),
        "Decoded declaration file"
    );
    Ok(decoded)
}

/// Read and parse a JSON document; `-` reads stdin
pub fn read_document(path: &Path) -> Result<Value> {
    let text = if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .map_err(|e| Error::io(e, "Failed to read stdin"))?;
        text
    } else {
        std::fs::read_to_string(path)
            .map_err(|e| Error::io(e, format!("Failed to read {}", path.display())))?
    };

    serde_json::from_str(&text).map_err(|e| Error::serialization(e, "Invalid JSON document"))
}
