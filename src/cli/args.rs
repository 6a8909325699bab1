//! Command line argument parsing for the biodiff CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::error::{BiodiffError, Result};

/// Biodiff - compare two tabular flat files
#[derive(Parser, Debug, Clone)]
#[command(name = "biodiff")]
#[command(about = "Compare two tabular flat files by key equivalence or interval overlap")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct BiodiffArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format for the comparison report
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl BiodiffArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Report output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable summary
    Human,
    /// JSON report
    Json,
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Match rows whose two coordinate columns are byte-identical
    #[command(name = "coord-equal")]
    CoordEqual(CoordModeArgs),

    /// Match rows whose coordinate intervals overlap
    #[command(name = "coord-overlap")]
    CoordOverlap(CoordModeArgs),

    /// Match rows whose name columns are byte-identical
    #[command(name = "name-equal")]
    NameEqual(NameModeArgs),

    /// Match rows whose name column is a prefix of a name in the other file
    #[command(name = "name-overlap")]
    NameOverlap(NameModeArgs),
}

/// Arguments shared by every comparison mode
#[derive(Parser, Debug, Clone)]
pub struct CompareArgs {
    /// First input file (A)
    #[arg(value_name = "FILE_A")]
    pub file_a: PathBuf,

    /// Second input file (B)
    #[arg(value_name = "FILE_B")]
    pub file_b: PathBuf,

    /// Field separator (a single-byte character)
    #[arg(short, long, default_value_t = '\t', hide_default_value = true)]
    pub separator: char,

    /// Directory where the four partition files are created
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,
}

impl CompareArgs {
    /// Get the separator as a byte, rejecting multi-byte characters.
    pub fn separator_byte(&self) -> Result<u8> {
        u8::try_from(self.separator).map_err(|_| {
            BiodiffError::usage(format!(
                "separator must be a single-byte character, got '{}'",
                self.separator
            ))
        })
    }
}

/// Arguments for the name-based modes
#[derive(Parser, Debug, Clone)]
pub struct NameModeArgs {
    /// 1-based name column in file A
    #[arg(short = 'a', long, value_name = "COL")]
    pub col_a: usize,

    /// 1-based name column in file B
    #[arg(short = 'b', long, value_name = "COL")]
    pub col_b: usize,

    #[command(flatten)]
    pub common: CompareArgs,
}

/// Arguments for the coordinate-based modes
#[derive(Parser, Debug, Clone)]
pub struct CoordModeArgs {
    /// 1-based start,end columns in file A
    #[arg(short = 'a', long, value_name = "START,END", value_parser = parse_column_pair)]
    pub cols_a: ColumnPair,

    /// 1-based start,end columns in file B
    #[arg(short = 'b', long, value_name = "START,END", value_parser = parse_column_pair)]
    pub cols_b: ColumnPair,

    #[command(flatten)]
    pub common: CompareArgs,
}

/// A comma-paired start/end column selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnPair {
    pub start: usize,
    pub end: usize,
}

/// Parse a "START,END" column selector.
fn parse_column_pair(value: &str) -> std::result::Result<ColumnPair, String> {
    let (start, end) = value
        .split_once(',')
        .ok_or_else(|| format!("expected START,END column pair, got '{value}'"))?;
    let start: usize = start
        .trim()
        .parse()
        .map_err(|_| format!("invalid start column '{start}'"))?;
    let end: usize = end
        .trim()
        .parse()
        .map_err(|_| format!("invalid end column '{end}'"))?;
    if start == 0 || end == 0 {
        return Err("column indices are 1-based; 0 is not a valid column".to_string());
    }
    Ok(ColumnPair { start, end })
}
