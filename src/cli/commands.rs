//! Command implementations for the biodiff CLI.

use std::fs::File;
use std::io::BufWriter;
use std::time::Instant;

use log::info;

use crate::cli::args::*;
use crate::cli::output::*;
use crate::error::{BiodiffError, Result};
use crate::matcher::{EquivalenceMatcher, KeySpec, OverlapMatcher};
use crate::partition::PartitionWriter;
use crate::table::file::TableFile;
use crate::trie::MatchMode;

/// Execute a CLI command.
pub fn execute_command(args: BiodiffArgs) -> Result<()> {
    match &args.command {
        Command::CoordEqual(mode_args) => coord_equal(mode_args.clone(), &args),
        Command::CoordOverlap(mode_args) => coord_overlap(mode_args.clone(), &args),
        Command::NameEqual(mode_args) => name_equal(mode_args.clone(), &args),
        Command::NameOverlap(mode_args) => name_overlap(mode_args.clone(), &args),
    }
}

/// Compare on composite coordinate keys, exact equality.
fn coord_equal(args: CoordModeArgs, cli_args: &BiodiffArgs) -> Result<()> {
    let separator = args.common.separator_byte()?;
    let key_a = KeySpec::Composite(args.cols_a.start, args.cols_a.end);
    let key_b = KeySpec::Composite(args.cols_b.start, args.cols_b.end);
    run_compare(
        &args.common,
        cli_args,
        "coord-equal",
        |file_a, file_b, out| {
            EquivalenceMatcher::new(MatchMode::Exact, separator)
                .run(file_a, key_a, file_b, key_b, out)
        },
    )
}

/// Compare on coordinate interval overlap.
fn coord_overlap(args: CoordModeArgs, cli_args: &BiodiffArgs) -> Result<()> {
    let separator = args.common.separator_byte()?;
    let cols_a = (args.cols_a.start, args.cols_a.end);
    let cols_b = (args.cols_b.start, args.cols_b.end);
    run_compare(
        &args.common,
        cli_args,
        "coord-overlap",
        |file_a, file_b, out| OverlapMatcher::new(separator).run(file_a, cols_a, file_b, cols_b, out),
    )
}

/// Compare on single name columns, exact equality.
fn name_equal(args: NameModeArgs, cli_args: &BiodiffArgs) -> Result<()> {
    name_mode(args, cli_args, MatchMode::Exact, "name-equal")
}

/// Compare on single name columns, prefix overlap.
fn name_overlap(args: NameModeArgs, cli_args: &BiodiffArgs) -> Result<()> {
    name_mode(args, cli_args, MatchMode::Prefix, "name-overlap")
}

fn name_mode(
    args: NameModeArgs,
    cli_args: &BiodiffArgs,
    mode: MatchMode,
    mode_name: &str,
) -> Result<()> {
    if args.col_a == 0 || args.col_b == 0 {
        return Err(BiodiffError::usage(
            "column indices are 1-based; 0 is not a valid column",
        ));
    }
    let separator = args.common.separator_byte()?;
    let key_a = KeySpec::Column(args.col_a);
    let key_b = KeySpec::Column(args.col_b);
    run_compare(&args.common, cli_args, mode_name, |file_a, file_b, out| {
        EquivalenceMatcher::new(mode, separator).run(file_a, key_a, file_b, key_b, out)
    })
}

/// Shared driver: read both inputs, create the partition files, run the
/// matcher, report.
///
/// Both inputs are read (and the empty-file guard fired) before any output
/// file is created, so a fatal condition never leaves partial outputs
/// behind.
fn run_compare<F>(
    common: &CompareArgs,
    cli_args: &BiodiffArgs,
    mode_name: &str,
    matcher: F,
) -> Result<()>
where
    F: FnOnce(&TableFile, &TableFile, &mut PartitionWriter<BufWriter<File>>) -> Result<()>,
{
    if cli_args.verbosity() > 1 {
        println!(
            "Comparing {} and {} ({mode_name})",
            common.file_a.display(),
            common.file_b.display()
        );
    }

    let start_time = Instant::now();

    let file_a = TableFile::read(&common.file_a)?;
    let file_b = TableFile::read(&common.file_b)?;
    info!(
        "read {} rows from A, {} rows from B",
        file_a.row_count(),
        file_b.row_count()
    );

    let mut writer = PartitionWriter::create_in_dir(&common.output_dir)?;
    matcher(&file_a, &file_b, &mut writer)?;
    let counts = writer.finish()?;

    let report = CompareReport {
        mode: mode_name.to_string(),
        file_a: common.file_a.display().to_string(),
        file_b: common.file_b.display().to_string(),
        rows_a: file_a.row_count(),
        rows_b: file_b.row_count(),
        counts,
        duration_ms: start_time.elapsed().as_millis() as u64,
    };
    output_report(&report, cli_args)
}
