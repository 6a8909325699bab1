//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::cli::args::{BiodiffArgs, OutputFormat};
use crate::error::Result;
use crate::partition::PartitionCounts;

/// Summary of one comparison run.
#[derive(Debug, Serialize, Deserialize)]
pub struct CompareReport {
    pub mode: String,
    pub file_a: String,
    pub file_b: String,
    pub rows_a: usize,
    pub rows_b: usize,
    pub counts: PartitionCounts,
    pub duration_ms: u64,
}

/// Output a comparison report in the selected format.
pub fn output_report(report: &CompareReport, args: &BiodiffArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_human(report, args),
        OutputFormat::Json => output_json(report, args),
    }
}

/// Output in human-readable format.
fn output_human(report: &CompareReport, args: &BiodiffArgs) -> Result<()> {
    if args.verbosity() == 0 {
        return Ok(());
    }

    println!(
        "{} rows in {}, {} rows in {}",
        report.rows_a, report.file_a, report.rows_b, report.file_b
    );
    println!("  A&B_A: {} rows", report.counts.matched_from_a);
    println!("  A&B_B: {} rows", report.counts.matched_from_b);
    println!("  A-B:   {} rows", report.counts.only_a);
    println!("  B-A:   {} rows", report.counts.only_b);
    println!("Completed in {} ms", report.duration_ms);
    Ok(())
}

/// Output as JSON.
fn output_json(report: &CompareReport, args: &BiodiffArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(report)?
    } else {
        serde_json::to_string(report)?
    };
    println!("{json}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_serialization() {
        let report = CompareReport {
            mode: "coord-overlap".to_string(),
            file_a: "fileA".to_string(),
            file_b: "fileB".to_string(),
            rows_a: 3,
            rows_b: 2,
            counts: PartitionCounts {
                matched_from_a: 2,
                matched_from_b: 1,
                only_a: 1,
                only_b: 1,
            },
            duration_ms: 5,
        };

        let json = serde_json::to_string(&report).unwrap();
        let parsed: CompareReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.mode, "coord-overlap");
        assert_eq!(parsed.counts.matched_from_a, 2);
        assert_eq!(parsed.rows_a + parsed.rows_b, 5);
    }
}
