//! Sort-plus-sweep interval overlap classification.

use std::io::Write;

use log::debug;

use crate::error::Result;
use crate::partition::{Partition, PartitionWriter};
use crate::table::column::extract_field;
use crate::table::file::TableFile;

/// A closed interval extracted from one row's coordinate columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RowInterval {
    start: i64,
    end: i64,
}

/// Classifies every row of two files by closed-interval overlap.
///
/// A row is matched when its `[start, end]` interval intersects at least
/// one interval of the other file: two intervals overlap iff
/// `max(start_a, start_b) <= min(end_a, end_b)`.
///
/// Instead of the naive O(N·M) comparison, both interval collections are
/// sorted by (start, end) and swept with a forward-only shared pointer,
/// once driven by each side. A single directed sweep only discovers pairs
/// whose partner starts at or after the driving interval; partners that
/// start earlier lie behind the pointer and are found by the opposite
/// sweep, so both directions are required for completeness.
#[derive(Debug, Clone, Copy)]
pub struct OverlapMatcher {
    separator: u8,
}

impl OverlapMatcher {
    /// Create a matcher for the given field separator.
    pub fn new(separator: u8) -> Self {
        OverlapMatcher { separator }
    }

    /// Classify every row of `file_a` and `file_b` into `out`.
    ///
    /// `cols_a` and `cols_b` name the 1-based (start, end) columns of the
    /// respective file.
    pub fn run<W: Write>(
        &self,
        file_a: &TableFile,
        cols_a: (usize, usize),
        file_b: &TableFile,
        cols_b: (usize, usize),
        out: &mut PartitionWriter<W>,
    ) -> Result<()> {
        let intervals_a = self.extract_intervals(file_a, cols_a)?;
        let intervals_b = self.extract_intervals(file_b, cols_b)?;
        debug!(
            "extracted {} intervals from A, {} from B",
            intervals_a.len(),
            intervals_b.len()
        );

        let order_a = sorted_order(&intervals_a);
        let order_b = sorted_order(&intervals_b);

        let mut overlap_a = vec![false; intervals_a.len()];
        let mut overlap_b = vec![false; intervals_b.len()];
        sweep(
            &intervals_a,
            &order_a,
            &intervals_b,
            &order_b,
            &mut overlap_a,
            &mut overlap_b,
        );
        sweep(
            &intervals_b,
            &order_b,
            &intervals_a,
            &order_a,
            &mut overlap_b,
            &mut overlap_a,
        );

        // Emit in original row order, partitioned by the overlap mark.
        for (row, overlapping) in file_a.rows().zip(&overlap_a) {
            let partition = if *overlapping {
                Partition::MatchedFromA
            } else {
                Partition::OnlyA
            };
            out.write(partition, row)?;
        }
        for (row, overlapping) in file_b.rows().zip(&overlap_b) {
            let partition = if *overlapping {
                Partition::MatchedFromB
            } else {
                Partition::OnlyB
            };
            out.write(partition, row)?;
        }

        Ok(())
    }

    /// Pull the (start, end) coordinates out of every row.
    fn extract_intervals(
        &self,
        file: &TableFile,
        (start_col, end_col): (usize, usize),
    ) -> Result<Vec<RowInterval>> {
        file.rows()
            .map(|row| {
                let start = parse_coordinate(extract_field(row, self.separator, start_col)?);
                let end = parse_coordinate(extract_field(row, self.separator, end_col)?);
                Ok(RowInterval { start, end })
            })
            .collect()
    }
}

/// Parse a coordinate field, permissively.
///
/// Mirrors C `atoi`: leading whitespace is skipped, an optional sign and a
/// maximal run of digits are consumed, and anything else — including a
/// missing or wholly non-numeric field — silently yields 0. Malformed rows
/// therefore degrade to zero-valued coordinates instead of aborting the
/// run.
fn parse_coordinate(field: &str) -> i64 {
    let bytes = field.trim_start().as_bytes();
    let mut pos = 0;
    let mut negative = false;
    if pos < bytes.len() && (bytes[pos] == b'+' || bytes[pos] == b'-') {
        negative = bytes[pos] == b'-';
        pos += 1;
    }

    let mut value: i64 = 0;
    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        value = value
            .saturating_mul(10)
            .saturating_add(i64::from(bytes[pos] - b'0'));
        pos += 1;
    }

    if negative { -value } else { value }
}

/// Build the permutation of row indices ordered by (start, end).
///
/// The comparator closes over the interval collection it sorts; no state
/// outside this call is involved.
fn sorted_order(intervals: &[RowInterval]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..intervals.len()).collect();
    order.sort_unstable_by_key(|&row| (intervals[row].start, intervals[row].end));
    order
}

/// One directed sweep: walk `driving` in sorted order and mark every
/// overlapping pair whose `other` partner starts inside the driving
/// interval.
///
/// The cursor into `other` only moves forward. For each driving interval it
/// advances to the first partner whose start is not less than the driving
/// start, then marks both rows of every partner whose start is still within
/// the driving end. Pairs where the partner starts *before* the driving
/// interval are left for the opposite sweep.
fn sweep(
    driving: &[RowInterval],
    driving_order: &[usize],
    other: &[RowInterval],
    other_order: &[usize],
    driving_overlap: &mut [bool],
    other_overlap: &mut [bool],
) {
    let mut cursor = 0;
    for &drive_row in driving_order {
        let interval = driving[drive_row];
        while cursor < other_order.len() && other[other_order[cursor]].start < interval.start {
            cursor += 1;
        }
        for &other_row in &other_order[cursor..] {
            if other[other_row].start > interval.end {
                break;
            }
            driving_overlap[drive_row] = true;
            other_overlap[other_row] = true;
        }
    }
}
