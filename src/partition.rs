//! Partition output streams.
//!
//! Every row of both inputs ends up in exactly one of four append-only
//! partitions. Rows are written verbatim, in original per-source order, as
//! classification proceeds; nothing is buffered beyond the sink's own
//! buffering.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{BiodiffError, Result};

/// One of the four output classifications of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Partition {
    /// Rows of A that matched B ("A∩B as seen from A").
    MatchedFromA,
    /// Rows of B that matched A ("A∩B as seen from B").
    MatchedFromB,
    /// Rows of A with no match in B.
    OnlyA,
    /// Rows of B with no match in A.
    OnlyB,
}

impl Partition {
    /// Get the fixed output file name for this partition.
    pub fn file_name(&self) -> &'static str {
        match self {
            Partition::MatchedFromA => "A&B_A",
            Partition::MatchedFromB => "A&B_B",
            Partition::OnlyA => "A-B",
            Partition::OnlyB => "B-A",
        }
    }
}

/// Rows written to each partition.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionCounts {
    pub matched_from_a: usize,
    pub matched_from_b: usize,
    pub only_a: usize,
    pub only_b: usize,
}

/// Writer over the four partition sinks.
///
/// Generic over the sink type so matchers can be driven against in-memory
/// buffers in tests; production use goes through [`create_in_dir`]
/// (buffered files).
///
/// [`create_in_dir`]: PartitionWriter::create_in_dir
#[derive(Debug)]
pub struct PartitionWriter<W: Write> {
    matched_from_a: W,
    matched_from_b: W,
    only_a: W,
    only_b: W,
    counts: PartitionCounts,
}

impl PartitionWriter<BufWriter<File>> {
    /// Create the four partition files in `dir`, truncating any that exist.
    pub fn create_in_dir<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        let create = |partition: Partition| -> Result<BufWriter<File>> {
            let path = dir.join(partition.file_name());
            let file = File::create(&path)
                .map_err(|e| BiodiffError::create(format!("{}: {e}", path.display())))?;
            Ok(BufWriter::new(file))
        };

        Ok(PartitionWriter::from_sinks(
            create(Partition::MatchedFromA)?,
            create(Partition::MatchedFromB)?,
            create(Partition::OnlyA)?,
            create(Partition::OnlyB)?,
        ))
    }
}

impl<W: Write> PartitionWriter<W> {
    /// Build a writer over caller-supplied sinks.
    pub fn from_sinks(matched_from_a: W, matched_from_b: W, only_a: W, only_b: W) -> Self {
        PartitionWriter {
            matched_from_a,
            matched_from_b,
            only_a,
            only_b,
            counts: PartitionCounts::default(),
        }
    }

    /// Append a raw line to one partition, verbatim.
    pub fn write(&mut self, partition: Partition, raw_line: &str) -> Result<()> {
        let sink = match partition {
            Partition::MatchedFromA => &mut self.matched_from_a,
            Partition::MatchedFromB => &mut self.matched_from_b,
            Partition::OnlyA => &mut self.only_a,
            Partition::OnlyB => &mut self.only_b,
        };
        sink.write_all(raw_line.as_bytes())?;

        let count = match partition {
            Partition::MatchedFromA => &mut self.counts.matched_from_a,
            Partition::MatchedFromB => &mut self.counts.matched_from_b,
            Partition::OnlyA => &mut self.counts.only_a,
            Partition::OnlyB => &mut self.counts.only_b,
        };
        *count += 1;
        Ok(())
    }

    /// Get the rows written so far.
    pub fn counts(&self) -> PartitionCounts {
        self.counts
    }

    /// Flush all four sinks and return the final counts.
    pub fn finish(mut self) -> Result<PartitionCounts> {
        self.matched_from_a.flush()?;
        self.matched_from_b.flush()?;
        self.only_a.flush()?;
        self.only_b.flush()?;
        Ok(self.counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_are_verbatim_and_counted() {
        let mut writer = PartitionWriter::from_sinks(
            Vec::new(),
            Vec::new(),
            Vec::new(),
            Vec::new(),
        );

        writer.write(Partition::MatchedFromA, "chr1\t10\n").unwrap();
        writer.write(Partition::MatchedFromA, "chr2\t20").unwrap();
        writer.write(Partition::OnlyB, "chrX\t5\n").unwrap();

        assert_eq!(writer.counts().matched_from_a, 2);
        assert_eq!(writer.counts().only_b, 1);
        assert_eq!(writer.counts().matched_from_b, 0);
        assert_eq!(writer.matched_from_a, b"chr1\t10\nchr2\t20");
        assert_eq!(writer.only_b, b"chrX\t5\n");
    }

    #[test]
    fn test_file_names() {
        assert_eq!(Partition::MatchedFromA.file_name(), "A&B_A");
        assert_eq!(Partition::MatchedFromB.file_name(), "A&B_B");
        assert_eq!(Partition::OnlyA.file_name(), "A-B");
        assert_eq!(Partition::OnlyB.file_name(), "B-A");
    }

    #[test]
    fn test_create_in_dir_truncates() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("A-B"), "stale contents\n").unwrap();

        let writer = PartitionWriter::create_in_dir(dir.path()).unwrap();
        let counts = writer.finish().unwrap();
        assert_eq!(counts, PartitionCounts::default());

        for name in ["A&B_A", "A&B_B", "A-B", "B-A"] {
            let contents = std::fs::read(dir.path().join(name)).unwrap();
            assert!(contents.is_empty(), "{name} should be truncated");
        }
    }

    #[test]
    fn test_create_in_missing_dir_fails() {
        let result = PartitionWriter::create_in_dir("/no/such/biodiff/outdir");
        assert!(matches!(result, Err(BiodiffError::Create(_))));
    }
}
