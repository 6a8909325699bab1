//! In-memory table files.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::{BiodiffError, Result};

/// A table file read once into an ordered in-memory sequence of rows.
///
/// Rows keep their raw text, line terminator included, so partitions can
/// re-emit them verbatim. A line consisting solely of a line terminator is
/// skipped entirely: it is not counted as a row and is never written to any
/// output. Matchers iterate [`TableFile::rows`] as many times as their
/// protocol requires instead of rewinding the underlying stream.
#[derive(Debug)]
pub struct TableFile {
    path: PathBuf,
    rows: Vec<String>,
}

impl TableFile {
    /// Read a table file into memory.
    ///
    /// A file that cannot be opened yields [`BiodiffError::Open`]; a file
    /// with zero bytes yields [`BiodiffError::EmptyInput`] before anything
    /// is read.
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path)
            .map_err(|e| BiodiffError::open(format!("{}: {e}", path.display())))?;
        if file.metadata()?.len() == 0 {
            return Err(BiodiffError::empty_input(path.display().to_string()));
        }

        let mut reader = BufReader::new(file);
        let mut rows = Vec::new();
        let mut skipped = 0usize;
        loop {
            let mut line = String::new();
            if reader.read_line(&mut line)? == 0 {
                break;
            }
            if is_blank(&line) {
                skipped += 1;
            } else {
                rows.push(line);
            }
        }
        debug!(
            "{}: {} rows ({} blank lines skipped)",
            path.display(),
            rows.len(),
            skipped
        );

        Ok(TableFile { path, rows })
    }

    /// Build a table directly from raw rows, blank lines excluded.
    ///
    /// Rows are kept as given; a terminator on the final row is as optional
    /// here as it is in a file.
    pub fn from_rows(rows: Vec<String>) -> Self {
        let rows = rows.into_iter().filter(|row| !is_blank(row)).collect();
        TableFile {
            path: PathBuf::new(),
            rows,
        }
    }

    /// Get the path this table was read from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the number of non-blank rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Iterate the raw rows in original file order.
    pub fn rows(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|row| row.as_str())
    }
}

/// True for a line with no content before its terminator.
fn is_blank(line: &str) -> bool {
    line.trim_end_matches(['\r', '\n']).is_empty()
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::TempDir;

    use super::*;

    fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_read_preserves_raw_rows() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "a.tsv", "chr1\t10\t20\nchr2\t30\t40\n");

        let table = TableFile::read(&path).unwrap();
        assert_eq!(table.row_count(), 2);
        let rows: Vec<&str> = table.rows().collect();
        assert_eq!(rows, vec!["chr1\t10\t20\n", "chr2\t30\t40\n"]);
    }

    #[test]
    fn test_blank_lines_skipped() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "a.tsv", "chr1\t10\n\n\r\nchr2\t20\n\n");

        let table = TableFile::read(&path).unwrap();
        assert_eq!(table.row_count(), 2);
        let rows: Vec<&str> = table.rows().collect();
        assert_eq!(rows, vec!["chr1\t10\n", "chr2\t20\n"]);
    }

    #[test]
    fn test_missing_final_terminator_kept_verbatim() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "a.tsv", "chr1\t10\nchr2\t20");

        let table = TableFile::read(&path).unwrap();
        let rows: Vec<&str> = table.rows().collect();
        assert_eq!(rows, vec!["chr1\t10\n", "chr2\t20"]);
    }

    #[test]
    fn test_zero_byte_file_is_fatal() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "empty.tsv", "");

        let result = TableFile::read(&path);
        assert!(matches!(result, Err(BiodiffError::EmptyInput(_))));
    }

    #[test]
    fn test_newline_only_file_has_no_rows() {
        // Not zero bytes, so it passes the empty-input guard; it just has
        // nothing to classify.
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "blank.tsv", "\n");

        let table = TableFile::read(&path).unwrap();
        assert_eq!(table.row_count(), 0);
    }

    #[test]
    fn test_unopenable_file() {
        let result = TableFile::read("/no/such/biodiff/input");
        assert!(matches!(result, Err(BiodiffError::Open(_))));
    }

    #[test]
    fn test_from_rows_filters_blanks() {
        let table = TableFile::from_rows(vec![
            "a\t1\n".to_string(),
            "\n".to_string(),
            "b\t2".to_string(),
        ]);
        assert_eq!(table.row_count(), 2);
    }
}
