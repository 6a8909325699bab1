//! Column extraction from separator-delimited lines.

use crate::error::{BiodiffError, Result};

/// Extract the `index`th separator-delimited field from `line`.
///
/// Field indices are 1-based. A leading run of separators is skipped, and
/// any run of consecutive separators counts as a single field boundary, not
/// as empty fields between them. Scanning stops at the end of the line or
/// at a line terminator.
///
/// If the line has fewer fields than `index`, the empty field is returned
/// rather than an error; rows too short for their column selection simply
/// contribute empty keys. An index of 0 violates the caller contract and is
/// rejected.
pub fn extract_field<'a>(line: &'a str, separator: u8, index: usize) -> Result<&'a str> {
    if index == 0 {
        return Err(BiodiffError::column(
            "column indices are 1-based; 0 is not a valid column",
        ));
    }

    let bytes = line.as_bytes();
    let mut pos = 0;
    let mut field = 0;

    while pos < bytes.len() && !is_terminator(bytes[pos]) {
        if bytes[pos] == separator {
            pos += 1;
            continue;
        }

        field += 1;
        let start = pos;
        while pos < bytes.len() && bytes[pos] != separator && !is_terminator(bytes[pos]) {
            pos += 1;
        }
        if field == index {
            // The separator is a single ASCII byte, so the slice boundaries
            // always fall on character boundaries.
            return Ok(&line[start..pos]);
        }
    }

    Ok("")
}

fn is_terminator(byte: u8) -> bool {
    byte == b'\n' || byte == b'\r'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_extraction() {
        let line = "chr1\t100\t200\tgene_a";
        assert_eq!(extract_field(line, b'\t', 1).unwrap(), "chr1");
        assert_eq!(extract_field(line, b'\t', 2).unwrap(), "100");
        assert_eq!(extract_field(line, b'\t', 3).unwrap(), "200");
        assert_eq!(extract_field(line, b'\t', 4).unwrap(), "gene_a");
    }

    #[test]
    fn test_separator_runs_collapse() {
        let line = "chr1\t\t\t100\t200";
        assert_eq!(extract_field(line, b'\t', 1).unwrap(), "chr1");
        assert_eq!(extract_field(line, b'\t', 2).unwrap(), "100");
        assert_eq!(extract_field(line, b'\t', 3).unwrap(), "200");
    }

    #[test]
    fn test_leading_separators_skipped() {
        let line = "\t\tchr1\t100";
        assert_eq!(extract_field(line, b'\t', 1).unwrap(), "chr1");
        assert_eq!(extract_field(line, b'\t', 2).unwrap(), "100");
    }

    #[test]
    fn test_out_of_range_index_is_empty() {
        let line = "chr1\t100";
        assert_eq!(extract_field(line, b'\t', 3).unwrap(), "");
        assert_eq!(extract_field(line, b'\t', 99).unwrap(), "");
        assert_eq!(extract_field("", b'\t', 1).unwrap(), "");
    }

    #[test]
    fn test_index_zero_is_an_error() {
        let result = extract_field("chr1\t100", b'\t', 0);
        assert!(matches!(result, Err(BiodiffError::Column(_))));
    }

    #[test]
    fn test_stops_at_line_terminator() {
        assert_eq!(extract_field("chr1\t100\n", b'\t', 2).unwrap(), "100");
        assert_eq!(extract_field("chr1\t100\r\n", b'\t', 2).unwrap(), "100");
        assert_eq!(extract_field("chr1\t100\n", b'\t', 3).unwrap(), "");
    }

    #[test]
    fn test_custom_separator() {
        let line = "3,4";
        assert_eq!(extract_field(line, b',', 1).unwrap(), "3");
        assert_eq!(extract_field(line, b',', 2).unwrap(), "4");
    }
}
