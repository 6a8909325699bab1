//! Line-oriented table input.
//!
//! A table file is a separator-delimited text file read once into memory;
//! matchers iterate its rows as often as they need without rewinding the
//! underlying stream.

pub mod column;
pub mod file;

pub use column::extract_field;
pub use file::TableFile;
