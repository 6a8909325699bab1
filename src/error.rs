//! Error types for the biodiff library.
//!
//! All fatal conditions are represented by the [`BiodiffError`] enum. Data
//! that is merely malformed is deliberately not fatal: out-of-range column
//! indices degrade to empty fields and non-numeric coordinates degrade to
//! zero, so a comparison either fails before any output file exists or runs
//! to completion.
//!
//! # Examples
//!
//! ```
//! use biodiff::error::{BiodiffError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(BiodiffError::usage("column indices are 1-based"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use anyhow;
use thiserror::Error;

/// The main error type for biodiff operations.
#[derive(Error, Debug)]
pub enum BiodiffError {
    /// I/O errors (reading inputs, writing partitions).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Malformed invocation beyond what argument parsing rejects.
    #[error("Usage error: {0}")]
    Usage(String),

    /// An input file cannot be opened for reading.
    #[error("Cannot open input file: {0}")]
    Open(String),

    /// An output file cannot be created.
    #[error("Cannot create output file: {0}")]
    Create(String),

    /// An input file has zero bytes.
    #[error("Empty input file: {0}")]
    EmptyInput(String),

    /// Caller contract violations on column selection.
    #[error("Column error: {0}")]
    Column(String),

    /// JSON serialization errors from report output.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases.
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error.
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with BiodiffError.
pub type Result<T> = std::result::Result<T, BiodiffError>;

impl BiodiffError {
    /// Create a new usage error.
    pub fn usage<S: Into<String>>(msg: S) -> Self {
        BiodiffError::Usage(msg.into())
    }

    /// Create a new open error.
    pub fn open<S: Into<String>>(msg: S) -> Self {
        BiodiffError::Open(msg.into())
    }

    /// Create a new create error.
    pub fn create<S: Into<String>>(msg: S) -> Self {
        BiodiffError::Create(msg.into())
    }

    /// Create a new empty-input error.
    pub fn empty_input<S: Into<String>>(msg: S) -> Self {
        BiodiffError::EmptyInput(msg.into())
    }

    /// Create a new column error.
    pub fn column<S: Into<String>>(msg: S) -> Self {
        BiodiffError::Column(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        BiodiffError::Other(msg.into())
    }
}
