//! Error types for odds-viz operations.

use std::io;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in odds-viz operations.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error (file operations, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// CSV decoding error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A record set was empty where a schema had to be inferred.
    #[error("Empty input: at least one record is required")]
    EmptyInput,

    /// A numeric field required by the chart layout could not be coerced.
    #[error("Invalid numeric field '{field}' in row {row}: {value:?}")]
    InvalidNumericField {
        /// Zero-based record index.
        row: usize,
        /// Field name.
        field: String,
        /// Raw value as found in the record (empty when missing).
        value: String,
    },

    /// Invalid dimensions for a chart or plot area.
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },

    /// Scale domain error (e.g., degenerate domain, padding out of range).
    #[error("Scale domain error: {0}")]
    ScaleDomain(String),

    /// Color parsing error.
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    /// Configuration file not found or unreadable.
    #[error("Config not found: {0}")]
    ConfigNotFound(String),

    /// Configuration parse error.
    #[error("Config parse error at line {line}: {message}")]
    ConfigParse {
        /// Line number (1-based, 0 when unknown).
        line: usize,
        /// Parser message.
        message: String,
    },
}
