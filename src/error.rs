//! Error types for flatstore
//!
//! Provides a unified error type for all operations.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using StoreError
pub type Result<T> = std::result::Result<T, StoreError>;

/// Unified error type for flatstore operations
#[derive(Debug, Error)]
pub enum StoreError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // File Layout Errors
    // -------------------------------------------------------------------------
    /// File length (or a byte offset into it) is not aligned to the record size
    #[error("Corrupt file {path:?}: {len} bytes is not a multiple of the {record_size}-byte record size")]
    CorruptFile {
        path: PathBuf,
        len: u64,
        record_size: usize,
    },

    /// A block handed to a decoder has the wrong length
    #[error("Record size mismatch: expected {expected} bytes, got {actual}")]
    RecordSize { expected: usize, actual: usize },

    // -------------------------------------------------------------------------
    // Lookup Errors
    // -------------------------------------------------------------------------
    #[error("Key {0} not found")]
    NotFound(i32),

    #[error("Ordinal {ordinal} out of range (file holds {count} records)")]
    OrdinalOutOfRange { ordinal: u64, count: u64 },

    #[error("No records in {0:?}")]
    EmptyFile(PathBuf),

    // -------------------------------------------------------------------------
    // Ordering Errors
    // -------------------------------------------------------------------------
    /// Appending this key would break ascending key order
    #[error("Out-of-order append: key {key} is not greater than last key {last}")]
    OutOfOrder { key: i32, last: i32 },

    #[error("Key space exhausted: no id after {0}")]
    KeyOverflow(i32),

    /// Index entry disagrees with the data file it describes
    #[error("Stale index {path:?}: key {key} resolved to offset {offset} holding {found:?}")]
    StaleIndex {
        path: PathBuf,
        key: i32,
        offset: i64,
        found: Option<i32>,
    },

    // -------------------------------------------------------------------------
    // Input Errors
    // -------------------------------------------------------------------------
    #[error("Input error at line {line}: {message}")]
    Input { line: u64, message: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl StoreError {
    /// True for the "key absent" family of errors
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            StoreError::NotFound(_) | StoreError::OrdinalOutOfRange { .. }
        )
    }
}
