//! Storage Module
//!
//! Fixed-record files: raw concatenations of equal-size encoded records.
//!
//! ## Responsibilities
//! - Append single records or batches at end-of-file
//! - Sequential scans distinguishing clean EOF from a torn trailing block
//! - Random reads by ordinal (`ordinal * SIZE`) or absolute byte offset
//! - Compaction rewrites through a sibling temp file and a rename
//! - Enforce strictly ascending keys on every append
//!
//! ## File Format
//! ```text
//! ┌──────────────────┬──────────────────┬─────┬──────────────────┐
//! │ Record 0 (SIZE)  │ Record 1 (SIZE)  │ ... │ Record n-1 (SIZE)│
//! └──────────────────┴──────────────────┴─────┴──────────────────┘
//! ```
//! No header, no magic, no count: `len / SIZE` is the record count and a
//! length that is not a multiple of `SIZE` means the file is corrupt.

mod file;
mod iterator;

pub use file::{RecordFile, RewriteStats};
pub use iterator::RecordIter;
