//! Index Module
//!
//! Primary offset index: one `(key, offset)` entry per live data record.
//!
//! ## Responsibilities
//! - Full, destructive rebuild from a data file (truncate and regenerate)
//! - Binary search by key, resolving to a byte offset in the data file
//!
//! The index is derived state. It is never updated incrementally; every
//! mutation of the data file is followed by a full rebuild.
//!
//! ## File Format
//! ```text
//! ┌─────────────────────────────────┐
//! │ Entry (12 bytes)                │
//! │ ┌──────────┬──────────────────┐ │
//! │ │ Key (4)  │   Offset (8)     │ │
//! │ └──────────┴──────────────────┘ │
//! │ ... one per data record, in     │
//! │     ascending key order         │
//! └─────────────────────────────────┘
//! ```

mod builder;
mod entry;
mod primary;

pub use builder::{IndexBuilder, IndexStats};
pub use entry::IndexEntry;
pub use primary::PrimaryIndex;
