//! # flatstore
//!
//! A minimal flat-file record store with:
//! - Fixed-width little-endian binary records (products and accesses)
//! - Strictly ascending primary keys, enforced on every append
//! - Direct binary search over data files
//! - A rebuildable `(key, offset)` primary index for index-assisted lookups
//! - Compaction deletes and two full-scan aggregates
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    CSV input (ingest)                        │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                  Store / Table<R>                            │
//! │     lookup · insert · delete · max price · top session       │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌──────────────┐
//!   │ RecordFile  │ rebuild  │ PrimaryIndex │
//!   │  (data)     ├─────────►│ (key,offset) │
//!   └──────┬──────┘          └──────────────┘
//!          │
//!          ▼
//!   ┌─────────────┐
//!   │ FixedRecord │
//!   │   codec     │
//!   └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod record;
pub mod storage;
pub mod index;
pub mod engine;
pub mod ingest;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{Result, StoreError};
pub use config::Config;
pub use engine::{SessionCount, Store, Table};
pub use record::{Access, FixedRecord, Product};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of flatstore
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
