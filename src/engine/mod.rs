//! Engine Module
//!
//! Query and mutation engine over the record files and their indexes.
//!
//! ## Responsibilities
//! - Point lookup by direct binary search or through the primary index
//! - Id assignment, insert and compaction delete, each followed by a full
//!   index rebuild where required
//! - Full-scan aggregates (max price, most frequent session)
//! - Open both tables of a store from a `Config`
//!
//! Every operation is a plain function of (path, key): nothing is cached
//! between calls, and each call opens and closes its own file handles.

mod aggregate;
mod store;
mod table;

pub use aggregate::SessionCount;
pub use store::{LoadStats, Store};
pub use table::Table;
