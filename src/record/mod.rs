//! Record Module
//!
//! Fixed-width binary records and their codec.
//!
//! ## Responsibilities
//! - Map a typed record to a constant-size byte block and back
//! - Expose the primary key used for ordering and lookup
//! - Pad and trim fixed-width text slots
//!
//! ## Layouts (little-endian, no header, no inter-field padding)
//! ```text
//! Product (52 bytes)
//! ┌────────┬──────────────┬───────────┬────────────┬───────────────────┐
//! │ Id (4) │ ProductRef(4)│ Price (4) │ Brand (20) │ CategoryCode (20) │
//! └────────┴──────────────┴───────────┴────────────┴───────────────────┘
//!
//! Access (38 bytes)
//! ┌────────┬──────────────────┬────────────┬────────────────┐
//! │ Id (4) │ UserSession (20) │ UserId (4) │ EventType (10) │
//! └────────┴──────────────────┴────────────┴────────────────┘
//! ```
//!
//! Text slots are left-justified and zero-padded. Longer input is silently
//! truncated to the slot width.

mod access;
mod product;

pub use access::{Access, EVENT_TYPE_LEN, USER_SESSION_LEN};
pub use product::{Product, BRAND_LEN, CATEGORY_CODE_LEN};

use crate::error::{Result, StoreError};

/// A record with a constant encoded size and an `i32` primary key
pub trait FixedRecord: Sized {
    /// Encoded size in bytes
    const SIZE: usize;

    /// Human-readable kind, used in logs
    const KIND: &'static str;

    /// Primary key
    fn key(&self) -> i32;

    /// Return the record with its primary key replaced
    fn with_key(self, key: i32) -> Self;

    /// Encode into exactly `SIZE` bytes
    fn encode(&self) -> Vec<u8>;

    /// Decode from a block of exactly `SIZE` bytes
    fn decode(block: &[u8]) -> Result<Self>;
}

/// Ensure a block handed to `decode` has the record's size
pub(crate) fn check_block<R: FixedRecord>(block: &[u8]) -> Result<()> {
    if block.len() != R::SIZE {
        return Err(StoreError::RecordSize {
            expected: R::SIZE,
            actual: block.len(),
        });
    }
    Ok(())
}

/// Copy `text` into a zero-padded slot of width `N`, truncating if longer
pub fn pad_text<const N: usize>(text: &str) -> [u8; N] {
    let mut slot = [0u8; N];
    let bytes = text.as_bytes();
    let len = bytes.len().min(N);
    slot[..len].copy_from_slice(&bytes[..len]);
    slot
}

/// Canonical decode of a text slot: trailing zero bytes stripped
///
/// Invalid UTF-8 (e.g. a multi-byte character cut by truncation) is
/// replaced rather than rejected.
pub fn trim_text(slot: &[u8]) -> String {
    let end = slot.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
    String::from_utf8_lossy(&slot[..end]).into_owned()
}
