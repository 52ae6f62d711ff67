//! Tests for the record codec
//!
//! These tests verify:
//! - Encoded sizes and field offsets of every record kind
//! - Encode/decode round trips
//! - Silent truncation of oversize text
//! - Size checks on decode
//! - Human-readable report lines

use flatstore::index::IndexEntry;
use flatstore::record::{pad_text, trim_text, BRAND_LEN, USER_SESSION_LEN};
use flatstore::{Access, FixedRecord, Product, StoreError};

// =============================================================================
// Layout Tests
// =============================================================================

#[test]
fn test_record_sizes() {
    assert_eq!(Product::SIZE, 52);
    assert_eq!(Access::SIZE, 38);
    assert_eq!(IndexEntry::SIZE, 12);
}

#[test]
fn test_product_field_offsets() {
    let product = Product::new(0x0102_0304, 10.5, "acme", "tools.drill").with_key(7);

    let bytes = product.encode();

    assert_eq!(bytes.len(), 52);
    assert_eq!(&bytes[0..4], &7i32.to_le_bytes());
    assert_eq!(&bytes[4..8], &[0x04, 0x03, 0x02, 0x01]);
    assert_eq!(&bytes[8..12], &10.5f32.to_le_bytes());
    assert_eq!(&bytes[12..16], b"acme");
    assert!(bytes[16..32].iter().all(|&b| b == 0));
    assert_eq!(&bytes[32..43], b"tools.drill");
    assert!(bytes[43..52].iter().all(|&b| b == 0));
}

#[test]
fn test_access_field_offsets() {
    let access = Access::new("sess-1", -5, "cart").with_key(3);

    let bytes = access.encode();

    assert_eq!(bytes.len(), 38);
    assert_eq!(&bytes[0..4], &3i32.to_le_bytes());
    assert_eq!(&bytes[4..10], b"sess-1");
    assert!(bytes[10..24].iter().all(|&b| b == 0));
    assert_eq!(&bytes[24..28], &(-5i32).to_le_bytes());
    assert_eq!(&bytes[28..32], b"cart");
    assert!(bytes[32..38].iter().all(|&b| b == 0));
}

#[test]
fn test_index_entry_layout() {
    let entry = IndexEntry {
        key: 9,
        offset: 52 * 8,
    };

    let bytes = entry.encode();

    assert_eq!(&bytes[0..4], &9i32.to_le_bytes());
    assert_eq!(&bytes[4..12], &416i64.to_le_bytes());
}

// =============================================================================
// Round-Trip Tests
// =============================================================================

#[test]
fn test_product_round_trip() {
    let product = Product::new(44600062, 35.79, "shiseido", "beauty.skin").with_key(1);

    let decoded = Product::decode(&product.encode()).unwrap();

    assert_eq!(decoded, product);
    assert_eq!(decoded.brand(), "shiseido");
    assert_eq!(decoded.category_code(), "beauty.skin");
}

#[test]
fn test_access_round_trip() {
    let access = Access::new("72d76fde-8bb3-4e00", 541312140, "purchase").with_key(12);

    let decoded = Access::decode(&access.encode()).unwrap();

    assert_eq!(decoded, access);
    assert_eq!(decoded.user_session(), "72d76fde-8bb3-4e00");
    assert_eq!(decoded.event_type(), "purchase");
}

#[test]
fn test_full_width_text_round_trips() {
    let brand = "b".repeat(BRAND_LEN);
    let product = Product::new(1, 1.0, &brand, "").with_key(1);

    let decoded = Product::decode(&product.encode()).unwrap();

    assert_eq!(decoded.brand(), brand);
    assert_eq!(decoded.category_code(), "");
}

#[test]
fn test_oversize_text_is_truncated() {
    let session = "s".repeat(USER_SESSION_LEN + 15);
    let access = Access::new(&session, 1, "remove_from_cart").with_key(1);

    let decoded = Access::decode(&access.encode()).unwrap();

    assert_eq!(decoded.user_session(), "s".repeat(USER_SESSION_LEN));
    assert_eq!(decoded.event_type(), "remove_fro");
}

#[test]
fn test_padding_is_kept_in_raw_slot() {
    let product = Product::new(1, 1.0, "Nova Marca", "").with_key(1);

    let decoded = Product::decode(&product.encode()).unwrap();

    assert_eq!(decoded.brand.len(), BRAND_LEN);
    assert_eq!(&decoded.brand[..10], b"Nova Marca");
    assert_eq!(decoded.brand, pad_text::<BRAND_LEN>("Nova Marca"));
    assert_eq!(trim_text(&decoded.brand), "Nova Marca");
}

#[test]
fn test_with_key_replaces_only_the_key() {
    let access = Access::new("s", 4, "view").with_key(1).with_key(2);

    assert_eq!(access.key(), 2);
    assert_eq!(access.user_id, 4);
}

// =============================================================================
// Decode Error Tests
// =============================================================================

#[test]
fn test_decode_short_block_fails() {
    let bytes = Product::new(1, 1.0, "a", "b").encode();

    let err = Product::decode(&bytes[..51]).unwrap_err();

    assert!(matches!(
        err,
        StoreError::RecordSize {
            expected: 52,
            actual: 51
        }
    ));
}

#[test]
fn test_decode_long_block_fails() {
    let err = IndexEntry::decode(&[0u8; 13]).unwrap_err();

    assert!(matches!(err, StoreError::RecordSize { expected: 12, .. }));
}

// =============================================================================
// Display Tests
// =============================================================================

#[test]
fn test_product_display_trims_and_rounds() {
    let product = Product::new(12345, 99.99, "New Brand", "New Category").with_key(4);

    assert_eq!(
        product.to_string(),
        "Product - ID: 4, ProductRef: 12345, Price: 99.99, Brand: New Brand, Category: New Category"
    );
}

#[test]
fn test_access_display() {
    let access = Access::new("session123", 67890, "view").with_key(2);

    assert_eq!(
        access.to_string(),
        "Access - ID: 2, Session: session123, UserID: 67890, Event: view"
    );
}
