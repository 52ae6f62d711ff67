//! Tests for Store
//!
//! These tests verify:
//! - Opening a store creates its directory and data files
//! - Config validation
//! - Create-from-input loading of both tables
//! - Persistence across reopen

use flatstore::{Config, FixedRecord, Store, StoreError};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

const CSV: &str = "\
event_time,event_type,product_id,category_id,category_code,brand,price,user_id,user_session
2019-10-01 00:00:00 UTC,view,44600062,2103807459595387724,,shiseido,35.79,541312140,72d76fde-8bb3-4e00
2019-10-01 00:00:00 UTC,view,3900821,2053013552326770905,appliances.water_heater,aqua,33.20,554748717,9333dfbd-b87a-4708
2019-10-01 00:00:01 UTC,cart,17200506,2053013559792632471,furniture.bedroom.bed,,543.10,519107250,72d76fde-8bb3-4e00
2019-10-01 00:00:01 UTC,purchase,1307067,2053013558920217191,computers.notebook,lenovo,251.74,550050854,7c90fc70-0e80-4590
";

fn setup_temp_store() -> (TempDir, Store) {
    let temp_dir = TempDir::new().unwrap();
    let store = Store::open_path(temp_dir.path()).unwrap();
    (temp_dir, store)
}

// =============================================================================
// Open Tests
// =============================================================================

#[test]
fn test_open_creates_directory_and_data_files() {
    let temp_dir = TempDir::new().unwrap();
    let data_dir = temp_dir.path().join("mystore");

    let config = Config::builder().data_dir(&data_dir).build();
    let store = Store::open(config).unwrap();

    assert!(data_dir.join("products.bin").exists());
    assert!(data_dir.join("accesses.bin").exists());
    assert!(!data_dir.join("products.idx").exists());
    assert!(!data_dir.join("accesses.idx").exists());
    assert_eq!(store.products().len().unwrap(), 0);
    assert_eq!(store.accesses().len().unwrap(), 0);
}

#[test]
fn test_open_with_custom_file_names() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::builder()
        .data_dir(temp_dir.path())
        .products_file("p.dat")
        .accesses_file("a.dat")
        .products_index_file("p.ix")
        .accesses_index_file("a.ix")
        .build();

    let store = Store::open(config).unwrap();
    store.build_indexes().unwrap();

    assert!(temp_dir.path().join("p.dat").exists());
    assert!(temp_dir.path().join("a.dat").exists());
    assert!(temp_dir.path().join("p.ix").exists());
    assert!(temp_dir.path().join("a.ix").exists());
    assert_eq!(store.products().index_path(), temp_dir.path().join("p.ix"));
}

#[test]
fn test_open_rejects_shared_file_names() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::builder()
        .data_dir(temp_dir.path())
        .products_index_file("products.bin")
        .build();

    assert!(matches!(Store::open(config), Err(StoreError::Config(_))));
}

#[test]
fn test_open_rejects_empty_file_name() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::builder()
        .data_dir(temp_dir.path())
        .accesses_file("  ")
        .build();

    assert!(matches!(Store::open(config), Err(StoreError::Config(_))));
}

#[test]
fn test_default_config_validates() {
    Config::default().validate().unwrap();
}

// =============================================================================
// Load Tests
// =============================================================================

#[test]
fn test_load_assigns_ids_in_row_order() {
    let (_temp, store) = setup_temp_store();

    let stats = store.load_reader(CSV.as_bytes()).unwrap();

    assert_eq!(stats.rows, 4);
    assert_eq!(stats.products_index.entries, 4);
    assert_eq!(stats.accesses_index.entries, 4);

    let products = store.products().records().unwrap();
    let ids: Vec<i32> = products.iter().map(|p| p.key()).collect();
    assert_eq!(ids, vec![1, 2, 3, 4]);
    assert_eq!(products[0].product_ref, 44600062);
    assert_eq!(products[0].brand(), "shiseido");
    assert_eq!(products[0].category_code(), "");
    assert_eq!(products[2].brand(), "");

    let accesses = store.accesses().records().unwrap();
    assert_eq!(accesses[3].id, 4);
    assert_eq!(accesses[3].event_type(), "purchase");
    assert_eq!(accesses[3].user_id, 550050854);
    assert_eq!(accesses[3].user_session(), "7c90fc70-0e80-4590");
}

#[test]
fn test_load_builds_usable_indexes() {
    let (_temp, store) = setup_temp_store();
    store.load_reader(CSV.as_bytes()).unwrap();

    assert_eq!(store.products().find_by_index(3).unwrap().price, 543.10);
    assert_eq!(store.accesses().find_by_index(2).unwrap().user_id, 554748717);
}

#[test]
fn test_load_then_aggregates() {
    let (_temp, store) = setup_temp_store();
    store.load_reader(CSV.as_bytes()).unwrap();

    let max = store.products().max_by_price().unwrap().unwrap();
    assert_eq!(max.id, 3);

    let top = store.accesses().most_frequent_session().unwrap();
    assert_eq!(top.session, "72d76fde-8bb3-4e00");
    assert_eq!(top.count, 2);
}

#[test]
fn test_load_replaces_existing_records() {
    let (_temp, store) = setup_temp_store();
    store.load_reader(CSV.as_bytes()).unwrap();
    store.load_reader(CSV.as_bytes()).unwrap();

    assert_eq!(store.products().len().unwrap(), 4);
    assert_eq!(store.accesses().next_id().unwrap(), 5);
}

#[test]
fn test_load_rejects_bad_row() {
    let (_temp, store) = setup_temp_store();
    let input = "\
event_time,event_type,product_id,category_id,category_code,brand,price,user_id,user_session
t,view,1,1,c,b,not-a-price,2,s
";

    let err = store.load_reader(input.as_bytes()).unwrap_err();

    assert!(matches!(err, StoreError::Input { line: 2, .. }));
}

#[test]
fn test_load_csv_missing_file() {
    let (temp, store) = setup_temp_store();

    let err = store.load_csv(&temp.path().join("missing.csv")).unwrap_err();

    assert!(matches!(err, StoreError::Io(_)));
}

// =============================================================================
// Persistence Tests
// =============================================================================

#[test]
fn test_reopen_sees_records_and_indexes() {
    let temp_dir = TempDir::new().unwrap();

    {
        let store = Store::open_path(temp_dir.path()).unwrap();
        store.load_reader(CSV.as_bytes()).unwrap();
        store.accesses().delete(1).unwrap();
    }

    {
        let store = Store::open_path(temp_dir.path()).unwrap();
        assert_eq!(store.products().len().unwrap(), 4);
        assert_eq!(store.accesses().len().unwrap(), 3);
        assert!(matches!(
            store.accesses().find_by_index(1),
            Err(StoreError::NotFound(1))
        ));
        assert_eq!(store.products().find_by_index(1).unwrap().product_ref, 44600062);
    }
}
