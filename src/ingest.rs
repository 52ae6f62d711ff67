//! Ingest
//!
//! Create-from-input: a comma-delimited table with a header row becomes one
//! product and one access record per row.
//!
//! Columns are matched by header name; extra columns are ignored:
//! ```text
//! event_time,event_type,product_id,category_id,category_code,brand,price,user_id,user_session
//! ```

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Result, StoreError};
use crate::record::{Access, FixedRecord, Product};

/// One parsed input row
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct InputRow {
    pub event_type: String,
    pub product_id: i32,
    pub category_code: String,
    pub brand: String,
    pub price: f32,
    pub user_id: i32,
    pub user_session: String,
}

impl InputRow {
    /// Split the row into its product and access records under `id`
    pub fn into_records(self, id: i32) -> (Product, Access) {
        let product =
            Product::new(self.product_id, self.price, &self.brand, &self.category_code).with_key(id);
        let access = Access::new(&self.user_session, self.user_id, &self.event_type).with_key(id);
        (product, access)
    }
}

/// Parse every row of a headed CSV stream
pub fn read_rows<Rd: Read>(reader: Rd) -> Result<Vec<InputRow>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    csv_reader
        .deserialize::<InputRow>()
        .map(|row| row.map_err(row_error))
        .collect()
}

/// Parse every row of a headed CSV file
pub fn read_rows_from_path(path: &Path) -> Result<Vec<InputRow>> {
    read_rows(File::open(path)?)
}

/// Per-row parse failures carry their line; everything else stays a CSV error
fn row_error(e: csv::Error) -> StoreError {
    if let csv::ErrorKind::Deserialize { pos, err } = e.kind() {
        return StoreError::Input {
            line: pos.as_ref().map_or(0, |p| p.line()),
            message: err.to_string(),
        };
    }
    StoreError::Csv(e)
}
