//! Full-scan aggregates

use std::collections::HashMap;

use crate::error::{Result, StoreError};
use crate::record::{Access, Product};

use super::Table;

/// Result of the most-frequent-session scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCount {
    /// Session text with padding stripped
    pub session: String,
    pub count: u64,
}

impl Table<Product> {
    /// Product with the highest price
    ///
    /// The running maximum starts at 0.0, so `Ok(None)` means every price
    /// was zero or negative. Among equal maxima the first record wins.
    pub fn max_by_price(&self) -> Result<Option<Product>> {
        let mut max_price = 0.0f32;
        let mut best = None;
        let mut seen = 0u64;

        for product in self.scan()? {
            let product = product?;
            seen += 1;
            if product.price > max_price {
                max_price = product.price;
                best = Some(product);
            }
        }

        if seen == 0 {
            return Err(StoreError::EmptyFile(self.data().path().to_path_buf()));
        }
        Ok(best)
    }
}

impl Table<Access> {
    /// Session that occurs most often, grouped by trimmed text
    ///
    /// Ties go to the session that reached the winning count first during
    /// the scan.
    pub fn most_frequent_session(&self) -> Result<SessionCount> {
        let mut counts: HashMap<String, u64> = HashMap::new();
        let mut best: Option<SessionCount> = None;

        for access in self.scan()? {
            let access = access?;
            let count = counts.entry(access.user_session()).or_insert(0);
            *count += 1;

            if best.as_ref().map_or(true, |b| *count > b.count) {
                best = Some(SessionCount {
                    session: access.user_session(),
                    count: *count,
                });
            }
        }

        best.ok_or_else(|| StoreError::EmptyFile(self.data().path().to_path_buf()))
    }
}
