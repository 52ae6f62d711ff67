//! Store
//!
//! Both tables of a flatstore, opened from one `Config`.

use std::fs;
use std::io::Read;
use std::path::Path;

use tracing::info;

use crate::config::Config;
use crate::error::{Result, StoreError};
use crate::index::IndexStats;
use crate::ingest::{self, InputRow};
use crate::record::{Access, Product};

use super::Table;

/// Summary of a create-from-input load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadStats {
    /// Input rows read (one product and one access each)
    pub rows: u64,
    pub products_index: IndexStats,
    pub accesses_index: IndexStats,
}

/// The product and access tables under one data directory
#[derive(Debug, Clone)]
pub struct Store {
    config: Config,
    products: Table<Product>,
    accesses: Table<Access>,
}

impl Store {
    /// Open or create a store with the given config
    ///
    /// Creates the data directory and empty data files when absent. Index
    /// files are only created by a rebuild.
    pub fn open(config: Config) -> Result<Self> {
        config.validate()?;
        fs::create_dir_all(&config.data_dir)?;

        let products = Table::open(config.products_path(), config.products_index_path())?;
        let accesses = Table::open(config.accesses_path(), config.accesses_index_path())?;

        info!(data_dir = ?config.data_dir, "opened store");

        Ok(Self {
            config,
            products,
            accesses,
        })
    }

    /// Open with a path (convenience method)
    ///
    /// Uses default file names inside the given data directory
    pub fn open_path(path: &Path) -> Result<Self> {
        Self::open(Config::builder().data_dir(path).build())
    }

    /// Product table
    pub fn products(&self) -> &Table<Product> {
        &self.products
    }

    /// Access table
    pub fn accesses(&self) -> &Table<Access> {
        &self.accesses
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Rebuild both indexes
    pub fn build_indexes(&self) -> Result<(IndexStats, IndexStats)> {
        Ok((self.products.build_index()?, self.accesses.build_index()?))
    }

    /// Replace both tables with the rows of a headed CSV file
    pub fn load_csv(&self, input: &Path) -> Result<LoadStats> {
        let rows = ingest::read_rows_from_path(input)?;
        info!(input = ?input, rows = rows.len(), "parsed input");
        self.load_rows(rows)
    }

    /// Replace both tables with the rows of a headed CSV stream
    pub fn load_reader<Rd: Read>(&self, reader: Rd) -> Result<LoadStats> {
        self.load_rows(ingest::read_rows(reader)?)
    }

    /// Replace both tables with `rows`, ids 1..=n in row order
    pub fn load_rows(&self, rows: Vec<InputRow>) -> Result<LoadStats> {
        let row_count = rows.len();
        if row_count > i32::MAX as usize {
            return Err(StoreError::KeyOverflow(i32::MAX));
        }

        let mut products = Vec::with_capacity(row_count);
        let mut accesses = Vec::with_capacity(row_count);
        for (id, row) in (1..).zip(rows) {
            let (product, access) = row.into_records(id);
            products.push(product);
            accesses.push(access);
        }

        let products_index = self.products.replace_all(&products)?;
        let accesses_index = self.accesses.replace_all(&accesses)?;

        info!(rows = row_count, "loaded store from input");

        Ok(LoadStats {
            rows: row_count as u64,
            products_index,
            accesses_index,
        })
    }
}
