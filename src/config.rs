//! Configuration for flatstore
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

use crate::error::{Result, StoreError};

/// Main configuration for a flatstore instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Root directory for all data and index files
    /// Internal structure:
    ///   {data_dir}/
    ///     ├── products.bin     (52-byte product records)
    ///     ├── products.idx     (12-byte index entries)
    ///     ├── accesses.bin     (38-byte access records)
    ///     └── accesses.idx     (12-byte index entries)
    pub data_dir: PathBuf,

    /// Product data file name (relative to data_dir)
    pub products_file: String,

    /// Access data file name (relative to data_dir)
    pub accesses_file: String,

    // -------------------------------------------------------------------------
    // Index Configuration
    // -------------------------------------------------------------------------
    /// Product index file name (relative to data_dir)
    pub products_index_file: String,

    /// Access index file name (relative to data_dir)
    pub accesses_index_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./flatstore_data"),
            products_file: "products.bin".to_string(),
            accesses_file: "accesses.bin".to_string(),
            products_index_file: "products.idx".to_string(),
            accesses_index_file: "accesses.idx".to_string(),
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Full path of the product data file
    pub fn products_path(&self) -> PathBuf {
        self.data_dir.join(&self.products_file)
    }

    /// Full path of the access data file
    pub fn accesses_path(&self) -> PathBuf {
        self.data_dir.join(&self.accesses_file)
    }

    /// Full path of the product index file
    pub fn products_index_path(&self) -> PathBuf {
        self.data_dir.join(&self.products_index_file)
    }

    /// Full path of the access index file
    pub fn accesses_index_path(&self) -> PathBuf {
        self.data_dir.join(&self.accesses_index_file)
    }

    /// Reject empty names and names shared between two files
    pub fn validate(&self) -> Result<()> {
        let names = [
            ("products_file", &self.products_file),
            ("accesses_file", &self.accesses_file),
            ("products_index_file", &self.products_index_file),
            ("accesses_index_file", &self.accesses_index_file),
        ];

        for (field, name) in &names {
            if name.trim().is_empty() {
                return Err(StoreError::Config(format!("{} must not be empty", field)));
            }
        }

        for (i, (field_a, name_a)) in names.iter().enumerate() {
            for (field_b, name_b) in &names[i + 1..] {
                if name_a == name_b {
                    return Err(StoreError::Config(format!(
                        "{} and {} both point at {:?}",
                        field_a, field_b, name_a
                    )));
                }
            }
        }

        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the data directory (root for all files)
    pub fn data_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.data_dir = path.into();
        self
    }

    /// Set the product data file name
    pub fn products_file(mut self, name: impl Into<String>) -> Self {
        self.config.products_file = name.into();
        self
    }

    /// Set the access data file name
    pub fn accesses_file(mut self, name: impl Into<String>) -> Self {
        self.config.accesses_file = name.into();
        self
    }

    /// Set the product index file name
    pub fn products_index_file(mut self, name: impl Into<String>) -> Self {
        self.config.products_index_file = name.into();
        self
    }

    /// Set the access index file name
    pub fn accesses_index_file(mut self, name: impl Into<String>) -> Self {
        self.config.accesses_index_file = name.into();
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
