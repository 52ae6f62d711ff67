//! Index Builder
//!
//! Writes a fresh index file while a data file is scanned in order.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{Result, StoreError};
use crate::record::FixedRecord;

use super::IndexEntry;

/// Summary of a finished index build
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexStats {
    /// Entries written (= data records scanned)
    pub entries: u64,
    /// Bytes of data file covered by the index
    pub data_bytes: u64,
}

/// Builder for a new index file
///
/// Truncates the target on creation. Call `add()` once per data record in
/// file order, then `finish()` to flush and sync.
pub struct IndexBuilder {
    /// Output file path
    path: PathBuf,
    /// Buffered writer for performance
    writer: BufWriter<File>,
    /// Size of one data record, the offset stride
    record_size: u64,
    /// Offset of the next data record
    current_offset: u64,
    /// Number of entries written
    entry_count: u64,
    /// Last key written, to reject descending input
    last_key: Option<i32>,
}

impl IndexBuilder {
    /// Create (or truncate) the index file at `path` for data records of `record_size` bytes
    pub fn new(path: &Path, record_size: usize) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)?;

        Ok(Self {
            path: path.to_path_buf(),
            writer: BufWriter::new(file),
            record_size: record_size as u64,
            current_offset: 0,
            entry_count: 0,
            last_key: None,
        })
    }

    /// Record the next data record's key at the running offset
    pub fn add(&mut self, key: i32) -> Result<()> {
        if let Some(last) = self.last_key {
            if key <= last {
                return Err(StoreError::OutOfOrder { key, last });
            }
        }

        let entry = IndexEntry {
            key,
            offset: self.current_offset as i64,
        };
        self.writer.write_all(&entry.encode())?;

        self.last_key = Some(key);
        self.current_offset += self.record_size;
        self.entry_count += 1;
        Ok(())
    }

    /// Path of the index being built
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Finish building: flush, sync and return stats
    pub fn finish(self) -> Result<IndexStats> {
        let file = self
            .writer
            .into_inner()
            .map_err(|e| StoreError::Io(e.into_error()))?;
        file.sync_all()?;

        Ok(IndexStats {
            entries: self.entry_count,
            data_bytes: self.current_offset,
        })
    }
}
