//! Primary Index
//!
//! Handle over an index file with rebuild and key lookup.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{Result, StoreError};
use crate::record::FixedRecord;
use crate::storage::RecordFile;

use super::{IndexBuilder, IndexEntry, IndexStats};

/// Sorted `(key, offset)` index over one data file
#[derive(Debug, Clone)]
pub struct PrimaryIndex {
    file: RecordFile<IndexEntry>,
}

impl PrimaryIndex {
    /// Handle over an existing index file
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let file = RecordFile::new(path);
        // Fails on a missing or misaligned file
        file.record_count()?;
        Ok(Self { file })
    }

    /// Truncate `index_path` and regenerate it from a full scan of `data`
    ///
    /// On failure the partial index file is removed so later lookups fail
    /// loudly instead of reading a stale or torn index.
    pub fn rebuild<R: FixedRecord>(
        data: &RecordFile<R>,
        index_path: &Path,
    ) -> Result<(Self, IndexStats)> {
        let stats = match Self::build_from(data, index_path) {
            Ok(stats) => stats,
            Err(e) => {
                let _ = fs::remove_file(index_path);
                return Err(e);
            }
        };

        info!(
            data = ?data.path(),
            index = ?index_path,
            kind = R::KIND,
            entries = stats.entries,
            "rebuilt primary index"
        );

        Ok((
            Self {
                file: RecordFile::new(index_path),
            },
            stats,
        ))
    }

    /// Binary search for `key`, returning its record's byte offset
    pub fn lookup(&self, key: i32) -> Result<i64> {
        match self.file.search(key)? {
            Some((_, entry)) => {
                debug!(index = ?self.file.path(), key, offset = entry.offset, "index hit");
                Ok(entry.offset)
            }
            None => Err(StoreError::NotFound(key)),
        }
    }

    /// Every entry in file order
    pub fn entries(&self) -> Result<Vec<IndexEntry>> {
        self.file.read_all()
    }

    /// Number of entries
    pub fn len(&self) -> Result<u64> {
        self.file.record_count()
    }

    /// True when the index holds no entries
    pub fn is_empty(&self) -> Result<bool> {
        self.file.is_empty()
    }

    /// Path of the index file
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    fn build_from<R: FixedRecord>(data: &RecordFile<R>, index_path: &Path) -> Result<IndexStats> {
        let mut builder = IndexBuilder::new(index_path, R::SIZE)?;
        for record in data.scan()? {
            builder.add(record?.key())?;
        }
        builder.finish()
    }
}
