//! Table
//!
//! One record kind: its data file plus the path of its primary index.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{Result, StoreError};
use crate::index::{IndexStats, PrimaryIndex};
use crate::record::FixedRecord;
use crate::storage::{RecordFile, RecordIter};

/// Data file and index path for one record kind
///
/// The index path is explicit and used by every operation that rebuilds,
/// including delete.
#[derive(Debug, Clone)]
pub struct Table<R> {
    data: RecordFile<R>,
    index_path: PathBuf,
}

impl<R: FixedRecord> Table<R> {
    /// Table over `data_path`, creating an empty data file if absent
    pub fn open(data_path: impl Into<PathBuf>, index_path: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self {
            data: RecordFile::open_or_create(data_path)?,
            index_path: index_path.into(),
        })
    }

    /// The underlying data file
    pub fn data(&self) -> &RecordFile<R> {
        &self.data
    }

    /// Where this table's primary index lives
    pub fn index_path(&self) -> &Path {
        &self.index_path
    }

    /// Open the current primary index
    pub fn index(&self) -> Result<PrimaryIndex> {
        PrimaryIndex::open(&self.index_path)
    }

    /// Number of records
    pub fn len(&self) -> Result<u64> {
        self.data.record_count()
    }

    /// True when the data file holds no records
    pub fn is_empty(&self) -> Result<bool> {
        self.data.is_empty()
    }

    /// Lazy scan of all records in key order
    pub fn scan(&self) -> Result<RecordIter<R>> {
        self.data.scan()
    }

    /// All records in key order
    pub fn records(&self) -> Result<Vec<R>> {
        self.data.read_all()
    }

    // =========================================================================
    // Lookups
    // =========================================================================

    /// Binary search directly over the data file's ordinals
    pub fn find_by_ordinal(&self, key: i32) -> Result<R> {
        match self.data.search(key)? {
            Some((_, record)) => Ok(record),
            None => Err(StoreError::NotFound(key)),
        }
    }

    /// Binary search the primary index, then one read at the resolved offset
    pub fn find_by_index(&self, key: i32) -> Result<R> {
        let offset = self.index()?.lookup(key)?;

        let stale = |found: Option<i32>| StoreError::StaleIndex {
            path: self.index_path.clone(),
            key,
            offset,
            found,
        };

        let byte_offset = u64::try_from(offset).map_err(|_| stale(None))?;
        let record = match self.data.read_at_offset(byte_offset) {
            Ok(record) => record,
            Err(StoreError::OrdinalOutOfRange { .. }) => return Err(stale(None)),
            Err(e) => return Err(e),
        };

        if record.key() != key {
            return Err(stale(Some(record.key())));
        }
        Ok(record)
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Next id to assign: last key + 1, or 1 for an empty file
    ///
    /// Appends keep keys strictly ascending, so the last block holds the
    /// largest key and a single seek replaces a full scan.
    pub fn next_id(&self) -> Result<i32> {
        match self.data.last()? {
            Some(last) => last
                .key()
                .checked_add(1)
                .ok_or(StoreError::KeyOverflow(last.key())),
            None => Ok(1),
        }
    }

    /// Append `record` under a freshly assigned id, ignoring the id it carries
    pub fn insert(&self, record: R) -> Result<R> {
        let id = self.next_id()?;
        let record = record.with_key(id);
        self.data.append(&record)?;
        debug!(kind = R::KIND, id, "inserted record");
        Ok(record)
    }

    /// `insert` followed by a full index rebuild
    pub fn insert_and_reindex(&self, record: R) -> Result<R> {
        let record = self.insert(record)?;
        self.build_index()?;
        Ok(record)
    }

    /// Drop every record with `key` by compaction rewrite, then rebuild the index
    ///
    /// Fails with `NotFound` and leaves both files untouched when no record
    /// matched.
    pub fn delete(&self, key: i32) -> Result<()> {
        let stats = self.data.rewrite(|record| record.key() != key)?;
        if stats.removed == 0 {
            return Err(StoreError::NotFound(key));
        }

        info!(kind = R::KIND, key, remaining = stats.kept, "deleted record");
        self.build_index()?;
        Ok(())
    }

    /// Full rebuild of this table's primary index
    pub fn build_index(&self) -> Result<IndexStats> {
        let (_, stats) = PrimaryIndex::rebuild(&self.data, &self.index_path)?;
        Ok(stats)
    }

    /// Truncate the data file, write `records` in one batch and rebuild the index
    pub(crate) fn replace_all(&self, records: &[R]) -> Result<IndexStats> {
        let data = RecordFile::<R>::create(self.data.path())?;
        data.append_all(records)?;
        self.build_index()
    }
}
