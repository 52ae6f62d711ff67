//! Fixed-Record File
//!
//! Path-only handle over a file of equal-size records. Every operation
//! opens its own file handle and drops it before returning.

use std::cmp::Ordering;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, ErrorKind, Read, Seek, SeekFrom, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{Result, StoreError};
use crate::record::FixedRecord;

use super::RecordIter;

/// Outcome of a compaction rewrite
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RewriteStats {
    /// Records copied to the new file
    pub kept: u64,
    /// Records dropped
    pub removed: u64,
}

/// A file of fixed-size records of type `R`, kept in ascending key order
#[derive(Debug)]
pub struct RecordFile<R> {
    path: PathBuf,
    _record: PhantomData<fn() -> R>,
}

impl<R> Clone for RecordFile<R> {
    fn clone(&self) -> Self {
        Self {
            path: self.path.clone(),
            _record: PhantomData,
        }
    }
}

impl<R: FixedRecord> RecordFile<R> {
    /// Handle over `path` without touching the filesystem
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _record: PhantomData,
        }
    }

    /// Create (or truncate) an empty file at `path`
    pub fn create(path: impl Into<PathBuf>) -> Result<Self> {
        let handle = Self::new(path);
        File::create(&handle.path)?;
        debug!(path = ?handle.path, kind = R::KIND, "created empty record file");
        Ok(handle)
    }

    /// Open `path`, creating an empty file if it does not exist
    pub fn open_or_create(path: impl Into<PathBuf>) -> Result<Self> {
        let handle = Self::new(path);
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&handle.path)?;
        Ok(handle)
    }

    /// Path of the underlying file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of records, from the file length alone
    pub fn record_count(&self) -> Result<u64> {
        let len = fs::metadata(&self.path)?.len();
        self.count_for_len(len)
    }

    /// True when the file holds no records
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.record_count()? == 0)
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Lazy sequential scan from offset 0
    pub fn scan(&self) -> Result<RecordIter<R>> {
        let file = File::open(&self.path)?;
        Ok(RecordIter::new(file, self.path.clone()))
    }

    /// Read the record at a zero-based ordinal
    pub fn read_at(&self, ordinal: u64) -> Result<R> {
        let mut file = File::open(&self.path)?;
        let count = self.count_for_len(file.metadata()?.len())?;
        if ordinal >= count {
            return Err(StoreError::OrdinalOutOfRange { ordinal, count });
        }
        Self::read_block(&mut file, ordinal * R::SIZE as u64)
    }

    /// Read the record starting at an absolute byte offset
    pub fn read_at_offset(&self, offset: u64) -> Result<R> {
        if offset % R::SIZE as u64 != 0 {
            return Err(StoreError::CorruptFile {
                path: self.path.clone(),
                len: offset,
                record_size: R::SIZE,
            });
        }
        self.read_at(offset / R::SIZE as u64)
    }

    /// Final record in the file, read with a single seek
    pub fn last(&self) -> Result<Option<R>> {
        let mut file = File::open(&self.path)?;
        let count = self.count_for_len(file.metadata()?.len())?;
        if count == 0 {
            return Ok(None);
        }
        Self::read_block(&mut file, (count - 1) * R::SIZE as u64).map(Some)
    }

    /// Collect every record in file order
    pub fn read_all(&self) -> Result<Vec<R>> {
        self.scan()?.collect()
    }

    /// Binary search by key over ordinals, holding one handle throughout
    ///
    /// Assumes ascending keys. Returns the matching ordinal and record.
    pub fn search(&self, key: i32) -> Result<Option<(u64, R)>> {
        let mut file = File::open(&self.path)?;
        let mut lo = 0;
        let mut hi = self.count_for_len(file.metadata()?.len())?;
        let mut probes = 0u32;

        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            let record = Self::read_block(&mut file, mid * R::SIZE as u64)?;
            probes += 1;

            match record.key().cmp(&key) {
                Ordering::Equal => {
                    debug!(path = ?self.path, kind = R::KIND, key, ordinal = mid, probes, "search hit");
                    return Ok(Some((mid, record)));
                }
                Ordering::Less => lo = mid + 1,
                Ordering::Greater => hi = mid,
            }
        }

        debug!(path = ?self.path, kind = R::KIND, key, probes, "search miss");
        Ok(None)
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Append one record at end-of-file, creating the file if absent
    ///
    /// Fails with `OutOfOrder` (and writes nothing) unless the record's key
    /// is strictly greater than the current last key. Returns the byte
    /// offset the record was written at.
    pub fn append(&self, record: &R) -> Result<u64> {
        let last = self.last_if_exists()?;
        self.check_order(last.as_ref().map(R::key), record.key())?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let offset = self.count_for_len(file.metadata()?.len())? * R::SIZE as u64;
        file.write_all(&record.encode())?;

        debug!(path = ?self.path, kind = R::KIND, key = record.key(), offset, "appended record");
        Ok(offset)
    }

    /// Append a batch in one buffered write
    ///
    /// The whole batch is checked for ascending order (against the current
    /// last key and within itself) before anything is written.
    pub fn append_all(&self, records: &[R]) -> Result<u64> {
        let mut prev = self.last_if_exists()?.as_ref().map(R::key);
        for record in records {
            self.check_order(prev, record.key())?;
            prev = Some(record.key());
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let mut writer = BufWriter::new(file);
        for record in records {
            writer.write_all(&record.encode())?;
        }
        writer.flush()?;

        let file = writer.into_inner().map_err(|e| StoreError::Io(e.into_error()))?;
        file.sync_all()?;

        debug!(path = ?self.path, kind = R::KIND, count = records.len(), "appended batch");
        Ok(records.len() as u64)
    }

    /// Compaction rewrite: keep only records for which `keep` holds
    ///
    /// Survivors are copied in file order to a sibling temp file which then
    /// replaces the original by rename. When nothing is dropped the temp
    /// file is discarded and the original is left untouched.
    pub fn rewrite<F>(&self, mut keep: F) -> Result<RewriteStats>
    where
        F: FnMut(&R) -> bool,
    {
        let tmp_path = self.temp_path()?;

        let stats = match self.copy_kept(&tmp_path, &mut keep) {
            Ok(stats) => stats,
            Err(e) => {
                let _ = fs::remove_file(&tmp_path);
                return Err(e);
            }
        };

        if stats.removed == 0 {
            fs::remove_file(&tmp_path)?;
        } else {
            fs::rename(&tmp_path, &self.path)?;
        }

        debug!(
            path = ?self.path,
            kind = R::KIND,
            kept = stats.kept,
            removed = stats.removed,
            "rewrote record file"
        );
        Ok(stats)
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    fn count_for_len(&self, len: u64) -> Result<u64> {
        if len % R::SIZE as u64 != 0 {
            return Err(StoreError::CorruptFile {
                path: self.path.clone(),
                len,
                record_size: R::SIZE,
            });
        }
        Ok(len / R::SIZE as u64)
    }

    fn read_block(file: &mut File, offset: u64) -> Result<R> {
        file.seek(SeekFrom::Start(offset))?;
        let mut block = vec![0u8; R::SIZE];
        file.read_exact(&mut block)?;
        R::decode(&block)
    }

    /// Like `last`, but a missing file counts as empty
    fn last_if_exists(&self) -> Result<Option<R>> {
        match self.last() {
            Err(StoreError::Io(e)) if e.kind() == ErrorKind::NotFound => Ok(None),
            other => other,
        }
    }

    fn check_order(&self, last: Option<i32>, key: i32) -> Result<()> {
        match last {
            Some(last) if key <= last => {
                warn!(path = ?self.path, kind = R::KIND, key, last, "rejected out-of-order append");
                Err(StoreError::OutOfOrder { key, last })
            }
            _ => Ok(()),
        }
    }

    /// "products.bin" → "products.bin.tmp" in the same directory
    fn temp_path(&self) -> Result<PathBuf> {
        let name = self.path.file_name().ok_or_else(|| {
            StoreError::Io(std::io::Error::new(
                ErrorKind::InvalidInput,
                format!("{:?} has no file name", self.path),
            ))
        })?;
        let mut tmp_name = name.to_os_string();
        tmp_name.push(".tmp");
        Ok(self.path.with_file_name(tmp_name))
    }

    fn copy_kept(&self, tmp_path: &Path, keep: &mut impl FnMut(&R) -> bool) -> Result<RewriteStats> {
        let mut writer = BufWriter::new(File::create(tmp_path)?);
        let mut stats = RewriteStats { kept: 0, removed: 0 };

        for record in self.scan()? {
            let record = record?;
            if keep(&record) {
                writer.write_all(&record.encode())?;
                stats.kept += 1;
            } else {
                stats.removed += 1;
            }
        }

        writer.flush()?;
        let file = writer.into_inner().map_err(|e| StoreError::Io(e.into_error()))?;
        file.sync_all()?;
        Ok(stats)
    }
}
