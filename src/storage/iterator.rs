//! Record Iterator
//!
//! Sequential iteration over every block of a fixed-record file.

use std::fs::File;
use std::io::{BufReader, ErrorKind, Read};
use std::marker::PhantomData;
use std::path::PathBuf;

use crate::error::{Result, StoreError};
use crate::record::FixedRecord;

/// Iterator over records in file order
///
/// Ends cleanly when EOF falls on a block boundary. A partial trailing
/// block yields a single `CorruptFile` error, after which the iterator is
/// exhausted.
pub struct RecordIter<R> {
    reader: BufReader<File>,
    path: PathBuf,
    /// Scratch block reused across reads
    block: Vec<u8>,
    /// Byte offset of the next block to read
    offset: u64,
    done: bool,
    _record: PhantomData<fn() -> R>,
}

impl<R: FixedRecord> RecordIter<R> {
    pub(super) fn new(file: File, path: PathBuf) -> Self {
        Self {
            reader: BufReader::new(file),
            path,
            block: vec![0u8; R::SIZE],
            offset: 0,
            done: false,
            _record: PhantomData,
        }
    }

    /// Byte offset of the next record this iterator will yield
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Fill the scratch block; returns how many bytes were read before EOF
    fn fill_block(&mut self) -> std::io::Result<usize> {
        let mut filled = 0;
        while filled < self.block.len() {
            match self.reader.read(&mut self.block[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(filled)
    }
}

impl<R: FixedRecord> Iterator for RecordIter<R> {
    type Item = Result<R>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.fill_block() {
            // EOF on a block boundary: normal termination
            Ok(0) => {
                self.done = true;
                None
            }
            Ok(n) if n == R::SIZE => {
                self.offset += R::SIZE as u64;
                Some(R::decode(&self.block))
            }
            Ok(n) => {
                self.done = true;
                Some(Err(StoreError::CorruptFile {
                    path: self.path.clone(),
                    len: self.offset + n as u64,
                    record_size: R::SIZE,
                }))
            }
            Err(e) => {
                self.done = true;
                Some(Err(StoreError::Io(e)))
            }
        }
    }
}
