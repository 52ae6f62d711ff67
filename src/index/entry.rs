//! Index entry record

use bytes::{Buf, BufMut, BytesMut};

use crate::error::Result;
use crate::record::{check_block, FixedRecord};

/// Key plus the byte offset of its record in the data file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexEntry {
    pub key: i32,
    pub offset: i64,
}

impl FixedRecord for IndexEntry {
    const SIZE: usize = 4 + 8;
    const KIND: &'static str = "index";

    fn key(&self) -> i32 {
        self.key
    }

    fn with_key(mut self, key: i32) -> Self {
        self.key = key;
        self
    }

    fn encode(&self) -> Vec<u8> {
        let mut buf = BytesMut::with_capacity(Self::SIZE);
        buf.put_i32_le(self.key);
        buf.put_i64_le(self.offset);
        buf.to_vec()
    }

    fn decode(block: &[u8]) -> Result<Self> {
        check_block::<Self>(block)?;

        let mut buf = block;
        let key = buf.get_i32_le();
        let offset = buf.get_i64_le();
        Ok(Self { key, offset })
    }
}
