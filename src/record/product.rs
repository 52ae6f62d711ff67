//! Product record

use std::fmt;

use bytes::{Buf, BufMut, BytesMut};

use crate::error::Result;

use super::{check_block, pad_text, trim_text, FixedRecord};

/// Width of the brand text slot
pub const BRAND_LEN: usize = 20;

/// Width of the category code text slot
pub const CATEGORY_CODE_LEN: usize = 20;

/// A product row: id (PK), product reference, price and two text slots
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Product {
    pub id: i32,
    pub product_ref: i32,
    pub price: f32,
    /// Raw zero-padded slot
    pub brand: [u8; BRAND_LEN],
    /// Raw zero-padded slot
    pub category_code: [u8; CATEGORY_CODE_LEN],
}

impl Product {
    /// Build a product with id 0; the store assigns the real id on insert
    pub fn new(product_ref: i32, price: f32, brand: &str, category_code: &str) -> Self {
        Self {
            id: 0,
            product_ref,
            price,
            brand: pad_text(brand),
            category_code: pad_text(category_code),
        }
    }

    /// Brand with padding stripped
    pub fn brand(&self) -> String {
        trim_text(&self.brand)
    }

    /// Category code with padding stripped
    pub fn category_code(&self) -> String {
        trim_text(&self.category_code)
    }
}

impl FixedRecord for Product {
    const SIZE: usize = 4 + 4 + 4 + BRAND_LEN + CATEGORY_CODE_LEN;
    const KIND: &'static str = "product";

    fn key(&self) -> i32 {
        self.id
    }

    fn with_key(mut self, key: i32) -> Self {
        self.id = key;
        self
    }

    fn encode(&self) -> Vec<u8> {
        let mut buf = BytesMut::with_capacity(Self::SIZE);
        buf.put_i32_le(self.id);
        buf.put_i32_le(self.product_ref);
        buf.put_f32_le(self.price);
        buf.put_slice(&self.brand);
        buf.put_slice(&self.category_code);
        buf.to_vec()
    }

    fn decode(block: &[u8]) -> Result<Self> {
        check_block::<Self>(block)?;

        let mut buf = block;
        let id = buf.get_i32_le();
        let product_ref = buf.get_i32_le();
        let price = buf.get_f32_le();
        let mut brand = [0u8; BRAND_LEN];
        buf.copy_to_slice(&mut brand);
        let mut category_code = [0u8; CATEGORY_CODE_LEN];
        buf.copy_to_slice(&mut category_code);

        Ok(Self {
            id,
            product_ref,
            price,
            brand,
            category_code,
        })
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Product - ID: {}, ProductRef: {}, Price: {:.2}, Brand: {}, Category: {}",
            self.id,
            self.product_ref,
            self.price,
            self.brand(),
            self.category_code()
        )
    }
}
