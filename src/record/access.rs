//! Access record

use std::fmt;

use bytes::{Buf, BufMut, BytesMut};

use crate::error::Result;

use super::{check_block, pad_text, trim_text, FixedRecord};

/// Width of the user session text slot
pub const USER_SESSION_LEN: usize = 20;

/// Width of the event type text slot
pub const EVENT_TYPE_LEN: usize = 10;

/// An access event: id (PK), session, user and event type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Access {
    pub id: i32,
    /// Raw zero-padded slot
    pub user_session: [u8; USER_SESSION_LEN],
    pub user_id: i32,
    /// Raw zero-padded slot
    pub event_type: [u8; EVENT_TYPE_LEN],
}

impl Access {
    /// Build an access with id 0; the store assigns the real id on insert
    pub fn new(user_session: &str, user_id: i32, event_type: &str) -> Self {
        Self {
            id: 0,
            user_session: pad_text(user_session),
            user_id,
            event_type: pad_text(event_type),
        }
    }

    /// Session with padding stripped
    pub fn user_session(&self) -> String {
        trim_text(&self.user_session)
    }

    /// Event type with padding stripped
    pub fn event_type(&self) -> String {
        trim_text(&self.event_type)
    }
}

impl FixedRecord for Access {
    const SIZE: usize = 4 + USER_SESSION_LEN + 4 + EVENT_TYPE_LEN;
    const KIND: &'static str = "access";

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
        buf.put_slice(&self.user_session);
        buf.put_i32_le(self.user_id);
        buf.put_slice(&self.event_type);
        buf.to_vec()
    }

    fn decode(block: &[u8]) -> Result<Self> {
        check_block::<Self>(block)?;

        let mut buf = block;
        let id = buf.get_i32_le();
        let mut user_session = [0u8; USER_SESSION_LEN];
        buf.copy_to_slice(&mut user_session);
        let user_id = buf.get_i32_le();
        let mut event_type = [0u8; EVENT_TYPE_LEN];
        buf.copy_to_slice(&mut event_type);

        Ok(Self {
            id,
            user_session,
            user_id,
            event_type,
        })
    }
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Access - ID: {}, Session: {}, UserID: {}, Event: {}",
            self.id,
            self.user_session(),
            self.user_id,
            self.event_type()
        )
    }
}
