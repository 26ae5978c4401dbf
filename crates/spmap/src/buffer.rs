use alloc::{boxed::Box, vec::Vec};
use core::ops::Deref;

use crate::cursor::BinaryCursor;

/// The raw bytes of one map file.
///
/// Loaded once and never mutated; cursors borrow from it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ByteBuffer {
    bytes: Box<[u8]>,
}

impl ByteBuffer {
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    /// Starts a new read session at offset zero.
    #[must_use]
    pub fn cursor(&self) -> BinaryCursor<'_> {
        BinaryCursor::new(&self.bytes)
    }
}

impl From<Vec<u8>> for ByteBuffer {
    fn from(bytes: Vec<u8>) -> Self {
        Self {
            bytes: bytes.into_boxed_slice(),
        }
    }
}

impl From<&[u8]> for ByteBuffer {
    fn from(bytes: &[u8]) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }
}

impl Deref for ByteBuffer {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.bytes
    }
}

impl AsRef<[u8]> for ByteBuffer {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}
