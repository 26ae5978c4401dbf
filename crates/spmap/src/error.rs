use alloc::string::String;

use thiserror::Error;

use crate::document::NodeId;

/// A read that the cursor refused to perform.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CursorError {
    #[error(
        "out of bounds reading {what} at offset {offset}: \
         requested {requested} bytes, {available} available"
    )]
    OutOfBounds {
        what: &'static str,
        offset: usize,
        requested: usize,
        available: usize,
    },
}

/// A document construction request that would break a tree invariant.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    #[error("duplicate name \"{name}\" under node {parent}")]
    DuplicateName { name: String, parent: NodeId },
    #[error("unknown node {0}")]
    UnknownNode(NodeId),
}

/// Failure while decoding a map file, with the field and offset it happened
/// at.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{source} while decoding `{field}` at offset {offset}")]
pub struct DecodeError {
    pub(crate) source: DecodeErrorKind,
    pub(crate) field: &'static str,
    pub(crate) offset: usize,
}

impl DecodeError {
    pub(crate) fn new(source: DecodeErrorKind, field: &'static str, offset: usize) -> Self {
        Self {
            source,
            field,
            offset,
        }
    }

    #[must_use]
    pub fn kind(&self) -> &DecodeErrorKind {
        &self.source
    }

    #[must_use]
    pub fn field(&self) -> &'static str {
        self.field
    }

    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeErrorKind {
    #[error("cursor error: {0}")]
    Cursor(#[from] CursorError),
    #[error("unexpected sentinel {found}")]
    UnexpectedSentinel { found: i32 },
    #[error("negative record count {count}")]
    NegativeCount { count: i32 },
}

/// Any failure on the bytes-to-document path.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error("document error: {0}")]
    Document(#[from] DocumentError),
}
