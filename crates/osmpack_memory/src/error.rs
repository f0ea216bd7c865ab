//! Error types for buffer and item operations.

use thiserror::Error;

/// Result type for memory operations.
pub type MemoryResult<T> = Result<T, MemoryError>;

/// Errors that can occur while reserving space or viewing items.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MemoryError {
    /// The buffer cannot grow and has no room for the request.
    #[error("buffer full: requested {requested} bytes, {available} available")]
    BufferFull {
        /// Bytes requested.
        requested: usize,
        /// Bytes still free in the buffer.
        available: usize,
    },

    /// An access would reach past the end of the byte region.
    #[error("out of bounds: offset {offset}, len {len}, region size {size}")]
    OutOfBounds {
        /// Start of the access.
        offset: usize,
        /// Length of the access.
        len: usize,
        /// Size of the region.
        size: usize,
    },

    /// An item header records a size smaller than the header itself.
    #[error("invalid item size {size} at offset {offset}")]
    InvalidItemSize {
        /// Offset of the item.
        offset: usize,
        /// Size recorded in its header.
        size: usize,
    },

    /// A length or offset is not a multiple of the alignment unit.
    #[error("value {value} is not aligned")]
    Unaligned {
        /// The offending value.
        value: usize,
    },
}

impl MemoryError {
    /// Creates an out of bounds error.
    pub fn out_of_bounds(offset: usize, len: usize, size: usize) -> Self {
        Self::OutOfBounds { offset, len, size }
    }
}
