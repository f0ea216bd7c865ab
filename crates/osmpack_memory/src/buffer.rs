//! Growable, aligned item buffer.

use crate::align::{is_aligned, padded_length};
use crate::config::BufferConfig;
use crate::error::{MemoryError, MemoryResult};
use crate::item::Item;
use crate::iter::ItemIter;

/// A contiguous byte buffer holding a sequence of items.
///
/// Bytes are written in two phases: space is reserved and filled, then
/// [`commit`](Self::commit) makes it part of the committed region that
/// readers see. Uncommitted bytes can be dropped with
/// [`rollback`](Self::rollback).
///
/// # Thread Safety
///
/// The buffer performs no locking. Structural mutation must be serialized
/// against readers by the owner.
#[derive(Debug)]
pub struct Buffer {
    data: Vec<u8>,
    written: usize,
    committed: usize,
    config: BufferConfig,
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Buffer {
    /// Creates a buffer with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(BufferConfig::default())
    }

    /// Creates a buffer with the given configuration.
    #[must_use]
    pub fn with_config(config: BufferConfig) -> Self {
        let capacity = padded_length(config.initial_capacity);
        Self {
            data: vec![0u8; capacity],
            written: 0,
            committed: 0,
            config,
        }
    }

    /// Total bytes allocated.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Bytes written so far, committed or not.
    #[must_use]
    pub fn written(&self) -> usize {
        self.written
    }

    /// Bytes visible to readers.
    #[must_use]
    pub fn committed(&self) -> usize {
        self.committed
    }

    /// Returns the configuration this buffer was created with.
    #[must_use]
    pub fn config(&self) -> &BufferConfig {
        &self.config
    }

    /// Reserves `size` zeroed bytes at the end of the written region and
    /// returns their offset.
    ///
    /// # Errors
    ///
    /// Returns [`MemoryError::Unaligned`] if `size` is not a multiple of the
    /// alignment unit, or [`MemoryError::BufferFull`] if the buffer is full
    /// and may not grow.
    pub fn reserve_space(&mut self, size: usize) -> MemoryResult<usize> {
        if !is_aligned(size) {
            return Err(MemoryError::Unaligned { value: size });
        }
        let needed = self.written + size;
        if needed > self.data.len() {
            if !self.config.auto_grow {
                return Err(MemoryError::BufferFull {
                    requested: size,
                    available: self.data.len() - self.written,
                });
            }
            self.grow(needed);
        }
        let offset = self.written;
        self.data[offset..needed].fill(0);
        self.written = needed;
        Ok(offset)
    }

    fn grow(&mut self, needed: usize) {
        let mut new_capacity = self.data.len().max(crate::align::ALIGN_BYTES);
        while new_capacity < needed {
            new_capacity *= 2;
        }
        tracing::debug!(
            old_capacity = self.data.len(),
            new_capacity,
            "growing buffer"
        );
        self.data.resize(new_capacity, 0);
    }

    /// Commits everything written so far and returns the offset where the
    /// newly committed span starts.
    pub fn commit(&mut self) -> usize {
        let offset = self.committed;
        self.committed = self.written;
        tracing::trace!(offset, committed = self.committed, "buffer commit");
        offset
    }

    /// Discards bytes written since the last commit.
    pub fn rollback(&mut self) {
        tracing::trace!(
            discarded = self.written - self.committed,
            "buffer rollback"
        );
        self.written = self.committed;
    }

    /// Drops all content. Capacity is kept.
    pub fn clear(&mut self) {
        self.written = 0;
        self.committed = 0;
    }

    /// Returns the committed bytes.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data[..self.committed]
    }

    /// Returns the written bytes (committed and pending) for in-place edits.
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data[..self.written]
    }

    fn check_offset(&self, offset: usize) -> MemoryResult<()> {
        if !is_aligned(offset) {
            return Err(MemoryError::Unaligned { value: offset });
        }
        if offset >= self.committed {
            return Err(MemoryError::out_of_bounds(offset, 0, self.committed));
        }
        Ok(())
    }

    /// Returns the committed item starting at `offset`.
    ///
    /// # Errors
    ///
    /// Returns an error if `offset` is unaligned, outside the committed
    /// region, or does not hold a well-formed item header.
    pub fn get(&self, offset: usize) -> MemoryResult<Item<&[u8]>> {
        self.check_offset(offset)?;
        Item::new_checked(&self.data[offset..self.committed]).map_err(|e| relocate(e, offset))
    }

    /// Returns the committed item starting at `offset` for mutation.
    ///
    /// # Errors
    ///
    /// Same as [`get`](Self::get).
    pub fn get_mut(&mut self, offset: usize) -> MemoryResult<Item<&mut [u8]>> {
        self.check_offset(offset)?;
        let committed = self.committed;
        Item::new_checked(&mut self.data[offset..committed]).map_err(|e| relocate(e, offset))
    }

    /// Iterates the committed top-level items.
    #[must_use]
    pub fn items(&self) -> ItemIter<'_> {
        ItemIter::new(self.data())
    }
}

fn relocate(error: MemoryError, base: usize) -> MemoryError {
    match error {
        MemoryError::OutOfBounds { offset, len, size } => MemoryError::OutOfBounds {
            offset: base + offset,
            len,
            size,
        },
        MemoryError::InvalidItemSize { offset, size } => MemoryError::InvalidItemSize {
            offset: base + offset,
            size,
        },
        other => other,
    }
}
