//! Buffer configuration.

use crate::align::padded_length;

/// Configuration for a [`Buffer`](crate::Buffer).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferConfig {
    /// Capacity allocated up front, in bytes.
    pub initial_capacity: usize,

    /// Whether the buffer may reallocate when it runs out of room.
    pub auto_grow: bool,
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 64 * 1024, // 64 KiB
            auto_grow: true,
        }
    }
}

impl BufferConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the initial capacity. It is rounded up to the alignment unit.
    #[must_use]
    pub const fn initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = padded_length(capacity);
        self
    }

    /// Sets whether the buffer grows on demand.
    #[must_use]
    pub const fn auto_grow(mut self, value: bool) -> Self {
        self.auto_grow = value;
        self
    }
}
