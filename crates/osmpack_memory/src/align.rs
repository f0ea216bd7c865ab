//! Alignment rules shared by every record in a buffer.

/// Every item length in a buffer is a multiple of this many bytes.
pub const ALIGN_BYTES: usize = 8;

/// Rounds `length` up to the next multiple of [`ALIGN_BYTES`].
#[inline]
#[must_use]
pub const fn padded_length(length: usize) -> usize {
    (length + ALIGN_BYTES - 1) & !(ALIGN_BYTES - 1)
}

/// Returns whether `value` is a multiple of [`ALIGN_BYTES`].
#[inline]
#[must_use]
pub const fn is_aligned(value: usize) -> bool {
    value % ALIGN_BYTES == 0
}
