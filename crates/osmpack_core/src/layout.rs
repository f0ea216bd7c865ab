//! Binary layout of object records.
//!
//! All integers are little-endian.
//!
//! | offset            | size | field                                   |
//! |-------------------|------|-----------------------------------------|
//! | 0                 | 8    | item header (size, type, flags)         |
//! | 8 (nodes only)    | 8    | location                                |
//! | F + 0             | 8    | id (i64)                                |
//! | F + 8             | 4    | deleted (bit 0) \| version (bits 1..31) |
//! | F + 12            | 8    | timestamp (i64, 0 = invalid)            |
//! | F + 20            | 4    | uid (u32)                               |
//! | F + 24            | 8    | changeset (u64)                         |
//! | F + 32            | 2    | name region length (u16)                |
//! | F + 34            | n    | user name, NUL, zero padding            |
//! | aligned           | ...  | sub-items                               |
//!
//! `F` is the start of the fixed fields: 8, or 16 for nodes. The stored
//! name region length already includes the padding that brings the
//! sub-item region onto an alignment boundary.

use osmpack_memory::{is_aligned, padded_length, ITEM_HEADER_SIZE};

use crate::location::LOCATION_SIZE;
use crate::types::ObjectKind;

/// Type of the stored name region length.
pub type StringSize = u16;

/// Size of the name region length field.
pub const NAME_LENGTH_SIZE: usize = std::mem::size_of::<StringSize>();

/// Size of the fixed fields that follow the item header (and location).
pub const FIXED_FIELDS_SIZE: usize = 32;

/// Size of the fixed object header: item header plus fixed fields.
pub const OBJECT_HEADER_SIZE: usize = ITEM_HEADER_SIZE + FIXED_FIELDS_SIZE;

const _: () = assert!(is_aligned(OBJECT_HEADER_SIZE));
const _: () = assert!(is_aligned(LOCATION_SIZE));

/// Longest user name accepted when writing, in bytes.
pub const MAX_NAME_LENGTH: usize = 256 * 4;

pub(crate) const ID_OFFSET: usize = 0;
pub(crate) const VERSION_OFFSET: usize = 8;
pub(crate) const TIMESTAMP_OFFSET: usize = 12;
pub(crate) const UID_OFFSET: usize = 20;
pub(crate) const CHANGESET_OFFSET: usize = 24;

pub(crate) const DELETED_BIT: u32 = 0x1;
pub(crate) const VERSION_SHIFT: u32 = 1;

/// Offset of the location field. Only meaningful for nodes.
pub const LOCATION_OFFSET: usize = ITEM_HEADER_SIZE;

/// Offset where the fixed fields start.
#[inline]
#[must_use]
pub const fn fields_offset(kind: ObjectKind) -> usize {
    if kind.has_location() {
        ITEM_HEADER_SIZE + LOCATION_SIZE
    } else {
        ITEM_HEADER_SIZE
    }
}

/// Size of everything before the user name: header, location if any, and
/// the name length field.
#[inline]
#[must_use]
pub const fn header_extent(kind: ObjectKind) -> usize {
    fields_offset(kind) + FIXED_FIELDS_SIZE + NAME_LENGTH_SIZE
}

/// Offset of the stored name region length.
#[inline]
#[must_use]
pub const fn name_length_offset(kind: ObjectKind) -> usize {
    header_extent(kind) - NAME_LENGTH_SIZE
}

/// Offset of the first sub-item, given the stored name region length.
#[inline]
#[must_use]
pub const fn children_offset(kind: ObjectKind, stored_name_length: usize) -> usize {
    padded_length(header_extent(kind) + stored_name_length)
}

/// Length to store for a user name of `name_len` bytes: the name, its NUL,
/// and the padding up to the next alignment boundary.
#[inline]
#[must_use]
pub const fn name_region_length(kind: ObjectKind, name_len: usize) -> usize {
    let extent = header_extent(kind);
    padded_length(extent + name_len + 1) - extent
}
