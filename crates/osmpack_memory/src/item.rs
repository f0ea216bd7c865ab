//! Generic item header and item views.
//!
//! Header layout (little-endian):
//!
//! | bytes  | field                           |
//! |--------|---------------------------------|
//! | 0..4   | byte size (u32, header included)|
//! | 4..6   | item type (u16)                 |
//! | 6      | flags (bit 0: removed)          |
//! | 7      | reserved                        |

use std::fmt;

use crate::align::padded_length;
use crate::error::{MemoryError, MemoryResult};

/// Type used for the size field of an item header.
pub type ItemSize = u32;

/// Size of the generic item header in bytes.
pub const ITEM_HEADER_SIZE: usize = 8;

const SIZE_OFFSET: usize = 0;
const TYPE_OFFSET: usize = 4;
const FLAGS_OFFSET: usize = 6;

const REMOVED_FLAG: u8 = 0x01;

/// Type tag of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
pub enum ItemType {
    /// Unknown or unset type.
    Undefined = 0x00,
    /// Point feature.
    Node = 0x01,
    /// Path feature.
    Way = 0x02,
    /// Relation feature.
    Relation = 0x03,
    /// Area feature.
    Area = 0x04,
    /// Changeset.
    Changeset = 0x05,
    /// Key/value attribute list.
    TagList = 0x11,
    /// Node references of a way.
    WayNodeList = 0x12,
    /// Members of a relation.
    RelationMemberList = 0x13,
    /// Outer ring of an area.
    OuterRing = 0x40,
    /// Inner ring of an area.
    InnerRing = 0x41,
}

impl ItemType {
    /// Converts a raw tag to an item type.
    #[must_use]
    pub const fn from_u16(raw: u16) -> Option<Self> {
        match raw {
            0x00 => Some(Self::Undefined),
            0x01 => Some(Self::Node),
            0x02 => Some(Self::Way),
            0x03 => Some(Self::Relation),
            0x04 => Some(Self::Area),
            0x05 => Some(Self::Changeset),
            0x11 => Some(Self::TagList),
            0x12 => Some(Self::WayNodeList),
            0x13 => Some(Self::RelationMemberList),
            0x40 => Some(Self::OuterRing),
            0x41 => Some(Self::InnerRing),
            _ => None,
        }
    }

    /// Returns the raw tag.
    #[must_use]
    pub const fn as_u16(self) -> u16 {
        self as u16
    }

    /// Returns the lowercase name used in text formats.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Undefined => "undefined",
            Self::Node => "node",
            Self::Way => "way",
            Self::Relation => "relation",
            Self::Area => "area",
            Self::Changeset => "changeset",
            Self::TagList => "tag_list",
            Self::WayNodeList => "way_node_list",
            Self::RelationMemberList => "relation_member_list",
            Self::OuterRing => "outer_ring",
            Self::InnerRing => "inner_ring",
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[inline]
fn read_u32(data: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ])
}

#[inline]
fn read_u16(data: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([data[offset], data[offset + 1]])
}

/// Writes a fresh item header (flags cleared) to the start of `data`.
///
/// # Panics
///
/// Panics if `data` is shorter than [`ITEM_HEADER_SIZE`].
pub fn write_item_header(data: &mut [u8], byte_size: ItemSize, item_type: ItemType) {
    data[SIZE_OFFSET..SIZE_OFFSET + 4].copy_from_slice(&byte_size.to_le_bytes());
    data[TYPE_OFFSET..TYPE_OFFSET + 2].copy_from_slice(&item_type.as_u16().to_le_bytes());
    data[FLAGS_OFFSET] = 0;
    data[FLAGS_OFFSET + 1] = 0;
}

/// Reads the padded length of the item starting at `data`, validating it
/// against the region.
pub(crate) fn checked_padded_size(data: &[u8]) -> MemoryResult<usize> {
    if data.len() < ITEM_HEADER_SIZE {
        return Err(MemoryError::out_of_bounds(0, ITEM_HEADER_SIZE, data.len()));
    }
    let size = read_u32(data, SIZE_OFFSET) as usize;
    if size < ITEM_HEADER_SIZE {
        return Err(MemoryError::InvalidItemSize { offset: 0, size });
    }
    let padded = padded_length(size);
    if padded > data.len() {
        return Err(MemoryError::out_of_bounds(0, padded, data.len()));
    }
    Ok(padded)
}

/// A view over one item.
///
/// The view is backed by any byte container. Read accessors are available
/// for every `B: AsRef<[u8]>`; flag mutation needs `B: AsMut<[u8]>` too.
/// The backing slice may extend past the item; only the first
/// [`padded_size`](Self::padded_size) bytes belong to it.
#[derive(Clone, Copy)]
pub struct Item<B> {
    buf: B,
}

impl<B: AsRef<[u8]>> Item<B> {
    /// Wraps `buf`, validating the header against its length.
    ///
    /// # Errors
    ///
    /// Returns an error if the header is truncated, records a size smaller
    /// than itself, or claims more bytes than `buf` holds.
    pub fn new_checked(buf: B) -> MemoryResult<Self> {
        checked_padded_size(buf.as_ref())?;
        Ok(Self { buf })
    }

    /// Wraps `buf` without validation.
    ///
    /// Accessors panic if `buf` is shorter than the header or than the
    /// size the header records. Use this only for bytes that already
    /// passed [`new_checked`](Self::new_checked).
    pub fn new_unchecked(buf: B) -> Self {
        Self { buf }
    }

    /// Returns the raw type tag.
    #[must_use]
    pub fn raw_type(&self) -> u16 {
        read_u16(self.buf.as_ref(), TYPE_OFFSET)
    }

    /// Returns the item type, [`ItemType::Undefined`] for unknown tags.
    #[must_use]
    pub fn item_type(&self) -> ItemType {
        ItemType::from_u16(self.raw_type()).unwrap_or(ItemType::Undefined)
    }

    /// Returns the size recorded in the header, unpadded.
    #[must_use]
    pub fn byte_size(&self) -> usize {
        read_u32(self.buf.as_ref(), SIZE_OFFSET) as usize
    }

    /// Returns the encoded length, i.e. the distance to the next item.
    #[must_use]
    pub fn padded_size(&self) -> usize {
        padded_length(self.byte_size())
    }

    /// Is this item marked as removed?
    #[must_use]
    pub fn removed(&self) -> bool {
        self.buf.as_ref()[FLAGS_OFFSET] & REMOVED_FLAG != 0
    }

    /// Returns the bytes of this item, header and padding included.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf.as_ref()[..self.padded_size()]
    }

    /// Returns the bytes after the header, up to the recorded size.
    #[must_use]
    pub fn payload(&self) -> &[u8] {
        &self.buf.as_ref()[ITEM_HEADER_SIZE..self.byte_size()]
    }

    /// Returns the backing container.
    pub fn into_inner(self) -> B {
        self.buf
    }
}

impl<'a> Item<&'a [u8]> {
    /// Returns the bytes of this item with the lifetime of the backing slice.
    #[must_use]
    pub fn bytes(&self) -> &'a [u8] {
        &self.buf[..self.padded_size()]
    }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> Item<B> {
    /// Marks this item as removed (or not). The buffer length is unchanged.
    pub fn set_removed(&mut self, removed: bool) {
        let flags = &mut self.buf.as_mut()[FLAGS_OFFSET];
        if removed {
            *flags |= REMOVED_FLAG;
        } else {
            *flags &= !REMOVED_FLAG;
        }
    }

    /// Returns the payload for writing.
    pub fn payload_mut(&mut self) -> &mut [u8] {
        let end = self.byte_size();
        &mut self.buf.as_mut()[ITEM_HEADER_SIZE..end]
    }
}

impl<B: AsRef<[u8]>> fmt::Debug for Item<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Item")
            .field("type", &self.item_type())
            .field("byte_size", &self.byte_size())
            .field("removed", &self.removed())
            .finish()
    }
}
