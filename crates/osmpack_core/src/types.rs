//! Core type definitions for osmpack.

use std::fmt;

use osmpack_memory::ItemType;

/// Object identifier. Negative ids denote provisional, local objects.
pub type ObjectId = i64;

/// Absolute value of an [`ObjectId`].
pub type UnsignedObjectId = u64;

/// Object version. Only the low 31 bits are stored.
pub type ObjectVersion = u32;

/// User identifier. 0 means anonymous.
pub type UserId = u32;

/// Signed user identifier as found in some input formats.
pub type SignedUserId = i64;

/// Changeset identifier.
pub type ChangesetId = u64;

/// Largest version that fits in the packed version field.
pub const MAX_VERSION: ObjectVersion = (1 << 31) - 1;

/// Structural variant of an object record.
///
/// The declaration order is the sort order used by
/// [`object_order`](crate::object_order).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ObjectKind {
    /// Point feature. Carries a fixed-size location.
    Node,
    /// Path feature.
    Way,
    /// Relation feature.
    Relation,
    /// Area feature.
    Area,
}

impl ObjectKind {
    /// Maps an item type to an object kind.
    #[must_use]
    pub const fn from_item_type(item_type: ItemType) -> Option<Self> {
        match item_type {
            ItemType::Node => Some(Self::Node),
            ItemType::Way => Some(Self::Way),
            ItemType::Relation => Some(Self::Relation),
            ItemType::Area => Some(Self::Area),
            _ => None,
        }
    }

    /// Returns the item type written to the record header.
    #[must_use]
    pub const fn item_type(self) -> ItemType {
        match self {
            Self::Node => ItemType::Node,
            Self::Way => ItemType::Way,
            Self::Relation => ItemType::Relation,
            Self::Area => ItemType::Area,
        }
    }

    /// Whether records of this kind embed a location.
    #[inline]
    #[must_use]
    pub const fn has_location(self) -> bool {
        matches!(self, Self::Node)
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.item_type().name())
    }
}
