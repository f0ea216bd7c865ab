//! Equality and ordering of object records.
//!
//! Two records are equal when kind, id and version match. The sort order is
//! kind, then id sign (negative first), then absolute id, then version, then
//! timestamp. Timestamps only take part when both sides carry a valid one,
//! which makes the relation intransitive over mixed inputs, so records do
//! not implement `Ord`. Use [`object_order`] with `sort_by`.

use std::cmp::Ordering;

use crate::object::OsmObject;
use crate::timestamp::Timestamp;

impl<B1: AsRef<[u8]>, B2: AsRef<[u8]>> PartialEq<OsmObject<B2>> for OsmObject<B1> {
    fn eq(&self, other: &OsmObject<B2>) -> bool {
        self.kind() == other.kind() && self.id() == other.id() && self.version() == other.version()
    }
}

impl<B: AsRef<[u8]>> Eq for OsmObject<B> {}

/// Timestamps compared only when both are valid.
fn cmp_timestamps(a: Timestamp, b: Timestamp) -> Ordering {
    if a.is_valid() && b.is_valid() {
        a.cmp(&b)
    } else {
        Ordering::Equal
    }
}

fn cmp_identity<A, B>(a: &OsmObject<A>, b: &OsmObject<B>) -> Ordering
where
    A: AsRef<[u8]>,
    B: AsRef<[u8]>,
{
    a.kind()
        .cmp(&b.kind())
        .then_with(|| (a.id() >= 0).cmp(&(b.id() >= 0)))
        .then_with(|| a.positive_id().cmp(&b.positive_id()))
}

/// Orders records by kind, id sign, absolute id, version and timestamp.
///
/// ```rust
/// use osmpack_core::{object_order, objects, ObjectBuilder, ObjectKind};
/// use osmpack_memory::Buffer;
///
/// let mut buffer = Buffer::new();
/// for id in [-7, -5, 3, 8] {
///     ObjectBuilder::new(ObjectKind::Node).id(id).version(1).build_into(&mut buffer).unwrap();
/// }
/// let mut all: Vec<_> = objects(buffer.data()).collect();
/// all.sort_by(object_order);
/// let ids: Vec<_> = all.iter().map(|o| o.id()).collect();
/// assert_eq!(ids, [-5, -7, 3, 8]);
/// ```
pub fn object_order<A, B>(a: &OsmObject<A>, b: &OsmObject<B>) -> Ordering
where
    A: AsRef<[u8]>,
    B: AsRef<[u8]>,
{
    cmp_identity(a, b)
        .then_with(|| a.version().cmp(&b.version()))
        .then_with(|| cmp_timestamps(a.timestamp(), b.timestamp()))
}

/// Like [`object_order`], but newer versions and timestamps come first.
///
/// Sorting with this and keeping the first record of every
/// [`same_type_and_id`] run leaves the latest revision of each object.
pub fn object_order_reverse_version<A, B>(a: &OsmObject<A>, b: &OsmObject<B>) -> Ordering
where
    A: AsRef<[u8]>,
    B: AsRef<[u8]>,
{
    cmp_identity(a, b)
        .then_with(|| b.version().cmp(&a.version()))
        .then_with(|| cmp_timestamps(b.timestamp(), a.timestamp()))
}

/// Whether both records describe the same object, ignoring the revision.
pub fn same_type_and_id<A, B>(a: &OsmObject<A>, b: &OsmObject<B>) -> bool
where
    A: AsRef<[u8]>,
    B: AsRef<[u8]>,
{
    a.kind() == b.kind() && a.id() == b.id()
}

impl<B: AsRef<[u8]>> OsmObject<B> {
    /// `self < other` under [`object_order`].
    #[must_use]
    pub fn precedes<O: AsRef<[u8]>>(&self, other: &OsmObject<O>) -> bool {
        object_order(self, other) == Ordering::Less
    }

    /// `self > other` under [`object_order`].
    #[must_use]
    pub fn follows<O: AsRef<[u8]>>(&self, other: &OsmObject<O>) -> bool {
        other.precedes(self)
    }

    /// `self <= other` under [`object_order`].
    #[must_use]
    pub fn precedes_or_equal<O: AsRef<[u8]>>(&self, other: &OsmObject<O>) -> bool {
        !self.follows(other)
    }

    /// `self >= other` under [`object_order`].
    #[must_use]
    pub fn follows_or_equal<O: AsRef<[u8]>>(&self, other: &OsmObject<O>) -> bool {
        !self.precedes(other)
    }
}
