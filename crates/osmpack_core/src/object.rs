//! Views over packed object records.

use std::fmt;

use osmpack_memory::{Item, ItemIter, ItemIterMut, ItemType, SubItem, TypedItemIter};

use crate::error::{ObjectError, ObjectResult};
use crate::layout::{
    self, CHANGESET_OFFSET, DELETED_BIT, ID_OFFSET, LOCATION_OFFSET, TIMESTAMP_OFFSET, UID_OFFSET,
    VERSION_OFFSET, VERSION_SHIFT,
};
use crate::location::{Location, LOCATION_SIZE};
use crate::parse;
use crate::tags::TagList;
use crate::timestamp::{parse_timestamp, Timestamp, TIMESTAMP_TEXT_LENGTH};
use crate::types::{
    ChangesetId, ObjectId, ObjectKind, ObjectVersion, SignedUserId, UnsignedObjectId, UserId,
    MAX_VERSION,
};

#[inline]
fn read_array<const N: usize>(data: &[u8], offset: usize) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(&data[offset..offset + N]);
    out
}

/// A view over one object record (node, way, relation, or area).
///
/// The record lives in a byte container owned elsewhere; the view never
/// allocates or resizes it. Read accessors work for any `B: AsRef<[u8]>`.
/// Setters additionally need `B: AsMut<[u8]>` and only ever touch
/// fixed-width fields or flags, so the record length never changes.
///
/// The container may extend past the record. Only the record's padded
/// size, as given by its item header, is considered part of it.
#[derive(Clone, Copy)]
pub struct OsmObject<B> {
    buf: B,
    kind: ObjectKind,
}

impl<B: AsRef<[u8]>> OsmObject<B> {
    /// Wraps `buf`, validating the item header and the record's offsets.
    ///
    /// # Errors
    ///
    /// Returns [`ObjectError::Memory`] if the item header is malformed,
    /// [`ObjectError::NotAnObject`] if the item is not an object kind, and
    /// [`ObjectError::Malformed`] if the name or sub-item region does not
    /// fit inside the record.
    pub fn new_checked(buf: B) -> ObjectResult<Self> {
        let kind = {
            let data = buf.as_ref();
            let item = Item::new_checked(data)?;
            let kind = ObjectKind::from_item_type(item.item_type()).ok_or(
                ObjectError::NotAnObject {
                    item_type: item.item_type(),
                },
            )?;
            let extent = item.padded_size();
            let header = layout::header_extent(kind);
            if extent < header {
                return Err(ObjectError::malformed(format!(
                    "record of {extent} bytes is shorter than its {header} byte header"
                )));
            }
            let offset = layout::name_length_offset(kind);
            let stored = u16::from_le_bytes(read_array(data, offset)) as usize;
            let children = layout::children_offset(kind, stored);
            if children > extent {
                return Err(ObjectError::malformed(format!(
                    "name region of {stored} bytes runs past record end at {extent}"
                )));
            }
            kind
        };
        Ok(Self { buf, kind })
    }

    /// Wraps the bytes of an item.
    ///
    /// # Errors
    ///
    /// Same as [`new_checked`](Self::new_checked).
    pub fn from_item(item: Item<B>) -> ObjectResult<Self> {
        Self::new_checked(item.into_inner())
    }

    /// Whether records of this item type can be viewed as objects.
    #[must_use]
    pub const fn is_compatible_to(item_type: ItemType) -> bool {
        ObjectKind::from_item_type(item_type).is_some()
    }

    #[inline]
    fn data(&self) -> &[u8] {
        self.buf.as_ref()
    }

    #[inline]
    fn field<const N: usize>(&self, offset: usize) -> [u8; N] {
        read_array(self.data(), layout::fields_offset(self.kind) + offset)
    }

    fn item(&self) -> Item<&[u8]> {
        Item::new_unchecked(self.data())
    }

    /// Structural variant of this record.
    #[must_use]
    pub fn kind(&self) -> ObjectKind {
        self.kind
    }

    /// Item type written in the record header.
    #[must_use]
    pub fn item_type(&self) -> ItemType {
        self.kind.item_type()
    }

    /// Size recorded in the item header.
    #[must_use]
    pub fn byte_size(&self) -> usize {
        self.item().byte_size()
    }

    /// Bytes the record occupies, padding included.
    #[must_use]
    pub fn padded_size(&self) -> usize {
        self.item().padded_size()
    }

    /// The record's bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data()[..self.padded_size()]
    }

    /// Whether the record itself is marked as removed.
    #[must_use]
    pub fn removed(&self) -> bool {
        self.item().removed()
    }

    /// Get ID of this object.
    #[must_use]
    pub fn id(&self) -> ObjectId {
        i64::from_le_bytes(self.field(ID_OFFSET))
    }

    /// Get absolute value of the ID of this object.
    #[must_use]
    pub fn positive_id(&self) -> UnsignedObjectId {
        self.id().unsigned_abs()
    }

    fn version_word(&self) -> u32 {
        u32::from_le_bytes(self.field(VERSION_OFFSET))
    }

    /// Is this object marked as deleted?
    #[must_use]
    pub fn deleted(&self) -> bool {
        self.version_word() & DELETED_BIT != 0
    }

    /// Is this object visible (not deleted)?
    #[must_use]
    pub fn visible(&self) -> bool {
        !self.deleted()
    }

    /// Get version of this object.
    #[must_use]
    pub fn version(&self) -> ObjectVersion {
        self.version_word() >> VERSION_SHIFT
    }

    /// Get timestamp when this object last changed.
    #[must_use]
    pub fn timestamp(&self) -> Timestamp {
        Timestamp::new(i64::from_le_bytes(self.field(TIMESTAMP_OFFSET)))
    }

    /// Get user id of this object.
    #[must_use]
    pub fn uid(&self) -> UserId {
        u32::from_le_bytes(self.field(UID_OFFSET))
    }

    /// Is the author anonymous?
    #[must_use]
    pub fn user_is_anonymous(&self) -> bool {
        self.uid() == 0
    }

    /// Get changeset id of this object.
    #[must_use]
    pub fn changeset(&self) -> ChangesetId {
        u64::from_le_bytes(self.field(CHANGESET_OFFSET))
    }

    /// Location of a node. `None` for other kinds.
    #[must_use]
    pub fn location(&self) -> Option<Location> {
        self.kind.has_location().then(|| {
            Location::from_bytes(&self.data()[LOCATION_OFFSET..LOCATION_OFFSET + LOCATION_SIZE])
        })
    }

    /// Size of everything before the user name.
    #[must_use]
    pub fn header_extent(&self) -> usize {
        layout::header_extent(self.kind)
    }

    /// Length of the name region as stored in the record.
    #[must_use]
    pub fn stored_name_length(&self) -> usize {
        let offset = layout::name_length_offset(self.kind);
        u16::from_le_bytes(read_array(self.data(), offset)) as usize
    }

    /// Offset of the first sub-item within the record.
    #[must_use]
    pub fn children_offset(&self) -> usize {
        layout::children_offset(self.kind, self.stored_name_length())
    }

    fn name_region(&self) -> &[u8] {
        let start = self.header_extent();
        &self.data()[start..start + self.stored_name_length()]
    }

    /// User name bytes, up to the terminator.
    #[must_use]
    pub fn user_bytes(&self) -> &[u8] {
        let region = self.name_region();
        let end = region.iter().position(|&b| b == 0).unwrap_or(region.len());
        &region[..end]
    }

    /// Get user name for this object. Bytes after the first invalid UTF-8
    /// sequence are not returned.
    #[must_use]
    pub fn user(&self) -> &str {
        let bytes = self.user_bytes();
        match std::str::from_utf8(bytes) {
            Ok(s) => s,
            Err(e) => std::str::from_utf8(&bytes[..e.valid_up_to()]).unwrap_or_default(),
        }
    }

    fn children_region(&self) -> &[u8] {
        &self.data()[self.children_offset()..self.padded_size()]
    }

    /// Iterates all sub-items, including those marked as removed.
    #[must_use]
    pub fn items(&self) -> ItemIter<'_> {
        ItemIter::new(self.children_region())
    }

    /// Iterates the sub-items of one type, including those marked as
    /// removed.
    #[must_use]
    pub fn subitems<'s, T: SubItem<'s>>(&'s self) -> TypedItemIter<'s, T> {
        TypedItemIter::new(self.children_region())
    }

    /// Get the list of tags for this object.
    ///
    /// Returns the first tag list not marked as removed, or an empty list.
    #[must_use]
    pub fn tags(&self) -> TagList<'_> {
        self.subitems::<TagList<'_>>()
            .find(|tags| !tags.removed())
            .unwrap_or_default()
    }

    /// Get tag value by key, or `default` if the tag or the tag list is
    /// missing.
    #[must_use]
    pub fn get_value_by_key<'s>(&'s self, key: &str, default: Option<&'s str>) -> Option<&'s str> {
        self.tags().get_value_by_key(key, default)
    }

    /// Returns the backing container.
    pub fn into_inner(self) -> B {
        self.buf
    }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> OsmObject<B> {
    #[inline]
    fn field_mut<const N: usize>(&mut self, offset: usize, bytes: [u8; N]) {
        let start = layout::fields_offset(self.kind) + offset;
        self.buf.as_mut()[start..start + N].copy_from_slice(&bytes);
    }

    fn item_mut(&mut self) -> Item<&mut [u8]> {
        Item::new_unchecked(self.buf.as_mut())
    }

    /// Set ID of this object.
    pub fn set_id(&mut self, id: ObjectId) {
        self.field_mut(ID_OFFSET, id.to_le_bytes());
    }

    /// Set ID of this object from text.
    ///
    /// # Errors
    ///
    /// Returns [`ObjectError::InvalidNumber`] if `id` is not an object id.
    /// The stored id is unchanged on error.
    pub fn set_id_from_text(&mut self, id: &str) -> ObjectResult<()> {
        self.set_id(parse::string_to_object_id(id)?);
        Ok(())
    }

    fn set_version_word(&mut self, word: u32) {
        self.field_mut(VERSION_OFFSET, word.to_le_bytes());
    }

    /// Mark this object as deleted (or not).
    pub fn set_deleted(&mut self, deleted: bool) {
        let word = self.version_word() & !DELETED_BIT;
        self.set_version_word(word | u32::from(deleted));
    }

    /// Mark this object as visible (or not).
    pub fn set_visible(&mut self, visible: bool) {
        self.set_deleted(!visible);
    }

    /// Mark this object visible or deleted from the text `"true"` or
    /// `"false"`.
    ///
    /// # Errors
    ///
    /// Returns [`ObjectError::InvalidArgument`] for any other text. The
    /// flag is unchanged on error.
    pub fn set_visible_from_text(&mut self, visible: &str) -> ObjectResult<()> {
        match visible {
            "true" => self.set_visible(true),
            "false" => self.set_visible(false),
            _ => {
                return Err(ObjectError::invalid_argument(
                    "Unknown value for visible attribute (allowed is 'true' or 'false')",
                ))
            }
        }
        Ok(())
    }

    /// Set object version. Values above [`MAX_VERSION`] are stored as
    /// [`MAX_VERSION`]; the deleted flag is never touched.
    pub fn set_version(&mut self, version: ObjectVersion) {
        let version = version.min(MAX_VERSION);
        let word = (self.version_word() & DELETED_BIT) | (version << VERSION_SHIFT);
        self.set_version_word(word);
    }

    /// Set object version from text.
    ///
    /// # Errors
    ///
    /// Returns [`ObjectError::InvalidNumber`] if `version` is not a version.
    pub fn set_version_from_text(&mut self, version: &str) -> ObjectResult<()> {
        self.set_version(parse::string_to_object_version(version)?);
        Ok(())
    }

    /// Set changeset id of this object.
    pub fn set_changeset(&mut self, changeset: ChangesetId) {
        self.field_mut(CHANGESET_OFFSET, changeset.to_le_bytes());
    }

    /// Set changeset id of this object from text.
    ///
    /// # Errors
    ///
    /// Returns [`ObjectError::InvalidNumber`] if `changeset` is not a
    /// changeset id.
    pub fn set_changeset_from_text(&mut self, changeset: &str) -> ObjectResult<()> {
        self.set_changeset(parse::string_to_changeset_id(changeset)?);
        Ok(())
    }

    /// Set user id of this object.
    pub fn set_uid(&mut self, uid: UserId) {
        self.field_mut(UID_OFFSET, uid.to_le_bytes());
    }

    /// Set user id of this object. Negative values become 0 (anonymous),
    /// values beyond the range of [`UserId`] are clamped to its maximum.
    pub fn set_uid_from_signed(&mut self, uid: SignedUserId) {
        let uid = UserId::try_from(uid.max(0)).unwrap_or(UserId::MAX);
        self.set_uid(uid);
    }

    /// Set user id of this object from text.
    ///
    /// # Errors
    ///
    /// Returns [`ObjectError::InvalidNumber`] if `uid` is not a user id.
    pub fn set_uid_from_text(&mut self, uid: &str) -> ObjectResult<()> {
        self.set_uid(parse::string_to_user_id(uid)?);
        Ok(())
    }

    /// Set the timestamp when this object last changed.
    pub fn set_timestamp(&mut self, timestamp: Timestamp) {
        self.field_mut(TIMESTAMP_OFFSET, timestamp.as_seconds().to_le_bytes());
    }

    /// Set the timestamp from an ISO-8601 string such as
    /// `2021-05-14T09:30:00Z`. Nothing may follow the trailing `Z`.
    ///
    /// # Errors
    ///
    /// Returns [`ObjectError::InvalidTimestamp`] if the text is not a
    /// timestamp and [`ObjectError::InvalidArgument`] if anything follows
    /// it. The stored timestamp is unchanged on error.
    pub fn set_timestamp_from_text(&mut self, timestamp: &str) -> ObjectResult<()> {
        let parsed = parse_timestamp(timestamp)?;
        if timestamp.len() != TIMESTAMP_TEXT_LENGTH {
            return Err(ObjectError::invalid_argument(
                "can not parse timestamp: garbage after timestamp",
            ));
        }
        self.set_timestamp(parsed);
        Ok(())
    }

    /// Set the location of a node.
    ///
    /// # Errors
    ///
    /// Returns [`ObjectError::InvalidArgument`] for kinds without a
    /// location.
    pub fn set_location(&mut self, location: Location) -> ObjectResult<()> {
        if !self.kind.has_location() {
            return Err(ObjectError::invalid_argument(format!(
                "{} has no location",
                self.kind
            )));
        }
        self.buf.as_mut()[LOCATION_OFFSET..LOCATION_OFFSET + LOCATION_SIZE]
            .copy_from_slice(&location.to_bytes());
        Ok(())
    }

    fn name_region_mut(&mut self) -> &mut [u8] {
        let start = self.header_extent();
        let len = self.stored_name_length();
        &mut self.buf.as_mut()[start..start + len]
    }

    /// Clear user name. The stored length and record size are unchanged.
    pub fn clear_user(&mut self) {
        self.name_region_mut().fill(0);
    }

    /// Replace the user name in place.
    ///
    /// # Errors
    ///
    /// Returns [`ObjectError::InvalidArgument`] if the name contains a NUL
    /// byte and [`ObjectError::NameTooLong`] if the name and its terminator
    /// do not fit in the existing name region. The record is unchanged on
    /// error.
    pub fn replace_user(&mut self, user: &str) -> ObjectResult<()> {
        check_user_name(user)?;
        let region = self.name_region_mut();
        if user.len() >= region.len() {
            return Err(ObjectError::NameTooLong {
                len: user.len(),
                capacity: region.len(),
            });
        }
        region.fill(0);
        region[..user.len()].copy_from_slice(user.as_bytes());
        Ok(())
    }

    /// Mark the record itself as removed (or not).
    pub fn set_removed(&mut self, removed: bool) {
        self.item_mut().set_removed(removed);
    }

    /// Iterates all sub-items for mutation.
    pub fn items_mut(&mut self) -> ItemIterMut<'_> {
        let start = self.children_offset();
        let end = self.padded_size();
        ItemIterMut::new(&mut self.buf.as_mut()[start..end])
    }

    /// Remove all tags from this object.
    ///
    /// Tag lists are only marked as removed; the record size is unchanged.
    pub fn remove_tags(&mut self) {
        for mut item in self.items_mut() {
            if item.item_type() == ItemType::TagList {
                item.set_removed(true);
            }
        }
    }
}

impl<B: AsRef<[u8]>> fmt::Debug for OsmObject<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OsmObject")
            .field("kind", &self.kind)
            .field("id", &self.id())
            .field("version", &self.version())
            .field("deleted", &self.deleted())
            .field("timestamp", &self.timestamp())
            .field("uid", &self.uid())
            .field("changeset", &self.changeset())
            .field("user", &self.user())
            .finish()
    }
}

/// Rejects user names that would be cut short at an embedded NUL.
pub(crate) fn check_user_name(user: &str) -> ObjectResult<()> {
    if user.contains('\0') {
        return Err(ObjectError::invalid_argument(
            "user name must not contain NUL bytes",
        ));
    }
    Ok(())
}

/// Iterates the objects among the items of `region`.
///
/// Items of other types are skipped. Node, way, relation and area items
/// whose offsets do not fit their extent are skipped as well, with a
/// `debug` event; use [`OsmObject::from_item`] on
/// [`ItemIter`] to see those errors.
pub fn objects(region: &[u8]) -> impl Iterator<Item = OsmObject<&[u8]>> + Clone + '_ {
    ItemIter::new(region)
        .filter(|item| OsmObject::<&[u8]>::is_compatible_to(item.item_type()))
        .filter_map(|item| match OsmObject::from_item(item) {
            Ok(obj) => Some(obj),
            Err(e) => {
                tracing::debug!(error = %e, "skipping malformed object record");
                None
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::ObjectBuilder;
    use osmpack_memory::{padded_length, Buffer, MemoryError};

    fn build(builder: ObjectBuilder) -> (Buffer, usize) {
        let mut buffer = Buffer::new();
        let offset = builder.build_into(&mut buffer).unwrap();
        (buffer, offset)
    }

    fn view(buffer: &Buffer, offset: usize) -> OsmObject<&[u8]> {
        OsmObject::new_checked(&buffer.data()[offset..]).unwrap()
    }

    fn view_mut(buffer: &mut Buffer, offset: usize) -> OsmObject<&mut [u8]> {
        OsmObject::new_checked(&mut buffer.data_mut()[offset..]).unwrap()
    }

    #[test]
    fn reads_built_fields() {
        let (buffer, offset) = build(
            ObjectBuilder::new(ObjectKind::Way)
                .id(-17)
                .version(4)
                .changeset(99)
                .uid(42)
                .timestamp(Timestamp::new(1_620_984_600))
                .user("mapper"),
        );
        let obj = view(&buffer, offset);
        assert_eq!(obj.kind(), ObjectKind::Way);
        assert_eq!(obj.id(), -17);
        assert_eq!(obj.positive_id(), 17);
        assert_eq!(obj.version(), 4);
        assert_eq!(obj.changeset(), 99);
        assert_eq!(obj.uid(), 42);
        assert!(!obj.user_is_anonymous());
        assert!(obj.visible());
        assert_eq!(obj.timestamp().as_seconds(), 1_620_984_600);
        assert_eq!(obj.user(), "mapper");
        assert_eq!(obj.location(), None);
    }

    #[test]
    fn name_length_sets_children_offset() {
        for name in ["", "a", "seven!!", "exactly-eight-b", "a much longer user name"] {
            for kind in [ObjectKind::Node, ObjectKind::Relation] {
                let (buffer, offset) = build(ObjectBuilder::new(kind).user(name));
                let obj = view(&buffer, offset);
                assert_eq!(obj.user(), name);
                let expected = padded_length(obj.header_extent() + name.len() + 1);
                assert_eq!(obj.children_offset(), expected);
                assert_eq!(
                    obj.children_offset(),
                    obj.header_extent() + obj.stored_name_length()
                );
                assert_eq!(obj.padded_size() % 8, 0);
            }
        }
    }

    #[test]
    fn node_location() {
        let (mut buffer, offset) = build(
            ObjectBuilder::new(ObjectKind::Node)
                .id(1)
                .location(Location::new(10, 20)),
        );
        assert_eq!(view(&buffer, offset).location(), Some(Location::new(10, 20)));

        let mut obj = view_mut(&mut buffer, offset);
        obj.set_location(Location::undefined()).unwrap();
        assert_eq!(obj.location(), Some(Location::undefined()));
        assert_eq!(obj.id(), 1);
    }

    #[test]
    fn location_rejected_for_ways() {
        let (mut buffer, offset) = build(ObjectBuilder::new(ObjectKind::Way));
        let mut obj = view_mut(&mut buffer, offset);
        assert!(matches!(
            obj.set_location(Location::new(1, 1)),
            Err(ObjectError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn deleted_and_version_share_a_word() {
        let (mut buffer, offset) = build(ObjectBuilder::new(ObjectKind::Way).version(7));
        let mut obj = view_mut(&mut buffer, offset);
        obj.set_deleted(true);
        assert!(obj.deleted());
        assert_eq!(obj.version(), 7);

        obj.set_version(MAX_VERSION);
        assert!(obj.deleted());
        assert_eq!(obj.version(), MAX_VERSION);

        obj.set_visible(true);
        assert!(!obj.deleted());
        assert_eq!(obj.version(), MAX_VERSION);
    }

    #[test]
    fn version_saturates() {
        let (mut buffer, offset) = build(ObjectBuilder::new(ObjectKind::Area));
        let mut obj = view_mut(&mut buffer, offset);
        obj.set_version(u32::MAX);
        assert_eq!(obj.version(), MAX_VERSION);
        assert!(obj.visible());
    }

    #[test]
    fn text_setters() {
        let (mut buffer, offset) = build(ObjectBuilder::new(ObjectKind::Node));
        let mut obj = view_mut(&mut buffer, offset);
        obj.set_id_from_text("-5").unwrap();
        obj.set_version_from_text("3").unwrap();
        obj.set_changeset_from_text("1234").unwrap();
        obj.set_uid_from_text("77").unwrap();
        obj.set_timestamp_from_text("2021-05-14T09:30:00Z").unwrap();
        assert_eq!(obj.id(), -5);
        assert_eq!(obj.version(), 3);
        assert_eq!(obj.changeset(), 1234);
        assert_eq!(obj.uid(), 77);
        assert_eq!(obj.timestamp().to_iso(), "2021-05-14T09:30:00Z");

        assert!(obj.set_id_from_text("abc").is_err());
        assert_eq!(obj.id(), -5);
        assert!(obj.set_version_from_text("1.5").is_err());
        assert_eq!(obj.version(), 3);
    }

    #[test]
    fn visible_from_text() {
        let (mut buffer, offset) = build(ObjectBuilder::new(ObjectKind::Way));
        let mut obj = view_mut(&mut buffer, offset);
        obj.set_visible_from_text("false").unwrap();
        assert!(!obj.visible());
        obj.set_visible_from_text("true").unwrap();
        assert!(obj.visible());

        obj.set_deleted(true);
        for bad in ["True", "1", "", "yes"] {
            assert!(matches!(
                obj.set_visible_from_text(bad),
                Err(ObjectError::InvalidArgument { .. })
            ));
            assert!(obj.deleted());
        }
    }

    #[test]
    fn timestamp_text_boundary() {
        let (mut buffer, offset) = build(ObjectBuilder::new(ObjectKind::Way));
        let mut obj = view_mut(&mut buffer, offset);
        obj.set_timestamp_from_text("2020-01-01T00:00:00Z").unwrap();
        let before = obj.timestamp();

        assert!(matches!(
            obj.set_timestamp_from_text("2020-01-01T00:00:00Zx"),
            Err(ObjectError::InvalidArgument { .. })
        ));
        assert!(matches!(
            obj.set_timestamp_from_text("2020-01-01"),
            Err(ObjectError::InvalidTimestamp { .. })
        ));
        assert_eq!(obj.timestamp(), before);
    }

    #[test]
    fn uid_from_signed_clamps() {
        let (mut buffer, offset) = build(ObjectBuilder::new(ObjectKind::Way).uid(9));
        let mut obj = view_mut(&mut buffer, offset);
        obj.set_uid_from_signed(-1);
        assert_eq!(obj.uid(), 0);
        assert!(obj.user_is_anonymous());
        obj.set_uid_from_signed(123);
        assert_eq!(obj.uid(), 123);
        obj.set_uid_from_signed(i64::MAX);
        assert_eq!(obj.uid(), u32::MAX);
    }

    #[test]
    fn clear_user_keeps_sizes() {
        let (mut buffer, offset) = build(
            ObjectBuilder::new(ObjectKind::Way)
                .user("someone")
                .tags([("a", "b")]),
        );
        let mut obj = view_mut(&mut buffer, offset);
        let stored = obj.stored_name_length();
        let size = obj.byte_size();
        obj.clear_user();
        assert_eq!(obj.user(), "");
        assert_eq!(obj.stored_name_length(), stored);
        assert_eq!(obj.byte_size(), size);
        assert_eq!(obj.tags().get("a"), Some("b"));
    }

    #[test]
    fn replace_user_in_place() {
        let (mut buffer, offset) = build(ObjectBuilder::new(ObjectKind::Way).user("abcdef"));
        let mut obj = view_mut(&mut buffer, offset);
        let capacity = obj.stored_name_length();
        obj.replace_user("xy").unwrap();
        assert_eq!(obj.user(), "xy");

        let too_long = "z".repeat(capacity);
        assert_eq!(
            obj.replace_user(&too_long),
            Err(ObjectError::NameTooLong {
                len: capacity,
                capacity
            })
        );
        assert_eq!(obj.user(), "xy");
    }

    #[test]
    fn replace_user_rejects_nul() {
        let (mut buffer, offset) = build(ObjectBuilder::new(ObjectKind::Way).user("abcdef"));
        let before = buffer.data().to_vec();
        let mut obj = view_mut(&mut buffer, offset);
        assert!(matches!(
            obj.replace_user("x\0y"),
            Err(ObjectError::InvalidArgument { .. })
        ));
        assert_eq!(obj.user(), "abcdef");
        assert_eq!(buffer.data(), &before[..]);
    }

    #[test]
    fn tags_and_lookup() {
        let (buffer, offset) = build(
            ObjectBuilder::new(ObjectKind::Way).tags([("highway", "primary"), ("ref", "A1")]),
        );
        let obj = view(&buffer, offset);
        assert_eq!(obj.tags().len(), 2);
        assert_eq!(obj.get_value_by_key("ref", None), Some("A1"));
        assert_eq!(obj.get_value_by_key("name", Some("-")), Some("-"));
    }

    #[test]
    fn missing_tag_list_is_empty() {
        let (buffer, offset) = build(ObjectBuilder::new(ObjectKind::Relation));
        let obj = view(&buffer, offset);
        assert_eq!(obj.items().count(), 0);
        assert!(obj.tags().is_empty());
        assert_eq!(obj.get_value_by_key("x", None), None);
        assert_eq!(obj.get_value_by_key("x", Some("d")), Some("d"));
    }

    #[test]
    fn typed_iteration_skips_other_types() {
        let (buffer, offset) = build(
            ObjectBuilder::new(ObjectKind::Way)
                .item(ItemType::WayNodeList, vec![1; 16])
                .tags([("a", "1")])
                .item(ItemType::OuterRing, vec![2; 3]),
        );
        let obj = view(&buffer, offset);
        let types: Vec<_> = obj.items().map(|i| i.item_type()).collect();
        assert_eq!(
            types,
            vec![ItemType::WayNodeList, ItemType::TagList, ItemType::OuterRing]
        );
        let tag_lists: Vec<_> = obj.subitems::<TagList<'_>>().collect();
        assert_eq!(tag_lists.len(), 1);
        assert_eq!(tag_lists[0].get("a"), Some("1"));
    }

    #[test]
    fn remove_tags_marks_only() {
        let (mut buffer, offset) = build(
            ObjectBuilder::new(ObjectKind::Way)
                .tags([("a", "1")])
                .item(ItemType::WayNodeList, vec![0; 8]),
        );
        let committed = buffer.committed();
        let mut obj = view_mut(&mut buffer, offset);
        let size = obj.byte_size();
        obj.remove_tags();

        assert_eq!(obj.byte_size(), size);
        assert!(obj.tags().is_empty());
        let removed: Vec<_> = obj.items().map(|i| (i.item_type(), i.removed())).collect();
        assert_eq!(
            removed,
            vec![(ItemType::TagList, true), (ItemType::WayNodeList, false)]
        );
        // removed lists are still visible to typed iteration
        assert_eq!(obj.subitems::<TagList<'_>>().count(), 1);
        drop(obj);
        assert_eq!(buffer.committed(), committed);
    }

    #[test]
    fn rejects_non_objects() {
        let mut buffer = Buffer::new();
        let offset = buffer.reserve_space(8).unwrap();
        osmpack_memory::write_item_header(
            &mut buffer.data_mut()[offset..],
            8,
            ItemType::TagList,
        );
        buffer.commit();
        assert_eq!(
            OsmObject::new_checked(buffer.data()).unwrap_err(),
            ObjectError::NotAnObject {
                item_type: ItemType::TagList
            }
        );
    }

    #[test]
    fn rejects_truncated_records() {
        let (buffer, offset) = build(ObjectBuilder::new(ObjectKind::Way).user("name"));
        let data = &buffer.data()[offset..offset + 16];
        assert!(matches!(
            OsmObject::new_checked(data),
            Err(ObjectError::Memory(MemoryError::OutOfBounds { .. }))
        ));
    }

    #[test]
    fn rejects_name_past_end() {
        let (mut buffer, offset) = build(ObjectBuilder::new(ObjectKind::Way));
        let name_len_at = offset + layout::name_length_offset(ObjectKind::Way);
        buffer.data_mut()[name_len_at..name_len_at + 2].copy_from_slice(&500u16.to_le_bytes());
        assert!(matches!(
            OsmObject::new_checked(&buffer.data()[offset..]),
            Err(ObjectError::Malformed { .. })
        ));
    }

    #[test]
    fn objects_iterates_buffer() {
        let mut buffer = Buffer::new();
        for id in 1..=3 {
            ObjectBuilder::new(ObjectKind::Node)
                .id(id)
                .build_into(&mut buffer)
                .unwrap();
        }
        let ids: Vec<_> = objects(buffer.data()).map(|o| o.id()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn objects_skips_other_items_and_corrupt_records() {
        let mut buffer = Buffer::new();
        ObjectBuilder::new(ObjectKind::Way)
            .id(1)
            .build_into(&mut buffer)
            .unwrap();
        let tags_at = buffer.reserve_space(8).unwrap();
        osmpack_memory::write_item_header(
            &mut buffer.data_mut()[tags_at..],
            8,
            ItemType::TagList,
        );
        buffer.commit();
        let broken = ObjectBuilder::new(ObjectKind::Way)
            .id(2)
            .build_into(&mut buffer)
            .unwrap();
        ObjectBuilder::new(ObjectKind::Way)
            .id(3)
            .build_into(&mut buffer)
            .unwrap();

        let name_len_at = broken + layout::name_length_offset(ObjectKind::Way);
        buffer.data_mut()[name_len_at..name_len_at + 2].copy_from_slice(&500u16.to_le_bytes());

        let ids: Vec<_> = objects(buffer.data()).map(|o| o.id()).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(buffer.items().count(), 4);
    }
}
