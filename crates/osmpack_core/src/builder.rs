//! Writing new object records into a buffer.

use osmpack_memory::{padded_length, write_item_header, Buffer, ItemType, ITEM_HEADER_SIZE};

use crate::error::{ObjectError, ObjectResult};
use crate::layout::{self, MAX_NAME_LENGTH};
use crate::location::{Location, LOCATION_SIZE};
use crate::object::{check_user_name, OsmObject};
use crate::tags::encode_tags;
use crate::timestamp::Timestamp;
use crate::types::{ChangesetId, ObjectId, ObjectKind, ObjectVersion, UserId};

/// Collects the fields of a new object record and writes it in one go.
///
/// # Example
///
/// ```rust
/// use osmpack_core::{ObjectBuilder, ObjectKind, OsmObject};
/// use osmpack_memory::Buffer;
///
/// let mut buffer = Buffer::new();
/// let offset = ObjectBuilder::new(ObjectKind::Way)
///     .id(42)
///     .version(3)
///     .user("alice")
///     .tags([("highway", "residential")])
///     .build_into(&mut buffer)
///     .unwrap();
///
/// let way = OsmObject::new_checked(&buffer.data()[offset..]).unwrap();
/// assert_eq!(way.user(), "alice");
/// assert_eq!(way.get_value_by_key("highway", None), Some("residential"));
/// ```
#[derive(Debug, Clone)]
pub struct ObjectBuilder {
    kind: ObjectKind,
    id: ObjectId,
    version: ObjectVersion,
    deleted: bool,
    timestamp: Timestamp,
    uid: UserId,
    changeset: ChangesetId,
    location: Location,
    user: String,
    children: Vec<(ItemType, Vec<u8>)>,
}

impl ObjectBuilder {
    /// Starts a record of the given kind with all fields zero and an empty
    /// user name.
    #[must_use]
    pub fn new(kind: ObjectKind) -> Self {
        Self {
            kind,
            id: 0,
            version: 0,
            deleted: false,
            timestamp: Timestamp::invalid(),
            uid: 0,
            changeset: 0,
            location: Location::undefined(),
            user: String::new(),
            children: Vec::new(),
        }
    }

    /// Sets the object id.
    #[must_use]
    pub fn id(mut self, id: ObjectId) -> Self {
        self.id = id;
        self
    }

    /// Sets the version.
    #[must_use]
    pub fn version(mut self, version: ObjectVersion) -> Self {
        self.version = version;
        self
    }

    /// Sets the deleted flag.
    #[must_use]
    pub fn deleted(mut self, deleted: bool) -> Self {
        self.deleted = deleted;
        self
    }

    /// Sets the timestamp.
    #[must_use]
    pub fn timestamp(mut self, timestamp: Timestamp) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Sets the user id.
    #[must_use]
    pub fn uid(mut self, uid: UserId) -> Self {
        self.uid = uid;
        self
    }

    /// Sets the changeset id.
    #[must_use]
    pub fn changeset(mut self, changeset: ChangesetId) -> Self {
        self.changeset = changeset;
        self
    }

    /// Sets the location. Ignored for kinds other than node.
    #[must_use]
    pub fn location(mut self, location: Location) -> Self {
        self.location = location;
        self
    }

    /// Sets the user name.
    #[must_use]
    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.user = user.into();
        self
    }

    /// Appends a tag list holding `tags`.
    #[must_use]
    pub fn tags<'t, I>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = (&'t str, &'t str)>,
    {
        self.children.push((ItemType::TagList, encode_tags(tags)));
        self
    }

    /// Appends a sub-item with a raw payload.
    #[must_use]
    pub fn item(mut self, item_type: ItemType, payload: Vec<u8>) -> Self {
        self.children.push((item_type, payload));
        self
    }

    /// Bytes the finished record will occupy.
    #[must_use]
    pub fn encoded_size(&self) -> usize {
        let extent = layout::header_extent(self.kind);
        let name = layout::name_region_length(self.kind, self.user.len());
        let children: usize = self
            .children
            .iter()
            .map(|(_, payload)| padded_length(ITEM_HEADER_SIZE + payload.len()))
            .sum();
        extent + name + children
    }

    /// Writes the record to the end of `buffer`, commits it, and returns
    /// its offset.
    ///
    /// # Errors
    ///
    /// Returns [`ObjectError::NameTooLong`] if the user name exceeds
    /// [`MAX_NAME_LENGTH`], [`ObjectError::InvalidArgument`] if it contains
    /// a NUL byte, and [`ObjectError::Memory`] if the buffer has no room.
    /// Nothing is written on error.
    pub fn build_into(&self, buffer: &mut Buffer) -> ObjectResult<usize> {
        check_user_name(&self.user)?;
        if self.user.len() > MAX_NAME_LENGTH {
            return Err(ObjectError::NameTooLong {
                len: self.user.len(),
                capacity: MAX_NAME_LENGTH,
            });
        }
        let total = self.encoded_size();
        let byte_size = u32::try_from(total)
            .map_err(|_| ObjectError::malformed(format!("record of {total} bytes is too large")))?;

        let offset = buffer.reserve_space(total)?;
        let data = &mut buffer.data_mut()[offset..offset + total];
        self.write(data, byte_size);

        let result = OsmObject::new_checked(&mut *data).map(|mut obj| {
            obj.set_id(self.id);
            obj.set_version(self.version);
            obj.set_deleted(self.deleted);
            obj.set_timestamp(self.timestamp);
            obj.set_uid(self.uid);
            obj.set_changeset(self.changeset);
        });
        if let Err(e) = result {
            buffer.rollback();
            return Err(e);
        }

        buffer.commit();
        tracing::debug!(
            kind = %self.kind,
            id = self.id,
            size = total,
            children = self.children.len(),
            "built object"
        );
        Ok(offset)
    }

    fn write(&self, data: &mut [u8], byte_size: u32) {
        write_item_header(data, byte_size, self.kind.item_type());
        if self.kind.has_location() {
            data[layout::LOCATION_OFFSET..layout::LOCATION_OFFSET + LOCATION_SIZE]
                .copy_from_slice(&self.location.to_bytes());
        }

        let extent = layout::header_extent(self.kind);
        let stored = layout::name_region_length(self.kind, self.user.len());
        let length_at = layout::name_length_offset(self.kind);
        // stored never exceeds MAX_NAME_LENGTH + ALIGN_BYTES
        data[length_at..extent].copy_from_slice(&(stored as u16).to_le_bytes());
        data[extent..extent + self.user.len()].copy_from_slice(self.user.as_bytes());

        let mut pos = extent + stored;
        for (item_type, payload) in &self.children {
            let size = ITEM_HEADER_SIZE + payload.len();
            write_item_header(&mut data[pos..], size as u32, *item_type);
            data[pos + ITEM_HEADER_SIZE..pos + size].copy_from_slice(payload);
            pos += padded_length(size);
        }
    }
}
