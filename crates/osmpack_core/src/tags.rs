//! Key/value attribute lists.

use std::fmt;
use std::iter::FusedIterator;

use osmpack_memory::{Item, ItemType, SubItem};

/// One key/value pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tag<'a> {
    /// Tag key.
    pub key: &'a str,
    /// Tag value.
    pub value: &'a str,
}

/// View over the payload of a tag list item: a run of `key NUL value NUL`.
#[derive(Clone, Copy, Default)]
pub struct TagList<'a> {
    payload: &'a [u8],
    removed: bool,
}

impl<'a> TagList<'a> {
    /// Returns a list with no tags.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            payload: &[],
            removed: false,
        }
    }

    /// Whether the underlying item is marked as removed.
    #[must_use]
    pub fn removed(&self) -> bool {
        self.removed
    }

    /// Iterates the tags in stored order.
    #[must_use]
    pub fn iter(&self) -> TagIter<'a> {
        TagIter {
            rest: self.payload,
        }
    }

    /// Number of tags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Whether the list has no tags.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    /// Returns the value of the first tag with this key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&'a str> {
        self.iter().find(|tag| tag.key == key).map(|tag| tag.value)
    }

    /// Returns the value for `key`, or `default` if there is none.
    #[must_use]
    pub fn get_value_by_key<'d>(&self, key: &str, default: Option<&'d str>) -> Option<&'d str>
    where
        'a: 'd,
    {
        self.get(key).or(default)
    }

    /// Whether a tag with this key exists.
    #[must_use]
    pub fn has_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

impl<'a> SubItem<'a> for TagList<'a> {
    const ITEM_TYPE: ItemType = ItemType::TagList;

    fn from_item(item: Item<&'a [u8]>) -> Self {
        let removed = item.removed();
        let payload = &item.bytes()[osmpack_memory::ITEM_HEADER_SIZE..item.byte_size()];
        Self { payload, removed }
    }
}

impl<'a> IntoIterator for TagList<'a> {
    type Item = Tag<'a>;
    type IntoIter = TagIter<'a>;

    fn into_iter(self) -> TagIter<'a> {
        self.iter()
    }
}

impl fmt::Debug for TagList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.iter().map(|t| (t.key, t.value)))
            .finish()
    }
}

/// Iterator over the tags of a [`TagList`].
#[derive(Debug, Clone)]
pub struct TagIter<'a> {
    rest: &'a [u8],
}

impl<'a> TagIter<'a> {
    fn next_str(&mut self) -> Option<&'a str> {
        let end = self.rest.iter().position(|&b| b == 0)?;
        let s = std::str::from_utf8(&self.rest[..end]).ok()?;
        self.rest = &self.rest[end + 1..];
        Some(s)
    }
}

impl<'a> Iterator for TagIter<'a> {
    type Item = Tag<'a>;

    fn next(&mut self) -> Option<Tag<'a>> {
        let tag = self
            .next_str()
            .and_then(|key| self.next_str().map(|value| Tag { key, value }));
        if tag.is_none() {
            self.rest = &[];
        }
        tag
    }
}

impl FusedIterator for TagIter<'_> {}

/// Encodes tags as a tag list payload.
pub(crate) fn encode_tags<'t, I>(tags: I) -> Vec<u8>
where
    I: IntoIterator<Item = (&'t str, &'t str)>,
{
    let mut payload = Vec::new();
    for (key, value) in tags {
        payload.extend_from_slice(key.as_bytes());
        payload.push(0);
        payload.extend_from_slice(value.as_bytes());
        payload.push(0);
    }
    payload
}
