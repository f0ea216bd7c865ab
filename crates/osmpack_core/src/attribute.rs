//! Setting attributes by name, as found in XML-style input.

use std::fmt;
use std::str::FromStr;

use crate::error::{ObjectError, ObjectResult};
use crate::object::OsmObject;

/// Attribute names understood by [`OsmObject::set_attribute`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeName {
    /// `id`
    Id,
    /// `version`
    Version,
    /// `changeset`
    Changeset,
    /// `timestamp`
    Timestamp,
    /// `uid`
    Uid,
    /// `visible`
    Visible,
}

impl AttributeName {
    /// All recognized names.
    pub const ALL: [Self; 6] = [
        Self::Id,
        Self::Version,
        Self::Changeset,
        Self::Timestamp,
        Self::Uid,
        Self::Visible,
    ];

    /// Looks up a name. Matching is exact and case-sensitive.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "id" => Some(Self::Id),
            "version" => Some(Self::Version),
            "changeset" => Some(Self::Changeset),
            "timestamp" => Some(Self::Timestamp),
            "uid" => Some(Self::Uid),
            "visible" => Some(Self::Visible),
            _ => None,
        }
    }

    /// Returns the attribute name as written in input.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Version => "version",
            Self::Changeset => "changeset",
            Self::Timestamp => "timestamp",
            Self::Uid => "uid",
            Self::Visible => "visible",
        }
    }
}

impl fmt::Display for AttributeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttributeName {
    type Err = ObjectError;

    fn from_str(s: &str) -> ObjectResult<Self> {
        Self::from_name(s)
            .ok_or_else(|| ObjectError::invalid_argument(format!("unknown attribute '{s}'")))
    }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> OsmObject<B> {
    /// Sets the attribute `name` from its text form.
    ///
    /// Unknown names are ignored, so callers can pass every attribute of an
    /// input element through without filtering.
    ///
    /// # Errors
    ///
    /// Returns the error of the matching text setter, e.g.
    /// [`set_uid_from_text`](Self::set_uid_from_text).
    pub fn set_attribute(&mut self, name: &str, value: &str) -> ObjectResult<()> {
        match AttributeName::from_name(name) {
            Some(attr) => self.set_named_attribute(attr, value),
            None => Ok(()),
        }
    }

    /// Sets one attribute from its text form.
    ///
    /// # Errors
    ///
    /// Returns the error of the matching text setter.
    pub fn set_named_attribute(&mut self, name: AttributeName, value: &str) -> ObjectResult<()> {
        match name {
            AttributeName::Id => self.set_id_from_text(value),
            AttributeName::Version => self.set_version_from_text(value),
            AttributeName::Changeset => self.set_changeset_from_text(value),
            AttributeName::Timestamp => self.set_timestamp_from_text(value),
            AttributeName::Uid => self.set_uid_from_text(value),
            AttributeName::Visible => self.set_visible_from_text(value),
        }
    }
}
