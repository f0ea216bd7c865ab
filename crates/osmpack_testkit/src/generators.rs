//! Property-based test generators using proptest.
//!
//! Provides strategies for generating object records that stay within the
//! limits of the packed format.

use osmpack_core::{
    ChangesetId, Location, ObjectBuilder, ObjectId, ObjectKind, ObjectVersion, Timestamp, UserId,
    MAX_VERSION,
};
use proptest::prelude::*;

/// Strategy for generating object kinds.
pub fn object_kind_strategy() -> impl Strategy<Value = ObjectKind> {
    prop_oneof![
        Just(ObjectKind::Node),
        Just(ObjectKind::Way),
        Just(ObjectKind::Relation),
        Just(ObjectKind::Area),
    ]
}

/// Strategy for generating object ids, biased towards small values of
/// both signs.
pub fn object_id_strategy() -> impl Strategy<Value = ObjectId> {
    prop_oneof![
        3 => -1000i64..1000,
        1 => any::<i64>().prop_filter("Id must have a magnitude", |id| *id != i64::MIN),
    ]
}

/// Strategy for generating storable versions.
pub fn version_strategy() -> impl Strategy<Value = ObjectVersion> {
    0..=MAX_VERSION
}

/// Strategy for generating timestamps, some of them invalid.
pub fn timestamp_strategy() -> impl Strategy<Value = Timestamp> {
    prop_oneof![
        1 => Just(Timestamp::invalid()),
        4 => (1i64..4_102_444_800).prop_map(Timestamp::new),
    ]
}

/// Strategy for generating user names.
pub fn user_name_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z0-9 _.äöü-]{0,40}").expect("Invalid regex")
}

/// Strategy for generating tag key/value pairs.
pub fn tags_strategy() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::vec(
        (
            prop::string::string_regex("[a-z:_]{1,12}").expect("Invalid regex"),
            prop::string::string_regex("[a-zA-Z0-9 ]{0,20}").expect("Invalid regex"),
        ),
        0..6,
    )
}

/// Plain description of a record, turned into an [`ObjectBuilder`] on use.
#[derive(Debug, Clone)]
pub struct ObjectTemplate {
    /// Record kind.
    pub kind: ObjectKind,
    /// Object id.
    pub id: ObjectId,
    /// Version.
    pub version: ObjectVersion,
    /// Deleted flag.
    pub deleted: bool,
    /// Timestamp.
    pub timestamp: Timestamp,
    /// User id.
    pub uid: UserId,
    /// Changeset id.
    pub changeset: ChangesetId,
    /// Location, used for nodes.
    pub location: Location,
    /// User name.
    pub user: String,
    /// Tags, written as one tag list when not empty.
    pub tags: Vec<(String, String)>,
}

impl ObjectTemplate {
    /// Returns a builder for this record.
    #[must_use]
    pub fn builder(&self) -> ObjectBuilder {
        let builder = ObjectBuilder::new(self.kind)
            .id(self.id)
            .version(self.version)
            .deleted(self.deleted)
            .timestamp(self.timestamp)
            .uid(self.uid)
            .changeset(self.changeset)
            .location(self.location)
            .user(self.user.as_str());
        if self.tags.is_empty() {
            builder
        } else {
            builder.tags(self.tags.iter().map(|(k, v)| (k.as_str(), v.as_str())))
        }
    }
}

/// Strategy for generating whole records.
pub fn object_template_strategy() -> impl Strategy<Value = ObjectTemplate> {
    (
        object_kind_strategy(),
        object_id_strategy(),
        version_strategy(),
        any::<bool>(),
        timestamp_strategy(),
        any::<UserId>(),
        any::<ChangesetId>(),
        (any::<i32>(), any::<i32>()),
        user_name_strategy(),
        tags_strategy(),
    )
        .prop_map(
            |(kind, id, version, deleted, timestamp, uid, changeset, (x, y), user, tags)| {
                ObjectTemplate {
                    kind,
                    id,
                    version,
                    deleted,
                    timestamp,
                    uid,
                    changeset,
                    location: Location::new(x, y),
                    user,
                    tags,
                }
            },
        )
}

/// Case counts for the record property tests.
///
/// Each case builds whole records into a fresh buffer, so the default stays
/// below proptest's own and shrinking is capped low: a failing record
/// shrinks to its smallest tag list and name within a few dozen steps.
#[derive(Debug, Clone)]
pub struct PropTestConfig {
    /// Cases per property.
    pub cases: u32,
    /// Upper bound on shrink steps after a failure.
    pub max_shrink_iters: u32,
}

impl Default for PropTestConfig {
    fn default() -> Self {
        Self {
            cases: 128,
            max_shrink_iters: 512,
        }
    }
}

impl PropTestConfig {
    /// Smaller run used by the generator self-checks.
    #[must_use]
    pub fn quick() -> Self {
        Self {
            cases: 24,
            max_shrink_iters: 64,
        }
    }

    /// Converts to proptest config.
    #[must_use]
    pub fn to_proptest_config(&self) -> ProptestConfig {
        ProptestConfig {
            cases: self.cases,
            max_shrink_iters: self.max_shrink_iters,
            ..ProptestConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::build_one;
    use osmpack_core::OsmObject;

    proptest! {
        #![proptest_config(PropTestConfig::quick().to_proptest_config())]

        #[test]
        fn generated_templates_build(template in object_template_strategy()) {
            let (buffer, offset) = build_one(&template.builder());
            let obj = OsmObject::new_checked(&buffer.data()[offset..]).unwrap();
            prop_assert_eq!(obj.kind(), template.kind);
            prop_assert_eq!(obj.id(), template.id);
            prop_assert_eq!(obj.version(), template.version);
            prop_assert_eq!(obj.deleted(), template.deleted);
            prop_assert_eq!(obj.user(), template.user.as_str());
            prop_assert_eq!(obj.tags().len(), template.tags.len());
        }

        #[test]
        fn user_names_are_storable(name in user_name_strategy()) {
            prop_assert!(!name.contains('\0'));
            prop_assert!(name.len() <= osmpack_core::MAX_NAME_LENGTH);
        }

        #[test]
        fn ids_have_magnitude(id in object_id_strategy()) {
            prop_assert!(id != i64::MIN);
        }
    }
}
