//! Test fixtures and buffer helpers.
//!
//! Provides convenience functions for filling buffers with object records
//! and for looking at them again.

use std::sync::Once;

use osmpack_core::{objects, ObjectBuilder, ObjectId, OsmObject};
use osmpack_memory::Buffer;
use tracing_subscriber::EnvFilter;

static TRACING: Once = Once::new();

/// Installs a tracing subscriber that writes to the test output.
///
/// The filter is read from `RUST_LOG` and defaults to `warn`. Calling this
/// more than once is harmless.
pub fn init_test_tracing() {
    TRACING.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

/// Builds every record into a fresh buffer, in order.
pub fn buffer_with<I>(builders: I) -> Buffer
where
    I: IntoIterator<Item = ObjectBuilder>,
{
    let mut buffer = Buffer::new();
    let mut count = 0usize;
    for builder in builders {
        builder
            .build_into(&mut buffer)
            .expect("Failed to build object");
        count += 1;
    }
    tracing::debug!(count, committed = buffer.committed(), "filled test buffer");
    buffer
}

/// Builds one record and returns the buffer together with its offset.
pub fn build_one(builder: &ObjectBuilder) -> (Buffer, usize) {
    let mut buffer = Buffer::new();
    let offset = builder
        .build_into(&mut buffer)
        .expect("Failed to build object");
    tracing::debug!(offset, size = buffer.committed(), "built single test object");
    (buffer, offset)
}

/// Returns a mutable view of the record at `offset`.
pub fn object_mut(buffer: &mut Buffer, offset: usize) -> OsmObject<&mut [u8]> {
    OsmObject::new_checked(&mut buffer.data_mut()[offset..]).expect("Not an object record")
}

/// Returns a view of the record at `offset`.
pub fn object_at(buffer: &Buffer, offset: usize) -> OsmObject<&[u8]> {
    OsmObject::new_checked(&buffer.data()[offset..]).expect("Not an object record")
}

/// Ids of all records in the buffer, in stored order.
pub fn ids_of(buffer: &Buffer) -> Vec<ObjectId> {
    objects(buffer.data()).map(|o| o.id()).collect()
}

/// Test scenario helpers.
pub mod scenarios {
    use super::*;
    use osmpack_core::{Location, ObjectKind, Timestamp};

    /// A node with every header field set and one tag list.
    pub fn tagged_node() -> ObjectBuilder {
        ObjectBuilder::new(ObjectKind::Node)
            .id(17)
            .version(4)
            .changeset(1234)
            .uid(42)
            .timestamp(Timestamp::new(1_620_984_600))
            .user("mapper")
            .location(Location::new(135_000_000, 520_000_000))
            .tags([("amenity", "cafe"), ("name", "Corner")])
    }

    /// A way with two tag lists and a node list between them.
    pub fn way_with_children() -> ObjectBuilder {
        ObjectBuilder::new(ObjectKind::Way)
            .id(-8)
            .version(1)
            .user("someone else")
            .tags([("highway", "service")])
            .item(osmpack_memory::ItemType::WayNodeList, vec![0; 24])
            .tags([("oneway", "yes")])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenarios_build() {
        init_test_tracing();
        let buffer = buffer_with([scenarios::tagged_node(), scenarios::way_with_children()]);
        assert_eq!(ids_of(&buffer), [17, -8]);
    }

    #[test]
    fn empty_builder_list_gives_empty_buffer() {
        init_test_tracing();
        let buffer = buffer_with(std::iter::empty());
        assert_eq!(buffer.committed(), 0);
        assert!(ids_of(&buffer).is_empty());
    }

    #[test]
    fn object_views() {
        init_test_tracing();
        let (mut buffer, offset) = build_one(&scenarios::tagged_node());
        object_mut(&mut buffer, offset).set_uid(7);
        assert_eq!(object_at(&buffer, offset).uid(), 7);
    }
}
