//! # osmpack Core
//!
//! Packed OpenStreetMap object records on top of `osmpack_memory`.
//!
//! This crate provides:
//! - The binary layout of node, way, relation and area records
//! - [`OsmObject`], a zero-copy view with typed getters and setters
//! - Text setters for attributes as they appear in XML-style input
//! - Iteration over sub-items such as tag lists
//! - Equality and the canonical sort order of records
//! - [`ObjectBuilder`] for writing new records into a buffer
//!
//! ## Example
//!
//! ```rust
//! use osmpack_core::{ObjectBuilder, ObjectKind, OsmObject};
//! use osmpack_memory::Buffer;
//!
//! let mut buffer = Buffer::new();
//! let offset = ObjectBuilder::new(ObjectKind::Node)
//!     .id(17)
//!     .user("mapper")
//!     .build_into(&mut buffer)
//!     .unwrap();
//!
//! let mut node = OsmObject::new_checked(&mut buffer.data_mut()[offset..]).unwrap();
//! node.set_attribute("version", "3").unwrap();
//! node.set_attribute("timestamp", "2021-05-14T09:30:00Z").unwrap();
//! assert_eq!(node.version(), 3);
//! assert_eq!(node.timestamp().to_iso(), "2021-05-14T09:30:00Z");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod attribute;
mod builder;
mod error;
pub mod layout;
mod location;
mod object;
mod order;
pub mod parse;
mod tags;
mod timestamp;
mod types;

pub use attribute::AttributeName;
pub use builder::ObjectBuilder;
pub use error::{ObjectError, ObjectResult};
pub use layout::{MAX_NAME_LENGTH, OBJECT_HEADER_SIZE};
pub use location::{Location, LOCATION_SIZE, UNDEFINED_COORDINATE};
pub use object::{objects, OsmObject};
pub use order::{object_order, object_order_reverse_version, same_type_and_id};
pub use tags::{Tag, TagIter, TagList};
pub use timestamp::{parse_timestamp, Timestamp, TIMESTAMP_TEXT_LENGTH};
pub use types::{
    ChangesetId, ObjectId, ObjectKind, ObjectVersion, SignedUserId, UnsignedObjectId, UserId,
    MAX_VERSION,
};
