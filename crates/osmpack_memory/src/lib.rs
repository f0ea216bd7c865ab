//! # osmpack Memory
//!
//! Aligned item buffer and generic item views for osmpack.
//!
//! This crate is the lowest layer of osmpack. It knows how items are
//! framed inside a buffer, but it does not interpret their payloads:
//!
//! - Every item starts with an 8-byte header (size, type, flags)
//! - Every item is padded to [`ALIGN_BYTES`]
//! - Items are navigated by their own encoded length, never by scanning
//!
//! ## Example
//!
//! ```rust
//! use osmpack_memory::{Buffer, ItemType, ITEM_HEADER_SIZE};
//!
//! let mut buffer = Buffer::new();
//! let offset = buffer.reserve_space(ITEM_HEADER_SIZE).unwrap();
//! osmpack_memory::write_item_header(
//!     &mut buffer.data_mut()[offset..],
//!     ITEM_HEADER_SIZE as u32,
//!     ItemType::TagList,
//! );
//! buffer.commit();
//!
//! let item = buffer.get(0).unwrap();
//! assert_eq!(item.item_type(), ItemType::TagList);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod align;
mod buffer;
mod config;
mod error;
mod item;
mod iter;

pub use align::{is_aligned, padded_length, ALIGN_BYTES};
pub use buffer::Buffer;
pub use config::BufferConfig;
pub use error::{MemoryError, MemoryResult};
pub use item::{write_item_header, Item, ItemSize, ItemType, ITEM_HEADER_SIZE};
pub use iter::{ItemIter, ItemIterMut, SubItem, TypedItemIter};
