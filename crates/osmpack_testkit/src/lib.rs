//! # osmpack Testkit
//!
//! Test utilities for osmpack.
//!
//! This crate provides:
//! - Fixtures for building buffers of object records
//! - Property-based test generators using proptest
//! - Tracing setup for tests
//!
//! ## Usage
//!
//! ```rust
//! use osmpack_testkit::prelude::*;
//! use osmpack_core::{ObjectBuilder, ObjectKind};
//!
//! init_test_tracing();
//! let buffer = buffer_with([
//!     ObjectBuilder::new(ObjectKind::Node).id(3),
//!     ObjectBuilder::new(ObjectKind::Node).id(-1),
//! ]);
//! assert_eq!(ids_of(&buffer), [3, -1]);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
}

pub use fixtures::*;
pub use generators::*;
