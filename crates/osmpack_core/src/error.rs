//! Error types for osmpack core.

use osmpack_memory::{ItemType, MemoryError};
use thiserror::Error;

/// Result type for core operations.
pub type ObjectResult<T> = Result<T, ObjectError>;

/// Errors that can occur while viewing or editing object records.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ObjectError {
    /// Text could not be parsed as the expected number.
    #[error("illegal {what}: '{input}'")]
    InvalidNumber {
        /// Which attribute was being parsed.
        what: &'static str,
        /// The rejected input.
        input: String,
    },

    /// Text could not be parsed as a timestamp.
    #[error("can not parse timestamp '{input}': {reason}")]
    InvalidTimestamp {
        /// The rejected input.
        input: String,
        /// What was wrong with it.
        reason: &'static str,
    },

    /// An argument had a value outside the accepted set.
    #[error("invalid argument: {message}")]
    InvalidArgument {
        /// Description of the problem.
        message: String,
    },

    /// The item is not one of the object kinds.
    #[error("item of type {item_type} is not an OSM object")]
    NotAnObject {
        /// Type found in the item header.
        item_type: ItemType,
    },

    /// The record's internal offsets do not fit its extent.
    #[error("malformed object record: {message}")]
    Malformed {
        /// Description of the inconsistency.
        message: String,
    },

    /// A user name does not fit.
    #[error("user name of {len} bytes does not fit in {capacity} bytes")]
    NameTooLong {
        /// Length of the name (without terminator).
        len: usize,
        /// Room available (terminator included).
        capacity: usize,
    },

    /// Buffer or item error.
    #[error("memory error: {0}")]
    Memory(#[from] MemoryError),
}

impl ObjectError {
    /// Creates an invalid number error.
    pub fn invalid_number(what: &'static str, input: impl Into<String>) -> Self {
        Self::InvalidNumber {
            what,
            input: input.into(),
        }
    }

    /// Creates an invalid timestamp error.
    pub fn invalid_timestamp(input: impl Into<String>, reason: &'static str) -> Self {
        Self::InvalidTimestamp {
            input: input.into(),
            reason,
        }
    }

    /// Creates an invalid argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Creates a malformed record error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed {
            message: message.into(),
        }
    }

    /// Returns whether this error came from parsing text input.
    #[must_use]
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidNumber { .. } | Self::InvalidTimestamp { .. } | Self::InvalidArgument { .. }
        )
    }
}
