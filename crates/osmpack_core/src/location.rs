//! Fixed-size location embedded in node records.

/// Size of an encoded location in bytes.
pub const LOCATION_SIZE: usize = 8;

/// Raw coordinate value marking an undefined location.
pub const UNDEFINED_COORDINATE: i32 = i32::MAX;

/// A location as stored in a node record: two fixed-point coordinates.
///
/// No projection or precision handling happens here; the values are kept
/// exactly as they are stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Location {
    x: i32,
    y: i32,
}

impl Default for Location {
    fn default() -> Self {
        Self::undefined()
    }
}

impl Location {
    /// Creates a location from raw coordinates.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the undefined location.
    #[must_use]
    pub const fn undefined() -> Self {
        Self {
            x: UNDEFINED_COORDINATE,
            y: UNDEFINED_COORDINATE,
        }
    }

    /// Raw x coordinate.
    #[must_use]
    pub const fn x(self) -> i32 {
        self.x
    }

    /// Raw y coordinate.
    #[must_use]
    pub const fn y(self) -> i32 {
        self.y
    }

    /// Whether both coordinates are set.
    #[must_use]
    pub const fn is_defined(self) -> bool {
        self.x != UNDEFINED_COORDINATE && self.y != UNDEFINED_COORDINATE
    }

    pub(crate) fn to_bytes(self) -> [u8; LOCATION_SIZE] {
        let mut out = [0u8; LOCATION_SIZE];
        out[..4].copy_from_slice(&self.x.to_le_bytes());
        out[4..].copy_from_slice(&self.y.to_le_bytes());
        out
    }

    pub(crate) fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            x: i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
            y: i32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_undefined() {
        assert!(!Location::default().is_defined());
        assert!(!Location::new(5, UNDEFINED_COORDINATE).is_defined());
        assert!(Location::new(-1_000, 515_000_000).is_defined());
    }

    #[test]
    fn bytes_roundtrip() {
        let loc = Location::new(-73_985_000, 40_748_000);
        assert_eq!(Location::from_bytes(&loc.to_bytes()), loc);
    }
}
