//! Timestamps with an invalid state.

use std::fmt;

use chrono::{DateTime, NaiveDate};

use crate::error::{ObjectError, ObjectResult};

/// Length of an ISO-8601 UTC timestamp such as `2021-05-14T09:30:00Z`.
pub const TIMESTAMP_TEXT_LENGTH: usize = 20;

const ISO_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Seconds since the Unix epoch. The value 0 marks an invalid (unset)
/// timestamp.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Creates a timestamp from seconds since the epoch.
    #[must_use]
    pub const fn new(seconds: i64) -> Self {
        Self(seconds)
    }

    /// Returns the invalid timestamp.
    #[must_use]
    pub const fn invalid() -> Self {
        Self(0)
    }

    /// Whether this timestamp is set.
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0 != 0
    }

    /// Seconds since the epoch.
    #[must_use]
    pub const fn as_seconds(self) -> i64 {
        self.0
    }

    /// Formats as `YYYY-MM-DDThh:mm:ssZ`. Invalid or unrepresentable
    /// timestamps produce an empty string.
    #[must_use]
    pub fn to_iso(self) -> String {
        if !self.is_valid() {
            return String::new();
        }
        DateTime::from_timestamp(self.0, 0)
            .map(|dt| dt.format(ISO_FORMAT).to_string())
            .unwrap_or_default()
    }
}

impl From<i64> for Timestamp {
    fn from(seconds: i64) -> Self {
        Self::new(seconds)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_iso())
    }
}

/// Parses the leading `YYYY-MM-DDThh:mm:ssZ` of `input`.
///
/// Only the first [`TIMESTAMP_TEXT_LENGTH`] bytes are looked at; callers
/// that need the whole input to be a timestamp must check the length
/// themselves.
///
/// # Errors
///
/// Returns [`ObjectError::InvalidTimestamp`] if the input is too short, is
/// not in the expected shape, or names a date or time that does not exist.
pub fn parse_timestamp(input: &str) -> ObjectResult<Timestamp> {
    let bytes = input.as_bytes();
    if bytes.len() < TIMESTAMP_TEXT_LENGTH {
        return Err(ObjectError::invalid_timestamp(input, "too short"));
    }
    let bytes = &bytes[..TIMESTAMP_TEXT_LENGTH];

    for (i, &b) in bytes.iter().enumerate() {
        let ok = match i {
            4 | 7 => b == b'-',
            10 => b == b'T',
            13 | 16 => b == b':',
            19 => b == b'Z',
            _ => b.is_ascii_digit(),
        };
        if !ok {
            return Err(ObjectError::invalid_timestamp(input, "wrong format"));
        }
    }

    let number = |range: std::ops::Range<usize>| {
        bytes[range]
            .iter()
            .fold(0u32, |acc, &b| acc * 10 + u32::from(b - b'0'))
    };

    let year = number(0..4) as i32;
    let seconds = NaiveDate::from_ymd_opt(year, number(5..7), number(8..10))
        .and_then(|date| date.and_hms_opt(number(11..13), number(14..16), number(17..19)))
        .map(|dt| dt.and_utc().timestamp())
        .ok_or_else(|| ObjectError::invalid_timestamp(input, "no such date or time"))?;

    Ok(Timestamp(seconds))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_invalid() {
        assert!(!Timestamp::default().is_valid());
        assert!(!Timestamp::invalid().is_valid());
        assert!(Timestamp::new(1).is_valid());
    }

    #[test]
    fn parse_known_value() {
        let ts = parse_timestamp("2021-05-14T09:30:00Z").unwrap();
        assert_eq!(ts.as_seconds(), 1_620_984_600);
        assert_eq!(ts.to_iso(), "2021-05-14T09:30:00Z");
    }

    #[test]
    fn parse_ignores_tail() {
        let ts = parse_timestamp("2021-05-14T09:30:00Zjunk").unwrap();
        assert_eq!(ts.as_seconds(), 1_620_984_600);
    }

    #[test]
    fn parse_rejects_short_input() {
        assert!(matches!(
            parse_timestamp("2021-05-14T09:30:00"),
            Err(ObjectError::InvalidTimestamp { .. })
        ));
        assert!(parse_timestamp("").is_err());
    }

    #[test]
    fn parse_rejects_wrong_shape() {
        for input in [
            "2021/05/14T09:30:00Z",
            "2021-05-14 09:30:00Z",
            "2021-05-14T09:30:00+",
            "20a1-05-14T09:30:00Z",
        ] {
            assert!(parse_timestamp(input).is_err(), "{input}");
        }
    }

    #[test]
    fn parse_rejects_impossible_dates() {
        assert!(parse_timestamp("2021-02-30T00:00:00Z").is_err());
        assert!(parse_timestamp("2021-13-01T00:00:00Z").is_err());
        assert!(parse_timestamp("2021-01-01T24:00:00Z").is_err());
    }

    #[test]
    fn display_matches_iso() {
        let ts = Timestamp::new(1_000_000_000);
        assert_eq!(format!("{ts}"), "2001-09-09T01:46:40Z");
        assert_eq!(format!("{}", Timestamp::invalid()), "");
    }

    #[test]
    fn ordering_follows_seconds() {
        assert!(Timestamp::new(5) < Timestamp::new(6));
    }
}
