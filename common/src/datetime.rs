//! Date and time utilities.

use std::{cmp::Ordering, str::FromStr};

use derive_more::{Display, Error};
use time::{
    format_description::well_known::{Iso8601, Rfc3339},
    PrimitiveDateTime, UtcOffset,
};

/// UTC date and time.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct DateTime(time::OffsetDateTime);

impl DateTime {
    /// A [`DateTime`] representing the Unix epoch.
    pub const UNIX_EPOCH: Self = Self(time::OffsetDateTime::UNIX_EPOCH);

    /// Creates a new [`DateTime`] representing the current date and time.
    #[must_use]
    pub fn now() -> Self {
        Self(time::OffsetDateTime::now_utc())
    }

    /// Creates a new [`DateTime`] from the provided [`UNIX_EPOCH`] timestamp.
    ///
    /// [`None`] is returned if the timestamp is invalid.
    ///
    /// [`UNIX_EPOCH`]: Self::UNIX_EPOCH
    #[must_use]
    pub fn from_unix_timestamp(timestamp: i64) -> Option<Self> {
        time::OffsetDateTime::from_unix_timestamp(timestamp)
            .ok()
            .map(Self)
    }

    /// Returns the [`UNIX_EPOCH`] timestamp of this [`DateTime`].
    ///
    /// [`UNIX_EPOCH`]: Self::UNIX_EPOCH
    #[must_use]
    pub fn unix_timestamp(&self) -> i64 {
        self.0.unix_timestamp()
    }

    /// Parses a [`DateTime`] from the provided [RFC 3339] string.
    ///
    /// Timestamps without an offset (as CMS `datetime` fields are stored) are
    /// treated as UTC.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is neither a valid [RFC 3339] date and
    /// time nor an offset-less ISO 8601 one.
    ///
    /// [RFC 3339]: https://tools.ietf.org/html/rfc3339
    pub fn from_rfc3339(input: &str) -> Result<Self, ParseError> {
        match time::OffsetDateTime::parse(input, &Rfc3339) {
            Ok(dt) => Ok(Self(dt.to_offset(UtcOffset::UTC))),
            Err(e) => PrimitiveDateTime::parse(input, &Iso8601::DEFAULT)
                .map(|dt| Self(dt.assume_utc()))
                .map_err(|_| ParseError(e)),
        }
    }

    /// Returns the [`DateTime`] as an [RFC 3339] string.
    ///
    /// [RFC 3339]: https://tools.ietf.org/html/rfc3339
    #[expect(clippy::missing_panics_doc, reason = "infallible")]
    #[must_use]
    pub fn to_rfc3339(&self) -> String {
        self.0.format(&Rfc3339).unwrap_or_else(|e| {
            panic!("cannot format `DateTime` as RFC 3339: {e}")
        })
    }
}

impl FromStr for DateTime {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_rfc3339(s)
    }
}

impl Ord for DateTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl PartialOrd for DateTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<DateTime> for time::OffsetDateTime {
    fn from(dt: DateTime) -> Self {
        dt.0
    }
}

/// Error of parsing [`DateTime`] from a string.
#[derive(Clone, Copy, Debug, Display, Error)]
#[display("invalid `DateTime`: {_0}")]
pub struct ParseError(time::error::Parse);

#[cfg(feature = "serde")]
pub mod serde {
    //! Module providing integration with [`serde`] crate.
    //!
    //! [`DateTime`]s are (de)serialized as [RFC 3339] strings.
    //!
    //! [RFC 3339]: https://tools.ietf.org/html/rfc3339

    use serde::{
        de::Error as _, Deserialize, Deserializer, Serialize, Serializer,
    };

    use super::DateTime;

    impl Serialize for DateTime {
        fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
            s.serialize_str(&self.to_rfc3339())
        }
    }

    impl<'de> Deserialize<'de> for DateTime {
        fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
            let s = <std::borrow::Cow<'de, str>>::deserialize(d)?;
            Self::from_rfc3339(&s).map_err(D::Error::custom)
        }
    }
}

#[cfg(feature = "juniper")]
mod juniper {
    //! Module providing integration with [`juniper`] crate.

    use juniper::{graphql_scalar, InputValue, ScalarValue, Value};

    /// Date and time in a [RFC 3339] format.
    ///
    /// [RFC 3339]: https://tools.ietf.org/html/rfc3339
    #[graphql_scalar(with = Self, parse_token(String))]
    type DateTime = crate::DateTime;

    impl DateTime {
        fn to_output<S: ScalarValue>(dt: &DateTime) -> Value<S> {
            Value::scalar(dt.to_rfc3339())
        }

        fn from_input<S: ScalarValue>(
            input: &InputValue<S>,
        ) -> Result<Self, String> {
            input
                .as_string_value()
                .ok_or_else(|| {
                    format!(
                        "Cannot parse `DateTime` input scalar from \
                         non-string value: {input}",
                    )
                })
                .and_then(|s| {
                    Self::from_rfc3339(s).map_err(|e| {
                        format!("Cannot parse `DateTime` input scalar: {e}")
                    })
                })
        }
    }
}

#[cfg(test)]
mod spec {
    use super::DateTime;

    #[test]
    fn parses_offset_timestamps() {
        let dt = DateTime::from_rfc3339("2024-03-01T10:30:00+11:00").unwrap();

        assert_eq!(dt.to_rfc3339(), "2024-02-29T23:30:00Z");
    }

    #[test]
    fn treats_offsetless_timestamps_as_utc() {
        let dt = DateTime::from_rfc3339("2024-03-01T10:30:00").unwrap();

        assert_eq!(dt.to_rfc3339(), "2024-03-01T10:30:00Z");
        assert_eq!(dt.unix_timestamp(), 1_709_289_000);
    }

    #[test]
    fn rejects_garbage() {
        assert!(DateTime::from_rfc3339("yesterday").is_err());
        assert!(DateTime::from_rfc3339("").is_err());
    }
}
