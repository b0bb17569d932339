use chrono::prelude::*;

use crate::error::{Error, Result};

// Unix timestamp in nanoseconds.
pub type Timestamp = i64;

/// Converts an RFC 3339 date-time string (up to 9 fractional digits,
/// `Z` or a numeric offset) into nanoseconds since the Unix epoch.
/// Sub-second precision is preserved exactly. Instants outside the
/// i64-nanosecond range (roughly years 1677-2262) are rejected as a
/// record-level error, never a panic.
pub fn to_nanos(value: &str) -> Result<Timestamp> {
    // chrono also tolerates a space separator; the record grammar
    // requires 'T'.
    if value.as_bytes().get(10) != Some(&b'T') {
        return Err(Error::MalformedTimestamp {
            value: value.to_string(),
            source: None,
        });
    }

    let parsed = DateTime::parse_from_rfc3339(value).map_err(|e| Error::MalformedTimestamp {
        value: value.to_string(),
        source: Some(e),
    })?;
    parsed
        .timestamp_nanos_opt()
        .ok_or_else(|| Error::TimestampOutOfRange(value.to_string()))
}

/// Formats a nanosecond timestamp back as RFC 3339 in UTC with full
/// nanosecond precision. `to_nanos(to_rfc3339(n)) == n` for any `n`.
pub fn to_rfc3339(nanos: Timestamp) -> String {
    DateTime::<Utc>::from_timestamp_nanos(nanos).to_rfc3339_opts(SecondsFormat::Nanos, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_nanos_wellformed() -> Result<()> {
        assert_eq!(to_nanos("1970-01-01T00:00:00Z")?, 0);
        assert_eq!(to_nanos("1970-01-01T00:00:00.000000001Z")?, 1);
        assert_eq!(
            to_nanos("2021-05-01T12:00:00.500Z")?,
            1_619_870_400_500_000_000
        );
        assert_eq!(
            to_nanos("2021-05-01T12:00:00.123456789Z")?,
            1_619_870_400_123_456_789
        );
        // Offsets refer to the same instant.
        assert_eq!(
            to_nanos("2021-05-01T21:00:00.500+09:00")?,
            to_nanos("2021-05-01T12:00:00.500Z")?
        );
        // Fractional part is optional.
        assert_eq!(to_nanos("2021-05-01T12:00:00Z")?, 1_619_870_400_000_000_000);
        Ok(())
    }

    #[test]
    fn test_to_nanos_malformed() {
        for value in &[
            "",
            "not a timestamp",
            "2021-05-01",
            "2021-05-01 12:00:00Z",
            "2021-05-01T12:00:00",
            "2021-13-01T12:00:00Z",
        ] {
            match to_nanos(value) {
                Err(Error::MalformedTimestamp { value: v, .. }) => assert_eq!(&v, value),
                other => panic!("expected MalformedTimestamp for {:?}, got {:?}", value, other),
            }
        }
    }

    #[test]
    fn test_to_nanos_out_of_range() {
        // Grammatically valid instants beyond the i64-nanosecond range
        // must come back as an error, not a panic.
        for value in &["2500-01-01T00:00:00Z", "1500-01-01T00:00:00Z"] {
            match to_nanos(value) {
                Err(Error::TimestampOutOfRange(v)) => assert_eq!(&v, value),
                other => panic!(
                    "expected TimestampOutOfRange for {:?}, got {:?}",
                    value, other
                ),
            }
        }
    }

    #[test]
    fn test_round_trip() -> Result<()> {
        for &nanos in &[
            0,
            1,
            999_999_999,
            1_619_870_400_500_000_000,
            1_619_870_400_123_456_789,
            -1_000_000_000,
            i64::from(u32::MAX) * 1_000_000_000 + 42,
        ] {
            assert_eq!(to_nanos(&to_rfc3339(nanos))?, nanos);
        }
        Ok(())
    }
}
