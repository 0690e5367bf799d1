use crate::data::ValidationError;
use chrono::{DateTime, Duration, SecondsFormat, Utc};

/// Width of every slot on the grid, in minutes
pub const SLOT_MINUTES: i64 = 15;

/// Length of a single slot
pub fn slot_length() -> Duration {
    Duration::minutes(SLOT_MINUTES)
}

/// The canonical identity of the slot starting at `start`:
/// ISO-8601 in UTC, millisecond precision, always suffixed with `Z`.
///
/// # Examples
/// ```
/// use chrono::{TimeZone, Utc};
/// use meetgrid_libs::key::slot_key;
///
/// let start = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
/// assert_eq!(slot_key(&start), "2024-01-01T09:00:00.000Z");
/// ```
pub fn slot_key(start: &DateTime<Utc>) -> String {
    start.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Reads a slot key (or any RFC 3339 instant) back into a UTC instant
///
/// # Examples
/// ```
/// use chrono::{TimeZone, Utc};
/// use meetgrid_libs::key::{parse_slot_key, slot_key};
///
/// let start = Utc.with_ymd_and_hms(2024, 6, 1, 9, 15, 0).unwrap();
/// assert_eq!(parse_slot_key(&slot_key(&start)), Ok(start));
/// assert!(parse_slot_key("tomorrow at nine").is_err());
/// ```
pub fn parse_slot_key(key: &str) -> Result<DateTime<Utc>, ValidationError> {
    DateTime::parse_from_rfc3339(key.trim())
        .map(|instant| instant.with_timezone(&Utc))
        .map_err(|_| ValidationError::InvalidSlotKey {
            value: key.to_string(),
        })
}

/// Re-emits an instant string in the canonical key format, so that
/// `2024-01-01T10:00:00+01:00` and `2024-01-01T09:00:00Z` name the same slot.
pub fn normalize_slot_key(key: &str) -> Result<String, ValidationError> {
    parse_slot_key(key).map(|instant| slot_key(&instant))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    #[test]
    fn keys_are_millisecond_utc() {
        let start = Utc.with_ymd_and_hms(2024, 6, 2, 23, 45, 0).unwrap();
        assert_eq!(slot_key(&start), "2024-06-02T23:45:00.000Z");
    }

    #[test]
    fn normalizes_offsets_and_precision() {
        assert_eq!(
            normalize_slot_key("2024-01-01T10:00:00+01:00"),
            Ok("2024-01-01T09:00:00.000Z".to_string())
        );
        assert_eq!(
            normalize_slot_key("2024-01-01T09:00:00Z"),
            Ok("2024-01-01T09:00:00.000Z".to_string())
        );
        assert_eq!(
            normalize_slot_key("2024-01-01"),
            Err(ValidationError::InvalidSlotKey {
                value: "2024-01-01".to_string()
            })
        );
    }

    proptest! {
        #[test]
        fn key_round_trips(millis in -62_135_596_800_000i64..253_402_300_799_000i64) {
            let instant = DateTime::from_timestamp_millis(millis).unwrap();
            prop_assert_eq!(parse_slot_key(&slot_key(&instant)), Ok(instant));
        }
    }
}
