use crate::key::{slot_key, slot_length};
use crate::zone::parse_event_tz;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use chrono_tz::Tz;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single 15 minute cell of the availability grid
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimeSlot {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub key: String,
}

impl TimeSlot {
    /// The slot beginning at `start`
    ///
    /// # Examples
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use meetgrid_libs::data::TimeSlot;
    ///
    /// let slot = TimeSlot::at(Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap());
    /// assert_eq!(slot.key, "2024-01-01T09:00:00.000Z");
    /// assert_eq!(slot.end, Utc.with_ymd_and_hms(2024, 1, 1, 9, 15, 0).unwrap());
    /// ```
    pub fn at(start: DateTime<Utc>) -> Self {
        TimeSlot {
            start,
            end: start + slot_length(),
            key: slot_key(&start),
        }
    }
}

/// The dates and daily hours an event is open for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventWindow {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub daily_start: NaiveTime,
    pub daily_end: NaiveTime,
    pub timezone: Option<Tz>,
}

impl EventWindow {
    pub fn new(
        start_date: NaiveDate,
        end_date: NaiveDate,
        daily_start: NaiveTime,
        daily_end: NaiveTime,
        timezone: Option<Tz>,
    ) -> Result<Self, ValidationError> {
        if end_date < start_date {
            return Err(ValidationError::InvalidDateRange {
                start: start_date,
                end: end_date,
            });
        }

        Ok(EventWindow {
            start_date,
            end_date,
            daily_start,
            daily_end,
            timezone,
        })
    }

    /// Builds a window from the string form an event is stored in.
    /// An empty timezone is the same as no timezone.
    ///
    /// # Examples
    /// ```
    /// use meetgrid_libs::data::{EventWindow, ValidationError};
    ///
    /// let window = EventWindow::parse("2024-06-01", "2024-06-02", "09:00", "17:00", Some("Europe/Berlin"));
    /// assert!(window.is_ok());
    ///
    /// assert_eq!(
    ///     EventWindow::parse("2024-06-01", "2024-06-02", "9 o'clock", "17:00", None),
    ///     Err(ValidationError::InvalidTime { value: "9 o'clock".to_string() })
    /// );
    /// ```
    pub fn parse(
        start_date: &str,
        end_date: &str,
        daily_start: &str,
        daily_end: &str,
        timezone: Option<&str>,
    ) -> Result<Self, ValidationError> {
        EventWindow::new(
            parse_date(start_date)?,
            parse_date(end_date)?,
            parse_time(daily_start)?,
            parse_time(daily_end)?,
            parse_event_tz(timezone)?,
        )
    }
}

#[cfg(feature = "arbitrary")]
impl<'a> arbitrary::Arbitrary<'a> for EventWindow {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        let start_date = NaiveDate::from_num_days_from_ce_opt(u.int_in_range(730_000..=750_000)?)
            .ok_or(arbitrary::Error::IncorrectFormat)?;
        let end_date = start_date
            .checked_add_days(chrono::Days::new(u.int_in_range(0..=13)?))
            .ok_or(arbitrary::Error::IncorrectFormat)?;

        let mut time = || -> arbitrary::Result<NaiveTime> {
            NaiveTime::from_hms_opt(u.int_in_range(0..=23)?, u.int_in_range(0..=59)?, 0)
                .ok_or(arbitrary::Error::IncorrectFormat)
        };
        let daily_start = time()?;
        let daily_end = time()?;

        let timezone = if u.arbitrary::<bool>()? {
            Some(*u.choose(&chrono_tz::TZ_VARIANTS)?)
        } else {
            None
        };

        Ok(EventWindow {
            start_date,
            end_date,
            daily_start,
            daily_end,
            timezone,
        })
    }
}

/// The event configuration as it arrives from a form or a stored event row
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct EventConfig {
    pub start_date: String,
    pub end_date: String,
    pub daily_start_time: String,
    pub daily_end_time: String,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub timezone: Option<String>,
}

impl TryFrom<&EventConfig> for EventWindow {
    type Error = ValidationError;

    fn try_from(config: &EventConfig) -> Result<Self, Self::Error> {
        EventWindow::parse(
            &config.start_date,
            &config.end_date,
            &config.daily_start_time,
            &config.daily_end_time,
            config.timezone.as_deref(),
        )
    }
}

/// One stored availability row, already joined with the participant's name
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct AvailabilityRow {
    pub slot_start: DateTime<Utc>,
    pub participant_name: String,
}

impl AvailabilityRow {
    pub fn new(slot_start: DateTime<Utc>, participant_name: &str) -> Self {
        AvailabilityRow {
            slot_start,
            participant_name: participant_name.to_string(),
        }
    }
}

#[derive(Error, Debug, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum ValidationError {
    #[error("Invalid time of day `{value}`. Expected HH:MM")]
    InvalidTime { value: String },
    #[error("Invalid date `{value}`. Expected YYYY-MM-DD")]
    InvalidDate { value: String },
    #[error("Unknown timezone `{name}`")]
    UnknownTimezone { name: String },
    #[error("End date {end} must not be before start date {start}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },
    #[error("Invalid slot `{value}`. Expected an ISO-8601 instant")]
    InvalidSlotKey { value: String },
    #[error("Missing required field `{field}`")]
    MissingField { field: &'static str },
    #[error("No time slots selected")]
    NoSlotsSelected,
}

/// Parses a 24 hour `HH:MM` time of day. A trailing `:SS` is accepted
/// and dropped. Every field is exactly two digits.
pub fn parse_time(value: &str) -> Result<NaiveTime, ValidationError> {
    let invalid = || ValidationError::InvalidTime {
        value: value.to_string(),
    };

    let fields = value.trim().split(':').collect::<Vec<_>>();
    if !(2..=3).contains(&fields.len())
        || !fields
            .iter()
            .all(|field| field.len() == 2 && field.bytes().all(|b| b.is_ascii_digit()))
    {
        return Err(invalid());
    }

    let numbers = fields
        .iter()
        .map(|field| field.parse::<u32>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| invalid())?;

    // No leap seconds
    if numbers.get(2).map_or(false, |&second| second > 59) {
        return Err(invalid());
    }

    NaiveTime::from_hms_opt(numbers[0], numbers[1], 0).ok_or_else(invalid)
}

/// Parses a `YYYY-MM-DD` calendar date. A full RFC 3339 instant is also
/// accepted; only its UTC date is kept.
pub fn parse_date(value: &str) -> Result<NaiveDate, ValidationError> {
    let trimmed = value.trim();

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .or_else(|_| {
            DateTime::parse_from_rfc3339(trimmed).map(|instant| instant.with_timezone(&Utc).date_naive())
        })
        .map_err(|_| ValidationError::InvalidDate {
            value: value.to_string(),
        })
}
