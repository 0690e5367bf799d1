use crate::data::ValidationError;
use chrono::{DateTime, LocalResult, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use log::debug;

/// Resolves an IANA zone identifier such as `Europe/Berlin`
pub fn parse_tz(name: &str) -> Result<Tz, ValidationError> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| ValidationError::UnknownTimezone {
            name: name.to_string(),
        })
}

/// Resolves an optional zone field. Missing and blank both mean no zone.
///
/// # Examples
/// ```
/// use meetgrid_libs::zone::parse_event_tz;
///
/// assert_eq!(parse_event_tz(Some("  ")), Ok(None));
/// assert_eq!(parse_event_tz(Some("Asia/Tokyo")), Ok(Some(chrono_tz::Asia::Tokyo)));
/// ```
pub fn parse_event_tz(name: Option<&str>) -> Result<Option<Tz>, ValidationError> {
    match name.map(str::trim) {
        Some(name) if !name.is_empty() => parse_tz(name).map(Some),
        _ => Ok(None),
    }
}

/// Converts a wall-clock time in `tz` to the instant it names.
///
/// Times repeated by a fall-back transition resolve to the earlier instant.
/// Times skipped by a spring-forward transition do not exist; they are
/// resolved with [`probe_offset`], which lands after the transition.
///
/// # Examples
/// ```
/// use chrono::{NaiveDate, TimeZone, Utc};
/// use meetgrid_libs::zone::to_utc;
///
/// let civil = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap().and_hms_opt(9, 0, 0).unwrap();
///
/// assert_eq!(
///     to_utc(civil, chrono_tz::Europe::Berlin),
///     Utc.with_ymd_and_hms(2024, 6, 1, 7, 0, 0).unwrap()
/// );
/// ```
pub fn to_utc(civil: NaiveDateTime, tz: Tz) -> DateTime<Utc> {
    match tz.from_local_datetime(&civil) {
        LocalResult::Single(instant) => instant.with_timezone(&Utc),
        LocalResult::Ambiguous(earliest, _) => earliest.with_timezone(&Utc),
        LocalResult::None => {
            debug!("{} does not exist in {}, probing offset", civil, tz.name());
            probe_offset(civil, tz)
        }
    }
}

/// Single pass offset probe: read `civil` as if it were UTC, see which
/// wall-clock time that instant shows in `tz`, and shift by the difference.
///
/// Exact whenever the zone's offset is the same at the trial instant and at
/// the answer. Across a transition the result may be off by the transition's
/// delta.
pub fn probe_offset(civil: NaiveDateTime, tz: Tz) -> DateTime<Utc> {
    let trial = Utc.from_utc_datetime(&civil);
    let reprojected = trial.with_timezone(&tz).naive_local();

    trial + (civil - reprojected)
}
