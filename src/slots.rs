use crate::data::{parse_time, EventWindow, TimeSlot, ValidationError};
use crate::key::slot_length;
use crate::zone::{parse_event_tz, to_utc};
use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use log::{debug, trace};

/// Generates the 15 minute slots of an event, day by day.
///
/// Nothing is generated unless every argument is valid.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use meetgrid_libs::slots::generate_time_slots;
///
/// let day = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
/// let slots = generate_time_slots(day, day, "09:00", "17:00", None).unwrap();
///
/// assert_eq!(slots.len(), 32);
/// assert_eq!(slots[0].key, "2024-06-01T09:00:00.000Z");
/// assert_eq!(slots[31].key, "2024-06-01T16:45:00.000Z");
/// ```
pub fn generate_time_slots(
    start_date: NaiveDate,
    end_date: NaiveDate,
    daily_start_time: &str,
    daily_end_time: &str,
    timezone: Option<&str>,
) -> Result<Vec<TimeSlot>, ValidationError> {
    let daily_start = parse_time(daily_start_time)?;
    let daily_end = parse_time(daily_end_time)?;
    let timezone = parse_event_tz(timezone)?;

    EventWindow::new(start_date, end_date, daily_start, daily_end, timezone)
        .map(|window| window.time_slots())
}

impl EventWindow {
    /// Every calendar day of the event, first to last
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end_date = self.end_date;
        self.start_date
            .iter_days()
            .take_while(move |day| *day <= end_date)
    }

    /// The instants the daily window opens and closes on `day`
    ///
    /// # Examples
    /// ```
    /// use chrono::{NaiveDate, TimeZone, Utc};
    /// use meetgrid_libs::data::EventWindow;
    ///
    /// let window = EventWindow::parse("2024-01-15", "2024-01-15", "09:00", "17:00", Some("America/New_York")).unwrap();
    /// let (open, close) = window.day_bounds(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
    ///
    /// assert_eq!(open, Utc.with_ymd_and_hms(2024, 1, 15, 14, 0, 0).unwrap());
    /// assert_eq!(close, Utc.with_ymd_and_hms(2024, 1, 15, 22, 0, 0).unwrap());
    /// ```
    pub fn day_bounds(&self, day: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
        (
            self.resolve(day, self.daily_start),
            self.resolve(day, self.daily_end),
        )
    }

    fn resolve(&self, day: NaiveDate, time: NaiveTime) -> DateTime<Utc> {
        let civil = day.and_time(time);
        match self.timezone {
            Some(tz) => to_utc(civil, tz),
            None => Utc.from_utc_datetime(&civil),
        }
    }

    /// All slots of the event in chronological order
    pub fn time_slots(&self) -> Vec<TimeSlot> {
        self.days()
            .map(|day| {
                trace!("Generating slots for {}", day);
                self.day_bounds(day)
            })
            .quartered()
    }
}

pub trait Quartered {
    fn quartered(self) -> Vec<TimeSlot>;
}

impl<T> Quartered for T
where
    T: Iterator<Item = (DateTime<Utc>, DateTime<Utc>)>,
{
    /// Splits `[open, close)` windows into whole slots.
    /// A remainder shorter than a slot is dropped, and a window that
    /// closes before it opens yields nothing.
    ///
    /// # Examples
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use meetgrid_libs::slots::Quartered;
    ///
    /// let open = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
    /// let close = Utc.with_ymd_and_hms(2024, 1, 1, 9, 40, 0).unwrap();
    ///
    /// let slots = vec![(open, close), (close, open)].into_iter().quartered();
    ///
    /// assert_eq!(slots.len(), 2);
    /// assert_eq!(slots[1].key, "2024-01-01T09:15:00.000Z");
    /// ```
    fn quartered(self) -> Vec<TimeSlot> {
        let mut slots = Vec::with_capacity(self.size_hint().0 * 4);

        for (open, close) in self {
            let mut current = open;

            while current + slot_length() <= close {
                slots.push(TimeSlot::at(current));
                current = current + slot_length();
            }

            if current == open {
                debug!("No slots fit between {} and {}", open, close);
            }
        }

        slots
    }
}
