use crate::data::TimeSlot;
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use itertools::Itertools;

/// Rows between hour labels. Slots are 15 minutes, so one label per hour.
pub const LABEL_EVERY: usize = 4;

fn local_date(instant: &DateTime<Utc>, timezone: Option<Tz>) -> NaiveDate {
    match timezone {
        Some(tz) => instant.with_timezone(&tz).date_naive(),
        None => instant.date_naive(),
    }
}

/// Splits generated slots into date columns.
///
/// Slots are grouped by the calendar date of their start in `timezone`
/// (UTC when there is none), keeping the generated order.
pub fn group_by_date(slots: &[TimeSlot], timezone: Option<Tz>) -> Vec<(NaiveDate, Vec<TimeSlot>)> {
    let columns = slots
        .iter()
        .group_by(|slot| local_date(&slot.start, timezone));

    let grouped: Vec<_> = columns
        .into_iter()
        .map(|(date, column)| (date, column.cloned().collect()))
        .collect();

    grouped
}

pub fn unique_dates(slots: &[TimeSlot], timezone: Option<Tz>) -> Vec<NaiveDate> {
    slots
        .iter()
        .map(|slot| local_date(&slot.start, timezone))
        .dedup()
        .collect()
}

/// Labels for the rows of the grid, taken from the first date column.
/// Every fourth row is labelled.
///
/// # Examples
/// ```
/// use meetgrid_libs::data::EventWindow;
/// use meetgrid_libs::grid::row_labels;
///
/// let window = EventWindow::parse("2024-06-01", "2024-06-02", "09:00", "10:30", None).unwrap();
/// let labels = row_labels(&window.time_slots(), None);
///
/// assert_eq!(labels.len(), 6);
/// assert_eq!(labels[0].as_deref(), Some("9:00 AM"));
/// assert_eq!(labels[1], None);
/// assert_eq!(labels[4].as_deref(), Some("10:00 AM"));
/// ```
pub fn row_labels(slots: &[TimeSlot], timezone: Option<Tz>) -> Vec<Option<String>> {
    let first_date = match slots.first() {
        Some(slot) => local_date(&slot.start, timezone),
        None => return vec![],
    };

    slots
        .iter()
        .take_while(|slot| local_date(&slot.start, timezone) == first_date)
        .enumerate()
        .map(|(row, slot)| {
            if row % LABEL_EVERY == 0 {
                Some(format_time_slot(&slot.start, timezone))
            } else {
                None
            }
        })
        .collect()
}

/// `2:30 PM` style wall-clock label
pub fn format_time_slot(instant: &DateTime<Utc>, timezone: Option<Tz>) -> String {
    const FORMAT: &str = "%-I:%M %p";

    match timezone {
        Some(tz) => instant.with_timezone(&tz).format(FORMAT).to_string(),
        None => instant.format(FORMAT).to_string(),
    }
}

/// `Mon 6/3` style column header
pub fn format_date_header(date: NaiveDate) -> String {
    date.format("%a %-m/%-d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::EventWindow;
    use chrono::TimeZone;

    #[test]
    fn columns_follow_event_timezone() {
        // 23:00 to 01:00 UTC, which is a single evening in New York
        let window = EventWindow::parse(
            "2024-06-01",
            "2024-06-02",
            "19:00",
            "21:00",
            Some("America/New_York"),
        )
        .unwrap();
        let slots = window.time_slots();

        let columns = group_by_date(&slots, window.timezone);
        assert_eq!(columns.len(), 2);
        assert_eq!(columns[0].0, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        assert_eq!(columns[0].1.len(), 8);
        assert_eq!(columns[1].0, NaiveDate::from_ymd_opt(2024, 6, 2).unwrap());

        // Read in UTC the same slots straddle three dates
        assert_eq!(unique_dates(&slots, None).len(), 3);
    }

    #[test]
    fn labels_use_event_wall_clock() {
        let window =
            EventWindow::parse("2024-06-01", "2024-06-01", "14:30", "16:00", Some("Europe/Berlin"))
                .unwrap();

        let labels = row_labels(&window.time_slots(), window.timezone);
        assert_eq!(
            labels,
            vec![
                Some("2:30 PM".to_string()),
                None,
                None,
                None,
                Some("3:30 PM".to_string()),
                None,
            ]
        );
    }

    #[test]
    fn no_slots_no_labels() {
        assert!(row_labels(&[], None).is_empty());
        assert!(group_by_date(&[], None).is_empty());
    }

    #[test]
    fn formats() {
        let instant = Utc.with_ymd_and_hms(2024, 6, 3, 0, 15, 0).unwrap();

        assert_eq!(format_time_slot(&instant, None), "12:15 AM");
        assert_eq!(
            format_date_header(NaiveDate::from_ymd_opt(2024, 6, 3).unwrap()),
            "Mon 6/3"
        );
    }
}
