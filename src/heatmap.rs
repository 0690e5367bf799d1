use crate::data::{AvailabilityRow, TimeSlot};
use crate::intensity::{Intensity, IntensityLadder};
use crate::key::slot_key;
use log::trace;
#[cfg(feature = "rayon")]
use rayon::prelude::*;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Who is available in one slot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HeatmapEntry {
    pub count: u32,
    /// In the order the rows were supplied
    pub participants: Vec<String>,
}

/// Availability per slot key. Slots nobody picked are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Heatmap(BTreeMap<String, HeatmapEntry>);

impl Heatmap {
    pub fn get(&self, key: &str) -> Option<&HeatmapEntry> {
        self.0.get(key)
    }

    pub fn for_slot(&self, slot: &TimeSlot) -> Option<&HeatmapEntry> {
        self.get(&slot.key)
    }

    /// Number of participants available in `key`, zero if nobody is
    pub fn count(&self, key: &str) -> u32 {
        self.get(key).map_or(0, |entry| entry.count)
    }

    pub fn participants(&self, key: &str) -> &[String] {
        self.get(key)
            .map_or(&[][..], |entry| entry.participants.as_slice())
    }

    /// The largest count of any slot, or zero for an empty heatmap
    pub fn max_count(&self) -> u32 {
        self.0.values().map(|entry| entry.count).max().unwrap_or(0)
    }

    /// Buckets `key` against `max_count`, which callers compute once per
    /// render with [`Heatmap::max_count`]
    pub fn intensity(&self, key: &str, max_count: u32, ladder: &IntensityLadder) -> Intensity {
        ladder.bucket(self.count(key), max_count)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &HeatmapEntry)> {
        self.0.iter().map(|(key, entry)| (key.as_str(), entry))
    }

    pub fn into_inner(self) -> BTreeMap<String, HeatmapEntry> {
        self.0
    }

    fn record(&mut self, row: &AvailabilityRow) {
        let key = slot_key(&row.slot_start);
        trace!("{} available at {}", row.participant_name, key);

        let entry = self.0.entry(key).or_default();
        entry.count += 1;
        entry.participants.push(row.participant_name.clone());
    }

    #[cfg(feature = "rayon")]
    fn merge(mut self, other: Heatmap) -> Heatmap {
        for (key, theirs) in other.0 {
            let ours = self.0.entry(key).or_default();
            ours.count += theirs.count;
            ours.participants.extend(theirs.participants);
        }
        self
    }
}

/// Folds stored availability into a heatmap.
///
/// # Examples
/// ```
/// use chrono::{TimeZone, Utc};
/// use meetgrid_libs::data::AvailabilityRow;
/// use meetgrid_libs::heatmap::calculate_heatmap;
///
/// let nine = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
/// let rows = vec![
///     AvailabilityRow::new(nine, "Bea"),
///     AvailabilityRow::new(nine, "Al"),
/// ];
///
/// let heatmap = calculate_heatmap(&rows);
/// assert_eq!(heatmap.count("2024-01-01T09:00:00.000Z"), 2);
/// assert_eq!(heatmap.participants("2024-01-01T09:00:00.000Z"), ["Bea", "Al"]);
/// assert_eq!(heatmap.count("2024-01-01T09:15:00.000Z"), 0);
/// ```
pub fn calculate_heatmap<'a, I>(rows: I) -> Heatmap
where
    I: IntoIterator<Item = &'a AvailabilityRow>,
{
    rows.into_iter().fold(Heatmap::default(), |mut heatmap, row| {
        heatmap.record(row);
        heatmap
    })
}

/// Same result as [`calculate_heatmap`], computed across threads
#[cfg(feature = "rayon")]
pub fn calculate_heatmap_par(rows: &[AvailabilityRow]) -> Heatmap {
    rows.par_iter()
        .fold(Heatmap::default, |mut heatmap, row| {
            heatmap.record(row);
            heatmap
        })
        .reduce(Heatmap::default, Heatmap::merge)
}

pub fn max_count(heatmap: &Heatmap) -> u32 {
    heatmap.max_count()
}
