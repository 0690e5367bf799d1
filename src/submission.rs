use crate::data::{AvailabilityRow, TimeSlot, ValidationError};
use crate::heatmap::{calculate_heatmap, Heatmap};
use crate::key::parse_slot_key;
use chrono::{DateTime, Utc};
use itertools::Itertools;
use log::info;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use uuid::Uuid;

/// A participant's availability as posted by the grid
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct Submission {
    pub event_id: Uuid,
    pub name: String,
    pub slots: Vec<String>,
}

/// A submission that is safe to store: trimmed name, canonical slots,
/// no duplicates, in chronological order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedSubmission {
    pub event_id: Uuid,
    pub name: String,
    pub slots: Vec<TimeSlot>,
}

impl Submission {
    /// # Examples
    /// ```
    /// use meetgrid_libs::data::ValidationError;
    /// use meetgrid_libs::submission::Submission;
    /// use uuid::Uuid;
    ///
    /// let submission = Submission {
    ///     event_id: Uuid::new_v4(),
    ///     name: "  Ana ".to_string(),
    ///     slots: vec![
    ///         "2024-01-01T10:15:00+01:00".to_string(),
    ///         "2024-01-01T09:00:00.000Z".to_string(),
    ///         "2024-01-01T09:15:00.000Z".to_string(),
    ///     ],
    /// };
    ///
    /// let validated = submission.validate().unwrap();
    /// assert_eq!(validated.name, "Ana");
    /// assert_eq!(validated.slots.len(), 2);
    /// assert_eq!(validated.slots[0].key, "2024-01-01T09:00:00.000Z");
    ///
    /// let empty = Submission { slots: vec![], ..submission };
    /// assert_eq!(empty.validate(), Err(ValidationError::NoSlotsSelected));
    /// ```
    pub fn validate(&self) -> Result<ValidatedSubmission, ValidationError> {
        if self.event_id.is_nil() {
            return Err(ValidationError::MissingField { field: "eventId" });
        }

        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::MissingField { field: "name" });
        }

        if self.slots.is_empty() {
            return Err(ValidationError::NoSlotsSelected);
        }

        let starts = self
            .slots
            .iter()
            .map(|slot| parse_slot_key(slot))
            .collect::<Result<Vec<DateTime<Utc>>, _>>()?;

        Ok(ValidatedSubmission {
            event_id: self.event_id,
            name: name.to_string(),
            slots: starts
                .into_iter()
                .sorted_unstable()
                .dedup()
                .map(TimeSlot::at)
                .collect(),
        })
    }
}

/// Where submissions live between page renders
pub trait AvailabilityStore {
    type Error;

    /// Stores `submission` in place of whatever that participant submitted
    /// before. Slot sets are never merged.
    fn replace(&mut self, submission: ValidatedSubmission) -> Result<(), Self::Error>;

    /// All stored availability for an event, joined with participant names
    fn rows(&self, event_id: &Uuid) -> Result<Vec<AvailabilityRow>, Self::Error>;

    fn heatmap(&self, event_id: &Uuid) -> Result<Heatmap, Self::Error> {
        self.rows(event_id).map(|rows| calculate_heatmap(&rows))
    }
}

#[derive(Debug, Clone)]
struct ParticipantRecord {
    id: Uuid,
    event_id: Uuid,
    name: String,
}

#[derive(Debug, Clone)]
struct SlotRecord {
    participant_id: Uuid,
    event_id: Uuid,
    slot_start: DateTime<Utc>,
}

/// In-process store. Participants are identified by event and name.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    participants: Vec<ParticipantRecord>,
    slots: Vec<SlotRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    fn participant_id(&mut self, event_id: Uuid, name: &str) -> Uuid {
        if let Some(existing) = self
            .participants
            .iter()
            .find(|p| p.event_id == event_id && p.name == name)
        {
            return existing.id;
        }

        let id = Uuid::new_v4();
        self.participants.push(ParticipantRecord {
            id,
            event_id,
            name: name.to_string(),
        });
        id
    }

    pub fn participants(&self, event_id: &Uuid) -> Vec<&str> {
        self.participants
            .iter()
            .filter(|p| &p.event_id == event_id)
            .map(|p| p.name.as_str())
            .collect()
    }
}

impl AvailabilityStore for MemoryStore {
    type Error = Infallible;

    fn replace(&mut self, submission: ValidatedSubmission) -> Result<(), Self::Error> {
        let participant_id = self.participant_id(submission.event_id, &submission.name);

        let before = self.slots.len();
        self.slots.retain(|slot| slot.participant_id != participant_id);
        let removed = before - self.slots.len();

        info!(
            "Replacing {} slots for {} with {}",
            removed,
            submission.name,
            submission.slots.len()
        );

        self.slots
            .extend(submission.slots.into_iter().map(|slot| SlotRecord {
                participant_id,
                event_id: submission.event_id,
                slot_start: slot.start,
            }));

        Ok(())
    }

    fn rows(&self, event_id: &Uuid) -> Result<Vec<AvailabilityRow>, Self::Error> {
        Ok(self
            .slots
            .iter()
            .filter(|slot| &slot.event_id == event_id)
            .filter_map(|slot| {
                self.participants
                    .iter()
                    .find(|p| p.id == slot.participant_id)
                    .map(|p| AvailabilityRow::new(slot.slot_start, &p.name))
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submit(store: &mut MemoryStore, event_id: Uuid, name: &str, slots: &[&str]) {
        let submission = Submission {
            event_id,
            name: name.to_string(),
            slots: slots.iter().map(|s| s.to_string()).collect(),
        };
        store.replace(submission.validate().unwrap()).unwrap();
    }

    #[test]
    fn rejects_missing_fields() {
        let base = Submission {
            event_id: Uuid::new_v4(),
            name: "Ana".to_string(),
            slots: vec!["2024-01-01T09:00:00.000Z".to_string()],
        };

        assert_eq!(
            Submission {
                event_id: Uuid::nil(),
                ..base.clone()
            }
            .validate(),
            Err(ValidationError::MissingField { field: "eventId" })
        );
        assert_eq!(
            Submission {
                name: "   ".to_string(),
                ..base.clone()
            }
            .validate(),
            Err(ValidationError::MissingField { field: "name" })
        );
        assert_eq!(
            Submission {
                slots: vec!["2024-01-01T09:00:00.000Z".to_string(), "noon".to_string()],
                ..base
            }
            .validate(),
            Err(ValidationError::InvalidSlotKey {
                value: "noon".to_string()
            })
        );
    }

    #[test]
    fn resubmission_replaces() {
        let event_id = Uuid::new_v4();
        let mut store = MemoryStore::new();

        submit(&mut store, event_id, "Ana", &["2024-01-01T09:00:00.000Z", "2024-01-01T09:15:00.000Z"]);
        submit(&mut store, event_id, "Ben", &["2024-01-01T09:00:00.000Z"]);
        submit(&mut store, event_id, " Ana", &["2024-01-01T09:30:00.000Z"]);

        let heatmap = store.heatmap(&event_id).unwrap();

        assert_eq!(heatmap.participants("2024-01-01T09:00:00.000Z"), ["Ben"]);
        assert_eq!(heatmap.count("2024-01-01T09:15:00.000Z"), 0);
        assert_eq!(heatmap.participants("2024-01-01T09:30:00.000Z"), ["Ana"]);
        assert_eq!(store.participants(&event_id), vec!["Ana", "Ben"]);
    }

    #[test]
    fn events_are_isolated() {
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();
        let mut store = MemoryStore::new();

        submit(&mut store, first, "Ana", &["2024-01-01T09:00:00.000Z"]);
        submit(&mut store, second, "Ana", &["2024-01-01T09:00:00.000Z"]);
        submit(&mut store, second, "Ana", &["2024-01-01T10:00:00.000Z"]);

        assert_eq!(
            store.rows(&first).unwrap(),
            vec![AvailabilityRow::new(
                parse_slot_key("2024-01-01T09:00:00.000Z").unwrap(),
                "Ana"
            )]
        );
        assert_eq!(store.heatmap(&second).unwrap().len(), 1);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn missing_json_fields_fail_validation() {
        let submission: Submission = serde_json::from_str(r#"{"name":"Ana","slots":["2024-01-01T09:00:00.000Z"]}"#).unwrap();

        assert_eq!(
            submission.validate(),
            Err(ValidationError::MissingField { field: "eventId" })
        );
    }
}
