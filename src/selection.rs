use crate::submission::Submission;
use std::collections::BTreeSet;
use uuid::Uuid;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DragMode {
    Select,
    Deselect,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DragState {
    Idle,
    Dragging(DragMode),
}

/// Pointer input on the availability grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PointerEvent {
    Down(String),
    Enter(String),
    Up,
}

/// The cells a participant has picked, and the drag in progress if any.
///
/// Pressing a cell starts a drag that selects, or deselects when the pressed
/// cell was already selected. Every cell entered during the drag gets the
/// same treatment until the pointer is released.
///
/// # Examples
/// ```
/// use meetgrid_libs::selection::{DragMode, DragState, PointerEvent, Selection};
///
/// let mut selection = Selection::default();
///
/// selection.handle(PointerEvent::Down("a".to_string()));
/// selection.handle(PointerEvent::Enter("b".to_string()));
/// assert_eq!(selection.state(), DragState::Dragging(DragMode::Select));
///
/// selection.handle(PointerEvent::Up);
/// selection.handle(PointerEvent::Enter("c".to_string()));
///
/// assert_eq!(selection.state(), DragState::Idle);
/// assert_eq!(selection.selected().collect::<Vec<_>>(), vec!["a", "b"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    selected: BTreeSet<String>,
    state: DragState,
}

impl Default for Selection {
    fn default() -> Self {
        Selection {
            selected: BTreeSet::new(),
            state: DragState::Idle,
        }
    }
}

impl Selection {
    /// Starts from a participant's previous submission
    pub fn with_selected<I>(keys: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        Selection {
            selected: keys.into_iter().collect(),
            state: DragState::Idle,
        }
    }

    pub fn handle(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Down(key) => self.press(&key),
            PointerEvent::Enter(key) => self.enter(&key),
            PointerEvent::Up => self.release(),
        }
    }

    pub fn press(&mut self, key: &str) {
        let mode = if self.selected.contains(key) {
            DragMode::Deselect
        } else {
            DragMode::Select
        };

        self.state = DragState::Dragging(mode);
        self.apply(mode, key);
    }

    pub fn enter(&mut self, key: &str) {
        if let DragState::Dragging(mode) = self.state {
            self.apply(mode, key);
        }
    }

    pub fn release(&mut self) {
        self.state = DragState::Idle;
    }

    /// Flips a single cell without touching the drag state
    pub fn toggle(&mut self, key: &str) {
        if !self.selected.remove(key) {
            self.selected.insert(key.to_string());
        }
    }

    fn apply(&mut self, mode: DragMode, key: &str) {
        match mode {
            DragMode::Select => {
                self.selected.insert(key.to_string());
            }
            DragMode::Deselect => {
                self.selected.remove(key);
            }
        }
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    /// Whether the host should hold off its own text selection
    pub fn suppresses_text_selection(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    pub fn is_selected(&self, key: &str) -> bool {
        self.selected.contains(key)
    }

    pub fn selected(&self) -> impl Iterator<Item = &str> {
        self.selected.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn into_submission(self, event_id: Uuid, name: &str) -> Submission {
        Submission {
            event_id,
            name: name.to_string(),
            slots: self.selected.into_iter().collect(),
        }
    }
}
