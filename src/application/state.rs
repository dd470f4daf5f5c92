//! The application-state record.

use crate::domain::entities::{EventDetail, EventId, EventSummary};

/// The single state record driving every view.
///
/// All mutation is funneled through the sync controller's operations; the
/// record is passed explicitly wherever it is read, never held as a global.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    /// Events in server order; source of truth is the last successful list
    /// fetch.
    pub events: Vec<EventSummary>,
    /// The selected event, at most one at a time.
    pub selected_id: Option<EventId>,
    /// Full record matching `selected_id`, absent until its fetch lands.
    pub selected_detail: Option<EventDetail>,
    /// True while a list fetch is outstanding.
    pub loading: bool,
    /// Message from the most recent failing action. Sticky: success paths
    /// never clear it; only the next failure overwrites it.
    pub error: Option<String>,
}

impl AppState {
    /// Creates an empty state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears the selection and its detail together.
    pub fn clear_selection(&mut self) {
        self.selected_id = None;
        self.selected_detail = None;
    }

    /// Returns the summary of the selected event, when it is in the list.
    #[must_use]
    pub fn selected_summary(&self) -> Option<&EventSummary> {
        let id = self.selected_id?;
        self.events.iter().find(|e| e.id() == id)
    }

    /// True when the selection is consistent: a detail is only held while
    /// something is selected.
    #[must_use]
    pub fn selection_is_consistent(&self) -> bool {
        self.selected_id.is_some() || self.selected_detail.is_none()
    }
}
