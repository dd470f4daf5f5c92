//! The sync controller: a state machine between the UI and the remote API.
//!
//! Operations mutate [`AppState`] synchronously and return the remote calls
//! to run; the runtime executes those on background tasks and feeds the
//! completions back through [`SyncController::absorb`], which may chain
//! further calls. List and detail fetches carry per-target sequence numbers
//! so a response that lands after a newer request for the same target is
//! discarded instead of clobbering fresher state.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{Local, NaiveDate, SecondsFormat, TimeZone, Utc};
use tracing::{debug, warn};

use crate::application::state::AppState;
use crate::domain::entities::{EventDetail, EventId, EventSummary};
use crate::domain::errors::ApiError;
use crate::domain::ports::{CreatedEvent, EventsPort, NewEvent};

/// A remote call for the runtime to execute on a background task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteCall {
    /// Fetch the full event list.
    FetchList {
        /// Sequence number of this list fetch.
        seq: u64,
    },
    /// Fetch one event's full record.
    FetchDetail {
        /// Sequence number of this detail fetch.
        seq: u64,
        /// Event to fetch.
        id: EventId,
    },
    /// Create a new event.
    Create {
        /// Payload to submit.
        event: NewEvent,
    },
    /// Delete an event.
    Delete {
        /// Event to delete.
        id: EventId,
    },
}

impl RemoteCall {
    /// Executes the call against the port, wrapping the result as the
    /// outcome message to feed back into the controller.
    pub async fn execute(self, api: Arc<dyn EventsPort>) -> CallOutcome {
        match self {
            Self::FetchList { seq } => CallOutcome::ListFetched {
                seq,
                result: api.list_events().await,
            },
            Self::FetchDetail { seq, id } => CallOutcome::DetailFetched {
                seq,
                id,
                result: api.fetch_event(id).await,
            },
            Self::Create { event } => CallOutcome::Created {
                result: api.create_event(event).await,
            },
            Self::Delete { id } => CallOutcome::Deleted {
                id,
                result: api.delete_event(id).await,
            },
        }
    }
}

/// Completion of a remote call.
#[derive(Debug)]
pub enum CallOutcome {
    /// A list fetch finished.
    ListFetched {
        /// Sequence number the fetch was issued with.
        seq: u64,
        /// Events in server order, or the failure.
        result: Result<Vec<EventSummary>, ApiError>,
    },
    /// A detail fetch finished.
    DetailFetched {
        /// Sequence number the fetch was issued with.
        seq: u64,
        /// Event the fetch was for.
        id: EventId,
        /// The full record, or the failure.
        result: Result<EventDetail, ApiError>,
    },
    /// A creation request finished.
    Created {
        /// Server acknowledgement, or the failure.
        result: Result<CreatedEvent, ApiError>,
    },
    /// A deletion request finished.
    Deleted {
        /// Event the deletion was for.
        id: EventId,
        /// Success, or the failure.
        result: Result<(), ApiError>,
    },
}

impl CallOutcome {
    /// True for create completions, success and failure alike. The UI uses
    /// this to reset the form once the create action has settled.
    #[must_use]
    pub const fn settles_create(&self) -> bool {
        matches!(self, Self::Created { .. })
    }
}

/// State machine coordinating [`AppState`] with the remote events API.
///
/// There is no mutual exclusion and no cancellation: overlapping actions
/// interleave freely around their single suspension point, and the sequence
/// guards decide which responses still apply.
pub struct SyncController {
    state: AppState,
    list_seq: u64,
    detail_seq: u64,
    pending_select: Option<EventId>,
}

impl SyncController {
    /// Creates a controller over an empty state.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: AppState::new(),
            list_seq: 0,
            detail_seq: 0,
            pending_select: None,
        }
    }

    /// Read access for the views.
    #[must_use]
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Marks the list as loading and issues a list fetch.
    pub fn refresh(&mut self) -> Vec<RemoteCall> {
        self.state.loading = true;
        self.list_seq += 1;
        debug!(seq = self.list_seq, "issuing list fetch");
        vec![RemoteCall::FetchList { seq: self.list_seq }]
    }

    /// Selects an event optimistically and issues its detail fetch. The row
    /// is marked selected before the fetch resolves.
    pub fn select(&mut self, id: EventId) -> Vec<RemoteCall> {
        self.state.selected_id = Some(id);
        self.detail_seq += 1;
        debug!(seq = self.detail_seq, %id, "issuing detail fetch");
        vec![RemoteCall::FetchDetail {
            seq: self.detail_seq,
            id,
        }]
    }

    /// Builds a creation request from the submitted field map.
    ///
    /// The calendar date is anchored at local midnight and converted to a
    /// full UTC timestamp; a date that fails to convert surfaces as an
    /// error without issuing any call.
    pub fn create(&mut self, fields: &BTreeMap<String, String>) -> Vec<RemoteCall> {
        let date = fields.get("date").map_or("", String::as_str);
        let Some(timestamp) = calendar_date_to_timestamp(date) else {
            warn!(date, "rejecting creation with unparseable date");
            self.state.error = Some(format!("Create failed: invalid date {date:?}"));
            return Vec::new();
        };

        let event = NewEvent::new(
            fields.get("name").cloned().unwrap_or_default(),
            fields.get("description").cloned().unwrap_or_default(),
            timestamp,
            fields.get("location").cloned().unwrap_or_default(),
        );
        vec![RemoteCall::Create { event }]
    }

    /// Issues a deletion for the selected event; a no-op when nothing is
    /// selected.
    pub fn delete_selected(&mut self) -> Vec<RemoteCall> {
        match self.state.selected_id {
            Some(id) => vec![RemoteCall::Delete { id }],
            None => Vec::new(),
        }
    }

    /// Applies a completed call to the state and returns any chained calls.
    pub fn absorb(&mut self, outcome: CallOutcome) -> Vec<RemoteCall> {
        let follow_ups = match outcome {
            CallOutcome::ListFetched { seq, result } => self.absorb_list(seq, result),
            CallOutcome::DetailFetched { seq, id, result } => self.absorb_detail(seq, id, result),
            CallOutcome::Created { result } => self.absorb_created(result),
            CallOutcome::Deleted { id, result } => self.absorb_deleted(id, result),
        };
        debug_assert!(self.state.selection_is_consistent());
        follow_ups
    }

    fn absorb_list(
        &mut self,
        seq: u64,
        result: Result<Vec<EventSummary>, ApiError>,
    ) -> Vec<RemoteCall> {
        if seq != self.list_seq {
            debug!(seq, latest = self.list_seq, "discarding stale list response");
            return Vec::new();
        }

        match result {
            Ok(events) => {
                self.state.events = events;
                self.state.loading = false;

                if let Some(id) = self.pending_select.take() {
                    return self.select(id);
                }
                if self.state.selected_id.is_none() {
                    self.state.selected_id = self.state.events.first().map(EventSummary::id);
                }
                match self.state.selected_id {
                    Some(id) => self.select(id),
                    None => Vec::new(),
                }
            }
            Err(e) => {
                warn!(error = %e, "list fetch failed");
                self.state.error = Some(format!("Failed to load events: {e}"));
                self.state.loading = false;
                // A creation that was waiting on this refresh still moves
                // its selection, as the original flow did.
                match self.pending_select.take() {
                    Some(id) => self.select(id),
                    None => Vec::new(),
                }
            }
        }
    }

    fn absorb_detail(
        &mut self,
        seq: u64,
        id: EventId,
        result: Result<EventDetail, ApiError>,
    ) -> Vec<RemoteCall> {
        if seq != self.detail_seq {
            debug!(seq, latest = self.detail_seq, %id, "discarding stale detail response");
            return Vec::new();
        }

        match result {
            Ok(detail) => {
                // The selection may have been cleared by a delete while the
                // fetch was in flight.
                if self.state.selected_id.is_some() {
                    self.state.selected_detail = Some(detail);
                }
            }
            Err(e) => {
                warn!(error = %e, %id, "detail fetch failed");
                self.state.error = Some(format!("Failed to load event {id}: {e}"));
            }
        }
        Vec::new()
    }

    fn absorb_created(&mut self, result: Result<CreatedEvent, ApiError>) -> Vec<RemoteCall> {
        match result {
            Ok(created) => {
                self.pending_select = created.id.or(self.state.selected_id);
                self.refresh()
            }
            Err(e) => {
                warn!(error = %e, "creation failed");
                self.state.error = Some(format!("Create failed: {e}"));
                Vec::new()
            }
        }
    }

    fn absorb_deleted(&mut self, id: EventId, result: Result<(), ApiError>) -> Vec<RemoteCall> {
        match result {
            Ok(()) => {
                self.state.clear_selection();
                self.refresh()
            }
            Err(e) => {
                warn!(error = %e, %id, "deletion failed");
                self.state.error = Some(format!("Delete failed: {e}"));
                Vec::new()
            }
        }
    }
}

impl Default for SyncController {
    fn default() -> Self {
        Self::new()
    }
}

/// Converts a calendar date (`YYYY-MM-DD`) into a full ISO-8601 timestamp
/// anchored at local midnight.
fn calendar_date_to_timestamp(date: &str) -> Option<String> {
    let day = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
    let midnight = day.and_hms_opt(0, 0, 0)?;
    let local = Local.from_local_datetime(&midnight).earliest()?;
    Some(local.with_timezone(&Utc).to_rfc3339_opts(SecondsFormat::Millis, true))
}
