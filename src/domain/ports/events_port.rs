//! Events port definition.

use async_trait::async_trait;

use crate::domain::entities::{EventDetail, EventId, EventSummary};
use crate::domain::errors::ApiError;

/// Payload for creating a new event.
///
/// The `date` here is already the full ISO-8601 timestamp; the calendar-date
/// conversion happens in the sync controller before the request is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEvent {
    /// Event name.
    pub name: String,
    /// Event description.
    pub description: String,
    /// ISO-8601 timestamp of the event.
    pub date: String,
    /// Event location.
    pub location: String,
}

impl NewEvent {
    /// Creates a new event payload.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        date: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            date: date.into(),
            location: location.into(),
        }
    }
}

/// Server acknowledgement of a creation request.
///
/// The id may be absent when the server response omits one; callers fall
/// back to their previous selection in that case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreatedEvent {
    /// Server-assigned id of the new event, if reported.
    pub id: Option<EventId>,
}

/// Port for CRUD operations on the remote events resource.
#[async_trait]
pub trait EventsPort: Send + Sync {
    /// Fetches all events, in server order.
    async fn list_events(&self) -> Result<Vec<EventSummary>, ApiError>;

    /// Fetches the full record for one event.
    async fn fetch_event(&self, id: EventId) -> Result<EventDetail, ApiError>;

    /// Creates a new event.
    async fn create_event(&self, event: NewEvent) -> Result<CreatedEvent, ApiError>;

    /// Deletes an event.
    async fn delete_event(&self, id: EventId) -> Result<(), ApiError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Scriptable in-memory events port for testing.
    ///
    /// Holds a mutable set of events served by `list_events`/`fetch_event`;
    /// create and delete mutate the set like the real server would. Any
    /// operation can be forced to fail with a given status.
    pub struct MockEventsPort {
        events: Mutex<Vec<EventDetail>>,
        next_id: AtomicUsize,
        fail_status: Mutex<Option<u16>>,
        list_calls: AtomicUsize,
        detail_calls: AtomicUsize,
    }

    impl MockEventsPort {
        /// Creates an empty mock.
        pub fn new() -> Self {
            Self {
                events: Mutex::new(Vec::new()),
                next_id: AtomicUsize::new(1),
                fail_status: Mutex::new(None),
                list_calls: AtomicUsize::new(0),
                detail_calls: AtomicUsize::new(0),
            }
        }

        /// Creates a mock preloaded with events.
        pub fn with_events(events: Vec<EventDetail>) -> Self {
            let max_id = events.iter().map(|e| e.id().as_i64()).max().unwrap_or(0);
            let mock = Self::new();
            *mock.events.lock().unwrap() = events;
            mock.next_id.store(usize::try_from(max_id).unwrap() + 1, Ordering::SeqCst);
            mock
        }

        /// Makes every subsequent call fail with the given HTTP status.
        pub fn fail_with_status(&self, status: u16) {
            *self.fail_status.lock().unwrap() = Some(status);
        }

        /// Restores normal behavior.
        pub fn succeed(&self) {
            *self.fail_status.lock().unwrap() = None;
        }

        /// Number of list calls made so far.
        pub fn list_calls(&self) -> usize {
            self.list_calls.load(Ordering::SeqCst)
        }

        /// Number of detail calls made so far.
        pub fn detail_calls(&self) -> usize {
            self.detail_calls.load(Ordering::SeqCst)
        }

        fn check_failure(&self) -> Result<(), ApiError> {
            match *self.fail_status.lock().unwrap() {
                Some(status) => Err(ApiError::status(status, "mock failure")),
                None => Ok(()),
            }
        }
    }

    #[async_trait]
    impl EventsPort for MockEventsPort {
        async fn list_events(&self) -> Result<Vec<EventSummary>, ApiError> {
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            self.check_failure()?;
            Ok(self
                .events
                .lock()
                .unwrap()
                .iter()
                .map(|e| EventSummary::new(e.id(), e.name(), e.date(), e.location()))
                .collect())
        }

        async fn fetch_event(&self, id: EventId) -> Result<EventDetail, ApiError> {
            self.detail_calls.fetch_add(1, Ordering::SeqCst);
            self.check_failure()?;
            self.events
                .lock()
                .unwrap()
                .iter()
                .find(|e| e.id() == id)
                .cloned()
                .ok_or_else(|| ApiError::status(404, format!("no event {id}")))
        }

        async fn create_event(&self, event: NewEvent) -> Result<CreatedEvent, ApiError> {
            self.check_failure()?;
            let id = i64::try_from(self.next_id.fetch_add(1, Ordering::SeqCst)).unwrap();
            self.events.lock().unwrap().push(EventDetail::new(
                id,
                event.name,
                event.date,
                event.location,
                event.description,
            ));
            Ok(CreatedEvent {
                id: Some(EventId(id)),
            })
        }

        async fn delete_event(&self, id: EventId) -> Result<(), ApiError> {
            self.check_failure()?;
            let mut events = self.events.lock().unwrap();
            let before = events.len();
            events.retain(|e| e.id() != id);
            if events.len() == before {
                return Err(ApiError::status(404, format!("no event {id}")));
            }
            Ok(())
        }
    }
}
