//! Party event entities.

use serde::{Deserialize, Serialize};

/// Unique identifier for a party event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(pub i64);

impl EventId {
    /// Returns the underlying i64 value.
    #[must_use]
    pub fn as_i64(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for EventId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// Minimal event shape returned by the list query.
///
/// The `date` field is the ISO-8601 timestamp string exactly as the server
/// sent it; parsing happens at display time only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventSummary {
    id: EventId,
    name: String,
    date: String,
    location: String,
}

impl EventSummary {
    /// Creates a new event summary.
    #[must_use]
    pub fn new(
        id: impl Into<EventId>,
        name: impl Into<String>,
        date: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            date: date.into(),
            location: location.into(),
        }
    }

    /// Returns the event id.
    #[must_use]
    pub fn id(&self) -> EventId {
        self.id
    }

    /// Returns the event name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the raw ISO-8601 timestamp string.
    #[must_use]
    pub fn date(&self) -> &str {
        &self.date
    }

    /// Returns the event location.
    #[must_use]
    pub fn location(&self) -> &str {
        &self.location
    }
}

/// A guest on an event's guest list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Guest {
    name: String,
    email: Option<String>,
}

impl Guest {
    /// Creates a guest with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: None,
        }
    }

    /// Sets the guest's email address.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Returns the guest name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the guest email, if known.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }
}

/// Full event record fetched per selected id.
///
/// Replaced wholesale on every fetch, never patched field by field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDetail {
    id: EventId,
    name: String,
    date: String,
    location: String,
    description: String,
    guests: Vec<Guest>,
}

impl EventDetail {
    /// Creates a new event detail without guests.
    #[must_use]
    pub fn new(
        id: impl Into<EventId>,
        name: impl Into<String>,
        date: impl Into<String>,
        location: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            date: date.into(),
            location: location.into(),
            description: description.into(),
            guests: Vec::new(),
        }
    }

    /// Sets the guest list.
    #[must_use]
    pub fn with_guests(mut self, guests: Vec<Guest>) -> Self {
        self.guests = guests;
        self
    }

    /// Returns the event id.
    #[must_use]
    pub fn id(&self) -> EventId {
        self.id
    }

    /// Returns the event name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the raw ISO-8601 timestamp string.
    #[must_use]
    pub fn date(&self) -> &str {
        &self.date
    }

    /// Returns the event location.
    #[must_use]
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Returns the event description. May be empty.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the guest list, in server order.
    #[must_use]
    pub fn guests(&self) -> &[Guest] {
        &self.guests
    }
}
