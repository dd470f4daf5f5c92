//! Wire formats of the events API.

use serde::{Deserialize, Serialize};

use crate::domain::entities::{EventDetail, EventSummary, Guest};
use crate::domain::ports::{CreatedEvent, NewEvent};

/// The `{"data": ...}` envelope every endpoint wraps its payload in.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    /// The wrapped payload.
    pub data: T,
}

/// List-query event shape.
#[derive(Debug, Deserialize)]
pub struct EventSummaryDto {
    pub id: i64,
    pub name: String,
    pub date: String,
    pub location: String,
}

impl From<EventSummaryDto> for EventSummary {
    fn from(dto: EventSummaryDto) -> Self {
        Self::new(dto.id, dto.name, dto.date, dto.location)
    }
}

/// Guest entry inside a detail response.
#[derive(Debug, Deserialize)]
pub struct GuestDto {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
}

impl From<GuestDto> for Guest {
    fn from(dto: GuestDto) -> Self {
        match dto.email {
            Some(email) => Self::new(dto.name).with_email(email),
            None => Self::new(dto.name),
        }
    }
}

/// Full event record.
#[derive(Debug, Deserialize)]
pub struct EventDetailDto {
    pub id: i64,
    pub name: String,
    pub date: String,
    pub location: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub guests: Vec<GuestDto>,
}

impl From<EventDetailDto> for EventDetail {
    fn from(dto: EventDetailDto) -> Self {
        Self::new(dto.id, dto.name, dto.date, dto.location, dto.description)
            .with_guests(dto.guests.into_iter().map(Guest::from).collect())
    }
}

/// Creation acknowledgement; some deployments omit the id.
#[derive(Debug, Deserialize)]
pub struct CreatedDto {
    #[serde(default)]
    pub id: Option<i64>,
}

impl From<CreatedDto> for CreatedEvent {
    fn from(dto: CreatedDto) -> Self {
        Self {
            id: dto.id.map(Into::into),
        }
    }
}

/// JSON body of a creation request.
#[derive(Debug, Serialize)]
pub struct NewEventDto {
    pub name: String,
    pub description: String,
    pub date: String,
    pub location: String,
}

impl From<NewEvent> for NewEventDto {
    fn from(event: NewEvent) -> Self {
        Self {
            name: event.name,
            description: event.description,
            date: event.date,
            location: event.location,
        }
    }
}
