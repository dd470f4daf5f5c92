//! Events API HTTP client.

use async_trait::async_trait;
use reqwest::{Client, Response};
use tracing::{debug, warn};

use super::dto::{CreatedDto, Envelope, EventDetailDto, EventSummaryDto, NewEventDto};
use crate::domain::entities::{EventDetail, EventId, EventSummary};
use crate::domain::errors::ApiError;
use crate::domain::ports::{CreatedEvent, EventsPort, NewEvent};

/// HTTP client for the remote events resource.
///
/// Built deliberately without a request timeout: a hung call leaves its
/// action pending rather than failing it, matching the resource model.
pub struct EventsClient {
    client: Client,
    events_url: String,
}

impl EventsClient {
    /// Creates a client for the given API base and cohort path segment.
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(base_url: &str, cohort: &str) -> Result<Self, ApiError> {
        let client = Client::builder()
            .user_agent(concat!("fete/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::network(format!("failed to create HTTP client: {e}")))?;

        let events_url = format!(
            "{}/{}/events",
            base_url.trim_end_matches('/'),
            cohort.trim_matches('/')
        );

        Ok(Self { client, events_url })
    }

    fn send_error(e: &reqwest::Error) -> ApiError {
        if e.is_connect() {
            ApiError::network("failed to connect to the events service")
        } else {
            ApiError::network(e.to_string())
        }
    }

    async fn check_status(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        warn!(status = status.as_u16(), body = %body, "events API returned a failure");
        Err(ApiError::status(status.as_u16(), body))
    }
}

#[async_trait]
impl EventsPort for EventsClient {
    async fn list_events(&self) -> Result<Vec<EventSummary>, ApiError> {
        debug!(url = %self.events_url, "fetching event list");

        let response = self
            .client
            .get(&self.events_url)
            .send()
            .await
            .map_err(|e| Self::send_error(&e))?;
        let response = Self::check_status(response).await?;

        let envelope: Envelope<Vec<EventSummaryDto>> = response
            .json()
            .await
            .map_err(|e| ApiError::decode(e.to_string()))?;

        Ok(envelope.data.into_iter().map(EventSummary::from).collect())
    }

    async fn fetch_event(&self, id: EventId) -> Result<EventDetail, ApiError> {
        let url = format!("{}/{id}", self.events_url);
        debug!(%url, "fetching event detail");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Self::send_error(&e))?;
        let response = Self::check_status(response).await?;

        let envelope: Envelope<EventDetailDto> = response
            .json()
            .await
            .map_err(|e| ApiError::decode(e.to_string()))?;

        Ok(envelope.data.into())
    }

    async fn create_event(&self, event: NewEvent) -> Result<CreatedEvent, ApiError> {
        debug!(name = %event.name, "creating event");

        let response = self
            .client
            .post(&self.events_url)
            .json(&NewEventDto::from(event))
            .send()
            .await
            .map_err(|e| Self::send_error(&e))?;
        let response = Self::check_status(response).await?;

        let envelope: Envelope<CreatedDto> = response
            .json()
            .await
            .map_err(|e| ApiError::decode(e.to_string()))?;

        Ok(envelope.data.into())
    }

    async fn delete_event(&self, id: EventId) -> Result<(), ApiError> {
        let url = format!("{}/{id}", self.events_url);
        debug!(%url, "deleting event");

        let response = self
            .client
            .delete(&url)
            .send()
            .await
            .map_err(|e| Self::send_error(&e))?;
        Self::check_status(response).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_for(server: &mockito::Server) -> EventsClient {
        EventsClient::new(&server.url(), "2507").expect("client builds")
    }

    #[test]
    fn test_events_url_joins_base_and_cohort() {
        let client = EventsClient::new("https://api.example.com/api/", "/2507/").unwrap();

        assert_eq!(client.events_url, "https://api.example.com/api/2507/events");
    }

    #[tokio::test]
    async fn test_list_decodes_envelope() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/2507/events")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"data": [
                    {"id": 1, "name": "Gala", "date": "2025-12-31T00:00:00.000Z", "location": "Hall A"},
                    {"id": 2, "name": "Brunch", "date": "2026-01-01T00:00:00.000Z", "location": "Patio"}
                ]}"#,
            )
            .create_async()
            .await;

        let events = client_for(&server).list_events().await.unwrap();

        mock.assert_async().await;
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].name(), "Gala");
        assert_eq!(events[1].id(), EventId(2));
    }

    #[tokio::test]
    async fn test_list_failure_carries_status() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/2507/events")
            .with_status(500)
            .with_body("server exploded")
            .create_async()
            .await;

        let err = client_for(&server).list_events().await.unwrap_err();

        assert_eq!(err.status_code(), Some(500));
        assert!(err.to_string().contains("500"));
    }

    #[tokio::test]
    async fn test_fetch_event_decodes_guests() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/2507/events/7")
            .with_status(200)
            .with_body(
                r#"{"data": {"id": 7, "name": "Gala", "date": "2025-12-31T00:00:00.000Z",
                    "location": "Hall A", "description": "Fun",
                    "guests": [{"name": "Ada", "email": "ada@example.com"}]}}"#,
            )
            .create_async()
            .await;

        let detail = client_for(&server).fetch_event(EventId(7)).await.unwrap();

        assert_eq!(detail.description(), "Fun");
        assert_eq!(detail.guests().len(), 1);
        assert_eq!(detail.guests()[0].name(), "Ada");
    }

    #[tokio::test]
    async fn test_create_posts_json_and_reads_id() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/2507/events")
            .match_header("content-type", "application/json")
            .match_body(mockito::Matcher::JsonString(
                r#"{"name": "Gala", "description": "Fun",
                    "date": "2025-12-31T00:00:00.000Z", "location": "Hall A"}"#
                    .to_string(),
            ))
            .with_status(201)
            .with_body(r#"{"data": {"id": 42}}"#)
            .create_async()
            .await;

        let created = client_for(&server)
            .create_event(NewEvent::new(
                "Gala",
                "Fun",
                "2025-12-31T00:00:00.000Z",
                "Hall A",
            ))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(created.id, Some(EventId(42)));
    }

    #[tokio::test]
    async fn test_create_failure_carries_body_text() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/2507/events")
            .with_status(400)
            .with_body("name is required")
            .create_async()
            .await;

        let err = client_for(&server)
            .create_event(NewEvent::new("", "", "2025-12-31T00:00:00.000Z", ""))
            .await
            .unwrap_err();

        let message = err.to_string();
        assert!(message.contains("400"));
        assert!(message.contains("name is required"));
    }

    #[tokio::test]
    async fn test_delete_succeeds_without_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("DELETE", "/2507/events/7")
            .with_status(204)
            .create_async()
            .await;

        client_for(&server).delete_event(EventId(7)).await.unwrap();

        mock.assert_async().await;
    }
}
