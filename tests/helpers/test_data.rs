//! Test data helpers for creating ledger fixtures

use chrono::{Duration, Utc};
use schedula::models::event::{CreateEventRequest, Event};
use schedula::services::ServiceFactory;
use uuid::Uuid;

/// A free event one week out with no registration deadline
pub fn free_event_request(organizer_id: Uuid, capacity: i32) -> CreateEventRequest {
    let now = Utc::now();
    CreateEventRequest {
        organizer_id,
        title: "Tuesday Social".to_string(),
        description: Some("Weekly community social".to_string()),
        location: Some("Main Hall".to_string()),
        starts_at: now + Duration::days(7),
        ends_at: now + Duration::days(7) + Duration::hours(3),
        registration_deadline: None,
        capacity,
        price_cents: None,
    }
}

/// A paid event with the given per-seat price in cents
pub fn paid_event_request(organizer_id: Uuid, capacity: i32, price_cents: i64) -> CreateEventRequest {
    CreateEventRequest {
        title: "Workshop Weekend".to_string(),
        price_cents: Some(price_cents),
        ..free_event_request(organizer_id, capacity)
    }
}

/// Create and publish an event, returning it ready to accept registrations
pub async fn published_event(
    services: &ServiceFactory,
    organizer_id: Uuid,
    capacity: i32,
) -> anyhow::Result<Event> {
    let event = services
        .events
        .create_event(free_event_request(organizer_id, capacity))
        .await?;
    Ok(services.events.publish(event.id).await?)
}

/// Create and publish a paid event
pub async fn published_paid_event(
    services: &ServiceFactory,
    organizer_id: Uuid,
    capacity: i32,
    price_cents: i64,
) -> anyhow::Result<Event> {
    let event = services
        .events
        .create_event(paid_event_request(organizer_id, capacity, price_cents))
        .await?;
    Ok(services.events.publish(event.id).await?)
}
