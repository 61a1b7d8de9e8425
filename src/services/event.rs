//! Event record store service
//!
//! Owns event definitions and their lifecycle: draft -> published ->
//! completed, with cancellation out of draft or published. Capacity changes
//! are checked against the current confirmed count under the event row lock.

use tracing::debug;
use uuid::Uuid;

use crate::database::{DatabasePool, EventRepository, RsvpRepository};
use crate::models::event::{CreateEventRequest, Event, EventStatus};
use crate::utils::errors::{Result, SchedulaError};
use crate::utils::logging;

#[derive(Debug, Clone)]
pub struct EventService {
    pool: DatabasePool,
    events: EventRepository,
    rsvps: RsvpRepository,
}

impl EventService {
    pub fn new(pool: DatabasePool, events: EventRepository, rsvps: RsvpRepository) -> Self {
        Self {
            pool,
            events,
            rsvps,
        }
    }

    /// Create a new event in draft status
    pub async fn create_event(&self, request: CreateEventRequest) -> Result<Event> {
        if request.capacity < 0 {
            return Err(SchedulaError::InvalidInput(
                "Event capacity cannot be negative".to_string(),
            ));
        }
        if let Some(price) = request.price_cents {
            if price < 0 {
                return Err(SchedulaError::InvalidInput(
                    "Event price cannot be negative".to_string(),
                ));
            }
        }
        if request.ends_at <= request.starts_at {
            return Err(SchedulaError::InvalidInput(
                "Event must end after it starts".to_string(),
            ));
        }

        let event = self.events.create(request).await?;
        debug!(event_id = %event.id, organizer_id = %event.organizer_id, "Event created");
        Ok(event)
    }

    /// Get event by ID
    pub async fn get_event(&self, event_id: Uuid) -> Result<Event> {
        self.events
            .find_by_id(event_id)
            .await?
            .ok_or(SchedulaError::EventNotFound { event_id })
    }

    /// Get events owned by an organizer
    pub async fn list_by_organizer(&self, organizer_id: Uuid) -> Result<Vec<Event>> {
        self.events.list_by_organizer(organizer_id).await
    }

    /// Publish a draft event so it accepts registrations
    pub async fn publish(&self, event_id: Uuid) -> Result<Event> {
        self.transition(event_id, EventStatus::Published).await
    }

    /// Mark a published event as completed
    pub async fn complete(&self, event_id: Uuid) -> Result<Event> {
        self.transition(event_id, EventStatus::Completed).await
    }

    /// Cancel a draft or published event
    pub async fn cancel(&self, event_id: Uuid) -> Result<Event> {
        self.transition(event_id, EventStatus::Cancelled).await
    }

    /// Update event capacity.
    ///
    /// Runs under the event row lock so the confirmed count cannot grow
    /// between the check and the write; never lowers capacity below the
    /// current confirmed count.
    pub async fn update_capacity(&self, event_id: Uuid, new_capacity: i32) -> Result<Event> {
        if new_capacity < 0 {
            return Err(SchedulaError::InvalidInput(
                "Event capacity cannot be negative".to_string(),
            ));
        }

        let mut tx = self.pool.begin().await?;

        let event = self
            .events
            .find_by_id_for_update(&mut tx, event_id)
            .await?
            .ok_or(SchedulaError::EventNotFound { event_id })?;

        let confirmed = self.rsvps.count_confirmed(&mut tx, event_id).await?;
        if (new_capacity as i64) < confirmed {
            return Err(SchedulaError::CapacityBelowConfirmed {
                event_id,
                requested: new_capacity,
                confirmed,
            });
        }

        let updated = self
            .events
            .update_capacity(&mut tx, event_id, new_capacity)
            .await?;
        tx.commit().await?;

        logging::log_capacity_change(event_id, event.capacity, new_capacity);
        Ok(updated)
    }

    async fn transition(&self, event_id: Uuid, target: EventStatus) -> Result<Event> {
        let mut tx = self.pool.begin().await?;

        let event = self
            .events
            .find_by_id_for_update(&mut tx, event_id)
            .await?
            .ok_or(SchedulaError::EventNotFound { event_id })?;

        let current = parse_status(&event)?;
        if !current.can_transition_to(target) {
            return Err(SchedulaError::InvalidStateTransition {
                from: current.to_string(),
                to: target.to_string(),
            });
        }

        let updated = self.events.update_status(&mut tx, event_id, target).await?;
        tx.commit().await?;

        logging::log_event_transition(event_id, current.as_str(), target.as_str());
        Ok(updated)
    }
}

fn parse_status(event: &Event) -> Result<EventStatus> {
    event
        .status
        .parse::<EventStatus>()
        .map_err(SchedulaError::InvalidInput)
}
