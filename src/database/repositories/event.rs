//! Event repository implementation

use chrono::Utc;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::models::event::{CreateEventRequest, Event, EventStatus};
use crate::utils::errors::SchedulaError;

const EVENT_COLUMNS: &str = "id, organizer_id, title, description, location, starts_at, ends_at, registration_deadline, capacity, price_cents, status, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new event in draft status
    pub async fn create(&self, request: CreateEventRequest) -> Result<Event, SchedulaError> {
        let now = Utc::now();
        let event = sqlx::query_as::<_, Event>(&format!(
            r#"
            INSERT INTO events (id, organizer_id, title, description, location, starts_at, ends_at, registration_deadline, capacity, price_cents, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING {EVENT_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(request.organizer_id)
        .bind(request.title)
        .bind(request.description)
        .bind(request.location)
        .bind(request.starts_at)
        .bind(request.ends_at)
        .bind(request.registration_deadline)
        .bind(request.capacity)
        .bind(request.price_cents)
        .bind(EventStatus::Draft.as_str())
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(event)
    }

    /// Find event by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Event>, SchedulaError> {
        let event = sqlx::query_as::<_, Event>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(event)
    }

    /// Find event by ID, taking a row lock for the current transaction.
    ///
    /// All ledger mutations for an event start here, which serializes them
    /// per event while leaving other events untouched.
    pub async fn find_by_id_for_update(
        &self,
        conn: &mut PgConnection,
        id: Uuid,
    ) -> Result<Option<Event>, SchedulaError> {
        let event = sqlx::query_as::<_, Event>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE id = $1 FOR UPDATE"
        ))
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(event)
    }

    /// Update event status
    pub async fn update_status(
        &self,
        conn: &mut PgConnection,
        id: Uuid,
        status: EventStatus,
    ) -> Result<Event, SchedulaError> {
        let event = sqlx::query_as::<_, Event>(&format!(
            r#"
            UPDATE events
            SET status = $2, updated_at = $3
            WHERE id = $1
            RETURNING {EVENT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(status.as_str())
        .bind(Utc::now())
        .fetch_one(&mut *conn)
        .await?;

        Ok(event)
    }

    /// Update event capacity
    pub async fn update_capacity(
        &self,
        conn: &mut PgConnection,
        id: Uuid,
        capacity: i32,
    ) -> Result<Event, SchedulaError> {
        let event = sqlx::query_as::<_, Event>(&format!(
            r#"
            UPDATE events
            SET capacity = $2, updated_at = $3
            WHERE id = $1
            RETURNING {EVENT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(capacity)
        .bind(Utc::now())
        .fetch_one(&mut *conn)
        .await?;

        Ok(event)
    }

    /// Get events owned by an organizer
    pub async fn list_by_organizer(&self, organizer_id: Uuid) -> Result<Vec<Event>, SchedulaError> {
        let events = sqlx::query_as::<_, Event>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE organizer_id = $1 ORDER BY starts_at ASC"
        ))
        .bind(organizer_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }
}
