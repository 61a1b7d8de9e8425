//! RSVP repository implementation
//!
//! Mutation helpers take a `PgConnection` so the ledger service can run them
//! inside a single transaction holding the event row lock.

use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::models::rsvp::{CheckInMethod, Rsvp, RsvpStatus};
use crate::utils::errors::SchedulaError;

const RSVP_COLUMNS: &str = "id, event_id, user_id, status, registered_at, confirmed_at, checked_in, checked_in_at, check_in_method, checked_in_by";

const ACTIVE_REGISTRATION_CONSTRAINT: &str = "uniq_rsvps_active_registration";

#[derive(Debug, Clone)]
pub struct RsvpRepository {
    pool: PgPool,
}

impl RsvpRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new RSVP with the given status.
    ///
    /// The partial unique index on active registrations backstops the
    /// service-level duplicate check; a violation maps to
    /// `DuplicateRegistration` either way.
    pub async fn insert(
        &self,
        conn: &mut PgConnection,
        event_id: Uuid,
        user_id: Uuid,
        status: RsvpStatus,
        confirmed_at: Option<DateTime<Utc>>,
    ) -> Result<Rsvp, SchedulaError> {
        let rsvp = sqlx::query_as::<_, Rsvp>(&format!(
            r#"
            INSERT INTO rsvps (id, event_id, user_id, status, registered_at, confirmed_at, checked_in)
            VALUES ($1, $2, $3, $4, $5, $6, FALSE)
            RETURNING {RSVP_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(event_id)
        .bind(user_id)
        .bind(status.as_str())
        .bind(Utc::now())
        .bind(confirmed_at)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db)
                if db.constraint() == Some(ACTIVE_REGISTRATION_CONSTRAINT) =>
            {
                SchedulaError::DuplicateRegistration { event_id, user_id }
            }
            _ => SchedulaError::Database(e),
        })?;

        Ok(rsvp)
    }

    /// Find RSVP by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Rsvp>, SchedulaError> {
        let rsvp = sqlx::query_as::<_, Rsvp>(&format!(
            "SELECT {RSVP_COLUMNS} FROM rsvps WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(rsvp)
    }

    /// Find RSVP by ID inside a transaction
    pub async fn find_by_id_in_tx(
        &self,
        conn: &mut PgConnection,
        id: Uuid,
    ) -> Result<Option<Rsvp>, SchedulaError> {
        let rsvp = sqlx::query_as::<_, Rsvp>(&format!(
            "SELECT {RSVP_COLUMNS} FROM rsvps WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(rsvp)
    }

    /// Find the active (non-cancelled) RSVP for an (event, user) pair
    pub async fn find_active(
        &self,
        conn: &mut PgConnection,
        event_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Rsvp>, SchedulaError> {
        let rsvp = sqlx::query_as::<_, Rsvp>(&format!(
            "SELECT {RSVP_COLUMNS} FROM rsvps WHERE event_id = $1 AND user_id = $2 AND status <> $3"
        ))
        .bind(event_id)
        .bind(user_id)
        .bind(RsvpStatus::Cancelled.as_str())
        .fetch_optional(&mut *conn)
        .await?;

        Ok(rsvp)
    }

    /// Count confirmed RSVPs for an event
    pub async fn count_confirmed(
        &self,
        conn: &mut PgConnection,
        event_id: Uuid,
    ) -> Result<i64, SchedulaError> {
        let count: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM rsvps WHERE event_id = $1 AND status = $2")
                .bind(event_id)
                .bind(RsvpStatus::Confirmed.as_str())
                .fetch_one(&mut *conn)
                .await?;

        Ok(count.0)
    }

    /// Set RSVP status
    pub async fn set_status(
        &self,
        conn: &mut PgConnection,
        id: Uuid,
        status: RsvpStatus,
    ) -> Result<Rsvp, SchedulaError> {
        let rsvp = sqlx::query_as::<_, Rsvp>(&format!(
            r#"
            UPDATE rsvps
            SET status = $2
            WHERE id = $1
            RETURNING {RSVP_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(status.as_str())
        .fetch_one(&mut *conn)
        .await?;

        Ok(rsvp)
    }

    /// Promote an RSVP to confirmed, stamping its confirmation time
    pub async fn promote_to_confirmed(
        &self,
        conn: &mut PgConnection,
        id: Uuid,
        confirmed_at: DateTime<Utc>,
    ) -> Result<Rsvp, SchedulaError> {
        let rsvp = sqlx::query_as::<_, Rsvp>(&format!(
            r#"
            UPDATE rsvps
            SET status = $2, confirmed_at = $3
            WHERE id = $1
            RETURNING {RSVP_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(RsvpStatus::Confirmed.as_str())
        .bind(confirmed_at)
        .fetch_one(&mut *conn)
        .await?;

        Ok(rsvp)
    }

    /// Mark an RSVP as checked in
    pub async fn mark_checked_in(
        &self,
        conn: &mut PgConnection,
        id: Uuid,
        checked_in_at: DateTime<Utc>,
        method: CheckInMethod,
        operator_id: Uuid,
    ) -> Result<Rsvp, SchedulaError> {
        let rsvp = sqlx::query_as::<_, Rsvp>(&format!(
            r#"
            UPDATE rsvps
            SET checked_in = TRUE, checked_in_at = $2, check_in_method = $3, checked_in_by = $4
            WHERE id = $1
            RETURNING {RSVP_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(checked_in_at)
        .bind(method.as_str())
        .bind(operator_id)
        .fetch_one(&mut *conn)
        .await?;

        Ok(rsvp)
    }

    /// Find the earliest-registered waitlisted RSVP for an event.
    ///
    /// FIFO by registration time, id as tie-break so promotion order is
    /// deterministic for equal timestamps.
    pub async fn earliest_waitlisted(
        &self,
        conn: &mut PgConnection,
        event_id: Uuid,
    ) -> Result<Option<Rsvp>, SchedulaError> {
        let rsvp = sqlx::query_as::<_, Rsvp>(&format!(
            r#"
            SELECT {RSVP_COLUMNS} FROM rsvps
            WHERE event_id = $1 AND status = $2
            ORDER BY registered_at ASC, id ASC
            LIMIT 1
            FOR UPDATE
            "#
        ))
        .bind(event_id)
        .bind(RsvpStatus::Waitlisted.as_str())
        .fetch_optional(&mut *conn)
        .await?;

        Ok(rsvp)
    }

    /// Get all RSVPs for an event
    pub async fn list_by_event(&self, event_id: Uuid) -> Result<Vec<Rsvp>, SchedulaError> {
        let rsvps = sqlx::query_as::<_, Rsvp>(&format!(
            "SELECT {RSVP_COLUMNS} FROM rsvps WHERE event_id = $1 ORDER BY registered_at ASC"
        ))
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rsvps)
    }

    /// Get all RSVPs for a user
    pub async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Rsvp>, SchedulaError> {
        let rsvps = sqlx::query_as::<_, Rsvp>(&format!(
            "SELECT {RSVP_COLUMNS} FROM rsvps WHERE user_id = $1 ORDER BY registered_at ASC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rsvps)
    }
}
