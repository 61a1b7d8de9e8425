//! Statistics aggregator service
//!
//! Pure reads recomputed on demand; there is no cached incremental state to
//! keep correct. Absent events or organizers yield zeroed statistics rather
//! than errors.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::EventRepository;
use crate::models::rsvp::RsvpStatus;
use crate::utils::errors::{Result, SchedulaError};

/// Derived per-event counts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventStats {
    pub event_id: Uuid,
    pub capacity: i32,
    pub confirmed: i64,
    pub waitlisted: i64,
    pub cancelled: i64,
    pub checked_in: i64,
    pub fill_rate: f64,
}

impl EventStats {
    fn zeroed(event_id: Uuid) -> Self {
        Self {
            event_id,
            capacity: 0,
            confirmed: 0,
            waitlisted: 0,
            cancelled: 0,
            checked_in: 0,
            fill_rate: 0.0,
        }
    }
}

/// Derived totals across all events owned by one organizer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrganizerTotals {
    pub organizer_id: Uuid,
    pub events: i64,
    pub confirmed: i64,
    pub waitlisted: i64,
    pub cancelled: i64,
    pub checked_in: i64,
    pub revenue_cents: i64,
}

#[derive(Debug, Clone)]
pub struct StatsService {
    pool: PgPool,
    events: EventRepository,
}

impl StatsService {
    pub fn new(pool: PgPool, events: EventRepository) -> Self {
        Self { pool, events }
    }

    /// Derive counts and fill rate for one event
    pub async fn event_stats(&self, event_id: Uuid) -> Result<EventStats> {
        let (event, counts) = futures::try_join!(
            self.events.find_by_id(event_id),
            self.rsvp_counts(event_id)
        )?;

        let Some(event) = event else {
            return Ok(EventStats::zeroed(event_id));
        };

        let (confirmed, waitlisted, cancelled, checked_in) = counts;
        Ok(EventStats {
            event_id,
            capacity: event.capacity,
            confirmed,
            waitlisted,
            cancelled,
            checked_in,
            fill_rate: fill_rate(confirmed, event.capacity),
        })
    }

    /// Derive totals and revenue across an organizer's events.
    ///
    /// Revenue is the sum over paid events of confirmed count times unit
    /// price; free events contribute nothing.
    pub async fn organizer_totals(&self, organizer_id: Uuid) -> Result<OrganizerTotals> {
        let row: (i64, i64, i64, i64, i64, i64) = sqlx::query_as(
            r#"
            SELECT
                COUNT(DISTINCT e.id),
                COUNT(r.id) FILTER (WHERE r.status = $2),
                COUNT(r.id) FILTER (WHERE r.status = $3),
                COUNT(r.id) FILTER (WHERE r.status = $4),
                COUNT(r.id) FILTER (WHERE r.checked_in),
                COALESCE(SUM(e.price_cents) FILTER (WHERE r.status = $2), 0)::BIGINT
            FROM events e
            LEFT JOIN rsvps r ON r.event_id = e.id
            WHERE e.organizer_id = $1
            "#,
        )
        .bind(organizer_id)
        .bind(RsvpStatus::Confirmed.as_str())
        .bind(RsvpStatus::Waitlisted.as_str())
        .bind(RsvpStatus::Cancelled.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(SchedulaError::Database)?;

        let (events, confirmed, waitlisted, cancelled, checked_in, revenue_cents) = row;
        Ok(OrganizerTotals {
            organizer_id,
            events,
            confirmed,
            waitlisted,
            cancelled,
            checked_in,
            revenue_cents,
        })
    }

    async fn rsvp_counts(&self, event_id: Uuid) -> Result<(i64, i64, i64, i64)> {
        let counts: (i64, i64, i64, i64) = sqlx::query_as(
            r#"
            SELECT
                COUNT(*) FILTER (WHERE status = $2),
                COUNT(*) FILTER (WHERE status = $3),
                COUNT(*) FILTER (WHERE status = $4),
                COUNT(*) FILTER (WHERE checked_in)
            FROM rsvps
            WHERE event_id = $1
            "#,
        )
        .bind(event_id)
        .bind(RsvpStatus::Confirmed.as_str())
        .bind(RsvpStatus::Waitlisted.as_str())
        .bind(RsvpStatus::Cancelled.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(SchedulaError::Database)?;

        Ok(counts)
    }
}

/// Confirmed seats over capacity; 0 for zero-capacity events
pub fn fill_rate(confirmed: i64, capacity: i32) -> f64 {
    if capacity <= 0 {
        0.0
    } else {
        confirmed as f64 / capacity as f64
    }
}
