//! RSVP ledger service
//!
//! The single mutation path for registration state. Every mutation runs as
//! one transaction that first takes a row lock on the event, so operations
//! on the same event serialize (no two registrations can both win the last
//! confirmed seat) while different events proceed in parallel. Waitlist
//! promotion and the attendance append commit atomically with the status
//! write they belong to.

use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use crate::database::{DatabasePool, EventRepository, RsvpRepository};
use crate::models::attendance::{AttendanceRecord, RecordAttendanceRequest};
use crate::models::rsvp::{CheckInMethod, Rsvp, RsvpStatus};
use crate::services::attendance::AttendanceService;
use crate::utils::errors::{Result, SchedulaError};
use crate::utils::logging;

#[derive(Debug, Clone)]
pub struct RsvpLedgerService {
    pool: DatabasePool,
    events: EventRepository,
    rsvps: RsvpRepository,
    attendance: AttendanceService,
}

impl RsvpLedgerService {
    pub fn new(
        pool: DatabasePool,
        events: EventRepository,
        rsvps: RsvpRepository,
        attendance: AttendanceService,
    ) -> Self {
        Self {
            pool,
            events,
            rsvps,
            attendance,
        }
    }

    /// Register a user for an event.
    ///
    /// The new RSVP is confirmed while the confirmed count is below the
    /// event capacity, waitlisted otherwise. Registration never fails for
    /// a full event; it fails only for closed events and duplicates.
    pub async fn register(&self, event_id: Uuid, user_id: Uuid) -> Result<Rsvp> {
        debug!(event_id = %event_id, user_id = %user_id, "Registering RSVP");

        let mut tx = self.pool.begin().await?;

        let event = self
            .events
            .find_by_id_for_update(&mut tx, event_id)
            .await?
            .ok_or(SchedulaError::EventNotFound { event_id })?;

        let now = Utc::now();
        if !event.is_open_for_registration(now) {
            return Err(SchedulaError::RegistrationClosed { event_id });
        }

        if self
            .rsvps
            .find_active(&mut tx, event_id, user_id)
            .await?
            .is_some()
        {
            return Err(SchedulaError::DuplicateRegistration { event_id, user_id });
        }

        let confirmed = self.rsvps.count_confirmed(&mut tx, event_id).await?;
        let (status, confirmed_at) = if confirmed < event.capacity as i64 {
            (RsvpStatus::Confirmed, Some(now))
        } else {
            (RsvpStatus::Waitlisted, None)
        };

        let rsvp = self
            .rsvps
            .insert(&mut tx, event_id, user_id, status, confirmed_at)
            .await?;
        tx.commit().await?;

        logging::log_registration(event_id, user_id, status.as_str());
        Ok(rsvp)
    }

    /// Cancel an RSVP.
    ///
    /// Cancelling a confirmed RSVP frees a seat; the earliest-registered
    /// waitlisted RSVP for the event, if any, is promoted to confirmed in
    /// the same transaction. Cancelling an already-cancelled RSVP is a
    /// no-op, which also keeps the promotion from ever firing twice.
    ///
    /// A checked-in RSVP cannot be cancelled: its attendance record is
    /// immutable and must keep pointing at a confirmed, checked-in RSVP,
    /// and the attendee is already in the room, so there is no seat to
    /// hand to the waitlist.
    pub async fn cancel(&self, rsvp_id: Uuid) -> Result<Rsvp> {
        debug!(rsvp_id = %rsvp_id, "Cancelling RSVP");

        let mut tx = self.pool.begin().await?;

        let rsvp = self
            .rsvps
            .find_by_id_in_tx(&mut tx, rsvp_id)
            .await?
            .ok_or(SchedulaError::RsvpNotFound { rsvp_id })?;

        if !rsvp.is_active() {
            return Ok(rsvp);
        }

        let event_id = rsvp.event_id;
        self.events
            .find_by_id_for_update(&mut tx, event_id)
            .await?
            .ok_or(SchedulaError::EventNotFound { event_id })?;

        // Re-read under the event lock; another mutation may have won the
        // race between the first read and the lock.
        let rsvp = self
            .rsvps
            .find_by_id_in_tx(&mut tx, rsvp_id)
            .await?
            .ok_or(SchedulaError::RsvpNotFound { rsvp_id })?;
        if !rsvp.is_active() {
            return Ok(rsvp);
        }
        if rsvp.checked_in {
            return Err(SchedulaError::AlreadyCheckedIn { rsvp_id });
        }

        let was_confirmed = rsvp.is_confirmed();
        let cancelled = self
            .rsvps
            .set_status(&mut tx, rsvp_id, RsvpStatus::Cancelled)
            .await?;

        if was_confirmed {
            if let Some(next) = self.rsvps.earliest_waitlisted(&mut tx, event_id).await? {
                let promoted = self
                    .rsvps
                    .promote_to_confirmed(&mut tx, next.id, Utc::now())
                    .await?;
                logging::log_promotion(event_id, promoted.id, promoted.user_id);
            }
        }

        tx.commit().await?;

        debug!(rsvp_id = %rsvp_id, event_id = %event_id, "RSVP cancelled");
        Ok(cancelled)
    }

    /// Check in a confirmed RSVP at the venue.
    ///
    /// Exactly-once: the RSVP flips to checked-in and one attendance record
    /// is appended in the same transaction. A retry on an already-checked-in
    /// RSVP fails with `AlreadyCheckedIn` and appends nothing.
    pub async fn check_in(
        &self,
        rsvp_id: Uuid,
        operator_id: Uuid,
        method: CheckInMethod,
        location: Option<String>,
        notes: Option<String>,
    ) -> Result<(Rsvp, AttendanceRecord)> {
        debug!(rsvp_id = %rsvp_id, operator_id = %operator_id, "Checking in RSVP");

        let mut tx = self.pool.begin().await?;

        let rsvp = self
            .rsvps
            .find_by_id_in_tx(&mut tx, rsvp_id)
            .await?
            .ok_or(SchedulaError::RsvpNotFound { rsvp_id })?;

        let event_id = rsvp.event_id;
        self.events
            .find_by_id_for_update(&mut tx, event_id)
            .await?
            .ok_or(SchedulaError::EventNotFound { event_id })?;

        let rsvp = self
            .rsvps
            .find_by_id_in_tx(&mut tx, rsvp_id)
            .await?
            .ok_or(SchedulaError::RsvpNotFound { rsvp_id })?;

        if rsvp.checked_in {
            return Err(SchedulaError::AlreadyCheckedIn { rsvp_id });
        }
        if !rsvp.is_confirmed() {
            return Err(SchedulaError::InvalidRsvpState {
                rsvp_id,
                status: rsvp.status.clone(),
            });
        }

        let checked = self
            .rsvps
            .mark_checked_in(&mut tx, rsvp_id, Utc::now(), method, operator_id)
            .await?;

        let record = self
            .attendance
            .append(
                &mut tx,
                &RecordAttendanceRequest {
                    event_id,
                    user_id: rsvp.user_id,
                    operator_id,
                    method,
                    location,
                    notes,
                },
            )
            .await?;

        tx.commit().await?;

        logging::log_check_in(event_id, checked.user_id, operator_id, method.as_str());
        Ok((checked, record))
    }

    /// Get an RSVP by ID
    pub async fn get(&self, rsvp_id: Uuid) -> Result<Rsvp> {
        self.rsvps
            .find_by_id(rsvp_id)
            .await?
            .ok_or(SchedulaError::RsvpNotFound { rsvp_id })
    }

    /// Get all RSVPs for an event
    pub async fn get_by_event(&self, event_id: Uuid) -> Result<Vec<Rsvp>> {
        self.rsvps.list_by_event(event_id).await
    }

    /// Get all RSVPs for a user
    pub async fn get_by_user(&self, user_id: Uuid) -> Result<Vec<Rsvp>> {
        self.rsvps.list_by_user(user_id).await
    }
}
