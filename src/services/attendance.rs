//! Attendance recorder service
//!
//! Append-only check-in records. The duplicate guard here is deliberately
//! independent of the ledger's own check-in state, so the one-record-per-
//! (event, user) invariant holds even for callers that reach the recorder
//! directly.

use chrono::Utc;
use sqlx::PgConnection;
use tracing::debug;
use uuid::Uuid;

use crate::database::{AttendanceRepository, DatabasePool};
use crate::models::attendance::{AttendanceRecord, RecordAttendanceRequest};
use crate::utils::errors::{Result, SchedulaError};

#[derive(Debug, Clone)]
pub struct AttendanceService {
    pool: DatabasePool,
    attendance: AttendanceRepository,
}

impl AttendanceService {
    pub fn new(pool: DatabasePool, attendance: AttendanceRepository) -> Self {
        Self { pool, attendance }
    }

    /// Append one attendance record in its own transaction
    pub async fn record(&self, request: RecordAttendanceRequest) -> Result<AttendanceRecord> {
        let mut tx = self.pool.begin().await?;
        let record = self.append(&mut tx, &request).await?;
        tx.commit().await?;

        debug!(
            event_id = %record.event_id,
            user_id = %record.user_id,
            "Attendance recorded"
        );
        Ok(record)
    }

    /// Append one attendance record inside an existing transaction.
    ///
    /// Used by the ledger's check-in so the record commits atomically with
    /// the RSVP status write.
    pub async fn append(
        &self,
        conn: &mut PgConnection,
        request: &RecordAttendanceRequest,
    ) -> Result<AttendanceRecord> {
        if self
            .attendance
            .exists(&mut *conn, request.event_id, request.user_id)
            .await?
        {
            return Err(SchedulaError::DuplicateAttendance {
                event_id: request.event_id,
                user_id: request.user_id,
            });
        }

        self.attendance.insert(&mut *conn, request, Utc::now()).await
    }

    /// Get all attendance records for an event
    pub async fn list_by_event(&self, event_id: Uuid) -> Result<Vec<AttendanceRecord>> {
        self.attendance.list_by_event(event_id).await
    }

    /// Count attendance records for an event
    pub async fn count_by_event(&self, event_id: Uuid) -> Result<i64> {
        self.attendance.count_by_event(event_id).await
    }
}
