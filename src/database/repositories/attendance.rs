//! Attendance repository implementation

use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::models::attendance::{AttendanceRecord, RecordAttendanceRequest};
use crate::utils::errors::SchedulaError;

const ATTENDANCE_COLUMNS: &str =
    "id, event_id, user_id, checked_in_at, operator_id, method, location, notes, created_at";

const ATTENDANCE_UNIQUE_CONSTRAINT: &str = "uniq_attendance_event_user";

#[derive(Debug, Clone)]
pub struct AttendanceRepository {
    pool: PgPool,
}

impl AttendanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Append one attendance record.
    ///
    /// The unique index on (event_id, user_id) holds the exactly-once
    /// guarantee even against concurrent callers; a violation maps to
    /// `DuplicateAttendance`.
    pub async fn insert(
        &self,
        conn: &mut PgConnection,
        request: &RecordAttendanceRequest,
        checked_in_at: DateTime<Utc>,
    ) -> Result<AttendanceRecord, SchedulaError> {
        let record = sqlx::query_as::<_, AttendanceRecord>(&format!(
            r#"
            INSERT INTO attendance (id, event_id, user_id, checked_in_at, operator_id, method, location, notes, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {ATTENDANCE_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(request.event_id)
        .bind(request.user_id)
        .bind(checked_in_at)
        .bind(request.operator_id)
        .bind(request.method.as_str())
        .bind(request.location.clone())
        .bind(request.notes.clone())
        .bind(Utc::now())
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db)
                if db.constraint() == Some(ATTENDANCE_UNIQUE_CONSTRAINT) =>
            {
                SchedulaError::DuplicateAttendance {
                    event_id: request.event_id,
                    user_id: request.user_id,
                }
            }
            _ => SchedulaError::Database(e),
        })?;

        Ok(record)
    }

    /// Check whether an attendance record exists for an (event, user) pair
    pub async fn exists(
        &self,
        conn: &mut PgConnection,
        event_id: Uuid,
        user_id: Uuid,
    ) -> Result<bool, SchedulaError> {
        let exists: (bool,) = sqlx::query_as(
            "SELECT EXISTS (SELECT 1 FROM attendance WHERE event_id = $1 AND user_id = $2)",
        )
        .bind(event_id)
        .bind(user_id)
        .fetch_one(&mut *conn)
        .await?;

        Ok(exists.0)
    }

    /// Get all attendance records for an event
    pub async fn list_by_event(
        &self,
        event_id: Uuid,
    ) -> Result<Vec<AttendanceRecord>, SchedulaError> {
        let records = sqlx::query_as::<_, AttendanceRecord>(&format!(
            "SELECT {ATTENDANCE_COLUMNS} FROM attendance WHERE event_id = $1 ORDER BY checked_in_at ASC"
        ))
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    /// Count attendance records for an event
    pub async fn count_by_event(&self, event_id: Uuid) -> Result<i64, SchedulaError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM attendance WHERE event_id = $1")
            .bind(event_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}
