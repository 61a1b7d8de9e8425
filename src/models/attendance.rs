//! Attendance record model
//!
//! One immutable row per successful check-in.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AttendanceRecord {
    pub id: Uuid,
    pub event_id: Uuid,
    pub user_id: Uuid,
    pub checked_in_at: DateTime<Utc>,
    pub operator_id: Uuid,
    pub method: String,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordAttendanceRequest {
    pub event_id: Uuid,
    pub user_id: Uuid,
    pub operator_id: Uuid,
    pub method: crate::models::rsvp::CheckInMethod,
    pub location: Option<String>,
    pub notes: Option<String>,
}
