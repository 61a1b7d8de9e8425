//! RSVP model
//!
//! One registration record per (event, user) pair. Cancellation is a status
//! change; RSVP rows are never deleted, so registration history survives.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Rsvp {
    pub id: Uuid,
    pub event_id: Uuid,
    pub user_id: Uuid,
    pub status: String,
    pub registered_at: DateTime<Utc>,
    pub confirmed_at: Option<DateTime<Utc>>,
    pub checked_in: bool,
    pub checked_in_at: Option<DateTime<Utc>>,
    pub check_in_method: Option<String>,
    pub checked_in_by: Option<Uuid>,
}

impl Rsvp {
    /// An active RSVP blocks re-registration for the same (event, user) pair.
    pub fn is_active(&self) -> bool {
        self.status != RsvpStatus::Cancelled.as_str()
    }

    pub fn is_confirmed(&self) -> bool {
        self.status == RsvpStatus::Confirmed.as_str()
    }
}

/// RSVP status. Only `confirmed` counts against event capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RsvpStatus {
    Pending,
    Confirmed,
    Waitlisted,
    Cancelled,
}

impl RsvpStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RsvpStatus::Pending => "pending",
            RsvpStatus::Confirmed => "confirmed",
            RsvpStatus::Waitlisted => "waitlisted",
            RsvpStatus::Cancelled => "cancelled",
        }
    }
}

impl FromStr for RsvpStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(RsvpStatus::Pending),
            "confirmed" => Ok(RsvpStatus::Confirmed),
            "waitlisted" => Ok(RsvpStatus::Waitlisted),
            "cancelled" => Ok(RsvpStatus::Cancelled),
            other => Err(format!("unknown RSVP status: {}", other)),
        }
    }
}

impl std::fmt::Display for RsvpStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a check-in was performed at the venue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckInMethod {
    Qr,
    Manual,
}

impl CheckInMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckInMethod::Qr => "qr",
            CheckInMethod::Manual => "manual",
        }
    }
}

impl FromStr for CheckInMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "qr" => Ok(CheckInMethod::Qr),
            "manual" => Ok(CheckInMethod::Manual),
            other => Err(format!("unknown check-in method: {}", other)),
        }
    }
}
