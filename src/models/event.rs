//! Event model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Event {
    pub id: Uuid,
    pub organizer_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub registration_deadline: Option<DateTime<Utc>>,
    pub capacity: i32,
    pub price_cents: Option<i64>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Event {
    /// Whether the event charges a per-seat price
    pub fn is_paid(&self) -> bool {
        self.price_cents.is_some()
    }

    /// Whether the event currently accepts registrations
    pub fn is_open_for_registration(&self, now: DateTime<Utc>) -> bool {
        if self.status != EventStatus::Published.as_str() {
            return false;
        }
        match self.registration_deadline {
            Some(deadline) => now <= deadline,
            None => true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEventRequest {
    pub organizer_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub registration_deadline: Option<DateTime<Utc>>,
    pub capacity: i32,
    pub price_cents: Option<i64>,
}

/// Event lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventStatus {
    Draft,
    Published,
    Cancelled,
    Completed,
}

impl EventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Draft => "draft",
            EventStatus::Published => "published",
            EventStatus::Cancelled => "cancelled",
            EventStatus::Completed => "completed",
        }
    }

    /// Lifecycle: draft -> published -> completed; draft|published -> cancelled.
    /// Cancelled and completed are terminal.
    pub fn can_transition_to(&self, next: EventStatus) -> bool {
        matches!(
            (self, next),
            (EventStatus::Draft, EventStatus::Published)
                | (EventStatus::Draft, EventStatus::Cancelled)
                | (EventStatus::Published, EventStatus::Completed)
                | (EventStatus::Published, EventStatus::Cancelled)
        )
    }
}

impl FromStr for EventStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(EventStatus::Draft),
            "published" => Ok(EventStatus::Published),
            "cancelled" => Ok(EventStatus::Cancelled),
            "completed" => Ok(EventStatus::Completed),
            other => Err(format!("unknown event status: {}", other)),
        }
    }
}

impl std::fmt::Display for EventStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for status in [
            EventStatus::Draft,
            EventStatus::Published,
            EventStatus::Cancelled,
            EventStatus::Completed,
        ] {
            assert_eq!(status.as_str().parse::<EventStatus>(), Ok(status));
        }
        assert!("archived".parse::<EventStatus>().is_err());
    }

    #[test]
    fn test_lifecycle_transitions() {
        assert!(EventStatus::Draft.can_transition_to(EventStatus::Published));
        assert!(EventStatus::Draft.can_transition_to(EventStatus::Cancelled));
        assert!(EventStatus::Published.can_transition_to(EventStatus::Completed));
        assert!(EventStatus::Published.can_transition_to(EventStatus::Cancelled));

        assert!(!EventStatus::Draft.can_transition_to(EventStatus::Completed));
        assert!(!EventStatus::Cancelled.can_transition_to(EventStatus::Published));
        assert!(!EventStatus::Completed.can_transition_to(EventStatus::Cancelled));
        assert!(!EventStatus::Published.can_transition_to(EventStatus::Draft));
    }

    #[test]
    fn test_registration_window() {
        let now = Utc::now();
        let event = Event {
            id: Uuid::new_v4(),
            organizer_id: Uuid::new_v4(),
            title: "Lindy Exchange".to_string(),
            description: None,
            location: None,
            starts_at: now + chrono::Duration::days(7),
            ends_at: now + chrono::Duration::days(8),
            registration_deadline: Some(now + chrono::Duration::days(1)),
            capacity: 20,
            price_cents: None,
            status: "published".to_string(),
            created_at: now,
            updated_at: now,
        };

        assert!(event.is_open_for_registration(now));
        assert!(!event.is_open_for_registration(now + chrono::Duration::days(2)));

        let mut draft = event.clone();
        draft.status = "draft".to_string();
        assert!(!draft.is_open_for_registration(now));

        let mut open_ended = event;
        open_ended.registration_deadline = None;
        assert!(open_ended.is_open_for_registration(now + chrono::Duration::days(30)));
    }
}
