//! Data models module
//!
//! This module contains all data structures used throughout the application

pub mod attendance;
pub mod event;
pub mod rsvp;

// Re-export commonly used models
pub use attendance::{AttendanceRecord, RecordAttendanceRequest};
pub use event::{CreateEventRequest, Event, EventStatus};
pub use rsvp::{CheckInMethod, Rsvp, RsvpStatus};
