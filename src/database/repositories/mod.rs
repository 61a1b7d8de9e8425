//! Database repositories module
//!
//! This module contains all repository implementations for data access

pub mod attendance;
pub mod event;
pub mod rsvp;

// Re-export repositories
pub use attendance::AttendanceRepository;
pub use event::EventRepository;
pub use rsvp::RsvpRepository;
