//! Error handling for Schedula
//!
//! This module defines the main error types used throughout the application
//! and provides a unified error handling strategy. Domain failures carry the
//! entity ids involved so callers can act on them.

use thiserror::Error;
use uuid::Uuid;

/// Main error type for the Schedula ledger
#[derive(Error, Debug)]
pub enum SchedulaError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Event not found: {event_id}")]
    EventNotFound { event_id: Uuid },

    #[error("RSVP not found: {rsvp_id}")]
    RsvpNotFound { rsvp_id: Uuid },

    #[error("User {user_id} already has an active RSVP for event {event_id}")]
    DuplicateRegistration { event_id: Uuid, user_id: Uuid },

    #[error("Attendance already recorded for user {user_id} on event {event_id}")]
    DuplicateAttendance { event_id: Uuid, user_id: Uuid },

    #[error("RSVP {rsvp_id} is already checked in")]
    AlreadyCheckedIn { rsvp_id: Uuid },

    #[error("RSVP {rsvp_id} is {status}, not confirmed")]
    InvalidRsvpState { rsvp_id: Uuid, status: String },

    #[error("Event {event_id} is not accepting registrations")]
    RegistrationClosed { event_id: Uuid },

    #[error("Invalid state transition: {from} -> {to}")]
    InvalidStateTransition { from: String, to: String },

    #[error("Capacity {requested} for event {event_id} is below confirmed count {confirmed}")]
    CapacityBelowConfirmed {
        event_id: Uuid,
        requested: i32,
        confirmed: i64,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Schedula operations
pub type Result<T> = std::result::Result<T, SchedulaError>;

impl SchedulaError {
    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            SchedulaError::Database(_) => false,
            SchedulaError::Migration(_) => false,
            SchedulaError::Config(_) => false,
            SchedulaError::EventNotFound { .. } => false,
            SchedulaError::RsvpNotFound { .. } => false,
            SchedulaError::DuplicateRegistration { .. } => false,
            SchedulaError::DuplicateAttendance { .. } => false,
            SchedulaError::AlreadyCheckedIn { .. } => false,
            SchedulaError::InvalidRsvpState { .. } => false,
            SchedulaError::RegistrationClosed { .. } => false,
            SchedulaError::InvalidStateTransition { .. } => false,
            SchedulaError::CapacityBelowConfirmed { .. } => false,
            SchedulaError::InvalidInput(_) => false,
            SchedulaError::Io(_) => true,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            SchedulaError::Database(_) => ErrorSeverity::Critical,
            SchedulaError::Migration(_) => ErrorSeverity::Critical,
            SchedulaError::Config(_) => ErrorSeverity::Critical,
            SchedulaError::DuplicateRegistration { .. } => ErrorSeverity::Info,
            SchedulaError::AlreadyCheckedIn { .. } => ErrorSeverity::Info,
            SchedulaError::RegistrationClosed { .. } => ErrorSeverity::Info,
            SchedulaError::InvalidInput(_) => ErrorSeverity::Info,
            SchedulaError::DuplicateAttendance { .. } => ErrorSeverity::Warning,
            _ => ErrorSeverity::Error,
        }
    }

    /// Client-visible conflicts the caller must resolve, as opposed to
    /// infrastructure failures or programming errors.
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            SchedulaError::DuplicateRegistration { .. }
                | SchedulaError::DuplicateAttendance { .. }
                | SchedulaError::AlreadyCheckedIn { .. }
                | SchedulaError::InvalidRsvpState { .. }
                | SchedulaError::RegistrationClosed { .. }
                | SchedulaError::CapacityBelowConfirmed { .. }
        )
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
