//! Schedula Event Registration Ledger
//!
//! Backend core for the Schedula event-management platform. This library
//! keeps event capacity, RSVP records, and attendance/check-in records
//! mutually consistent: capacity limits, duplicate-registration prevention,
//! FIFO waitlist promotion, exactly-once check-in, and derived statistics.
//!
//! Callers are identified by opaque user ids resolved by an external
//! identity provider; every ledger operation takes caller identity as an
//! explicit parameter.

pub mod config;
pub mod database;
pub mod models;
pub mod services;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{Result, SchedulaError};

// Re-export main components for easy access
pub use database::DatabaseService;
pub use services::ServiceFactory;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
