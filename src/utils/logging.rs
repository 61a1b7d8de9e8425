//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging
//! utilities for the Schedula ledger.

use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use crate::config::LoggingConfig;
use crate::utils::errors::Result;

/// Initialize logging based on configuration.
///
/// The returned guard must be held for the lifetime of the process to keep
/// the file writer flushing.
pub fn init_logging(config: &LoggingConfig) -> Result<WorkerGuard> {
    let file_appender = tracing_appender::rolling::daily(&config.file_path, "schedula.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
        .with(tracing_subscriber::fmt::layer().with_writer(non_blocking))
        .init();

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log a registration outcome
pub fn log_registration(event_id: Uuid, user_id: Uuid, status: &str) {
    info!(
        event_id = %event_id,
        user_id = %user_id,
        status = status,
        "RSVP registered"
    );
}

/// Log a waitlist promotion
pub fn log_promotion(event_id: Uuid, rsvp_id: Uuid, user_id: Uuid) {
    info!(
        event_id = %event_id,
        rsvp_id = %rsvp_id,
        user_id = %user_id,
        "Waitlisted RSVP promoted to confirmed"
    );
}

/// Log a check-in
pub fn log_check_in(event_id: Uuid, user_id: Uuid, operator_id: Uuid, method: &str) {
    info!(
        event_id = %event_id,
        user_id = %user_id,
        operator_id = %operator_id,
        method = method,
        "RSVP checked in"
    );
}

/// Log an event lifecycle change
pub fn log_event_transition(event_id: Uuid, from: &str, to: &str) {
    info!(
        event_id = %event_id,
        from = from,
        to = to,
        "Event status changed"
    );
}

/// Log a capacity change
pub fn log_capacity_change(event_id: Uuid, old_capacity: i32, new_capacity: i32) {
    if new_capacity < old_capacity {
        warn!(
            event_id = %event_id,
            old_capacity = old_capacity,
            new_capacity = new_capacity,
            "Event capacity reduced"
        );
    } else {
        info!(
            event_id = %event_id,
            old_capacity = old_capacity,
            new_capacity = new_capacity,
            "Event capacity changed"
        );
    }
}
