//! Services module
//!
//! This module contains business logic services

pub mod attendance;
pub mod event;
pub mod ledger;
pub mod stats;

// Re-export commonly used services
pub use attendance::AttendanceService;
pub use event::EventService;
pub use ledger::RsvpLedgerService;
pub use stats::{EventStats, OrganizerTotals, StatsService};

use crate::database::{self, DatabasePool, DatabaseService};
use crate::utils::errors::Result;

/// Service factory for creating and managing all services
#[derive(Debug, Clone)]
pub struct ServiceFactory {
    pub events: EventService,
    pub ledger: RsvpLedgerService,
    pub attendance: AttendanceService,
    pub stats: StatsService,
    pool: DatabasePool,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services initialized
    pub fn new(pool: DatabasePool) -> Self {
        let db = DatabaseService::new(pool.clone());

        let attendance = AttendanceService::new(pool.clone(), db.attendance.clone());
        let events = EventService::new(pool.clone(), db.events.clone(), db.rsvps.clone());
        let ledger = RsvpLedgerService::new(
            pool.clone(),
            db.events.clone(),
            db.rsvps.clone(),
            attendance.clone(),
        );
        let stats = StatsService::new(pool.clone(), db.events);

        Self {
            events,
            ledger,
            attendance,
            stats,
            pool,
        }
    }

    /// Health check against the backing database
    pub async fn health_check(&self) -> Result<()> {
        database::health_check(&self.pool).await
    }
}
