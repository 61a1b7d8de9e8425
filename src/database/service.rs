//! Database service layer
//!
//! Bundles the repositories behind one handle, mirroring how services are
//! constructed from a single pool.

use crate::database::{AttendanceRepository, DatabasePool, EventRepository, RsvpRepository};

#[derive(Debug, Clone)]
pub struct DatabaseService {
    pub events: EventRepository,
    pub rsvps: RsvpRepository,
    pub attendance: AttendanceRepository,
}

impl DatabaseService {
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            events: EventRepository::new(pool.clone()),
            rsvps: RsvpRepository::new(pool.clone()),
            attendance: AttendanceRepository::new(pool),
        }
    }
}
