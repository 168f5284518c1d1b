//! Shared HTTP adapter state.
//!
//! Handlers receive this via `actix_web::web::Data` and only ever talk to
//! driving ports, so they stay testable without a database.

use std::sync::Arc;

use crate::domain::ports::{
    AvailabilityQuery, BookingCommand, FixtureAvailabilityQuery, FixtureBookingCommand,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub availability: Arc<dyn AvailabilityQuery>,
    pub bookings: Arc<dyn BookingCommand>,
}

impl HttpState {
    /// Construct state from port implementations.
    pub fn new(availability: Arc<dyn AvailabilityQuery>, bookings: Arc<dyn BookingCommand>) -> Self {
        Self {
            availability,
            bookings,
        }
    }
}

impl Default for HttpState {
    /// Fixture-backed state for tests and database-less runs.
    fn default() -> Self {
        Self {
            availability: Arc::new(FixtureAvailabilityQuery),
            bookings: Arc::new(FixtureBookingCommand),
        }
    }
}
