//! Builders wiring driven adapters into the HTTP state.

use std::sync::Arc;

use clinic_backend::domain::{AvailabilityService, BookingService};
use clinic_backend::inbound::http::state::HttpState;
use clinic_backend::outbound::persistence::{
    DieselAppointmentRepository, DieselServiceRepository, DieselWorkScheduleRepository,
};
use clinic_backend::outbound::tokens::SignedConfirmationTokens;

use super::ServerConfig;

/// Build the HTTP state from the configuration.
///
/// With a database pool the Diesel repositories back both services; without
/// one the fixture ports answer (empty diary, bookings accepted and
/// forgotten), which keeps local smoke tests independent of PostgreSQL.
pub fn build_http_state(config: &ServerConfig) -> HttpState {
    let Some(pool) = &config.db_pool else {
        return HttpState::default();
    };

    let schedules = Arc::new(DieselWorkScheduleRepository::new(pool.clone()));
    let services = Arc::new(DieselServiceRepository::new(pool.clone()));
    let appointments = Arc::new(DieselAppointmentRepository::new(pool.clone()));
    let tokens = Arc::new(
        SignedConfirmationTokens::new(config.token_secret.clone()).with_ttl(config.token_ttl),
    );

    HttpState::new(
        Arc::new(AvailabilityService::new(
            schedules,
            services.clone(),
            appointments.clone(),
        )),
        Arc::new(BookingService::new(services, appointments, tokens)),
    )
}
