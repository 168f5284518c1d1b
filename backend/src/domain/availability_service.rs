//! Availability domain service.
//!
//! Implements the [`AvailabilityQuery`] driving port: resolve the doctor's
//! working window for a date, fetch the intervals already occupied, and run
//! the slot generator over them. All decisions happen in memory; the
//! repositories are read-only collaborators.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Duration;

use crate::domain::ports::{
    AppointmentRepository, AppointmentRepositoryError, AvailabilityProbe, AvailabilityQuery,
    AvailableSlotsRequest, AvailableSlotsResponse, ServiceRepository, ServiceRepositoryError,
    WorkScheduleRepository, WorkScheduleRepositoryError,
};
use crate::domain::schedule::DayOfWeek;
use crate::domain::slots::{format_slot, free_slots, has_conflict};
use crate::domain::Error;

fn map_schedule_error(error: WorkScheduleRepositoryError) -> Error {
    match error {
        WorkScheduleRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("work schedule repository unavailable: {message}"))
        }
        WorkScheduleRepositoryError::Query { message } => {
            Error::internal(format!("work schedule repository error: {message}"))
        }
    }
}

fn map_service_error(error: ServiceRepositoryError) -> Error {
    match error {
        ServiceRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("service repository unavailable: {message}"))
        }
        ServiceRepositoryError::Query { message } => {
            Error::internal(format!("service repository error: {message}"))
        }
    }
}

fn map_appointment_error(error: AppointmentRepositoryError) -> Error {
    match error {
        AppointmentRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("appointment repository unavailable: {message}"))
        }
        AppointmentRepositoryError::Query { message } => {
            Error::internal(format!("appointment repository error: {message}"))
        }
        // Busy reads never report slot collisions; treat it as a query fault.
        AppointmentRepositoryError::SlotTaken => {
            Error::internal("unexpected slot collision during a read".to_owned())
        }
    }
}

/// Availability service over schedule, service, and appointment reads.
#[derive(Clone)]
pub struct AvailabilityService<S, C, A> {
    schedules: Arc<S>,
    services: Arc<C>,
    appointments: Arc<A>,
}

impl<S, C, A> AvailabilityService<S, C, A> {
    /// Create the service from its three read-side repositories.
    pub fn new(schedules: Arc<S>, services: Arc<C>, appointments: Arc<A>) -> Self {
        Self {
            schedules,
            services,
            appointments,
        }
    }
}

#[async_trait]
impl<S, C, A> AvailabilityQuery for AvailabilityService<S, C, A>
where
    S: WorkScheduleRepository,
    C: ServiceRepository,
    A: AppointmentRepository,
{
    async fn available_slots(
        &self,
        request: AvailableSlotsRequest,
    ) -> Result<AvailableSlotsResponse, Error> {
        let service = self
            .services
            .find_by_id(request.service_id)
            .await
            .map_err(map_service_error)?
            .ok_or_else(|| Error::not_found("service not found"))?;

        let day = DayOfWeek::from_date(request.date);
        let Some(schedule) = self
            .schedules
            .find_active(request.doctor_id, day)
            .await
            .map_err(map_schedule_error)?
        else {
            // Not working that day: a successful, empty result.
            return Ok(AvailableSlotsResponse { slots: Vec::new() });
        };

        let window = schedule.window_on(request.date);
        let busy = self
            .appointments
            .find_busy_in_window(request.doctor_id, window)
            .await
            .map_err(map_appointment_error)?;

        let slots = free_slots(&window, &busy, service.duration_minutes())
            .into_iter()
            .map(format_slot)
            .collect();
        Ok(AvailableSlotsResponse { slots })
    }

    async fn is_available(&self, probe: AvailabilityProbe) -> Result<bool, Error> {
        let busy = self
            .appointments
            .find_busy_for_doctor(probe.doctor_id)
            .await
            .map_err(map_appointment_error)?;

        let proposed_end = probe.start_time + Duration::minutes(probe.duration_minutes);
        Ok(!has_conflict(&busy, probe.start_time, proposed_end))
    }
}

#[cfg(test)]
#[path = "availability_service_tests.rs"]
mod tests;
