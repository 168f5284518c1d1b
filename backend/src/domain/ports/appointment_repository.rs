//! Port for appointment persistence and busy-interval reads.

use async_trait::async_trait;

use crate::domain::appointment::{
    Appointment, AppointmentDraft, AppointmentStatus, NewAppointment,
};
use crate::domain::ids::{AppointmentId, DoctorId};
use crate::domain::schedule::WorkingWindow;
use crate::domain::slots::BusyInterval;

use super::define_port_error;

define_port_error! {
    /// Errors raised by appointment repository adapters.
    pub enum AppointmentRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "appointment repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "appointment repository query failed: {message}",
        /// The write-time overlap re-check found the slot already occupied.
        SlotTaken =>
            "the requested slot is already booked",
    }
}

/// Port for writing bookings and reading the intervals they occupy.
///
/// Busy intervals are derived: `end = start + service duration`, falling back
/// to 30 minutes when the booking's service link dangles. Cancelled bookings
/// never appear in busy reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    /// Busy intervals for a doctor whose bookings *start* inside the window.
    ///
    /// A booking that starts before the window and runs into it is not
    /// returned; [`insert_if_free`](Self::insert_if_free) has no such filter
    /// and still rejects those overlaps at write time.
    async fn find_busy_in_window(
        &self,
        doctor_id: DoctorId,
        window: WorkingWindow,
    ) -> Result<Vec<BusyInterval>, AppointmentRepositoryError>;

    /// Busy intervals for the write-time validator, unfiltered by window.
    ///
    /// With a doctor id the read is scoped to that doctor; without one it
    /// spans every doctor, preserving the legacy behaviour for bookings that
    /// predate doctor assignment.
    async fn find_busy_for_doctor(
        &self,
        doctor_id: Option<DoctorId>,
    ) -> Result<Vec<BusyInterval>, AppointmentRepositoryError>;

    /// Atomically re-check the slot and insert the booking.
    ///
    /// Implementations must serialise the check and the insert (one
    /// transaction holding a per-doctor lock) so that, for a fixed doctor, at
    /// most one non-cancelled booking can ever occupy a given instant.
    /// Returns [`AppointmentRepositoryError::SlotTaken`] when the re-check
    /// finds a conflict.
    async fn insert_if_free(
        &self,
        booking: NewAppointment,
    ) -> Result<Appointment, AppointmentRepositoryError>;

    /// Find a booking by its confirmation token.
    async fn find_by_token(
        &self,
        token: &str,
    ) -> Result<Option<Appointment>, AppointmentRepositoryError>;

    /// Find a booking by id.
    async fn find_by_id(
        &self,
        appointment_id: AppointmentId,
    ) -> Result<Option<Appointment>, AppointmentRepositoryError>;

    /// Persist a status transition already validated by the domain.
    async fn update_status(
        &self,
        appointment_id: AppointmentId,
        status: AppointmentStatus,
    ) -> Result<(), AppointmentRepositoryError>;
}

/// Fixture implementation backed by nothing: every slot is free and no
/// booking can be found again.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAppointmentRepository;

#[async_trait]
impl AppointmentRepository for FixtureAppointmentRepository {
    async fn find_busy_in_window(
        &self,
        _doctor_id: DoctorId,
        _window: WorkingWindow,
    ) -> Result<Vec<BusyInterval>, AppointmentRepositoryError> {
        Ok(Vec::new())
    }

    async fn find_busy_for_doctor(
        &self,
        _doctor_id: Option<DoctorId>,
    ) -> Result<Vec<BusyInterval>, AppointmentRepositoryError> {
        Ok(Vec::new())
    }

    async fn insert_if_free(
        &self,
        booking: NewAppointment,
    ) -> Result<Appointment, AppointmentRepositoryError> {
        Appointment::new(AppointmentDraft {
            id: AppointmentId::new(0),
            doctor_id: booking.doctor_id,
            service_id: booking.service_id,
            patient_name: booking.patient_name,
            patient_email: booking.patient_email,
            start_time: booking.start_time,
            status: AppointmentStatus::PendingConfirmation,
            confirmation_token: Some(booking.confirmation_token),
            created_at: booking.start_time,
        })
        .map_err(|err| AppointmentRepositoryError::query(err.to_string()))
    }

    async fn find_by_token(
        &self,
        _token: &str,
    ) -> Result<Option<Appointment>, AppointmentRepositoryError> {
        Ok(None)
    }

    async fn find_by_id(
        &self,
        _appointment_id: AppointmentId,
    ) -> Result<Option<Appointment>, AppointmentRepositoryError> {
        Ok(None)
    }

    async fn update_status(
        &self,
        _appointment_id: AppointmentId,
        _status: AppointmentStatus,
    ) -> Result<(), AppointmentRepositoryError> {
        Ok(())
    }
}
