//! Booking lifecycle domain service.
//!
//! Implements the [`BookingCommand`] driving port. The slot race described in
//! the concurrency model is closed here by delegating the final overlap check
//! to [`AppointmentRepository::insert_if_free`], which performs the re-check
//! and the insert inside a single storage transaction.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::appointment::{Appointment, NewAppointment};
use crate::domain::ports::{
    AppointmentRepository, AppointmentRepositoryError, BookingCommand, BookingStatusResponse,
    CancelBookingRequest, CompleteBookingRequest, ConfirmBookingRequest, ConfirmationTokenError,
    ConfirmationTokens, RequestBookingRequest, RequestBookingResponse, ServiceRepository,
    ServiceRepositoryError,
};
use crate::domain::Error;

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
        AppointmentRepositoryError::SlotTaken => {
            Error::conflict("the requested slot is no longer available")
        }
    }
}

fn map_token_error(error: ConfirmationTokenError) -> Error {
    match error {
        ConfirmationTokenError::Invalid | ConfirmationTokenError::Expired => {
            Error::invalid_request(error.to_string())
        }
        ConfirmationTokenError::Issue { message } => {
            Error::internal(format!("confirmation token issue failed: {message}"))
        }
    }
}

/// Booking service over the appointment store, the service catalogue, and
/// the token signer.
#[derive(Clone)]
pub struct BookingService<C, A, T> {
    services: Arc<C>,
    appointments: Arc<A>,
    tokens: Arc<T>,
}

impl<C, A, T> BookingService<C, A, T> {
    /// Create the service from its collaborators.
    pub fn new(services: Arc<C>, appointments: Arc<A>, tokens: Arc<T>) -> Self {
        Self {
            services,
            appointments,
            tokens,
        }
    }
}

impl<C, A, T> BookingService<C, A, T>
where
    A: AppointmentRepository,
    T: ConfirmationTokens,
{
    /// Resolve a token to the booking it belongs to, checking that the email
    /// bound into the token matches the stored booking.
    async fn booking_for_token(&self, token: &str) -> Result<Appointment, Error> {
        let email = self.tokens.verify(token).map_err(map_token_error)?;
        let appointment = self
            .appointments
            .find_by_token(token)
            .await
            .map_err(map_appointment_error)?
            .ok_or_else(|| Error::not_found("no booking matches this confirmation token"))?;

        if !appointment.patient_email().eq_ignore_ascii_case(&email) {
            return Err(Error::invalid_request("confirmation token is invalid"));
        }
        Ok(appointment)
    }

    /// Persist a transition the entity has already accepted.
    async fn store_status(&self, appointment: &Appointment) -> Result<BookingStatusResponse, Error> {
        self.appointments
            .update_status(appointment.id(), appointment.status())
            .await
            .map_err(map_appointment_error)?;
        Ok(BookingStatusResponse {
            appointment_id: appointment.id(),
            status: appointment.status(),
        })
    }
}

#[async_trait]
impl<C, A, T> BookingCommand for BookingService<C, A, T>
where
    C: ServiceRepository,
    A: AppointmentRepository,
    T: ConfirmationTokens,
{
    async fn request_booking(
        &self,
        request: RequestBookingRequest,
    ) -> Result<RequestBookingResponse, Error> {
        let service = self
            .services
            .find_by_id(request.service_id)
            .await
            .map_err(map_service_error)?
            .ok_or_else(|| Error::not_found("service not found"))?;

        let token = self
            .tokens
            .issue(&request.patient_email)
            .map_err(map_token_error)?;

        let booking = NewAppointment {
            doctor_id: request.doctor_id,
            service_id: request.service_id,
            patient_name: request.patient_name,
            patient_email: request.patient_email,
            start_time: request.start_time,
            duration_minutes: service.duration_minutes(),
            confirmation_token: token.clone(),
        };
        booking
            .validate()
            .map_err(|err| Error::invalid_request(err.to_string()))?;

        let stored = self
            .appointments
            .insert_if_free(booking)
            .await
            .map_err(map_appointment_error)?;

        Ok(RequestBookingResponse {
            appointment_id: stored.id(),
            status: stored.status(),
            confirmation_token: token,
        })
    }

    async fn confirm_booking(
        &self,
        request: ConfirmBookingRequest,
    ) -> Result<BookingStatusResponse, Error> {
        let mut appointment = self.booking_for_token(&request.token).await?;
        appointment
            .confirm()
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        self.store_status(&appointment).await
    }

    async fn cancel_booking(
        &self,
        request: CancelBookingRequest,
    ) -> Result<BookingStatusResponse, Error> {
        let mut appointment = self.booking_for_token(&request.token).await?;
        appointment
            .cancel()
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        self.store_status(&appointment).await
    }

    async fn complete_booking(
        &self,
        request: CompleteBookingRequest,
    ) -> Result<BookingStatusResponse, Error> {
        let mut appointment = self
            .appointments
            .find_by_id(request.appointment_id)
            .await
            .map_err(map_appointment_error)?
            .ok_or_else(|| {
                Error::not_found(format!("booking {} not found", request.appointment_id))
            })?;
        appointment
            .complete()
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        self.store_status(&appointment).await
    }
}

#[cfg(test)]
#[path = "booking_service_tests.rs"]
mod tests;
