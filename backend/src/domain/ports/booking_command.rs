//! Driving port for booking mutations.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::appointment::AppointmentStatus;
use crate::domain::ids::{AppointmentId, DoctorId, ServiceId};
use crate::domain::Error;

/// Request to create a booking in `pending_confirmation`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestBookingRequest {
    /// `None` is accepted for legacy compatibility; the HTTP adapter always
    /// supplies a doctor.
    pub doctor_id: Option<DoctorId>,
    pub service_id: ServiceId,
    pub patient_name: String,
    pub patient_email: String,
    pub start_time: NaiveDateTime,
}

/// Response to a successful booking request.
///
/// Email delivery is out of scope here, so the confirmation token travels
/// back to the caller directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestBookingResponse {
    pub appointment_id: AppointmentId,
    pub status: AppointmentStatus,
    pub confirmation_token: String,
}

/// Token-authorised request to confirm a pending booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmBookingRequest {
    pub token: String,
}

/// Token-authorised request to cancel a booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelBookingRequest {
    pub token: String,
}

/// Clinic-side request to mark a confirmed booking as completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteBookingRequest {
    pub appointment_id: AppointmentId,
}

/// Outcome of a status-changing operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingStatusResponse {
    pub appointment_id: AppointmentId,
    pub status: AppointmentStatus,
}

/// Driving port for the booking lifecycle.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingCommand: Send + Sync {
    /// Validate and store a new booking; fails with a conflict error when the
    /// slot is taken.
    async fn request_booking(
        &self,
        request: RequestBookingRequest,
    ) -> Result<RequestBookingResponse, Error>;

    /// Confirm a pending booking via its emailed token.
    async fn confirm_booking(
        &self,
        request: ConfirmBookingRequest,
    ) -> Result<BookingStatusResponse, Error>;

    /// Cancel a booking via its emailed token.
    async fn cancel_booking(
        &self,
        request: CancelBookingRequest,
    ) -> Result<BookingStatusResponse, Error>;

    /// Mark a confirmed booking as completed after the visit.
    async fn complete_booking(
        &self,
        request: CompleteBookingRequest,
    ) -> Result<BookingStatusResponse, Error>;
}

/// Fixture implementation that accepts every request without persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureBookingCommand;

#[async_trait]
impl BookingCommand for FixtureBookingCommand {
    async fn request_booking(
        &self,
        _request: RequestBookingRequest,
    ) -> Result<RequestBookingResponse, Error> {
        Ok(RequestBookingResponse {
            appointment_id: AppointmentId::new(0),
            status: AppointmentStatus::PendingConfirmation,
            confirmation_token: "fixture-token".to_owned(),
        })
    }

    async fn confirm_booking(
        &self,
        _request: ConfirmBookingRequest,
    ) -> Result<BookingStatusResponse, Error> {
        Ok(BookingStatusResponse {
            appointment_id: AppointmentId::new(0),
            status: AppointmentStatus::Confirmed,
        })
    }

    async fn cancel_booking(
        &self,
        _request: CancelBookingRequest,
    ) -> Result<BookingStatusResponse, Error> {
        Ok(BookingStatusResponse {
            appointment_id: AppointmentId::new(0),
            status: AppointmentStatus::Cancelled,
        })
    }

    async fn complete_booking(
        &self,
        _request: CompleteBookingRequest,
    ) -> Result<BookingStatusResponse, Error> {
        Ok(BookingStatusResponse {
            appointment_id: AppointmentId::new(0),
            status: AppointmentStatus::Completed,
        })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[tokio::test]
    async fn fixture_walks_the_whole_lifecycle() {
        let command = FixtureBookingCommand;

        let requested = command
            .request_booking(RequestBookingRequest {
                doctor_id: Some(DoctorId::new(1)),
                service_id: ServiceId::new(1),
                patient_name: "Ana Torres".to_owned(),
                patient_email: "ana@example.com".to_owned(),
                start_time: NaiveDateTime::parse_from_str(
                    "2026-03-02T10:00",
                    "%Y-%m-%dT%H:%M",
                )
                .expect("valid timestamp"),
            })
            .await
            .expect("fixture request succeeds");
        assert_eq!(requested.status, AppointmentStatus::PendingConfirmation);

        let confirmed = command
            .confirm_booking(ConfirmBookingRequest {
                token: requested.confirmation_token,
            })
            .await
            .expect("fixture confirm succeeds");
        assert_eq!(confirmed.status, AppointmentStatus::Confirmed);

        let completed = command
            .complete_booking(CompleteBookingRequest {
                appointment_id: confirmed.appointment_id,
            })
            .await
            .expect("fixture complete succeeds");
        assert_eq!(completed.status, AppointmentStatus::Completed);
    }
}
