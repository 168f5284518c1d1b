//! Tests for the booking service.

use std::sync::Arc;

use chrono::NaiveDateTime;
use mockall::predicate::eq;

use super::*;
use crate::domain::appointment::{AppointmentDraft, AppointmentStatus};
use crate::domain::ids::{AppointmentId, DoctorId, ServiceId};
use crate::domain::ports::{
    MockAppointmentRepository, MockConfirmationTokens, MockServiceRepository,
};
use crate::domain::service::Service;
use crate::domain::ErrorCode;

fn timestamp(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M").expect("valid timestamp")
}

fn consultation() -> Service {
    Service::new(ServiceId::new(1), "Consulta General", 30, 50.0).expect("valid service")
}

fn sample_request() -> RequestBookingRequest {
    RequestBookingRequest {
        doctor_id: Some(DoctorId::new(1)),
        service_id: ServiceId::new(1),
        patient_name: "Ana Torres".to_owned(),
        patient_email: "ana@example.com".to_owned(),
        start_time: timestamp("2026-03-02T10:00"),
    }
}

fn stored_pending(token: &str) -> Appointment {
    Appointment::new(AppointmentDraft {
        id: AppointmentId::new(9),
        doctor_id: Some(DoctorId::new(1)),
        service_id: ServiceId::new(1),
        patient_name: "Ana Torres".to_owned(),
        patient_email: "ana@example.com".to_owned(),
        start_time: timestamp("2026-03-02T10:00"),
        status: AppointmentStatus::PendingConfirmation,
        confirmation_token: Some(token.to_owned()),
        created_at: timestamp("2026-03-01T08:00"),
    })
    .expect("valid appointment")
}

fn service_with(
    services: MockServiceRepository,
    appointments: MockAppointmentRepository,
    tokens: MockConfirmationTokens,
) -> BookingService<MockServiceRepository, MockAppointmentRepository, MockConfirmationTokens> {
    BookingService::new(Arc::new(services), Arc::new(appointments), Arc::new(tokens))
}

#[tokio::test]
async fn request_booking_stores_a_pending_appointment_with_its_token() {
    let mut services = MockServiceRepository::new();
    services
        .expect_find_by_id()
        .return_once(|_| Ok(Some(consultation())));
    let mut tokens = MockConfirmationTokens::new();
    tokens
        .expect_issue()
        .with(eq("ana@example.com"))
        .return_once(|_| Ok("signed-token".to_owned()));
    let mut appointments = MockAppointmentRepository::new();
    appointments
        .expect_insert_if_free()
        .withf(|booking| {
            booking.duration_minutes == 30 && booking.confirmation_token == "signed-token"
        })
        .return_once(|_| Ok(stored_pending("signed-token")));

    let response = service_with(services, appointments, tokens)
        .request_booking(sample_request())
        .await
        .expect("booking request succeeds");

    assert_eq!(response.appointment_id, AppointmentId::new(9));
    assert_eq!(response.status, AppointmentStatus::PendingConfirmation);
    assert_eq!(response.confirmation_token, "signed-token");
}

#[tokio::test]
async fn request_booking_maps_slot_taken_to_conflict() {
    let mut services = MockServiceRepository::new();
    services
        .expect_find_by_id()
        .return_once(|_| Ok(Some(consultation())));
    let mut tokens = MockConfirmationTokens::new();
    tokens
        .expect_issue()
        .return_once(|_| Ok("signed-token".to_owned()));
    let mut appointments = MockAppointmentRepository::new();
    appointments
        .expect_insert_if_free()
        .return_once(|_| Err(AppointmentRepositoryError::slot_taken()));

    let error = service_with(services, appointments, tokens)
        .request_booking(sample_request())
        .await
        .expect_err("slot already booked");

    assert_eq!(error.code(), ErrorCode::Conflict);
    assert_eq!(error.message(), "the requested slot is no longer available");
}

#[tokio::test]
async fn request_booking_rejects_unknown_services() {
    let mut services = MockServiceRepository::new();
    services.expect_find_by_id().return_once(|_| Ok(None));
    let mut tokens = MockConfirmationTokens::new();
    tokens.expect_issue().times(0);
    let mut appointments = MockAppointmentRepository::new();
    appointments.expect_insert_if_free().times(0);

    let error = service_with(services, appointments, tokens)
        .request_booking(sample_request())
        .await
        .expect_err("unknown service");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn request_booking_rejects_blank_patient_names() {
    let mut services = MockServiceRepository::new();
    services
        .expect_find_by_id()
        .return_once(|_| Ok(Some(consultation())));
    let mut tokens = MockConfirmationTokens::new();
    tokens
        .expect_issue()
        .return_once(|_| Ok("signed-token".to_owned()));
    let mut appointments = MockAppointmentRepository::new();
    appointments.expect_insert_if_free().times(0);

    let mut request = sample_request();
    request.patient_name = "   ".to_owned();
    let error = service_with(services, appointments, tokens)
        .request_booking(request)
        .await
        .expect_err("blank name");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
}

#[tokio::test]
async fn confirm_booking_transitions_pending_to_confirmed() {
    let mut tokens = MockConfirmationTokens::new();
    tokens
        .expect_verify()
        .with(eq("signed-token"))
        .return_once(|_| Ok("ana@example.com".to_owned()));
    let mut appointments = MockAppointmentRepository::new();
    appointments
        .expect_find_by_token()
        .return_once(|_| Ok(Some(stored_pending("signed-token"))));
    appointments
        .expect_update_status()
        .with(eq(AppointmentId::new(9)), eq(AppointmentStatus::Confirmed))
        .return_once(|_, _| Ok(()));
    let services = MockServiceRepository::new();

    let response = service_with(services, appointments, tokens)
        .confirm_booking(ConfirmBookingRequest {
            token: "signed-token".to_owned(),
        })
        .await
        .expect("confirmation succeeds");

    assert_eq!(response.status, AppointmentStatus::Confirmed);
}

#[tokio::test]
async fn confirm_booking_rejects_token_email_mismatch() {
    let mut tokens = MockConfirmationTokens::new();
    tokens
        .expect_verify()
        .return_once(|_| Ok("someone-else@example.com".to_owned()));
    let mut appointments = MockAppointmentRepository::new();
    appointments
        .expect_find_by_token()
        .return_once(|_| Ok(Some(stored_pending("signed-token"))));
    appointments.expect_update_status().times(0);
    let services = MockServiceRepository::new();

    let error = service_with(services, appointments, tokens)
        .confirm_booking(ConfirmBookingRequest {
            token: "signed-token".to_owned(),
        })
        .await
        .expect_err("email mismatch");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
}

#[tokio::test]
async fn confirm_booking_maps_expired_tokens_to_invalid_request() {
    let mut tokens = MockConfirmationTokens::new();
    tokens
        .expect_verify()
        .return_once(|_| Err(ConfirmationTokenError::expired()));
    let mut appointments = MockAppointmentRepository::new();
    appointments.expect_find_by_token().times(0);
    let services = MockServiceRepository::new();

    let error = service_with(services, appointments, tokens)
        .confirm_booking(ConfirmBookingRequest {
            token: "stale".to_owned(),
        })
        .await
        .expect_err("expired token");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert_eq!(error.message(), "confirmation token has expired");
}

#[tokio::test]
async fn confirm_booking_rejects_double_confirmation() {
    let mut confirmed = stored_pending("signed-token");
    confirmed.confirm().expect("pending confirms");

    let mut tokens = MockConfirmationTokens::new();
    tokens
        .expect_verify()
        .return_once(|_| Ok("ana@example.com".to_owned()));
    let mut appointments = MockAppointmentRepository::new();
    appointments
        .expect_find_by_token()
        .return_once(move |_| Ok(Some(confirmed)));
    appointments.expect_update_status().times(0);
    let services = MockServiceRepository::new();

    let error = service_with(services, appointments, tokens)
        .confirm_booking(ConfirmBookingRequest {
            token: "signed-token".to_owned(),
        })
        .await
        .expect_err("already confirmed");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
}

#[tokio::test]
async fn cancel_booking_reaches_cancelled_via_token() {
    let mut tokens = MockConfirmationTokens::new();
    tokens
        .expect_verify()
        .return_once(|_| Ok("ana@example.com".to_owned()));
    let mut appointments = MockAppointmentRepository::new();
    appointments
        .expect_find_by_token()
        .return_once(|_| Ok(Some(stored_pending("signed-token"))));
    appointments
        .expect_update_status()
        .with(eq(AppointmentId::new(9)), eq(AppointmentStatus::Cancelled))
        .return_once(|_, _| Ok(()));
    let services = MockServiceRepository::new();

    let response = service_with(services, appointments, tokens)
        .cancel_booking(CancelBookingRequest {
            token: "signed-token".to_owned(),
        })
        .await
        .expect("cancellation succeeds");

    assert_eq!(response.status, AppointmentStatus::Cancelled);
}

#[tokio::test]
async fn complete_booking_requires_a_confirmed_appointment() {
    let mut appointments = MockAppointmentRepository::new();
    appointments
        .expect_find_by_id()
        .return_once(|_| Ok(Some(stored_pending("signed-token"))));
    appointments.expect_update_status().times(0);
    let services = MockServiceRepository::new();
    let tokens = MockConfirmationTokens::new();

    let error = service_with(services, appointments, tokens)
        .complete_booking(CompleteBookingRequest {
            appointment_id: AppointmentId::new(9),
        })
        .await
        .expect_err("pending cannot complete");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
}

#[tokio::test]
async fn complete_booking_marks_a_confirmed_visit_done() {
    let mut confirmed = stored_pending("signed-token");
    confirmed.confirm().expect("pending confirms");

    let mut appointments = MockAppointmentRepository::new();
    appointments
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(confirmed)));
    appointments
        .expect_update_status()
        .with(eq(AppointmentId::new(9)), eq(AppointmentStatus::Completed))
        .return_once(|_, _| Ok(()));
    let services = MockServiceRepository::new();
    let tokens = MockConfirmationTokens::new();

    let response = service_with(services, appointments, tokens)
        .complete_booking(CompleteBookingRequest {
            appointment_id: AppointmentId::new(9),
        })
        .await
        .expect("completion succeeds");

    assert_eq!(response.status, AppointmentStatus::Completed);
}

#[tokio::test]
async fn missing_booking_maps_to_not_found() {
    let mut appointments = MockAppointmentRepository::new();
    appointments.expect_find_by_id().return_once(|_| Ok(None));
    let services = MockServiceRepository::new();
    let tokens = MockConfirmationTokens::new();

    let error = service_with(services, appointments, tokens)
        .complete_booking(CompleteBookingRequest {
            appointment_id: AppointmentId::new(404),
        })
        .await
        .expect_err("unknown booking");

    assert_eq!(error.code(), ErrorCode::NotFound);
}
