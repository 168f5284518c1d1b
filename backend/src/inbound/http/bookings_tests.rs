//! Tests for the booking HTTP handlers.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{test as actix_test, web, App};
use serde_json::{json, Value};

use super::*;
use crate::domain::appointment::AppointmentStatus;
use crate::domain::ids::AppointmentId;
use crate::domain::ports::MockBookingCommand;
use crate::domain::Error;

fn app_with(
    bookings: MockBookingCommand,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let state = HttpState {
        bookings: Arc::new(bookings),
        ..HttpState::default()
    };
    App::new().app_data(web::Data::new(state)).service(
        web::scope("/api/v1")
            .service(create_booking)
            .service(confirm_booking)
            .service(cancel_booking),
    )
}

fn sample_payload() -> Value {
    json!({
        "doctorId": "1",
        "serviceId": "2",
        "patientName": "Ana Torres",
        "patientEmail": "ana@example.com",
        "startTime": "2026-03-02T10:00"
    })
}

#[actix_web::test]
async fn create_booking_returns_the_pending_booking_and_token() {
    let mut bookings = MockBookingCommand::new();
    bookings
        .expect_request_booking()
        .withf(|request| {
            request.doctor_id.map(|id| id.get()) == Some(1)
                && request.service_id.get() == 2
                && request.patient_email == "ana@example.com"
        })
        .return_once(|_| {
            Ok(RequestBookingResponse {
                appointment_id: AppointmentId::new(9),
                status: AppointmentStatus::PendingConfirmation,
                confirmation_token: "signed-token".to_owned(),
            })
        });
    let app = actix_test::init_service(app_with(bookings)).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/v1/bookings")
        .set_json(sample_payload())
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["appointmentId"], 9);
    assert_eq!(body["status"], "pending_confirmation");
    assert_eq!(body["confirmationToken"], "signed-token");
}

#[actix_web::test]
async fn create_booking_requires_a_doctor() {
    let mut bookings = MockBookingCommand::new();
    bookings.expect_request_booking().times(0);
    let app = actix_test::init_service(app_with(bookings)).await;

    let mut payload = sample_payload();
    payload.as_object_mut().expect("object payload").remove("doctorId");
    let request = actix_test::TestRequest::post()
        .uri("/api/v1/bookings")
        .set_json(payload)
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["message"], "missing required field: doctorId");
}

#[actix_web::test]
async fn create_booking_rejects_malformed_start_times() {
    let mut bookings = MockBookingCommand::new();
    bookings.expect_request_booking().times(0);
    let app = actix_test::init_service(app_with(bookings)).await;

    let mut payload = sample_payload();
    payload["startTime"] = json!("10:00 on Monday");
    let request = actix_test::TestRequest::post()
        .uri("/api/v1/bookings")
        .set_json(payload)
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["details"]["field"], "startTime");
}

#[actix_web::test]
async fn a_lost_slot_race_surfaces_as_conflict() {
    let mut bookings = MockBookingCommand::new();
    bookings
        .expect_request_booking()
        .return_once(|_| Err(Error::conflict("the requested slot is no longer available")));
    let app = actix_test::init_service(app_with(bookings)).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/v1/bookings")
        .set_json(sample_payload())
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["code"], "conflict");
    assert_eq!(body["message"], "the requested slot is no longer available");
}

#[actix_web::test]
async fn confirm_booking_passes_the_token_through() {
    let mut bookings = MockBookingCommand::new();
    bookings
        .expect_confirm_booking()
        .withf(|request| request.token == "signed-token")
        .return_once(|_| {
            Ok(BookingStatusResponse {
                appointment_id: AppointmentId::new(9),
                status: AppointmentStatus::Confirmed,
            })
        });
    let app = actix_test::init_service(app_with(bookings)).await;

    let request = actix_test::TestRequest::get()
        .uri("/api/v1/bookings/confirm/signed-token")
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["status"], "confirmed");
}

#[actix_web::test]
async fn an_invalid_token_is_a_bad_request() {
    let mut bookings = MockBookingCommand::new();
    bookings
        .expect_confirm_booking()
        .return_once(|_| Err(Error::invalid_request("confirmation token is invalid")));
    let app = actix_test::init_service(app_with(bookings)).await;

    let request = actix_test::TestRequest::get()
        .uri("/api/v1/bookings/confirm/forged")
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn cancel_booking_reports_the_new_status() {
    let mut bookings = MockBookingCommand::new();
    bookings
        .expect_cancel_booking()
        .withf(|request| request.token == "signed-token")
        .return_once(|_| {
            Ok(BookingStatusResponse {
                appointment_id: AppointmentId::new(9),
                status: AppointmentStatus::Cancelled,
            })
        });
    let app = actix_test::init_service(app_with(bookings)).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/v1/bookings/cancel/signed-token")
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["status"], "cancelled");
}
