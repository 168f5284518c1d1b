//! Booking lifecycle HTTP handlers.
//!
//! ```text
//! POST /api/v1/bookings
//! GET  /api/v1/bookings/confirm/{token}
//! POST /api/v1/bookings/cancel/{token}
//! ```

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ids::{DoctorId, ServiceId};
use crate::domain::ports::{
    BookingStatusResponse, CancelBookingRequest, ConfirmBookingRequest, RequestBookingRequest,
    RequestBookingResponse,
};
use crate::inbound::http::error::{ApiError, ApiResult};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_datetime, parse_id, require_field, FieldName};

/// Request payload submitted by the public booking form.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequestBody {
    /// Doctor to book, as a decimal id.
    #[schema(example = "1")]
    pub doctor_id: Option<String>,
    /// Service to book, as a decimal id.
    #[schema(example = "2")]
    pub service_id: Option<String>,
    #[schema(example = "Ana Torres")]
    pub patient_name: Option<String>,
    #[schema(example = "ana@example.com")]
    pub patient_email: Option<String>,
    /// Requested start, `YYYY-MM-DDTHH:MM` wall-clock.
    #[schema(example = "2026-03-02T10:00")]
    pub start_time: Option<String>,
}

/// Response payload for a created booking.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingResponseBody {
    pub appointment_id: i32,
    #[schema(example = "pending_confirmation")]
    pub status: String,
    /// Returned directly; email delivery is handled outside this service.
    pub confirmation_token: String,
}

/// Response payload for status transitions.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingStatusResponseBody {
    pub appointment_id: i32,
    #[schema(example = "confirmed")]
    pub status: String,
}

fn parse_booking_payload(
    payload: CreateBookingRequestBody,
) -> Result<RequestBookingRequest, ApiError> {
    // The rebuilt endpoint always requires a doctor; doctorless legacy rows
    // only ever enter through old data, not through this surface.
    let doctor_id = require_field(payload.doctor_id, FieldName::new("doctorId"))?;
    let service_id = require_field(payload.service_id, FieldName::new("serviceId"))?;
    let patient_name = require_field(payload.patient_name, FieldName::new("patientName"))?;
    let patient_email = require_field(payload.patient_email, FieldName::new("patientEmail"))?;
    let start_time = require_field(payload.start_time, FieldName::new("startTime"))?;

    Ok(RequestBookingRequest {
        doctor_id: Some(DoctorId::new(parse_id(&doctor_id, FieldName::new("doctorId"))?)),
        service_id: ServiceId::new(parse_id(&service_id, FieldName::new("serviceId"))?),
        patient_name,
        patient_email,
        start_time: parse_datetime(&start_time, FieldName::new("startTime"))?,
    })
}

impl From<RequestBookingResponse> for CreateBookingResponseBody {
    fn from(value: RequestBookingResponse) -> Self {
        Self {
            appointment_id: value.appointment_id.get(),
            status: value.status.to_string(),
            confirmation_token: value.confirmation_token,
        }
    }
}

impl From<BookingStatusResponse> for BookingStatusResponseBody {
    fn from(value: BookingStatusResponse) -> Self {
        Self {
            appointment_id: value.appointment_id.get(),
            status: value.status.to_string(),
        }
    }
}

/// Request a booking; it is created pending confirmation.
///
/// The write path re-checks slot availability inside the storing transaction,
/// so two racing requests for the same slot cannot both succeed.
#[utoipa::path(
    post,
    path = "/api/v1/bookings",
    request_body = CreateBookingRequestBody,
    responses(
        (status = 200, description = "Booking created pending confirmation", body = CreateBookingResponseBody),
        (status = 400, description = "Missing or malformed fields", body = ApiError),
        (status = 404, description = "Service not found", body = ApiError),
        (status = 409, description = "Slot no longer available", body = ApiError),
        (status = 503, description = "Service unavailable", body = ApiError)
    ),
    tags = ["bookings"],
    operation_id = "createBooking"
)]
#[post("/bookings")]
pub async fn create_booking(
    state: web::Data<HttpState>,
    payload: web::Json<CreateBookingRequestBody>,
) -> ApiResult<web::Json<CreateBookingResponseBody>> {
    let request = parse_booking_payload(payload.into_inner())?;
    let response = state.bookings.request_booking(request).await?;
    Ok(web::Json(CreateBookingResponseBody::from(response)))
}

/// Confirm a pending booking with the emailed token.
#[utoipa::path(
    get,
    path = "/api/v1/bookings/confirm/{token}",
    params(("token" = String, Path, description = "Confirmation token from the booking email")),
    responses(
        (status = 200, description = "Booking confirmed", body = BookingStatusResponseBody),
        (status = 400, description = "Invalid or expired token", body = ApiError),
        (status = 404, description = "No booking matches the token", body = ApiError),
        (status = 503, description = "Service unavailable", body = ApiError)
    ),
    tags = ["bookings"],
    operation_id = "confirmBooking"
)]
#[get("/bookings/confirm/{token}")]
pub async fn confirm_booking(
    state: web::Data<HttpState>,
    token: web::Path<String>,
) -> ApiResult<web::Json<BookingStatusResponseBody>> {
    let response = state
        .bookings
        .confirm_booking(ConfirmBookingRequest {
            token: token.into_inner(),
        })
        .await?;
    Ok(web::Json(BookingStatusResponseBody::from(response)))
}

/// Cancel a booking with the emailed token.
#[utoipa::path(
    post,
    path = "/api/v1/bookings/cancel/{token}",
    params(("token" = String, Path, description = "Confirmation token from the booking email")),
    responses(
        (status = 200, description = "Booking cancelled", body = BookingStatusResponseBody),
        (status = 400, description = "Invalid or expired token", body = ApiError),
        (status = 404, description = "No booking matches the token", body = ApiError),
        (status = 503, description = "Service unavailable", body = ApiError)
    ),
    tags = ["bookings"],
    operation_id = "cancelBooking"
)]
#[post("/bookings/cancel/{token}")]
pub async fn cancel_booking(
    state: web::Data<HttpState>,
    token: web::Path<String>,
) -> ApiResult<web::Json<BookingStatusResponseBody>> {
    let response = state
        .bookings
        .cancel_booking(CancelBookingRequest {
            token: token.into_inner(),
        })
        .await?;
    Ok(web::Json(BookingStatusResponseBody::from(response)))
}

#[cfg(test)]
#[path = "bookings_tests.rs"]
mod tests;
