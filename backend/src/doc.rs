//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] collects every REST endpoint and the shared schemas. Swagger UI
//! serves the generated document in debug builds.

use utoipa::OpenApi;

use crate::domain::ErrorCode;
use crate::inbound::http::bookings::{
    BookingStatusResponseBody, CreateBookingRequestBody, CreateBookingResponseBody,
};
use crate::inbound::http::slots::SlotsResponseBody;
use crate::inbound::http::ApiError;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Clinic booking API",
        description = "Appointment slot availability and booking lifecycle for a small clinic."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::slots::list_slots,
        crate::inbound::http::bookings::create_booking,
        crate::inbound::http::bookings::confirm_booking,
        crate::inbound::http::bookings::cancel_booking,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ApiError,
        ErrorCode,
        SlotsResponseBody,
        CreateBookingRequestBody,
        CreateBookingResponseBody,
        BookingStatusResponseBody,
    )),
    tags(
        (name = "slots", description = "Slot availability queries"),
        (name = "bookings", description = "Booking lifecycle operations"),
        (name = "health", description = "Liveness and readiness probes")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying the document references every endpoint and schema.

    use super::*;

    #[test]
    fn document_lists_all_endpoints() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();

        for expected in [
            "/api/v1/slots",
            "/api/v1/bookings",
            "/api/v1/bookings/confirm/{token}",
            "/api/v1/bookings/cancel/{token}",
            "/health/ready",
            "/health/live",
        ] {
            assert!(
                paths.iter().any(|path| path.as_str() == expected),
                "missing path {expected}"
            );
        }
    }

    #[test]
    fn error_schema_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.as_ref().expect("components present");
        assert!(components.schemas.contains_key("ApiError"));
        assert!(components.schemas.contains_key("SlotsResponseBody"));
    }
}
