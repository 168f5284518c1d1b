//! Slot availability HTTP handler.
//!
//! ```text
//! GET /api/v1/slots?doctorId=1&serviceId=2&date=2026-03-02
//! ```

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::ids::{DoctorId, ServiceId};
use crate::domain::ports::AvailableSlotsRequest;
use crate::inbound::http::error::{ApiError, ApiResult};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    parse_date, parse_id, require_field, FieldName,
};

/// Query parameters for the slot listing.
///
/// Every field is required; they are optional here only so absence can be
/// reported as a structured validation error rather than a bare 400.
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct SlotsQuery {
    /// Doctor to look up, as a decimal id.
    pub doctor_id: Option<String>,
    /// Service whose duration shapes the slots, as a decimal id.
    pub service_id: Option<String>,
    /// Calendar date in `YYYY-MM-DD` format.
    pub date: Option<String>,
}

/// Bookable start times, ordered and formatted as `HH:MM`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SlotsResponseBody {
    #[schema(example = json!(["09:00", "09:15", "09:30"]))]
    pub slots: Vec<String>,
}

fn parse_slots_query(query: SlotsQuery) -> Result<AvailableSlotsRequest, ApiError> {
    let doctor_id = require_field(query.doctor_id, FieldName::new("doctorId"))?;
    let service_id = require_field(query.service_id, FieldName::new("serviceId"))?;
    let date = require_field(query.date, FieldName::new("date"))?;

    Ok(AvailableSlotsRequest {
        doctor_id: DoctorId::new(parse_id(&doctor_id, FieldName::new("doctorId"))?),
        service_id: ServiceId::new(parse_id(&service_id, FieldName::new("serviceId"))?),
        date: parse_date(&date, FieldName::new("date"))?,
    })
}

/// List the bookable start times for a doctor, service, and date.
///
/// An empty list is a normal answer: the day may be fully booked or outside
/// the doctor's working schedule.
#[utoipa::path(
    get,
    path = "/api/v1/slots",
    params(SlotsQuery),
    responses(
        (status = 200, description = "Available slots, possibly empty", body = SlotsResponseBody),
        (status = 400, description = "Missing or malformed parameters", body = ApiError),
        (status = 404, description = "Service not found", body = ApiError),
        (status = 503, description = "Service unavailable", body = ApiError)
    ),
    tags = ["slots"],
    operation_id = "listSlots"
)]
#[get("/slots")]
pub async fn list_slots(
    state: web::Data<HttpState>,
    query: web::Query<SlotsQuery>,
) -> ApiResult<web::Json<SlotsResponseBody>> {
    let request = parse_slots_query(query.into_inner())?;
    let response = state.availability.available_slots(request).await?;
    Ok(web::Json(SlotsResponseBody {
        slots: response.slots,
    }))
}

#[cfg(test)]
#[path = "slots_tests.rs"]
mod tests;
