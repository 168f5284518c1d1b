//! Driving port for slot availability reads.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::ids::{DoctorId, ServiceId};
use crate::domain::Error;

/// Request for the bookable start times on one calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableSlotsRequest {
    pub doctor_id: DoctorId,
    pub service_id: ServiceId,
    pub date: NaiveDate,
}

/// Ordered, fully materialised `HH:MM` start times.
///
/// Regenerated on every call; bookings may change between calls, so nothing
/// here is cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableSlotsResponse {
    pub slots: Vec<String>,
}

/// A single proposed booking interval to validate at write time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityProbe {
    /// `None` falls back to the legacy global check across all doctors.
    pub doctor_id: Option<DoctorId>,
    pub start_time: NaiveDateTime,
    pub duration_minutes: i64,
}

/// Driving port for availability reads and the advisory booking probe.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AvailabilityQuery: Send + Sync {
    /// Enumerate free slots for (doctor, service, date).
    ///
    /// An empty list is a successful result: it covers fully booked days and
    /// days the doctor does not work at all.
    async fn available_slots(
        &self,
        request: AvailableSlotsRequest,
    ) -> Result<AvailableSlotsResponse, Error>;

    /// Whether the proposed interval is free of overlap with any
    /// non-cancelled booking.
    ///
    /// Advisory only: the race between this read and a subsequent insert is
    /// closed by the repository's transactional insert, not here.
    async fn is_available(&self, probe: AvailabilityProbe) -> Result<bool, Error>;
}

/// Fixture implementation: an empty diary with no working days.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAvailabilityQuery;

#[async_trait]
impl AvailabilityQuery for FixtureAvailabilityQuery {
    async fn available_slots(
        &self,
        _request: AvailableSlotsRequest,
    ) -> Result<AvailableSlotsResponse, Error> {
        Ok(AvailableSlotsResponse { slots: Vec::new() })
    }

    async fn is_available(&self, _probe: AvailabilityProbe) -> Result<bool, Error> {
        Ok(true)
    }
}
