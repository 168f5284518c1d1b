//! Port for reading a doctor's recurring weekly schedule.

use async_trait::async_trait;

use crate::domain::ids::DoctorId;
use crate::domain::schedule::{DayOfWeek, WorkSchedule};

use super::define_port_error;

define_port_error! {
    /// Errors raised by work schedule repository adapters.
    pub enum WorkScheduleRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "work schedule repository connection failed: {message}",
        /// Query failed during execution.
        Query { message: String } =>
            "work schedule repository query failed: {message}",
    }
}

/// Port for looking up the single active schedule row per (doctor, weekday).
///
/// `None` means the doctor does not work that day; callers treat it as "no
/// available slots", never as a failure.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WorkScheduleRepository: Send + Sync {
    /// Find the active schedule row for a doctor on a weekday.
    async fn find_active(
        &self,
        doctor_id: DoctorId,
        day: DayOfWeek,
    ) -> Result<Option<WorkSchedule>, WorkScheduleRepositoryError>;
}

/// Fixture implementation for tests and database-less runs: nobody works.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureWorkScheduleRepository;

#[async_trait]
impl WorkScheduleRepository for FixtureWorkScheduleRepository {
    async fn find_active(
        &self,
        _doctor_id: DoctorId,
        _day: DayOfWeek,
    ) -> Result<Option<WorkSchedule>, WorkScheduleRepositoryError> {
        Ok(None)
    }
}
