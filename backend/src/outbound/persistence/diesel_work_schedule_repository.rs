//! PostgreSQL-backed `WorkScheduleRepository` implementation using Diesel.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{WorkScheduleRepository, WorkScheduleRepositoryError};
use crate::domain::{DayOfWeek, DoctorId, WorkSchedule};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::WorkScheduleRow;
use super::pool::{DbPool, PoolError};
use super::schema::work_schedules;

/// Diesel-backed implementation of the work schedule port.
#[derive(Clone)]
pub struct DieselWorkScheduleRepository {
    pool: DbPool,
}

impl DieselWorkScheduleRepository {
    /// Create a new repository over the shared connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> WorkScheduleRepositoryError {
    map_pool_error(error, WorkScheduleRepositoryError::connection)
}

fn map_diesel(error: diesel::result::Error) -> WorkScheduleRepositoryError {
    map_diesel_error(
        error,
        WorkScheduleRepositoryError::query,
        WorkScheduleRepositoryError::connection,
    )
}

/// Convert a database row into a validated schedule entity.
fn row_to_schedule(row: WorkScheduleRow) -> Result<WorkSchedule, WorkScheduleRepositoryError> {
    let day = u8::try_from(row.day_of_week)
        .ok()
        .map(DayOfWeek::try_new)
        .transpose()
        .map_err(|err| WorkScheduleRepositoryError::query(err.to_string()))?
        .ok_or_else(|| {
            WorkScheduleRepositoryError::query(format!(
                "day_of_week {} out of range",
                row.day_of_week
            ))
        })?;

    WorkSchedule::new(
        DoctorId::new(row.doctor_id),
        day,
        row.start_time,
        row.end_time,
    )
    .map_err(|err| WorkScheduleRepositoryError::query(err.to_string()))
}

#[async_trait]
impl WorkScheduleRepository for DieselWorkScheduleRepository {
    async fn find_active(
        &self,
        doctor_id: DoctorId,
        day: DayOfWeek,
    ) -> Result<Option<WorkSchedule>, WorkScheduleRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row = work_schedules::table
            .filter(work_schedules::doctor_id.eq(doctor_id.get()))
            .filter(work_schedules::day_of_week.eq(i16::from(day.index())))
            .filter(work_schedules::is_active.eq(true))
            .select(WorkScheduleRow::as_select())
            .first::<WorkScheduleRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;

        row.map(row_to_schedule).transpose()
    }
}
