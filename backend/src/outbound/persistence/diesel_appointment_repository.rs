//! PostgreSQL-backed `AppointmentRepository` implementation using Diesel.
//!
//! The write path is the enforcement point for the core invariant: for a
//! fixed doctor, at most one non-cancelled booking may occupy a given
//! instant. [`insert_if_free`](DieselAppointmentRepository) takes a
//! per-doctor advisory transaction lock, re-runs the shared overlap
//! predicate over the doctor's live bookings, and inserts — all inside one
//! transaction, so racing requests for the same slot serialise.

use async_trait::async_trait;
use chrono::{Duration, NaiveDateTime};
use diesel::prelude::*;
use diesel_async::{AsyncConnection, RunQueryDsl};
use scoped_futures::ScopedFutureExt;

use crate::domain::ports::{AppointmentRepository, AppointmentRepositoryError};
use crate::domain::{
    has_conflict, Appointment, AppointmentDraft, AppointmentId, AppointmentStatus, BusyInterval,
    DoctorId, NewAppointment, WorkingWindow, DEFAULT_DURATION_MINUTES,
};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{AppointmentRow, NewAppointmentRow};
use super::pool::{DbPool, PoolError};
use super::schema::{appointments, services};

/// Advisory lock key for bookings without a doctor. Doctor ids are positive
/// serials, so the sentinel can never collide with a real doctor's key.
const GLOBAL_BOOKING_LOCK_KEY: i64 = -1;

/// Diesel-backed implementation of the appointment port.
#[derive(Clone)]
pub struct DieselAppointmentRepository {
    pool: DbPool,
}

impl DieselAppointmentRepository {
    /// Create a new repository over the shared connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> AppointmentRepositoryError {
    map_pool_error(error, AppointmentRepositoryError::connection)
}

fn map_diesel(error: diesel::result::Error) -> AppointmentRepositoryError {
    map_diesel_error(
        error,
        AppointmentRepositoryError::query,
        AppointmentRepositoryError::connection,
    )
}

fn lock_key_for(doctor_id: Option<DoctorId>) -> i64 {
    doctor_id.map_or(GLOBAL_BOOKING_LOCK_KEY, |id| i64::from(id.get()))
}

/// Derive busy intervals from (start, duration) rows, applying the fallback
/// duration where the service link dangles.
fn rows_to_busy(rows: Vec<(NaiveDateTime, Option<i32>)>) -> Vec<BusyInterval> {
    rows.into_iter()
        .map(|(start, duration)| {
            BusyInterval::from_start(
                start,
                duration.map_or(DEFAULT_DURATION_MINUTES, i64::from),
            )
        })
        .collect()
}

/// Convert a database row into a validated domain appointment.
fn row_to_appointment(row: AppointmentRow) -> Result<Appointment, AppointmentRepositoryError> {
    let status: AppointmentStatus = row
        .status
        .parse()
        .map_err(|err: crate::domain::AppointmentValidationError| {
            AppointmentRepositoryError::query(err.to_string())
        })?;

    Appointment::new(AppointmentDraft {
        id: AppointmentId::new(row.id),
        doctor_id: row.doctor_id.map(DoctorId::new),
        service_id: crate::domain::ServiceId::new(row.service_id),
        patient_name: row.patient_name,
        patient_email: row.patient_email,
        start_time: row.start_time,
        status,
        confirmation_token: row.confirmation_token,
        created_at: row.created_at,
    })
    .map_err(|err| AppointmentRepositoryError::query(err.to_string()))
}

#[async_trait]
impl AppointmentRepository for DieselAppointmentRepository {
    async fn find_busy_in_window(
        &self,
        doctor_id: DoctorId,
        window: WorkingWindow,
    ) -> Result<Vec<BusyInterval>, AppointmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        // Only bookings that *start* inside the window are considered; one
        // that starts earlier and runs into the window is not seen here. The
        // write-time check has no such filter and still rejects the overlap.
        let rows: Vec<(NaiveDateTime, Option<i32>)> = appointments::table
            .left_join(services::table)
            .filter(appointments::status.ne(AppointmentStatus::Cancelled.as_str()))
            .filter(appointments::doctor_id.eq(doctor_id.get()))
            .filter(appointments::start_time.ge(window.start()))
            .filter(appointments::start_time.lt(window.end()))
            .select((appointments::start_time, services::duration_minutes.nullable()))
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;

        Ok(rows_to_busy(rows))
    }

    async fn find_busy_for_doctor(
        &self,
        doctor_id: Option<DoctorId>,
    ) -> Result<Vec<BusyInterval>, AppointmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let mut query = appointments::table
            .left_join(services::table)
            .filter(appointments::status.ne(AppointmentStatus::Cancelled.as_str()))
            .select((appointments::start_time, services::duration_minutes.nullable()))
            .into_boxed();
        if let Some(doctor) = doctor_id {
            query = query.filter(appointments::doctor_id.eq(doctor.get()));
        }

        let rows: Vec<(NaiveDateTime, Option<i32>)> =
            query.load(&mut conn).await.map_err(map_diesel)?;
        Ok(rows_to_busy(rows))
    }

    async fn insert_if_free(
        &self,
        booking: NewAppointment,
    ) -> Result<Appointment, AppointmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let lock_key = lock_key_for(booking.doctor_id);
        let proposed_end = booking.start_time + Duration::minutes(booking.duration_minutes);
        let created_at = chrono::Utc::now().naive_utc();

        let inserted: Option<AppointmentRow> = conn
            .transaction::<_, diesel::result::Error, _>(|conn| {
                let booking = &booking;
                async move {
                    // Serialise racing inserts for the same doctor. A booking
                    // without a doctor takes a single global key instead; its
                    // overlap read below is global to match.
                    diesel::sql_query("SELECT pg_advisory_xact_lock($1)")
                        .bind::<diesel::sql_types::BigInt, _>(lock_key)
                        .execute(conn)
                        .await?;

                    let mut conflict_query = appointments::table
                        .left_join(services::table)
                        .filter(appointments::status.ne(AppointmentStatus::Cancelled.as_str()))
                        .select((
                            appointments::start_time,
                            services::duration_minutes.nullable(),
                        ))
                        .into_boxed();
                    if let Some(doctor) = booking.doctor_id {
                        conflict_query =
                            conflict_query.filter(appointments::doctor_id.eq(doctor.get()));
                    }
                    let rows: Vec<(NaiveDateTime, Option<i32>)> =
                        conflict_query.load(conn).await?;

                    let busy = rows_to_busy(rows);
                    if has_conflict(&busy, booking.start_time, proposed_end) {
                        return Ok(None);
                    }

                    let new_row = NewAppointmentRow {
                        doctor_id: booking.doctor_id.map(DoctorId::get),
                        service_id: booking.service_id.get(),
                        patient_name: booking.patient_name.as_str(),
                        patient_email: booking.patient_email.as_str(),
                        start_time: booking.start_time,
                        status: AppointmentStatus::PendingConfirmation.as_str(),
                        confirmation_token: booking.confirmation_token.as_str(),
                        created_at,
                    };
                    let row = diesel::insert_into(appointments::table)
                        .values(&new_row)
                        .returning(AppointmentRow::as_returning())
                        .get_result::<AppointmentRow>(conn)
                        .await?;
                    Ok(Some(row))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel)?;

        match inserted {
            Some(row) => row_to_appointment(row),
            None => Err(AppointmentRepositoryError::slot_taken()),
        }
    }

    async fn find_by_token(
        &self,
        token: &str,
    ) -> Result<Option<Appointment>, AppointmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row = appointments::table
            .filter(appointments::confirmation_token.eq(token))
            .select(AppointmentRow::as_select())
            .first::<AppointmentRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;

        row.map(row_to_appointment).transpose()
    }

    async fn find_by_id(
        &self,
        appointment_id: AppointmentId,
    ) -> Result<Option<Appointment>, AppointmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row = appointments::table
            .find(appointment_id.get())
            .select(AppointmentRow::as_select())
            .first::<AppointmentRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;

        row.map(row_to_appointment).transpose()
    }

    async fn update_status(
        &self,
        appointment_id: AppointmentId,
        status: AppointmentStatus,
    ) -> Result<(), AppointmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let updated = diesel::update(appointments::table.find(appointment_id.get()))
            .set(appointments::status.eq(status.as_str()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel)?;

        if updated == 0 {
            return Err(AppointmentRepositoryError::query(format!(
                "appointment {appointment_id} not found"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for row conversion and error mapping.

    use rstest::{fixture, rstest};

    use super::*;

    fn timestamp(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M").expect("valid timestamp")
    }

    #[fixture]
    fn valid_row() -> AppointmentRow {
        AppointmentRow {
            id: 9,
            doctor_id: Some(1),
            service_id: 2,
            patient_name: "Ana Torres".to_owned(),
            patient_email: "ana@example.com".to_owned(),
            start_time: timestamp("2026-03-02T10:00"),
            status: "pending_confirmation".to_owned(),
            confirmation_token: Some("tok".to_owned()),
            created_at: timestamp("2026-03-01T08:00"),
        }
    }

    #[rstest]
    fn valid_rows_convert(valid_row: AppointmentRow) {
        let appointment = row_to_appointment(valid_row).expect("valid row converts");
        assert_eq!(appointment.id(), AppointmentId::new(9));
        assert_eq!(appointment.status(), AppointmentStatus::PendingConfirmation);
    }

    #[rstest]
    fn unknown_status_strings_are_query_errors(mut valid_row: AppointmentRow) {
        valid_row.status = "pendiente".to_owned();
        let err = row_to_appointment(valid_row).expect_err("unknown status");
        assert!(matches!(err, AppointmentRepositoryError::Query { .. }));
    }

    #[rstest]
    fn dangling_service_rows_occupy_the_fallback_duration() {
        let busy = rows_to_busy(vec![(timestamp("2026-03-02T10:00"), None)]);
        assert_eq!(busy[0].end(), timestamp("2026-03-02T10:30"));
    }

    #[rstest]
    fn linked_service_rows_use_their_duration() {
        let busy = rows_to_busy(vec![(timestamp("2026-03-02T10:00"), Some(45))]);
        assert_eq!(busy[0].end(), timestamp("2026-03-02T10:45"));
    }

    #[rstest]
    fn doctorless_bookings_take_the_global_lock_key() {
        assert_eq!(lock_key_for(None), GLOBAL_BOOKING_LOCK_KEY);
        assert_eq!(lock_key_for(Some(DoctorId::new(42))), 42);
    }

    #[rstest]
    fn pool_errors_map_to_connection_errors() {
        let err = map_pool(PoolError::checkout("connection refused"));
        assert!(matches!(err, AppointmentRepositoryError::Connection { .. }));
        assert!(err.to_string().contains("connection refused"));
    }
}
