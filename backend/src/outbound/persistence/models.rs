//! Internal Diesel row structs for database operations.
//!
//! Implementation details of the persistence layer; never exposed to the
//! domain. Repositories convert rows through the validated domain
//! constructors on the way out.

use chrono::{NaiveDateTime, NaiveTime};
use diesel::prelude::*;

use super::schema::{appointments, services, work_schedules};

/// Row struct for reading from the work_schedules table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = work_schedules)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct WorkScheduleRow {
    #[expect(dead_code, reason = "primary key read for completeness; lookups are by doctor+day")]
    pub id: i32,
    pub doctor_id: i32,
    pub day_of_week: i16,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    #[expect(dead_code, reason = "queries filter on the column; the flag itself is not re-read")]
    pub is_active: bool,
    #[expect(dead_code, reason = "schema field for audit trail support")]
    pub created_at: NaiveDateTime,
    #[expect(dead_code, reason = "schema field for audit trail support")]
    pub updated_at: NaiveDateTime,
}

/// Row struct for reading from the services table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = services)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ServiceRow {
    pub id: i32,
    pub name: String,
    pub duration_minutes: i32,
    pub price: f64,
}

/// Row struct for reading from the appointments table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = appointments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AppointmentRow {
    pub id: i32,
    pub doctor_id: Option<i32>,
    pub service_id: i32,
    pub patient_name: String,
    pub patient_email: String,
    pub start_time: NaiveDateTime,
    pub status: String,
    pub confirmation_token: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Insertable struct for creating appointment records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = appointments)]
pub(crate) struct NewAppointmentRow<'a> {
    pub doctor_id: Option<i32>,
    pub service_id: i32,
    pub patient_name: &'a str,
    pub patient_email: &'a str,
    pub start_time: NaiveDateTime,
    pub status: &'a str,
    pub confirmation_token: &'a str,
    pub created_at: NaiveDateTime,
}
