//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the deployed schema exactly; migrations are
//! managed outside this service. `diesel print-schema` against a live
//! database regenerates them.

diesel::table! {
    /// One row per (doctor, weekday) of the recurring work schedule.
    ///
    /// Rows are toggled inactive rather than deleted; at most one active row
    /// exists per (doctor_id, day_of_week).
    work_schedules (id) {
        /// Primary key.
        id -> Int4,
        /// Owning doctor.
        doctor_id -> Int4,
        /// Weekday index, Monday=0 .. Sunday=6.
        day_of_week -> Int2,
        /// Wall-clock start of the working day.
        start_time -> Time,
        /// Wall-clock end of the working day.
        end_time -> Time,
        /// Whether this row currently applies.
        is_active -> Bool,
        /// Record creation timestamp.
        created_at -> Timestamp,
        /// Last modification timestamp.
        updated_at -> Timestamp,
    }
}

diesel::table! {
    /// Bookable service offerings.
    services (id) {
        /// Primary key.
        id -> Int4,
        /// Display name shown on the booking form.
        name -> Varchar,
        /// Appointment length this service occupies.
        duration_minutes -> Int4,
        /// Listed price.
        price -> Float8,
    }
}

diesel::table! {
    /// Booked appointments.
    appointments (id) {
        /// Primary key.
        id -> Int4,
        /// Assigned doctor; null on legacy bookings that predate assignment.
        doctor_id -> Nullable<Int4>,
        /// Booked service. No FK constraint is relied upon; the row may
        /// dangle, in which case a 30-minute duration is assumed.
        service_id -> Int4,
        /// Patient name as entered on the booking form.
        patient_name -> Varchar,
        /// Patient contact email.
        patient_email -> Varchar,
        /// Scheduled start (wall clock).
        start_time -> Timestamp,
        /// Lifecycle status string.
        status -> Varchar,
        /// Outstanding confirmation token, if issued.
        confirmation_token -> Nullable<Varchar>,
        /// Record creation timestamp.
        created_at -> Timestamp,
    }
}

diesel::joinable!(appointments -> services (service_id));

diesel::allow_tables_to_appear_in_same_query!(appointments, services, work_schedules);
