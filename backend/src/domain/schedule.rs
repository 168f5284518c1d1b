//! Weekly work schedules and the working windows derived from them.
//!
//! A doctor's availability is described by one active schedule row per
//! weekday. Resolving a calendar date against that row yields a
//! [`WorkingWindow`], the half-open interval slot generation operates on.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::domain::ids::DoctorId;

/// Day of the week using the clinic's Monday=0 .. Sunday=6 convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DayOfWeek(u8);

/// Validation failures raised when constructing schedule types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScheduleValidationError {
    #[error("day of week must be 0 (Monday) to 6 (Sunday), got {0}")]
    DayOutOfRange(u8),
    #[error("schedule start {start} must precede end {end}")]
    EmptyWindow { start: NaiveTime, end: NaiveTime },
}

impl DayOfWeek {
    /// Wrap a raw day index, rejecting values outside `0..=6`.
    pub fn try_new(index: u8) -> Result<Self, ScheduleValidationError> {
        if index > 6 {
            return Err(ScheduleValidationError::DayOutOfRange(index));
        }
        Ok(Self(index))
    }

    /// The weekday a calendar date falls on.
    pub fn from_date(date: NaiveDate) -> Self {
        // num_days_from_monday is 0..=6 by construction.
        Self(date.weekday().num_days_from_monday() as u8)
    }

    /// Raw index, Monday=0.
    pub const fn index(self) -> u8 {
        self.0
    }
}

/// One active row of a doctor's recurring weekly schedule.
///
/// ## Invariants
/// - `start_time < end_time`.
/// - At most one active row exists per (doctor, weekday); the lookup port
///   upholds this by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkSchedule {
    doctor_id: DoctorId,
    day_of_week: DayOfWeek,
    start_time: NaiveTime,
    end_time: NaiveTime,
}

impl WorkSchedule {
    /// Create a validated schedule row.
    pub fn new(
        doctor_id: DoctorId,
        day_of_week: DayOfWeek,
        start_time: NaiveTime,
        end_time: NaiveTime,
    ) -> Result<Self, ScheduleValidationError> {
        if start_time >= end_time {
            return Err(ScheduleValidationError::EmptyWindow {
                start: start_time,
                end: end_time,
            });
        }
        Ok(Self {
            doctor_id,
            day_of_week,
            start_time,
            end_time,
        })
    }

    /// Returns the owning doctor id.
    pub fn doctor_id(&self) -> DoctorId {
        self.doctor_id
    }

    /// Returns the weekday this row applies to.
    pub fn day_of_week(&self) -> DayOfWeek {
        self.day_of_week
    }

    /// Returns the wall-clock start of the working day.
    pub fn start_time(&self) -> NaiveTime {
        self.start_time
    }

    /// Returns the wall-clock end of the working day.
    pub fn end_time(&self) -> NaiveTime {
        self.end_time
    }

    /// Combine this row with a calendar date to produce the concrete working
    /// window for that date.
    pub fn window_on(&self, date: NaiveDate) -> WorkingWindow {
        WorkingWindow {
            start: date.and_time(self.start_time),
            end: date.and_time(self.end_time),
        }
    }
}

/// The half-open interval `[start, end)` a doctor works on a specific date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkingWindow {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl WorkingWindow {
    /// Start of the window (inclusive).
    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    /// End of the window (exclusive).
    pub fn end(&self) -> NaiveDateTime {
        self.end
    }
}
