//! Appointment entities and the booking status state machine.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::ids::{AppointmentId, DoctorId, ServiceId};

/// Lifecycle status of a booking.
///
/// `Cancelled` is absorbing and is the only status excluded from overlap
/// computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    PendingConfirmation,
    Confirmed,
    Cancelled,
    Completed,
}

impl AppointmentStatus {
    /// Stable storage/wire representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PendingConfirmation => "pending_confirmation",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
            Self::Completed => "completed",
        }
    }

    /// Whether this status excludes the booking from overlap checks.
    pub const fn is_cancelled(self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

impl std::fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AppointmentStatus {
    type Err = AppointmentValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending_confirmation" => Ok(Self::PendingConfirmation),
            "confirmed" => Ok(Self::Confirmed),
            "cancelled" => Ok(Self::Cancelled),
            "completed" => Ok(Self::Completed),
            other => Err(AppointmentValidationError::UnknownStatus(other.to_owned())),
        }
    }
}

/// Validation failures raised by appointment constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AppointmentValidationError {
    #[error("patient name must not be empty")]
    EmptyPatientName,
    #[error("patient email must not be empty")]
    EmptyPatientEmail,
    #[error("unknown appointment status: {0}")]
    UnknownStatus(String),
}

/// Rejected status transitions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot {action} an appointment in status {from}")]
pub struct InvalidTransition {
    pub from: AppointmentStatus,
    pub action: &'static str,
}

/// Input payload for [`Appointment::new`].
#[derive(Debug, Clone)]
pub struct AppointmentDraft {
    pub id: AppointmentId,
    pub doctor_id: Option<DoctorId>,
    pub service_id: ServiceId,
    pub patient_name: String,
    pub patient_email: String,
    pub start_time: NaiveDateTime,
    pub status: AppointmentStatus,
    pub confirmation_token: Option<String>,
    pub created_at: NaiveDateTime,
}

/// A stored booking.
///
/// `doctor_id` is nullable: legacy bookings predate doctor assignment and are
/// overlap-checked globally rather than per doctor.
#[derive(Debug, Clone, PartialEq)]
pub struct Appointment {
    id: AppointmentId,
    doctor_id: Option<DoctorId>,
    service_id: ServiceId,
    patient_name: String,
    patient_email: String,
    start_time: NaiveDateTime,
    status: AppointmentStatus,
    confirmation_token: Option<String>,
    created_at: NaiveDateTime,
}

impl Appointment {
    /// Creates a validated appointment.
    pub fn new(draft: AppointmentDraft) -> Result<Self, AppointmentValidationError> {
        if draft.patient_name.trim().is_empty() {
            return Err(AppointmentValidationError::EmptyPatientName);
        }
        if draft.patient_email.trim().is_empty() {
            return Err(AppointmentValidationError::EmptyPatientEmail);
        }
        Ok(Self {
            id: draft.id,
            doctor_id: draft.doctor_id,
            service_id: draft.service_id,
            patient_name: draft.patient_name,
            patient_email: draft.patient_email,
            start_time: draft.start_time,
            status: draft.status,
            confirmation_token: draft.confirmation_token,
            created_at: draft.created_at,
        })
    }

    /// Returns the appointment id.
    pub fn id(&self) -> AppointmentId {
        self.id
    }

    /// Returns the assigned doctor, if any.
    pub fn doctor_id(&self) -> Option<DoctorId> {
        self.doctor_id
    }

    /// Returns the booked service id.
    pub fn service_id(&self) -> ServiceId {
        self.service_id
    }

    /// Returns the patient's name as entered on the booking form.
    pub fn patient_name(&self) -> &str {
        self.patient_name.as_str()
    }

    /// Returns the patient's contact email.
    pub fn patient_email(&self) -> &str {
        self.patient_email.as_str()
    }

    /// Returns the scheduled start.
    pub fn start_time(&self) -> NaiveDateTime {
        self.start_time
    }

    /// Returns the current lifecycle status.
    pub fn status(&self) -> AppointmentStatus {
        self.status
    }

    /// Returns the outstanding confirmation token, if one was issued.
    pub fn confirmation_token(&self) -> Option<&str> {
        self.confirmation_token.as_deref()
    }

    /// Returns when the booking request was recorded.
    pub fn created_at(&self) -> NaiveDateTime {
        self.created_at
    }

    /// Transition `pending_confirmation -> confirmed`.
    pub fn confirm(&mut self) -> Result<(), InvalidTransition> {
        match self.status {
            AppointmentStatus::PendingConfirmation => {
                self.status = AppointmentStatus::Confirmed;
                Ok(())
            }
            from => Err(InvalidTransition {
                from,
                action: "confirm",
            }),
        }
    }

    /// Transition any non-cancelled status to `cancelled`.
    pub fn cancel(&mut self) -> Result<(), InvalidTransition> {
        match self.status {
            AppointmentStatus::Cancelled => Err(InvalidTransition {
                from: AppointmentStatus::Cancelled,
                action: "cancel",
            }),
            _ => {
                self.status = AppointmentStatus::Cancelled;
                Ok(())
            }
        }
    }

    /// Transition `confirmed -> completed` once the visit has occurred.
    pub fn complete(&mut self) -> Result<(), InvalidTransition> {
        match self.status {
            AppointmentStatus::Confirmed => {
                self.status = AppointmentStatus::Completed;
                Ok(())
            }
            from => Err(InvalidTransition {
                from,
                action: "complete",
            }),
        }
    }
}

/// A booking request awaiting persistence; the id is database-assigned.
///
/// `duration_minutes` is resolved from the service at request time so the
/// write-path overlap check does not depend on a second lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAppointment {
    pub doctor_id: Option<DoctorId>,
    pub service_id: ServiceId,
    pub patient_name: String,
    pub patient_email: String,
    pub start_time: NaiveDateTime,
    pub duration_minutes: i64,
    pub confirmation_token: String,
}

impl NewAppointment {
    /// Validate the patient-entered fields.
    pub fn validate(&self) -> Result<(), AppointmentValidationError> {
        if self.patient_name.trim().is_empty() {
            return Err(AppointmentValidationError::EmptyPatientName);
        }
        if self.patient_email.trim().is_empty() {
            return Err(AppointmentValidationError::EmptyPatientEmail);
        }
        Ok(())
    }
}
