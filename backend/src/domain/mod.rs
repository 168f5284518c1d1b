//! Domain primitives, entities, and services for the booking core.
//!
//! Everything here is transport- and storage-agnostic. Inbound adapters
//! translate HTTP into the driving ports under [`ports`]; outbound adapters
//! implement the driven ports over Diesel and the token signer.

pub mod appointment;
pub mod availability_service;
pub mod booking_service;
pub mod error;
pub mod ids;
pub mod ports;
pub mod schedule;
pub mod service;
pub mod slots;

pub use self::appointment::{
    Appointment, AppointmentDraft, AppointmentStatus, AppointmentValidationError,
    InvalidTransition, NewAppointment,
};
pub use self::availability_service::AvailabilityService;
pub use self::booking_service::BookingService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::ids::{AppointmentId, DoctorId, ServiceId};
pub use self::schedule::{DayOfWeek, ScheduleValidationError, WorkSchedule, WorkingWindow};
pub use self::service::{Service, ServiceValidationError, DEFAULT_DURATION_MINUTES};
pub use self::slots::{
    format_slot, free_slots, has_conflict, overlaps, BusyInterval, SLOT_STEP_MINUTES,
};

/// Convenient result alias for domain operations.
pub type DomainResult<T> = Result<T, Error>;
