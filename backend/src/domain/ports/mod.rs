//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod appointment_repository;
mod availability_query;
mod booking_command;
mod confirmation_tokens;
mod service_repository;
mod work_schedule_repository;

#[cfg(test)]
pub use appointment_repository::MockAppointmentRepository;
pub use appointment_repository::{
    AppointmentRepository, AppointmentRepositoryError, FixtureAppointmentRepository,
};
#[cfg(test)]
pub use availability_query::MockAvailabilityQuery;
pub use availability_query::{
    AvailabilityProbe, AvailabilityQuery, AvailableSlotsRequest, AvailableSlotsResponse,
    FixtureAvailabilityQuery,
};
#[cfg(test)]
pub use booking_command::MockBookingCommand;
pub use booking_command::{
    BookingCommand, BookingStatusResponse, CancelBookingRequest, CompleteBookingRequest,
    ConfirmBookingRequest, FixtureBookingCommand, RequestBookingRequest, RequestBookingResponse,
};
#[cfg(test)]
pub use confirmation_tokens::MockConfirmationTokens;
pub use confirmation_tokens::{
    ConfirmationTokenError, ConfirmationTokens, FixtureConfirmationTokens,
};
#[cfg(test)]
pub use service_repository::MockServiceRepository;
pub use service_repository::{
    FixtureServiceRepository, ServiceRepository, ServiceRepositoryError,
};
#[cfg(test)]
pub use work_schedule_repository::MockWorkScheduleRepository;
pub use work_schedule_repository::{
    FixtureWorkScheduleRepository, WorkScheduleRepository, WorkScheduleRepositoryError,
};
