//! Diesel/PostgreSQL driven adapters.

mod diesel_appointment_repository;
mod diesel_service_repository;
mod diesel_work_schedule_repository;
mod error_mapping;
mod models;
mod pool;
mod schema;

pub use diesel_appointment_repository::DieselAppointmentRepository;
pub use diesel_service_repository::DieselServiceRepository;
pub use diesel_work_schedule_repository::DieselWorkScheduleRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
