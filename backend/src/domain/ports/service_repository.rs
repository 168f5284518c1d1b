//! Port for reading the clinic's service catalogue.

use async_trait::async_trait;

use crate::domain::ids::ServiceId;
use crate::domain::service::Service;

use super::define_port_error;

define_port_error! {
    /// Errors raised by service repository adapters.
    pub enum ServiceRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "service repository connection failed: {message}",
        /// Query failed during execution.
        Query { message: String } =>
            "service repository query failed: {message}",
    }
}

/// Port for reading service offerings.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ServiceRepository: Send + Sync {
    /// Find a service by id; `None` when it does not exist.
    async fn find_by_id(
        &self,
        service_id: ServiceId,
    ) -> Result<Option<Service>, ServiceRepositoryError>;
}

/// Fixture implementation with an empty catalogue.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureServiceRepository;

#[async_trait]
impl ServiceRepository for FixtureServiceRepository {
    async fn find_by_id(
        &self,
        _service_id: ServiceId,
    ) -> Result<Option<Service>, ServiceRepositoryError> {
        Ok(None)
    }
}
