//! PostgreSQL-backed `ServiceRepository` implementation using Diesel.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ServiceRepository, ServiceRepositoryError};
use crate::domain::{Service, ServiceId};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::ServiceRow;
use super::pool::{DbPool, PoolError};
use super::schema::services;

/// Diesel-backed implementation of the service catalogue port.
#[derive(Clone)]
pub struct DieselServiceRepository {
    pool: DbPool,
}

impl DieselServiceRepository {
    /// Create a new repository over the shared connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> ServiceRepositoryError {
    map_pool_error(error, ServiceRepositoryError::connection)
}

fn map_diesel(error: diesel::result::Error) -> ServiceRepositoryError {
    map_diesel_error(
        error,
        ServiceRepositoryError::query,
        ServiceRepositoryError::connection,
    )
}

/// Convert a database row into a validated service entity.
fn row_to_service(row: ServiceRow) -> Result<Service, ServiceRepositoryError> {
    Service::new(
        ServiceId::new(row.id),
        row.name,
        i64::from(row.duration_minutes),
        row.price,
    )
    .map_err(|err| ServiceRepositoryError::query(err.to_string()))
}

#[async_trait]
impl ServiceRepository for DieselServiceRepository {
    async fn find_by_id(
        &self,
        service_id: ServiceId,
    ) -> Result<Option<Service>, ServiceRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row = services::table
            .find(service_id.get())
            .select(ServiceRow::as_select())
            .first::<ServiceRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;

        row.map(row_to_service).transpose()
    }
}
