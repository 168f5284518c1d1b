//! Bookable service offerings.

use serde::{Deserialize, Serialize};

use crate::domain::ids::ServiceId;

/// Fallback appointment length, in minutes, applied when a stored booking no
/// longer resolves to a service row.
pub const DEFAULT_DURATION_MINUTES: i64 = 30;

/// A service the clinic offers (e.g. a general consultation).
///
/// ## Invariants
/// - `duration_minutes` is strictly positive.
/// - Effectively immutable once referenced by appointments; the admin surface
///   edits rather than deletes referenced services.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    id: ServiceId,
    name: String,
    duration_minutes: i64,
    price: f64,
}

/// Validation failures raised when constructing a [`Service`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceValidationError {
    #[error("service name must not be empty")]
    EmptyName,
    #[error("service duration must be a positive number of minutes, got {0}")]
    NonPositiveDuration(i64),
}

impl Service {
    /// Create a validated service offering.
    pub fn new(
        id: ServiceId,
        name: impl Into<String>,
        duration_minutes: i64,
        price: f64,
    ) -> Result<Self, ServiceValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ServiceValidationError::EmptyName);
        }
        if duration_minutes <= 0 {
            return Err(ServiceValidationError::NonPositiveDuration(duration_minutes));
        }
        Ok(Self {
            id,
            name,
            duration_minutes,
            price,
        })
    }

    /// Returns the service id.
    pub fn id(&self) -> ServiceId {
        self.id
    }

    /// Returns the display name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns how long an appointment for this service occupies, in minutes.
    pub fn duration_minutes(&self) -> i64 {
        self.duration_minutes
    }

    /// Returns the listed price.
    pub fn price(&self) -> f64 {
        self.price
    }
}
