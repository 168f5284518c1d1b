//! Integer identifier newtypes for the clinic's aggregates.
//!
//! The surrounding application keys doctors, services, and appointments by
//! database-assigned integer ids. The core only ever treats them as opaque
//! handles, so each gets a newtype to keep the call sites honest.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
            Serialize, Deserialize, ToSchema,
        )]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Wrap a raw identifier.
            pub const fn new(value: i32) -> Self {
                Self(value)
            }

            /// Return the raw identifier.
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i32> for $name {
            fn from(value: i32) -> Self {
                Self(value)
            }
        }
    };
}

define_id! {
    /// Opaque doctor identity; the core never reads the doctor's profile.
    DoctorId
}

define_id! {
    /// Identity of a bookable service offering.
    ServiceId
}

define_id! {
    /// Identity of a stored appointment.
    AppointmentId
}
