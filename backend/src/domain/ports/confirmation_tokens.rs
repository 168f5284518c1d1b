//! Port for the confirmation-token signing service.
//!
//! Tokens prove control of the booking email address. Signing and
//! verification are synchronous, pure computations; the adapter decides the
//! wire format and the expiry policy.

use super::define_port_error;

define_port_error! {
    /// Failures raised when verifying a confirmation token.
    pub enum ConfirmationTokenError {
        /// The token is malformed or its signature does not verify.
        Invalid =>
            "confirmation token is invalid",
        /// The token verified but its age exceeds the configured lifetime.
        Expired =>
            "confirmation token has expired",
        /// The token could not be issued.
        Issue { message: String } =>
            "confirmation token could not be issued: {message}",
    }
}

/// Port for issuing and verifying booking confirmation tokens.
#[cfg_attr(test, mockall::automock)]
pub trait ConfirmationTokens: Send + Sync {
    /// Issue an opaque signed token binding the given email address.
    fn issue(&self, email: &str) -> Result<String, ConfirmationTokenError>;

    /// Verify a token and return the email address it was issued for.
    fn verify(&self, token: &str) -> Result<String, ConfirmationTokenError>;
}

/// Fixture implementation with a trivially reversible format; tests only.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureConfirmationTokens;

impl ConfirmationTokens for FixtureConfirmationTokens {
    fn issue(&self, email: &str) -> Result<String, ConfirmationTokenError> {
        Ok(format!("fixture:{email}"))
    }

    fn verify(&self, token: &str) -> Result<String, ConfirmationTokenError> {
        token
            .strip_prefix("fixture:")
            .map(str::to_owned)
            .ok_or_else(ConfirmationTokenError::invalid)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;

    #[rstest]
    fn fixture_round_trips_the_email() {
        let tokens = FixtureConfirmationTokens;
        let token = tokens.issue("ana@example.com").expect("issue succeeds");
        assert_eq!(
            tokens.verify(&token).expect("verify succeeds"),
            "ana@example.com"
        );
    }

    #[rstest]
    fn fixture_rejects_foreign_tokens() {
        let tokens = FixtureConfirmationTokens;
        assert_eq!(
            tokens.verify("garbage"),
            Err(ConfirmationTokenError::Invalid)
        );
    }
}
