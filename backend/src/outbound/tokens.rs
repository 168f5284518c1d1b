//! Signed confirmation tokens.
//!
//! Adapter for the [`ConfirmationTokens`] port. A token binds the booking
//! email to an issue timestamp and a random nonce, sealed with a SHA-256
//! digest over a server-side secret. Verification recomputes the digest and
//! enforces the configured lifetime.
//!
//! Wire format (all segments hex except the timestamp):
//!
//! ```text
//! v1.<email>.<issued-at-secs>.<nonce>.<digest>
//! ```

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use rand::RngCore;
use sha2::{Digest, Sha256};

use crate::domain::ports::{ConfirmationTokenError, ConfirmationTokens};

const TOKEN_VERSION: &str = "v1";
const NONCE_BYTES: usize = 16;

/// Default token lifetime, matching the hour-long booking confirmation
/// window.
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(3600);

/// SHA-256-sealed token issuer and verifier.
#[derive(Clone)]
pub struct SignedConfirmationTokens {
    secret: Vec<u8>,
    ttl: Duration,
}

impl SignedConfirmationTokens {
    /// Create a signer with the given secret and the default lifetime.
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            secret: secret.into(),
            ttl: DEFAULT_TOKEN_TTL,
        }
    }

    /// Override the token lifetime.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    fn digest(&self, email_hex: &str, issued_at: u64, nonce_hex: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(&self.secret);
        hasher.update([0x1f]);
        hasher.update(email_hex.as_bytes());
        hasher.update([0x1f]);
        hasher.update(issued_at.to_be_bytes());
        hasher.update([0x1f]);
        hasher.update(nonce_hex.as_bytes());
        hex::encode(hasher.finalize())
    }

    fn issue_at(&self, email: &str, issued_at: u64) -> String {
        let mut nonce = [0u8; NONCE_BYTES];
        rand::thread_rng().fill_bytes(&mut nonce);
        let email_hex = hex::encode(email.as_bytes());
        let nonce_hex = hex::encode(nonce);
        let digest = self.digest(&email_hex, issued_at, &nonce_hex);
        format!("{TOKEN_VERSION}.{email_hex}.{issued_at}.{nonce_hex}.{digest}")
    }

    fn verify_at(&self, token: &str, now: u64) -> Result<String, ConfirmationTokenError> {
        let mut parts = token.split('.');
        let (version, email_hex, issued_at, nonce_hex, digest) = match (
            parts.next(),
            parts.next(),
            parts.next(),
            parts.next(),
            parts.next(),
            parts.next(),
        ) {
            (Some(v), Some(e), Some(t), Some(n), Some(d), None) => (v, e, t, n, d),
            _ => return Err(ConfirmationTokenError::invalid()),
        };

        if version != TOKEN_VERSION {
            return Err(ConfirmationTokenError::invalid());
        }
        let issued_at: u64 = issued_at
            .parse()
            .map_err(|_| ConfirmationTokenError::invalid())?;

        let expected = self.digest(email_hex, issued_at, nonce_hex);
        if expected != digest {
            return Err(ConfirmationTokenError::invalid());
        }

        if now.saturating_sub(issued_at) > self.ttl.as_secs() {
            return Err(ConfirmationTokenError::expired());
        }

        let email_bytes =
            hex::decode(email_hex).map_err(|_| ConfirmationTokenError::invalid())?;
        String::from_utf8(email_bytes).map_err(|_| ConfirmationTokenError::invalid())
    }
}

fn unix_now() -> Result<u64, ConfirmationTokenError> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .map_err(|err| ConfirmationTokenError::issue(err.to_string()))
}

impl ConfirmationTokens for SignedConfirmationTokens {
    fn issue(&self, email: &str) -> Result<String, ConfirmationTokenError> {
        Ok(self.issue_at(email, unix_now()?))
    }

    fn verify(&self, token: &str) -> Result<String, ConfirmationTokenError> {
        self.verify_at(token, unix_now()?)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;

    fn signer() -> SignedConfirmationTokens {
        SignedConfirmationTokens::new(b"test-secret".to_vec())
    }

    #[rstest]
    fn issue_and_verify_round_trip() {
        let tokens = signer();
        let token = tokens.issue("ana@example.com").expect("issue succeeds");
        assert_eq!(
            tokens.verify(&token).expect("verify succeeds"),
            "ana@example.com"
        );
    }

    #[rstest]
    fn tampering_with_the_email_invalidates_the_token() {
        let tokens = signer();
        let token = tokens.issue_at("ana@example.com", 1_000_000);
        let forged_email = hex::encode(b"eve@example.com");
        let mut parts: Vec<&str> = token.split('.').collect();
        parts[1] = &forged_email;
        let forged = parts.join(".");

        assert_eq!(
            tokens.verify_at(&forged, 1_000_100),
            Err(ConfirmationTokenError::Invalid)
        );
    }

    #[rstest]
    fn a_foreign_secret_does_not_verify() {
        let token = signer().issue_at("ana@example.com", 1_000_000);
        let other = SignedConfirmationTokens::new(b"another-secret".to_vec());
        assert_eq!(
            other.verify_at(&token, 1_000_100),
            Err(ConfirmationTokenError::Invalid)
        );
    }

    #[rstest]
    fn tokens_expire_after_the_ttl() {
        let tokens = signer().with_ttl(Duration::from_secs(3600));
        let token = tokens.issue_at("ana@example.com", 1_000_000);

        assert!(tokens.verify_at(&token, 1_000_000 + 3600).is_ok());
        assert_eq!(
            tokens.verify_at(&token, 1_000_000 + 3601),
            Err(ConfirmationTokenError::Expired)
        );
    }

    #[rstest]
    #[case("")]
    #[case("v1.deadbeef")]
    #[case("v2.61.1000000.00.ffffffff")]
    #[case("not-a-token-at-all")]
    fn malformed_tokens_are_invalid(#[case] token: &str) {
        assert_eq!(
            signer().verify_at(token, 1_000_000),
            Err(ConfirmationTokenError::Invalid)
        );
    }

    #[rstest]
    fn two_tokens_for_the_same_email_differ() {
        let tokens = signer();
        let first = tokens.issue_at("ana@example.com", 1_000_000);
        let second = tokens.issue_at("ana@example.com", 1_000_000);
        assert_ne!(first, second);
    }
}
