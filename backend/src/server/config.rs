//! HTTP server configuration object.

use std::net::SocketAddr;
use std::time::Duration;

use clinic_backend::outbound::persistence::DbPool;
use clinic_backend::outbound::tokens::DEFAULT_TOKEN_TTL;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) token_secret: Vec<u8>,
    pub(crate) token_ttl: Duration,
}

impl ServerConfig {
    /// Construct a configuration with the mandatory settings.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, token_secret: Vec<u8>) -> Self {
        Self {
            bind_addr,
            db_pool: None,
            token_secret,
            token_ttl: DEFAULT_TOKEN_TTL,
        }
    }

    /// Attach a database connection pool for the persistence adapters.
    ///
    /// Without one, the server falls back to fixture ports: useful for
    /// smoke-testing the HTTP surface, useless for real bookings.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Override the confirmation-token lifetime.
    #[must_use]
    pub fn with_token_ttl(mut self, ttl: Duration) -> Self {
        self.token_ttl = ttl;
        self
    }
}
