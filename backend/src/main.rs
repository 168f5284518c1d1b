//! Backend entry-point: wires configuration, persistence, and the REST API.

mod server;

use std::env;
use std::time::Duration;

use actix_web::web;
use rand::RngCore;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use clinic_backend::inbound::http::health::HealthState;
use clinic_backend::outbound::persistence::{DbPool, PoolConfig};
use server::ServerConfig;

/// Resolve the confirmation-token secret from the environment.
///
/// Production deployments must set `CLINIC_TOKEN_SECRET`; development builds
/// may fall back to an ephemeral secret, which invalidates outstanding
/// tokens on every restart.
fn resolve_token_secret() -> std::io::Result<Vec<u8>> {
    match env::var("CLINIC_TOKEN_SECRET") {
        Ok(secret) if !secret.trim().is_empty() => Ok(secret.into_bytes()),
        _ => {
            let allow_dev =
                env::var("CLINIC_ALLOW_EPHEMERAL_SECRET").ok().as_deref() == Some("1");
            if cfg!(debug_assertions) || allow_dev {
                warn!("CLINIC_TOKEN_SECRET not set; using an ephemeral secret (dev only)");
                let mut secret = vec![0u8; 32];
                rand::thread_rng().fill_bytes(&mut secret);
                Ok(secret)
            } else {
                Err(std::io::Error::other(
                    "CLINIC_TOKEN_SECRET must be set outside development builds",
                ))
            }
        }
    }
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let bind_addr = env::var("CLINIC_BIND_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:8080".to_owned())
        .parse()
        .map_err(|e| std::io::Error::other(format!("invalid CLINIC_BIND_ADDR: {e}")))?;

    let token_secret = resolve_token_secret()?;
    let token_ttl = env::var("CLINIC_TOKEN_TTL_SECS")
        .ok()
        .and_then(|raw| raw.parse::<u64>().ok())
        .map_or(clinic_backend::outbound::tokens::DEFAULT_TOKEN_TTL, Duration::from_secs);

    let mut config = ServerConfig::new(bind_addr, token_secret).with_token_ttl(token_ttl);
    match env::var("DATABASE_URL") {
        Ok(url) => {
            let pool = DbPool::new(PoolConfig::new(url))
                .await
                .map_err(|e| std::io::Error::other(format!("database pool: {e}")))?;
            config = config.with_db_pool(pool);
            info!("database pool initialised");
        }
        Err(_) => {
            warn!("DATABASE_URL not set; serving fixture data only");
        }
    }

    let health_state = web::Data::new(HealthState::new());
    let server = server::create_server(health_state, config)?;
    server.await
}
