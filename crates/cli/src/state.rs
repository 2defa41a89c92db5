//! Transient state used by the CLI.
//!
//! This is initialized before a transaction is run.

use std::str::FromStr;
use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use thiserror::Error;
use tracing::{info_span, Instrument};

use sqltx_configuration::Configuration;

/// Create a connection pool with the configured settings.
pub async fn create_pool(configuration: &Configuration) -> Result<PgPool, InitializationError> {
    let settings = &configuration.pool_settings;

    let connect_options = match &configuration.connection_uri {
        Some(uri) => PgConnectOptions::from_str(uri).map_err(InitializationError::InvalidUri)?,
        None => PgConnectOptions::new(),
    };

    PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(settings.acquire_timeout())
        .idle_timeout(settings.idle_timeout.map(Duration::from_secs))
        .max_lifetime(settings.connection_lifetime.map(Duration::from_secs))
        .connect_with(connect_options)
        .instrument(info_span!("Create connection pool"))
        .await
        .map_err(InitializationError::UnableToCreatePool)
}

/// State initialization error.
#[derive(Debug, Error)]
pub enum InitializationError {
    #[error("invalid connection URI: {0}")]
    InvalidUri(sqlx::Error),
    #[error("unable to initialize connection pool: {0}")]
    UnableToCreatePool(sqlx::Error),
}
