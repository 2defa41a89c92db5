use std::time::Duration;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Settings for the PostgreSQL connection pool
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PoolSettings {
    /// maximum number of pool connections
    #[serde(default = "max_connection_default")]
    pub max_connections: u32,
    /// timeout for acquiring a connection from the pool (seconds). Unset means 30 seconds,
    /// the driver default.
    #[serde(default)]
    pub pool_timeout: Option<u64>,
    /// idle timeout for releasing a connection from the pool (seconds)
    #[serde(default)]
    pub idle_timeout: Option<u64>,
    /// maximum lifetime for an individual connection (seconds)
    #[serde(default)]
    pub connection_lifetime: Option<u64>,
}

impl Default for PoolSettings {
    fn default() -> PoolSettings {
        PoolSettings {
            max_connections: max_connection_default(),
            pool_timeout: None,
            idle_timeout: None,
            connection_lifetime: None,
        }
    }
}

/// How long acquiring a connection may wait when `poolTimeout` is unset.
pub const DEFAULT_POOL_TIMEOUT: Duration = Duration::from_secs(30);

impl PoolSettings {
    /// The acquire timeout the pool is built with.
    pub fn acquire_timeout(&self) -> Duration {
        self.pool_timeout.map_or(DEFAULT_POOL_TIMEOUT, Duration::from_secs)
    }
}

fn max_connection_default() -> u32 {
    50
}
