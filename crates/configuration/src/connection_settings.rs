//! Database connection settings.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::environment::Variable;
use crate::values::{ConnectionUri, PoolSettings, Secret};

pub const DEFAULT_CONNECTION_URI_VARIABLE: &str = "CONNECTION_URI";

/// Database connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseConnectionSettings {
    /// Connection string for a Postgres-compatible database. When null, the standard
    /// `PG*` environment variables are used.
    #[serde(default)]
    pub connection_uri: Option<ConnectionUri>,
    /// Connection pool settings.
    #[serde(default)]
    pub pool_settings: PoolSettings,
}

impl DatabaseConnectionSettings {
    /// Settings that read the connection string from `CONNECTION_URI`.
    pub fn from_default_variable() -> Self {
        Self {
            connection_uri: Some(ConnectionUri(Secret::FromEnvironment {
                variable: Variable::from(DEFAULT_CONNECTION_URI_VARIABLE),
            })),
            pool_settings: PoolSettings::default(),
        }
    }
}
