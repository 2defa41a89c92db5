//! Configuration for the query runner.

use crate::values::PoolSettings;

/// The 'Configuration' type collects all the information necessary to run transactions.
///
/// Values of this type are produced from a 'ParsedConfiguration' using
/// 'make_runtime_configuration', which resolves secrets against the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    /// `None` means the driver falls back to the libpq environment (`PGHOST`, `PGUSER`, ...).
    pub connection_uri: Option<String>,
    pub pool_settings: PoolSettings,
}
