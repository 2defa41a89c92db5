//! Convert a parsed configuration into the runtime configuration.

use crate::configuration::Configuration;
use crate::environment::Environment;
use crate::error::MakeRuntimeConfigurationError;
use crate::values::{ConnectionUri, Secret};
use crate::version1::ParsedConfiguration;

/// Resolve every secret in `parsed_config` against `environment`.
///
/// A connection URI that names an environment variable must find it set. An absent
/// connection URI stays absent, which lets the driver fall back to its own defaults.
pub fn make_runtime_configuration(
    parsed_config: ParsedConfiguration,
    environment: impl Environment,
) -> Result<Configuration, MakeRuntimeConfigurationError> {
    let settings = parsed_config.connection_settings;

    let connection_uri = match settings.connection_uri {
        None => None,
        Some(ConnectionUri(Secret::Plain(uri))) => Some(uri),
        Some(ConnectionUri(Secret::FromEnvironment { variable })) => {
            Some(environment.read(&variable)?)
        }
    };

    Ok(Configuration {
        connection_uri,
        pool_settings: settings.pool_settings,
    })
}
