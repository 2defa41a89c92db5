//! Internal Configuration and state for our query runner.

use std::path::Path;

use schemars::{gen::SchemaSettings, schema::RootSchema, JsonSchema};
use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::connection_settings::DatabaseConnectionSettings;
use crate::error::{ParseConfigurationError, WriteParsedConfigurationError};
use crate::values::{ConnectionUri, Secret};

pub use crate::connection_settings::DEFAULT_CONNECTION_URI_VARIABLE;

pub const CONFIGURATION_FILENAME: &str = "configuration.json";
pub const CONFIGURATION_JSONSCHEMA_FILENAME: &str = "schema.json";

/// The configuration format version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
pub enum Version {
    #[serde(rename = "1")]
    This,
}

/// Initial configuration, just enough to connect to a database.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ParsedConfiguration {
    pub version: Version,
    /// Jsonschema of the configuration format.
    #[serde(rename = "$schema")]
    #[serde(default)]
    pub schema: Option<String>,
    /// Database connection settings.
    #[serde(default)]
    pub connection_settings: DatabaseConnectionSettings,
}

impl ParsedConfiguration {
    /// The configuration used when no file is present: every connection setting comes from
    /// the driver's own defaults.
    pub fn empty() -> Self {
        Self {
            version: Version::This,
            schema: None,
            connection_settings: DatabaseConnectionSettings::default(),
        }
    }

    /// The configuration `initialize` writes, reading the connection string from
    /// `CONNECTION_URI`.
    pub fn initial() -> Self {
        Self {
            version: Version::This,
            schema: Some(CONFIGURATION_JSONSCHEMA_FILENAME.to_string()),
            connection_settings: DatabaseConnectionSettings::from_default_variable(),
        }
    }
}

/// The jsonschema of `configuration.json`.
pub fn configuration_jsonschema() -> RootSchema {
    SchemaSettings::draft07()
        .into_generator()
        .into_root_schema_for::<ParsedConfiguration>()
}

/// Read `configuration.json` from `configuration_dir`.
pub async fn parse_configuration(
    configuration_dir: impl AsRef<Path>,
) -> Result<ParsedConfiguration, ParseConfigurationError> {
    let configuration_file = configuration_dir.as_ref().join(CONFIGURATION_FILENAME);

    let configuration_file_contents =
        fs::read_to_string(&configuration_file)
            .await
            .map_err(|source| ParseConfigurationError::IoError {
                file_path: configuration_file.clone(),
                source,
            })?;

    let parsed_config: ParsedConfiguration = serde_json::from_str(&configuration_file_contents)
        .map_err(|error| ParseConfigurationError::ParseError {
            file_path: configuration_file.clone(),
            line: error.line(),
            column: error.column(),
            message: error.to_string(),
        })?;

    if let Some(ConnectionUri(Secret::Plain(uri))) =
        &parsed_config.connection_settings.connection_uri
    {
        if uri.is_empty() {
            return Err(ParseConfigurationError::EmptyConnectionUri {
                file_path: configuration_file,
            });
        }
    }

    tracing::debug!(path = %configuration_file.display(), "parsed configuration");
    Ok(parsed_config)
}

/// Write the parsed configuration and its jsonschema into `out_dir`.
pub async fn write_parsed_configuration(
    parsed_config: &ParsedConfiguration,
    out_dir: impl AsRef<Path>,
) -> Result<(), WriteParsedConfigurationError> {
    let out_dir = out_dir.as_ref();
    fs::create_dir_all(out_dir).await?;

    let mut configuration = serde_json::to_string_pretty(parsed_config)?;
    configuration.push('\n');
    fs::write(out_dir.join(CONFIGURATION_FILENAME), configuration).await?;

    let mut schema = serde_json::to_string_pretty(&configuration_jsonschema())?;
    schema.push('\n');
    fs::write(out_dir.join(CONFIGURATION_JSONSCHEMA_FILENAME), schema).await?;

    Ok(())
}
