pub mod configuration;
pub mod connection_settings;
pub mod environment;
pub mod error;
pub mod to_runtime_configuration;
pub mod values;
pub mod version1;

pub use configuration::Configuration;
pub use values::{ConnectionUri, PoolSettings, Secret, DEFAULT_POOL_TIMEOUT};
pub use version1::{
    parse_configuration, write_parsed_configuration, ParsedConfiguration,
    CONFIGURATION_FILENAME, CONFIGURATION_JSONSCHEMA_FILENAME,
};

pub use to_runtime_configuration::make_runtime_configuration;
