//! Errors that can occur while reading, writing or resolving the configuration.

use std::path::PathBuf;

/// The errors that can be thrown when parsing a configuration directory.
#[derive(Debug, thiserror::Error)]
pub enum ParseConfigurationError {
    #[error("parse error on {file_path}:{line}:{column}: {message}")]
    ParseError {
        file_path: PathBuf,
        line: usize,
        column: usize,
        message: String,
    },
    #[error("empty connection URI in {file_path}")]
    EmptyConnectionUri { file_path: PathBuf },
    #[error("I/O error on {file_path}: {source}")]
    IoError {
        file_path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// The errors that can be thrown when writing a configuration directory.
#[derive(Debug, thiserror::Error)]
pub enum WriteParsedConfigurationError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("unable to serialize the configuration: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// The errors that can be thrown when resolving a parsed configuration for runtime use.
#[derive(Debug, thiserror::Error)]
pub enum MakeRuntimeConfigurationError {
    #[error("unable to resolve connection URI: {0}")]
    MissingEnvironmentVariable(#[from] crate::environment::Error),
}
