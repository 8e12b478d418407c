use std::result::Result as StdResult;

use finview_config::ConfigError;
use finview_core::CoreError;
use thiserror::Error;

/// Unified error type for the façade and CLI.
#[derive(Error, Debug)]
pub enum FinviewError {
    #[error("Malformed category hierarchy: {0}")]
    MalformedHierarchy(String),
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Snapshot error: {0}")]
    Snapshot(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = StdResult<T, FinviewError>;

impl From<CoreError> for FinviewError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::MalformedHierarchy(message) => FinviewError::MalformedHierarchy(message),
            CoreError::Validation(message) => FinviewError::Validation(message),
        }
    }
}

impl From<ConfigError> for FinviewError {
    fn from(err: ConfigError) -> Self {
        FinviewError::Config(err.to_string())
    }
}

impl From<std::io::Error> for FinviewError {
    fn from(err: std::io::Error) -> Self {
        FinviewError::Snapshot(err.to_string())
    }
}

impl From<serde_json::Error> for FinviewError {
    fn from(err: serde_json::Error) -> Self {
        FinviewError::Snapshot(err.to_string())
    }
}
