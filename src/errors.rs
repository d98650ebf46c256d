use ftrack_config::ConfigError;
use ftrack_core::CoreError;
use thiserror::Error;

use crate::export::ExportError;

/// Unified error type for storage, configuration and export failures.
#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("Persistence error: {0}")]
    Storage(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Export failed: {0}")]
    Export(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// User-facing shell error wrapper.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] TrackerError),
    #[error("Invalid input: {0}")]
    Input(String),
    #[error("Command failed: {0}")]
    Command(String),
}

impl From<std::io::Error> for TrackerError {
    fn from(err: std::io::Error) -> Self {
        TrackerError::Storage(err.to_string())
    }
}

impl From<CoreError> for TrackerError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Storage(message) | CoreError::Serde(message) => {
                TrackerError::Storage(message)
            }
            CoreError::Io(err) => TrackerError::Storage(err.to_string()),
        }
    }
}

impl From<ConfigError> for TrackerError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Io(io) => TrackerError::Storage(io.to_string()),
            ConfigError::Serde(message) => TrackerError::Config(message),
            invalid @ ConfigError::InvalidValue { .. } => {
                TrackerError::InvalidInput(invalid.to_string())
            }
        }
    }
}

impl From<ExportError> for TrackerError {
    fn from(err: ExportError) -> Self {
        TrackerError::Export(err.to_string())
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        CliError::from(TrackerError::from(err))
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        CliError::from(TrackerError::from(err))
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Command(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_errors_map_to_storage() {
        let err = TrackerError::from(CoreError::Storage("disk full".into()));
        assert_eq!(err.to_string(), "Persistence error: disk full");
    }

    #[test]
    fn invalid_config_values_are_input_errors() {
        let err = TrackerError::from(ConfigError::InvalidValue {
            key: "top_categories".into(),
            reason: "expected a positive whole number".into(),
        });
        assert!(matches!(err, TrackerError::InvalidInput(_)));
    }
}
