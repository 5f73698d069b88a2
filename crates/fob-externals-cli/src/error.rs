//! Error types for the fob-externals CLI.
//!
//! Library errors are wrapped as they are; everything the CLI adds on top
//! (config file lookup, output) gets its own variant with a hint.

use std::path::PathBuf;
use thiserror::Error;

use fob_externals::ExternalsError;

mod diagnostic;

pub use diagnostic::{cli_error_to_miette, externals_error_to_miette};

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration-related errors (missing file, invalid values)
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Manifest discovery or reading failed
    #[error(transparent)]
    Externals(#[from] ExternalsError),

    /// I/O errors from file system operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file given with `--config` doesn't exist
    #[error("Config file not found: {}\n\nHint: Create the file or drop --config to use externals.config.json", .0.display())]
    NotFound(PathBuf),

    /// A layer produced a value of the wrong type
    #[error("Invalid configuration: {value}\n\nHint: {hint}")]
    InvalidValue {
        /// The extraction error
        value: String,
        /// Helpful hint for correct values
        hint: String,
    },
}

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_has_hint() {
        let err = CliError::from(ConfigError::NotFound(PathBuf::from("missing.json")));
        let message = err.to_string();
        assert!(message.starts_with("Configuration error: Config file not found: missing.json"));
        assert!(message.contains("Hint:"));
    }

    #[test]
    fn test_externals_error_is_transparent() {
        let err = CliError::from(ExternalsError::ManifestRead {
            path: PathBuf::from("/nonexistent/package.json"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        });
        assert!(err.to_string().starts_with("Cannot read"));
    }
}
