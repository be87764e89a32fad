//! Loader error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading a configuration file into a value tree.
#[derive(Error, Debug)]
pub enum LoadError {
    /// Configuration file not found.
    #[error("configuration file not found: {path}")]
    FileNotFound {
        /// Path to the missing file.
        path: PathBuf,
    },

    /// Failed to read configuration file.
    #[error("failed to read configuration file: {path}")]
    ReadError {
        /// Path to the file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// JSON parsing error.
    #[error("failed to parse JSON configuration: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing error.
    #[error("failed to parse YAML configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// TOML parsing error.
    #[error("failed to parse TOML configuration: {0}")]
    Toml(#[from] toml::de::Error),

    /// CSV parsing error.
    #[error("failed to parse CSV configuration: {0}")]
    Csv(#[from] csv::Error),

    /// The format could not be determined or is not supported.
    #[error("unsupported configuration format: {format}")]
    UnsupportedFormat {
        /// The extension or format name that was rejected.
        format: String,
    },
}

impl LoadError {
    /// Create a new file not found error.
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create a new read error.
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadError {
            path: path.into(),
            source,
        }
    }

    /// Create a new unsupported format error.
    pub fn unsupported_format(format: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            format: format.into(),
        }
    }
}
