//! Error types for schema loading operations

use std::path::PathBuf;
use thiserror::Error;

/// Result type for loader operations
pub type LoaderResult<T> = Result<T, LoaderError>;

/// Errors raised while reading and parsing schema documents
#[derive(Error, Debug)]
pub enum LoaderError {
    /// File I/O errors
    #[error("Failed to read file '{path}'")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    /// YAML parsing errors
    #[error("Failed to parse YAML file '{path}'")]
    YamlParseError {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    /// JSON parsing errors
    #[error("Failed to parse JSON file '{path}'")]
    JsonParseError {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Content matched neither supported format
    #[error("Unsupported file format for '{path}'. Expected .json, .yaml, or .yml")]
    UnsupportedFormat { path: PathBuf },

    /// Document parsed but does not have the expected shape
    #[error("Invalid schema document '{path}': {reason}")]
    InvalidDocument { path: PathBuf, reason: String },
}

impl LoaderError {
    /// Create an I/O error with path context
    pub fn io_error(path: PathBuf, error: std::io::Error) -> Self {
        Self::IoError {
            path,
            source: error,
        }
    }

    /// Create a YAML parsing error with path context
    pub fn yaml_parse_error(path: PathBuf, error: serde_yaml::Error) -> Self {
        Self::YamlParseError {
            path,
            source: error,
        }
    }

    /// Create a JSON parsing error with path context
    pub fn json_parse_error(path: PathBuf, error: serde_json::Error) -> Self {
        Self::JsonParseError {
            path,
            source: error,
        }
    }

    /// Create an unsupported format error
    pub fn unsupported_format(path: PathBuf) -> Self {
        Self::UnsupportedFormat { path }
    }

    /// Create an invalid document error
    pub fn invalid_document(path: PathBuf, reason: impl Into<String>) -> Self {
        Self::InvalidDocument {
            path,
            reason: reason.into(),
        }
    }

    /// Get the path associated with this error
    pub fn path(&self) -> &PathBuf {
        match self {
            Self::IoError { path, .. }
            | Self::YamlParseError { path, .. }
            | Self::JsonParseError { path, .. }
            | Self::UnsupportedFormat { path }
            | Self::InvalidDocument { path, .. } => path,
        }
    }

    /// Whether the file simply does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::IoError { source, .. } if source.kind() == std::io::ErrorKind::NotFound
        )
    }
}
