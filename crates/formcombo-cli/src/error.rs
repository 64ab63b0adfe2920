//! Error types and handling for the CLI
//!
//! Every variant maps to a distinct process exit code so scripts can tell
//! an unreadable schema from an oversized dialog.

use formcombo_core::LoaderError;
use std::io;
use std::path::PathBuf;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for CLI operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error (file operations, etc.)
    #[error("I/O operation failed")]
    Io(#[from] io::Error),

    /// Error from the formcombo-core library
    #[error(transparent)]
    Core(#[from] formcombo_core::Error),

    /// Schema file could not be loaded
    #[error(transparent)]
    Loader(#[from] LoaderError),

    /// File or directory not found
    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid argument combination
    #[error("Invalid arguments: {0}")]
    InvalidArgs(String),

    /// JSON serialization/deserialization error
    #[error("JSON serialization failed")]
    Json(#[from] serde_json::Error),

    /// YAML serialization/deserialization error
    #[error("YAML serialization failed")]
    Yaml(#[from] serde_yaml::Error),

    /// Generic error with context
    #[error("{message}")]
    Other { message: String },
}

impl Error {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create an invalid arguments error
    pub fn invalid_args(message: impl Into<String>) -> Self {
        Self::InvalidArgs(message.into())
    }

    /// Create a generic error with message
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Io(_) => 1,
            Self::Core(core) => match core {
                formcombo_core::Error::Configuration { .. } => 5,
                formcombo_core::Error::NoFields { .. } => 8,
                formcombo_core::Error::TooManyCombinations { .. } => 7,
            },
            Self::FileNotFound { .. } => 3,
            Self::Loader(loader) if loader.is_not_found() => 3,
            Self::Loader(_) => 4,
            Self::Config(_) => 5,
            Self::InvalidArgs(_) => 6,
            Self::Json(_) => 12,
            Self::Yaml(_) => 13,
            Self::Other { .. } => 99,
        }
    }

    /// Check if this error should display usage help
    pub fn should_show_help(&self) -> bool {
        matches!(self, Self::InvalidArgs(_))
    }
}

/// Format an error for display to the user, including its causes
pub fn format_error(error: &Error, use_color: bool) -> String {
    let mut message = if use_color {
        use colored::Colorize;
        format!("{} {}", "Error:".red().bold(), error)
    } else {
        format!("Error: {}", error)
    };

    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        message.push_str(&format!("\n  Caused by: {}", cause));
        source = cause.source();
    }
    message
}
