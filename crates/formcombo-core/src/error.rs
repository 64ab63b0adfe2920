//! Error types for the formcombo core library
//!
//! Extraction and enumeration never fail: malformed or sparse schemas
//! degrade to empty results. Errors only arise when parsing caller-supplied
//! settings or when refusing to plan variants for an oversized product.
//! Schema loading has its own [`LoaderError`](crate::loader::LoaderError).

use thiserror::Error;

/// Main error type for formcombo operations
#[derive(Error, Debug)]
pub enum Error {
    /// Caller-supplied setting could not be understood
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Nothing configurable was found, so there is nothing to plan
    #[error("No configurable fields found{}", component.as_deref().map(|c| format!(" for '{}'", c)).unwrap_or_default())]
    NoFields { component: Option<String> },

    /// The product is larger than the caller is willing to materialize
    #[error("Component has {total} combinations, which exceeds the limit of {limit}")]
    TooManyCombinations { total: u64, limit: usize },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Whether the caller should treat this as "nothing to do" rather than a failure
    pub fn is_informational(&self) -> bool {
        matches!(self, Self::NoFields { .. })
    }
}
