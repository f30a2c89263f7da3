//! Shared error types for the application

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for codebot operations.
///
/// The analysis engine itself never fails; every variant here belongs to
/// the layers around it (snippet storage, configuration, user input).
#[derive(Debug, Error)]
pub enum Error {
    /// A snippet lookup by id found nothing
    #[error("snippet {id} not found")]
    NotFound { id: String },

    /// A user supplied search or filter expression failed to compile
    #[error("invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Input rejected before any mutation happened
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// File system related errors
    #[error("File system error: {message}")]
    FileSystem {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// TOML errors
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

impl Error {
    /// Create a not-found error for a snippet id
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    /// Create a file system error with path context
    pub fn file_system(
        message: impl Into<String>,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::FileSystem {
            message: message.into(),
            path: Some(path.into()),
            source: Some(source),
        }
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_names_the_id() {
        let err = Error::not_found("00000000000000000000002a");
        assert_eq!(err.to_string(), "snippet 00000000000000000000002a not found");
    }

    #[test]
    fn test_invalid_pattern_keeps_source() {
        let source = regex::Regex::new("(unclosed").unwrap_err();
        let err = Error::InvalidPattern {
            pattern: "(unclosed".to_string(),
            source,
        };
        assert!(err.to_string().starts_with("invalid pattern '(unclosed'"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_file_system_error_keeps_path_and_source() {
        let err = Error::file_system(
            "Failed to write store",
            "/tmp/store.json",
            std::io::Error::other("disk full"),
        );
        assert_eq!(err.to_string(), "File system error: Failed to write store");
        assert!(std::error::Error::source(&err).is_some());
        assert!(matches!(
            err,
            Error::FileSystem { path: Some(ref p), .. } if p.ends_with("store.json")
        ));
    }
}
