//! Error handling for the word ranking pipeline.
//!
//! Two tiers exist: fatal errors (vocabulary or URL list source failures,
//! configuration problems) abort the whole run, while per-article failures
//! are represented as [`crate::SkipReason`] values and never surface here.

use std::fmt;

/// Main error type for word ranking operations.
#[derive(Debug, Clone)]
pub enum WordRankError {
    /// The vocabulary source could not be retrieved or read.
    VocabularySource { message: String },

    /// The URL list source could not be retrieved or read.
    UrlListSource { message: String },

    /// Network-related errors (connection, timeout, etc.)
    Network {
        message: String,
        source: Option<String>,
    },

    /// Configuration errors (invalid settings, etc.)
    Config { message: String },

    /// The shared cancellation signal fired while waiting for a permit.
    Cancelled,

    /// Generic internal errors that don't fit other categories
    Internal { message: String },
}

impl WordRankError {
    /// Create a new vocabulary source error.
    pub fn vocabulary_source<M: Into<String>>(message: M) -> Self {
        Self::VocabularySource {
            message: message.into(),
        }
    }

    /// Create a new URL list source error.
    pub fn url_list_source<M: Into<String>>(message: M) -> Self {
        Self::UrlListSource {
            message: message.into(),
        }
    }

    /// Create a new network error.
    pub fn network<M: Into<String>>(message: M) -> Self {
        Self::Network {
            message: message.into(),
            source: None,
        }
    }

    /// Create a new network error with source information.
    pub fn network_with_source<M: Into<String>, S: Into<String>>(message: M, source: S) -> Self {
        Self::Network {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Create a new configuration error.
    pub fn config<M: Into<String>>(message: M) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new internal error.
    pub fn internal<M: Into<String>>(message: M) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Whether this error names one of the two mandatory input sources.
    ///
    /// Source errors abort the run before any ranking is produced.
    pub fn is_source_failure(&self) -> bool {
        matches!(
            self,
            Self::VocabularySource { .. } | Self::UrlListSource { .. }
        )
    }
}

impl fmt::Display for WordRankError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::VocabularySource { message } => {
                write!(f, "unable to retrieve vocabulary source: {}", message)
            }
            Self::UrlListSource { message } => {
                write!(f, "unable to retrieve url list source: {}", message)
            }
            Self::Network { message, source } => {
                if let Some(source) = source {
                    write!(f, "network error: {} (source: {})", message, source)
                } else {
                    write!(f, "network error: {}", message)
                }
            }
            Self::Config { message } => {
                write!(f, "configuration error: {}", message)
            }
            Self::Cancelled => {
                write!(f, "cancelled")
            }
            Self::Internal { message } => {
                write!(f, "internal error: {}", message)
            }
        }
    }
}

impl std::error::Error for WordRankError {}

// Implement From conversions for common error types
impl From<reqwest::Error> for WordRankError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::network_with_source("request timed out", err.to_string())
        } else if err.is_connect() {
            Self::network_with_source("connection failed", err.to_string())
        } else {
            Self::network_with_source("http request failed", err.to_string())
        }
    }
}

impl From<std::io::Error> for WordRankError {
    fn from(err: std::io::Error) -> Self {
        Self::Internal {
            message: format!("I/O error: {}", err),
        }
    }
}
