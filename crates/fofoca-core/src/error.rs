//! Error types for Fofoca sidebar core operations.
//!
//! None of the synchronizer errors are fatal to rendering: the worst outcome
//! of any of them is a missing or frozen badge, never a broken sidebar.

use std::path::PathBuf;

use thiserror::Error;

use crate::snapshot::Epoch;

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in sidebar core operations.
#[derive(Debug, Error)]
pub enum Error {
    /// No navigation entry is flagged as the notification target.
    #[error("No navigation entry is flagged as the notification target")]
    NoMatchingEntry,

    /// The live query refused to open a subscription.
    #[error("Notification subscription failed (epoch {epoch}): {reason}")]
    SubscriptionFailed {
        /// Epoch of the failed subscription.
        epoch: Epoch,
        /// Reason reported by the live query.
        reason: String,
    },

    /// Two navigation entries share a route.
    #[error("Duplicate navigation route: {0}")]
    DuplicateRoute(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Configuration file could not be read or written.
    #[error("File system error at {path}: {message}")]
    FileSystem {
        /// Path where the error occurred.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Create a subscription failure for the given epoch.
    pub fn subscription_failed(epoch: Epoch, reason: impl Into<String>) -> Self {
        Self::SubscriptionFailed {
            epoch,
            reason: reason.into(),
        }
    }
}
