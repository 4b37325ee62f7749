//! Error types for directory fetches.

use thiserror::Error;

/// Errors a directory fetch can produce.
///
/// No variant is fatal to a sync run; the engine folds each one into its
/// per-identity fallback branching. `Clone` lets scripted test doubles
/// replay a configured failure.
#[derive(Debug, Clone, Error)]
pub enum DirectoryError {
    /// The identity does not exist in the directory.
    #[error("Profile not found: {login}")]
    NotFound {
        /// Login that was looked up.
        login: String,
    },

    /// The directory refused the read, either for a private profile or a
    /// server-side throttle.
    #[error("Access forbidden for {login}")]
    Forbidden {
        /// Login that was refused.
        login: String,
    },

    /// Any other non-success status.
    #[error("Unexpected status {status} from directory")]
    Remote {
        /// Status code the directory answered with.
        status: u16,
    },

    /// Transport-level failure before any status arrived.
    #[error("Network error: {message}")]
    Network {
        /// Underlying cause, flattened to text.
        message: String,
    },

    /// The local call budget refused to spend and knows no reset time.
    #[error("Rate budget exhausted with no known reset")]
    RateExhausted,
}

impl DirectoryError {
    /// Create a not found error.
    #[inline]
    pub fn not_found(login: impl Into<String>) -> Self {
        Self::NotFound {
            login: login.into(),
        }
    }

    /// Create a forbidden error.
    #[inline]
    pub fn forbidden(login: impl Into<String>) -> Self {
        Self::Forbidden {
            login: login.into(),
        }
    }

    /// Create a network error.
    #[inline]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Check if this error is local budget exhaustion rather than a
    /// remote answer.
    #[inline]
    pub fn is_rate_exhausted(&self) -> bool {
        matches!(self, Self::RateExhausted)
    }
}

/// Result type for directory operations.
pub type Result<T> = std::result::Result<T, DirectoryError>;

/// Extract a short error message suitable for display.
///
/// Takes the first line of an error message, which is useful for errors
/// that include multi-line details. This provides a concise message for
/// progress reporting and logging.
#[inline]
pub fn short_error_message(e: &impl std::error::Error) -> String {
    let full = e.to_string();
    full.lines().next().unwrap_or(&full).to_string()
}
