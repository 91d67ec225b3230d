//! Unified error types for chatscan.
//!
//! This module provides a single [`ScanError`] enum that covers all error
//! cases in the library. This design follows the pattern used by popular
//! crates like `reqwest`, `serde_json`, and `csv`.
//!
//! # Error Handling Philosophy
//!
//! - **Library users** get typed errors they can match on
//! - **Application users** get clear, actionable error messages
//! - **Developers** get source error chains for debugging
//!
//! Failures that are *retryable inside the scan loop* are not represented
//! here — those travel through [`FetchError`](crate::history::FetchError),
//! which the pipeline handles itself. `ScanError` is for failures that end
//! the run.

use std::io;

use thiserror::Error;

/// A specialized [`Result`] type for chatscan operations.
///
/// # Example
///
/// ```rust
/// use chatscan::error::Result;
///
/// fn my_function() -> Result<u32> {
///     // ... operations that may fail
///     Ok(42)
/// }
/// ```
pub type Result<T> = std::result::Result<T, ScanError>;

/// The error type for all chatscan operations.
///
/// Each variant contains context about what went wrong and, where
/// applicable, the underlying source error.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ScanError {
    /// An I/O error occurred.
    ///
    /// This typically happens when:
    /// - The report file cannot be created or written
    /// - Terminal input is unavailable during interactive login
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The environment configuration is missing or invalid.
    ///
    /// Required variables: `API_ID`, `API_HASH`, `TARGET_USERNAME`,
    /// `CHAT_ID`. `SESSION_STRING` is optional.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the missing or malformed variable
        message: String,
    },

    /// The configured chat could not be resolved.
    ///
    /// The message carries the same remediation checklist the CLI prints:
    /// id format, membership, accessibility.
    #[error(
        "Could not resolve chat {chat_id}. Make sure:\n   \
         1. The CHAT_ID format is correct (-100 prefix for supergroups)\n   \
         2. You are a member of the channel/group\n   \
         3. The channel/group is accessible"
    )]
    Resolution {
        /// The chat id exactly as configured
        chat_id: i64,
    },

    /// The provided session string could not be decoded.
    #[error("Invalid session string: {message}")]
    Session {
        /// What was wrong with the session data
        message: String,
    },

    /// A Telegram API call failed outside the scan loop's retry channel.
    ///
    /// Connect, login and dialog-listing failures end up here; batch
    /// fetch failures inside the loop do not (see
    /// [`FetchError`](crate::history::FetchError)).
    #[error("{context}: {source}")]
    Api {
        /// Which operation failed (e.g. "connecting to Telegram")
        context: String,
        /// The underlying transport or API error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ScanError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        ScanError::Config {
            message: message.into(),
        }
    }

    /// Creates a chat resolution error for the given configured id.
    pub fn resolution(chat_id: i64) -> Self {
        ScanError::Resolution { chat_id }
    }

    /// Creates a session decoding error.
    pub fn session(message: impl Into<String>) -> Self {
        ScanError::Session {
            message: message.into(),
        }
    }

    /// Creates an API error with context about the failed operation.
    pub fn api(
        context: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        ScanError::Api {
            context: context.into(),
            source: Box::new(source),
        }
    }

    /// Returns `true` if this is a configuration error.
    pub fn is_config(&self) -> bool {
        matches!(self, ScanError::Config { .. })
    }

    /// Returns `true` if this is a chat resolution error.
    pub fn is_resolution(&self) -> bool {
        matches!(self, ScanError::Resolution { .. })
    }

    /// Returns `true` if this is an API error.
    pub fn is_api(&self) -> bool {
        matches!(self, ScanError::Api { .. })
    }
}

// ============================================================================
// Tests
// ============================================================================
