//! Run configuration, sourced from the environment.
//!
//! All settings are read once at startup. The binary loads a `.env` file
//! first (via `dotenvy`), so either real environment variables or a local
//! `.env` work.
//!
//! | Variable | Required | Meaning |
//! |----------|----------|---------|
//! | `API_ID` | yes | Telegram API id (integer) |
//! | `API_HASH` | yes | Telegram API hash |
//! | `SESSION_STRING` | no | Base64 session blob; absent = interactive login |
//! | `TARGET_USERNAME` | yes | Username to scan for, `@` optional |
//! | `CHAT_ID` | yes | Chat to scan; supergroups/channels use the `-100` prefix |
//!
//! # Example
//!
//! ```
//! use chatscan::config::Config;
//!
//! let config = Config::from_lookup(|key| match key {
//!     "API_ID" => Some("12345".to_string()),
//!     "API_HASH" => Some("0123456789abcdef".to_string()),
//!     "TARGET_USERNAME" => Some("@alice".to_string()),
//!     "CHAT_ID" => Some("-1001234567890".to_string()),
//!     _ => None,
//! })
//! .unwrap();
//!
//! assert_eq!(config.api_id, 12345);
//! assert_eq!(config.chat_id, -1001234567890);
//! assert_eq!(config.report_filename(), "@alice_messages.txt");
//! ```

use std::env;

use crate::error::{Result, ScanError};

/// Everything the scanner needs, loaded once before the walk starts.
#[derive(Debug, Clone)]
pub struct Config {
    /// Telegram API id from my.telegram.org.
    pub api_id: i32,

    /// Telegram API hash from my.telegram.org.
    pub api_hash: String,

    /// Saved session, base64-encoded. `None` triggers interactive login.
    pub session_string: Option<String>,

    /// Username whose messages are collected. A leading `@` is accepted.
    pub target_username: String,

    /// Id of the chat to scan. Supergroups and channels carry the `-100`
    /// numeric prefix (e.g. `-1001234567890`).
    pub chat_id: i64,
}

impl Config {
    /// Loads the configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads the configuration through an arbitrary key lookup.
    ///
    /// This is the seam the tests use; [`Config::from_env`] is a thin
    /// wrapper over it.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_id = required(&lookup, "API_ID")?;
        let api_id: i32 = api_id
            .trim()
            .parse()
            .map_err(|_| ScanError::config(format!("API_ID is not an integer: '{api_id}'")))?;

        let api_hash = required(&lookup, "API_HASH")?;

        let session_string = lookup("SESSION_STRING")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let target_username = required(&lookup, "TARGET_USERNAME")?;
        if target_username.strip_prefix('@').unwrap_or(&target_username).is_empty() {
            return Err(ScanError::config(
                "TARGET_USERNAME must contain a username after the '@'",
            ));
        }

        let chat_id = required(&lookup, "CHAT_ID")?;
        let chat_id: i64 = chat_id
            .trim()
            .parse()
            .map_err(|_| ScanError::config(format!("CHAT_ID is not an integer: '{chat_id}'")))?;

        Ok(Self {
            api_id,
            api_hash,
            session_string,
            target_username,
            chat_id,
        })
    }

    /// Default report path: `<target>_messages.txt`, using the username
    /// exactly as configured.
    pub fn report_filename(&self) -> String {
        format!("{}_messages.txt", self.target_username)
    }
}

fn required(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<String> {
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ScanError::config(format!("{key} is not set")))
}
