//! Message types for the history walk.
//!
//! This module provides the two shapes a message takes on its way through
//! the scanner:
//!
//! - [`RawMessage`] — one unit as returned by the history API, with the
//!   optional fields the wire actually has (anonymous and system senders
//!   carry no username, service messages carry no text)
//! - [`MatchRecord`] — the projection of a raw message that passed the
//!   author filter, ready for the report sink
//!
//! # Examples
//!
//! ```
//! use chatscan::message::{MatchRecord, RawMessage, NO_TEXT_PLACEHOLDER};
//! use chrono::Utc;
//!
//! let raw = RawMessage::new(42, Utc::now())
//!     .with_author("alice")
//!     .with_text("hello");
//! assert_eq!(raw.author.as_deref(), Some("alice"));
//!
//! let record = MatchRecord::from_raw(&raw);
//! assert_eq!(record.message_id, 42);
//! assert_eq!(record.text, "hello");
//!
//! // A message without text is recorded with a literal placeholder.
//! let bare = RawMessage::new(43, Utc::now()).with_author("alice");
//! assert_eq!(MatchRecord::from_raw(&bare).text, NO_TEXT_PLACEHOLDER);
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Text recorded for a match whose message has no text content.
pub const NO_TEXT_PLACEHOLDER: &str = "[No text content]";

/// One raw unit returned by the history API.
///
/// Message ids are unique within a chat and monotonically decrease as the
/// walk moves toward older history; they double as the pagination cursor.
///
/// Both optional fields normalize the empty string to `None`: an anonymous
/// sender and a sender with an empty username are the same thing to the
/// filter, and an empty text body gets the same placeholder as a missing
/// one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMessage {
    /// Message id; the backward-pagination cursor within a chat.
    pub id: i64,

    /// When the message was sent.
    pub date: DateTime<Utc>,

    /// Username of the author, if the sender has one.
    ///
    /// `None` for anonymous senders, system messages, and senders without
    /// a public username.
    pub author: Option<String>,

    /// Text content, if any.
    ///
    /// `None` for service messages and media without a caption.
    pub text: Option<String>,
}

impl RawMessage {
    /// Creates a message with no author and no text.
    pub fn new(id: i64, date: DateTime<Utc>) -> Self {
        Self {
            id,
            date,
            author: None,
            text: None,
        }
    }

    /// Sets the author username. Empty strings are normalized to `None`.
    #[must_use]
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into()).filter(|a| !a.is_empty());
        self
    }

    /// Sets the text content. Empty strings are normalized to `None`.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into()).filter(|t| !t.is_empty());
        self
    }
}

/// A message that passed the author filter, projected for the report.
///
/// Records are accumulated in discovery order, which for a backward walk
/// means newest-to-oldest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    /// When the message was sent.
    pub date: DateTime<Utc>,

    /// Message id within the chat.
    pub message_id: i64,

    /// Text content, or [`NO_TEXT_PLACEHOLDER`] when the message has none.
    pub text: String,
}

impl MatchRecord {
    /// Projects a raw message into a report record.
    pub fn from_raw(msg: &RawMessage) -> Self {
        Self {
            date: msg.date,
            message_id: msg.id,
            text: msg
                .text
                .clone()
                .unwrap_or_else(|| NO_TEXT_PLACEHOLDER.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap()
    }

    #[test]
    fn test_new_has_no_optional_fields() {
        let msg = RawMessage::new(1, date());
        assert_eq!(msg.id, 1);
        assert!(msg.author.is_none());
        assert!(msg.text.is_none());
    }

    #[test]
    fn test_empty_author_normalized_to_none() {
        let msg = RawMessage::new(1, date()).with_author("");
        assert!(msg.author.is_none());
    }

    #[test]
    fn test_empty_text_normalized_to_none() {
        let msg = RawMessage::new(1, date()).with_text("");
        assert!(msg.text.is_none());
    }

    #[test]
    fn test_match_record_projection() {
        let msg = RawMessage::new(77, date())
            .with_author("bob")
            .with_text("hi there");
        let record = MatchRecord::from_raw(&msg);
        assert_eq!(record.message_id, 77);
        assert_eq!(record.date, date());
        assert_eq!(record.text, "hi there");
    }

    #[test]
    fn test_match_record_placeholder_for_missing_text() {
        let msg = RawMessage::new(77, date()).with_author("bob");
        assert_eq!(MatchRecord::from_raw(&msg).text, NO_TEXT_PLACEHOLDER);
    }

    #[test]
    fn test_match_record_placeholder_for_empty_text() {
        let msg = RawMessage::new(77, date()).with_author("bob").with_text("");
        assert_eq!(MatchRecord::from_raw(&msg).text, NO_TEXT_PLACEHOLDER);
    }
}
