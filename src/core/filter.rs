//! Filter messages by author.
//!
//! This module provides [`AuthorFilter`], the predicate deciding which raw
//! messages make it into the report.
//!
//! # Matching Rules
//!
//! | Rule | Example |
//! |------|---------|
//! | Case-insensitive | target `Alice` matches author `alice` |
//! | Leading `@` stripped from target | target `@alice` matches author `alice` |
//! | Exact username, no prefixes | target `alice` does **not** match `alice2` |
//! | Absent author never matches | system/anonymous messages are skipped |
//!
//! An absent author and an empty-string author are the same non-match
//! condition.
//!
//! # Examples
//!
//! ```
//! use chatscan::core::filter::AuthorFilter;
//! use chatscan::message::RawMessage;
//! use chrono::Utc;
//!
//! let filter = AuthorFilter::new("@Alice");
//!
//! let from_alice = RawMessage::new(1, Utc::now()).with_author("alice");
//! let from_bob = RawMessage::new(2, Utc::now()).with_author("bob");
//! let anonymous = RawMessage::new(3, Utc::now());
//!
//! assert!(filter.matches(&from_alice));
//! assert!(!filter.matches(&from_bob));
//! assert!(!filter.matches(&anonymous));
//! ```

use crate::message::RawMessage;

/// Predicate matching messages authored by one configured username.
///
/// The target is normalized once at construction (leading `@` stripped,
/// lowercased); each candidate author is lowercased at comparison time.
#[derive(Debug, Clone)]
pub struct AuthorFilter {
    target: String,
}

impl AuthorFilter {
    /// Creates a filter for the given target username.
    ///
    /// A leading `@` is accepted and ignored; comparison is
    /// case-insensitive.
    pub fn new(target: &str) -> Self {
        let target = target.trim();
        let target = target.strip_prefix('@').unwrap_or(target);
        Self {
            target: target.to_lowercase(),
        }
    }

    /// The normalized target username (lowercase, no `@`).
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Returns `true` if the message's author equals the target.
    ///
    /// Messages without an author (or with an empty username) never match.
    pub fn matches(&self, msg: &RawMessage) -> bool {
        msg.author
            .as_deref()
            .is_some_and(|author| !author.is_empty() && author.to_lowercase() == self.target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    fn date() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn from(author: &str) -> RawMessage {
        RawMessage::new(1, date()).with_author(author)
    }

    #[test]
    fn test_case_insensitive_match() {
        let filter = AuthorFilter::new("@Alice");
        assert!(filter.matches(&from("alice")));
        assert!(filter.matches(&from("ALICE")));
        assert!(filter.matches(&from("aLiCe")));
    }

    #[test]
    fn test_prefix_is_not_a_match() {
        let filter = AuthorFilter::new("@Alice");
        assert!(!filter.matches(&from("alice2")));
        assert!(!filter.matches(&from("alic")));
    }

    #[test]
    fn test_at_stripped_from_target_only_once() {
        let filter = AuthorFilter::new("@alice");
        assert_eq!(filter.target(), "alice");

        // No leading @ works the same.
        let filter = AuthorFilter::new("alice");
        assert_eq!(filter.target(), "alice");
    }

    #[test]
    fn test_absent_author_never_matches() {
        let filter = AuthorFilter::new("alice");
        let anonymous = RawMessage::new(1, date());
        assert!(!filter.matches(&anonymous));
    }

    #[test]
    fn test_empty_author_never_matches() {
        let filter = AuthorFilter::new("alice");
        // with_author normalizes "" to None; build the field directly to
        // exercise the filter's own guard as well.
        let mut msg = RawMessage::new(1, date());
        msg.author = Some(String::new());
        assert!(!filter.matches(&msg));
    }

    #[test]
    fn test_target_trimmed() {
        let filter = AuthorFilter::new("  @bob  ");
        assert_eq!(filter.target(), "bob");
        assert!(filter.matches(&from("Bob")));
    }

    #[test]
    fn test_unicode_case_folding() {
        let filter = AuthorFilter::new("Ärzte");
        assert!(filter.matches(&from("ärzte")));
    }
}
