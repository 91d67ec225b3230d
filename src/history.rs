//! The history-walk contract.
//!
//! [`HistorySource`] is the seam between the scan pipeline and whatever
//! actually serves message history. The shipped implementation is
//! [`TelegramHistory`](crate::telegram::TelegramHistory); tests drive the
//! pipeline with scripted in-memory sources.
//!
//! # Failure channels
//!
//! A fetch can fail in two observably different ways, and both are part of
//! the contract:
//!
//! 1. **Swallowed**: the implementation catches a transport error itself
//!    and returns an *empty batch* — "no progress this attempt". An empty
//!    batch is therefore ambiguous between true exhaustion and a failed
//!    attempt; the caller resolves the ambiguity by terminating the walk.
//! 2. **Surfaced**: the implementation returns a [`FetchError`], which the
//!    pipeline retries at the same offset after a fixed pause, without
//!    limit.
//!
//! Collapsing the two channels into one would change retry behavior, so
//! they stay distinct.
//!
//! # Example
//!
//! ```rust
//! use async_trait::async_trait;
//! use chatscan::history::{FetchError, HistorySource};
//! use chatscan::message::RawMessage;
//!
//! /// A source backed by a pre-sorted (newest first) vector.
//! struct Scripted(Vec<RawMessage>);
//!
//! #[async_trait]
//! impl HistorySource for Scripted {
//!     async fn fetch_batch(
//!         &mut self,
//!         limit: usize,
//!         offset_id: i64,
//!     ) -> Result<Vec<RawMessage>, FetchError> {
//!         Ok(self
//!             .0
//!             .iter()
//!             .filter(|m| offset_id == 0 || m.id < offset_id)
//!             .take(limit)
//!             .cloned()
//!             .collect())
//!     }
//! }
//! ```

use async_trait::async_trait;
use thiserror::Error;

use crate::message::RawMessage;

/// Messages requested per page of history.
pub const BATCH_SIZE: usize = 100;

/// A batch fetch failure surfaced to the pipeline instead of swallowed.
///
/// The pipeline logs it, sleeps, and retries the same offset; it never
/// ends the run.
#[derive(Debug, Error)]
#[error("batch fetch failed at offset {offset_id}: {message}")]
pub struct FetchError {
    /// The cursor the failed request was issued with.
    pub offset_id: i64,
    /// Description of the failure.
    pub message: String,
}

impl FetchError {
    /// Creates a fetch error for the given offset.
    pub fn new(offset_id: i64, message: impl Into<String>) -> Self {
        Self {
            offset_id,
            message: message.into(),
        }
    }
}

/// Backward-paginated access to one chat's message history.
#[async_trait]
pub trait HistorySource: Send {
    /// Fetches up to `limit` messages strictly older than `offset_id`.
    ///
    /// Guarantees for a well-behaved implementation:
    ///
    /// - Results are ordered newest-to-oldest.
    /// - With `offset_id > 0`, every returned id is `< offset_id`;
    ///   with `offset_id == 0` the page starts at the newest message.
    /// - Fewer than `limit` records are returned only when the history
    ///   below the offset is exhausted (or the attempt was swallowed into
    ///   an empty batch, see the module docs).
    async fn fetch_batch(
        &mut self,
        limit: usize,
        offset_id: i64,
    ) -> Result<Vec<RawMessage>, FetchError>;

    /// Returns the newest message id, or `0` for an empty history.
    ///
    /// This is the upper bound the progress math runs against; it is
    /// probed once, before the walk starts.
    async fn newest_message_id(&mut self) -> Result<i64, FetchError> {
        let probe = self.fetch_batch(1, 0).await?;
        Ok(probe.first().map_or(0, |m| m.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    struct Scripted(Vec<RawMessage>);

    #[async_trait]
    impl HistorySource for Scripted {
        async fn fetch_batch(
            &mut self,
            limit: usize,
            offset_id: i64,
        ) -> Result<Vec<RawMessage>, FetchError> {
            Ok(self
                .0
                .iter()
                .filter(|m| offset_id == 0 || m.id < offset_id)
                .take(limit)
                .cloned()
                .collect())
        }
    }

    fn history(ids: &[i64]) -> Scripted {
        let date = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        Scripted(ids.iter().map(|&id| RawMessage::new(id, date)).collect())
    }

    #[tokio::test]
    async fn test_newest_message_id_probes_one_message() {
        let mut source = history(&[30, 20, 10]);
        assert_eq!(source.newest_message_id().await.unwrap(), 30);
    }

    #[tokio::test]
    async fn test_newest_message_id_empty_history() {
        let mut source = history(&[]);
        assert_eq!(source.newest_message_id().await.unwrap(), 0);
    }

    #[test]
    fn test_fetch_error_display() {
        let err = FetchError::new(150, "connection reset");
        let display = err.to_string();
        assert!(display.contains("150"));
        assert!(display.contains("connection reset"));
    }
}
