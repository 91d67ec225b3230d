//! The scan pipeline: walk, filter, accumulate, report progress.
//!
//! [`ScanPipeline`] owns the loop. Each iteration pulls one batch from the
//! [`HistorySource`], filters it, updates the accounting state, emits a
//! progress snapshot, then pauses before the next pull. The chain is
//! strictly sequential — there is never more than one batch in flight.

use std::time::{Duration, Instant};

use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::core::filter::AuthorFilter;
use crate::history::{BATCH_SIZE, HistorySource};
use crate::message::{MatchRecord, RawMessage};
use crate::progress::{ProgressCallback, ScanProgress, ScanStats, no_progress};

/// Pause between successful batches. A fixed-rate throttle, not an
/// adaptive rate limiter.
pub const BATCH_DELAY: Duration = Duration::from_secs(1);

/// Pause before retrying a failed batch fetch.
pub const RETRY_DELAY: Duration = Duration::from_secs(5);

/// What a finished walk produced.
#[derive(Debug)]
pub struct ScanOutcome {
    /// Messages that matched the target author, newest first.
    pub matches: Vec<MatchRecord>,

    /// Run counters for the summary.
    pub stats: ScanStats,
}

/// Drives the backward walk over one chat's history to completion.
///
/// Construction is builder-style; `run` consumes the pipeline:
///
/// ```rust,no_run
/// # use chatscan::core::filter::AuthorFilter;
/// # use chatscan::core::pipeline::ScanPipeline;
/// # use chatscan::history::HistorySource;
/// # async fn example(source: impl HistorySource) {
/// let outcome = ScanPipeline::new(source, AuthorFilter::new("@alice"))
///     .run()
///     .await;
/// println!("{} matches", outcome.stats.match_count);
/// # }
/// ```
pub struct ScanPipeline<S> {
    source: S,
    filter: AuthorFilter,
    batch_size: usize,
    batch_delay: Duration,
    retry_delay: Duration,
    cancel: CancellationToken,
    on_progress: ProgressCallback,
}

impl<S: HistorySource> ScanPipeline<S> {
    /// Creates a pipeline with the default batch size and delays.
    pub fn new(source: S, filter: AuthorFilter) -> Self {
        Self {
            source,
            filter,
            batch_size: BATCH_SIZE,
            batch_delay: BATCH_DELAY,
            retry_delay: RETRY_DELAY,
            cancel: CancellationToken::new(),
            on_progress: no_progress(),
        }
    }

    /// Overrides the batch size.
    #[must_use]
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Overrides the inter-batch throttle delay.
    #[must_use]
    pub fn with_batch_delay(mut self, delay: Duration) -> Self {
        self.batch_delay = delay;
        self
    }

    /// Overrides the retry delay after a surfaced fetch failure.
    #[must_use]
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    /// Attaches a cancellation token, checked at every iteration boundary
    /// and during both pauses.
    #[must_use]
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Attaches a progress callback, invoked once after the total probe
    /// and once per batch.
    #[must_use]
    pub fn with_progress(mut self, on_progress: ProgressCallback) -> Self {
        self.on_progress = on_progress;
        self
    }

    /// Walks the history to exhaustion (or cancellation) and returns the
    /// accumulated matches.
    ///
    /// The walk itself cannot fail: swallowed fetch failures end it like
    /// exhaustion does, surfaced ones are retried at the same offset until
    /// they stop. On cancellation the matches collected so far are
    /// returned, so the caller can still flush them to the report sink.
    pub async fn run(mut self) -> ScanOutcome {
        let started = Instant::now();
        let mut matches: Vec<MatchRecord> = Vec::new();
        let mut interrupted = false;

        // Probe the newest message id once; it is the fixed upper bound
        // the progress math runs against.
        let total_messages = match self.probe_total().await {
            Some(total) => total,
            None => {
                return self.outcome(matches, 0, started.elapsed(), true);
            }
        };
        let mut offset_id: i64 = 0;
        self.emit(total_messages, offset_id, &matches, started);

        loop {
            if self.cancel.is_cancelled() {
                interrupted = true;
                break;
            }

            let Some(batch) = self.fetch_with_retry(self.batch_size, offset_id).await else {
                interrupted = true;
                break;
            };

            // Exhaustion below the offset, or a swallowed fetch failure.
            // The two are indistinguishable here; both end the walk.
            let Some(last_id) = batch.last().map(|m| m.id) else {
                break;
            };

            for msg in &batch {
                if self.filter.matches(msg) {
                    matches.push(MatchRecord::from_raw(msg));
                }
            }

            if offset_id != 0 && last_id >= offset_id {
                // The API echoed a cursor that did not move; re-fetching
                // the same offset would duplicate matches.
                warn!(offset_id, last_id, "cursor did not advance; stopping walk");
                break;
            }
            offset_id = last_id;

            debug!(
                offset_id,
                batch_len = batch.len(),
                matches = matches.len(),
                "batch scanned"
            );
            self.emit(total_messages, offset_id, &matches, started);

            if !self.sleep_unless_cancelled(self.batch_delay).await {
                interrupted = true;
                break;
            }
        }

        self.outcome(matches, total_messages, started.elapsed(), interrupted)
    }

    /// Probes the newest message id; `None` if cancelled while retrying.
    async fn probe_total(&mut self) -> Option<i64> {
        let probe = self.fetch_with_retry(1, 0).await?;
        Some(probe.first().map_or(0, |m| m.id))
    }

    /// Fetches one batch, retrying surfaced failures at the same offset
    /// indefinitely. `None` means the run was cancelled, not that the
    /// fetch gave up.
    async fn fetch_with_retry(&mut self, limit: usize, offset_id: i64) -> Option<Vec<RawMessage>> {
        loop {
            if self.cancel.is_cancelled() {
                return None;
            }
            match self.source.fetch_batch(limit, offset_id).await {
                Ok(batch) => return Some(batch),
                Err(err) => {
                    warn!(error = %err, offset_id, "batch fetch failed; retrying");
                    if !self.sleep_unless_cancelled(self.retry_delay).await {
                        return None;
                    }
                }
            }
        }
    }

    /// Sleeps for `duration` unless cancelled first; `true` = slept.
    async fn sleep_unless_cancelled(&self, duration: Duration) -> bool {
        if duration.is_zero() {
            return !self.cancel.is_cancelled();
        }
        tokio::select! {
            () = self.cancel.cancelled() => false,
            () = tokio::time::sleep(duration) => true,
        }
    }

    fn emit(&self, total_messages: i64, offset_id: i64, matches: &[MatchRecord], started: Instant) {
        (self.on_progress)(ScanProgress {
            total_messages,
            offset_id,
            matches_found: matches.len(),
            elapsed: started.elapsed(),
        });
    }

    fn outcome(
        &self,
        matches: Vec<MatchRecord>,
        total_messages: i64,
        elapsed: Duration,
        interrupted: bool,
    ) -> ScanOutcome {
        let stats = ScanStats {
            total_messages,
            match_count: matches.len(),
            elapsed,
            interrupted,
        };
        ScanOutcome { matches, stats }
    }
}
