//! Progress reporting for the history walk.
//!
//! The pipeline emits one [`ScanProgress`] snapshot per iteration through a
//! [`ProgressCallback`]; the CLI turns snapshots into an in-place progress
//! bar, but any presenter works.
//!
//! # Example
//!
//! ```rust
//! use chatscan::progress::{ProgressCallback, ScanProgress};
//! use std::sync::Arc;
//!
//! let callback: ProgressCallback = Arc::new(|progress| {
//!     println!("{:.0}% scanned", progress.percent());
//! });
//!
//! callback(ScanProgress {
//!     total_messages: 1000,
//!     offset_id: 500,
//!     matches_found: 3,
//!     elapsed: std::time::Duration::from_secs(10),
//! });
//! ```
//!
//! # ETA accuracy
//!
//! The estimate is a linear extrapolation from percent complete, recomputed
//! from scratch on every update with no smoothing, so early values swing
//! widely and settle as the walk progresses.

use std::sync::Arc;
use std::time::Duration;

/// A snapshot of the walk after one batch.
///
/// Percent complete is derived from how far the cursor has travelled from
/// the newest message id (`total_messages`) toward zero.
#[derive(Debug, Clone, Copy)]
pub struct ScanProgress {
    /// Upper bound of the walk: the newest message id at start time.
    pub total_messages: i64,

    /// Oldest message id seen so far; `0` before the first batch.
    pub offset_id: i64,

    /// Matches accumulated so far.
    pub matches_found: usize,

    /// Time since the walk started.
    pub elapsed: Duration,
}

impl ScanProgress {
    /// Returns the progress as a percentage in `0.0..=100.0`.
    ///
    /// An empty history (`total_messages == 0`) reports 100: there is
    /// nothing left to scan.
    pub fn percent(&self) -> f64 {
        if self.total_messages <= 0 {
            return 100.0;
        }
        let scanned = (self.total_messages - self.offset_id).max(0);
        (scanned as f64 / self.total_messages as f64 * 100.0).clamp(0.0, 100.0)
    }

    /// Returns the estimated time remaining, if one can be computed.
    ///
    /// `None` until any progress has been made; callers render it as
    /// "unknown" rather than a number.
    pub fn eta(&self) -> Option<Duration> {
        let percent = self.percent();
        if percent <= 0.0 {
            return None;
        }
        let elapsed = self.elapsed.as_secs_f64();
        let estimated_total = elapsed * 100.0 / percent;
        Some(Duration::from_secs_f64((estimated_total - elapsed).max(0.0)))
    }
}

/// Callback type for receiving progress updates.
pub type ProgressCallback = Arc<dyn Fn(ScanProgress) + Send + Sync>;

/// Creates a no-op progress callback.
///
/// Useful when no progress output is wanted but an API requires a callback.
pub fn no_progress() -> ProgressCallback {
    Arc::new(|_| {})
}

/// Summary counters for a finished (or interrupted) run.
#[derive(Debug, Clone, Copy)]
pub struct ScanStats {
    /// Upper bound of the walk, fixed at start from the newest message id.
    pub total_messages: i64,

    /// Number of messages that matched the target author.
    pub match_count: usize,

    /// Wall-clock duration of the walk.
    pub elapsed: Duration,

    /// Whether the walk was cancelled before reaching the start of history.
    pub interrupted: bool,
}

impl ScanStats {
    /// Matches as a percentage of the total, `0.0` for an empty history.
    pub fn success_rate(&self) -> f64 {
        if self.total_messages <= 0 {
            return 0.0;
        }
        self.match_count as f64 / self.total_messages as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(total: i64, offset: i64, elapsed_secs: u64) -> ScanProgress {
        ScanProgress {
            total_messages: total,
            offset_id: offset,
            matches_found: 0,
            elapsed: Duration::from_secs(elapsed_secs),
        }
    }

    #[test]
    fn test_percent_halfway() {
        let progress = snapshot(1000, 500, 10);
        assert!((progress.percent() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_percent_zero_total_is_degenerate_complete() {
        let progress = snapshot(0, 0, 10);
        assert!((progress.percent() - 100.0).abs() < f64::EPSILON);
        assert!(progress.percent().is_finite());
    }

    #[test]
    fn test_percent_clamped() {
        // Cursor past the recorded total (messages arrived mid-walk).
        let progress = snapshot(100, -5, 1);
        assert!(progress.percent() <= 100.0);

        let progress = snapshot(100, 200, 1);
        assert!(progress.percent() >= 0.0);
    }

    #[test]
    fn test_eta_none_before_progress() {
        let progress = snapshot(100, 100, 5);
        assert!(progress.eta().is_none());
    }

    #[test]
    fn test_eta_linear_extrapolation() {
        // 50% done in 10s: another 10s to go.
        let eta = snapshot(1000, 500, 10).eta().unwrap();
        assert!((eta.as_secs_f64() - 10.0).abs() < 0.01);
    }

    #[test]
    fn test_eta_never_negative() {
        let eta = snapshot(1000, 0, 10).eta().unwrap();
        assert_eq!(eta, Duration::ZERO);
    }

    #[test]
    fn test_eta_zero_total_is_finite() {
        let eta = snapshot(0, 0, 10).eta().unwrap();
        assert_eq!(eta, Duration::ZERO);
    }

    #[test]
    fn test_success_rate() {
        let stats = ScanStats {
            total_messages: 250,
            match_count: 25,
            elapsed: Duration::from_secs(1),
            interrupted: false,
        };
        assert!((stats.success_rate() - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_success_rate_zero_total() {
        let stats = ScanStats {
            total_messages: 0,
            match_count: 0,
            elapsed: Duration::ZERO,
            interrupted: false,
        };
        assert!((stats.success_rate() - 0.0).abs() < f64::EPSILON);
        assert!(stats.success_rate().is_finite());
    }

    #[test]
    fn test_no_progress_callback() {
        let callback = no_progress();
        callback(snapshot(10, 5, 1)); // Should not panic
    }
}
