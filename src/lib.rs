//! # Chatscan
//!
//! A Rust library (and CLI) for scanning the full message history of one
//! Telegram chat for messages authored by one user, and exporting the
//! matches to a flat text report.
//!
//! ## Overview
//!
//! The scan is an id-based backward cursor walk over the chat's history:
//! batches of 100 messages are fetched newest-to-oldest, filtered by
//! author, and accumulated until the history is exhausted. The walk is
//! strictly sequential (one batch in flight, a fixed 1 s pause between
//! batches), retries failed fetches at the same cursor, and reports
//! percent/ETA progress derived from the moving cursor against the newest
//! message id.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chatscan::prelude::*;
//!
//! # async fn example() -> chatscan::Result<()> {
//! let config = Config::from_env()?;
//!
//! let client = chatscan::telegram::connect(&config).await?;
//! let chat = chatscan::telegram::resolve_chat(&client, config.chat_id).await?;
//!
//! let source = TelegramHistory::new(client, &chat);
//! let outcome = ScanPipeline::new(source, AuthorFilter::new(&config.target_username))
//!     .run()
//!     .await;
//!
//! write_report(&outcome.matches, config.report_filename())?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Structure
//!
//! - [`config`] — Environment-sourced run configuration ([`Config`](config::Config))
//! - [`core`] — Core scanning logic
//!   - [`core::filter`] — [`AuthorFilter`](core::filter::AuthorFilter)
//!   - [`core::pipeline`] — [`ScanPipeline`](core::pipeline::ScanPipeline), [`ScanOutcome`](core::pipeline::ScanOutcome)
//!   - [`core::report`] — [`write_report`](core::report::write_report), [`render_summary`](core::report::render_summary)
//! - [`history`] — The walker contract ([`HistorySource`](history::HistorySource), [`FetchError`](history::FetchError))
//! - [`message`] — [`RawMessage`], [`MatchRecord`](message::MatchRecord)
//! - [`progress`] — Progress snapshots and ETA math
//! - [`telegram`] — The grammers-backed MTProto transport
//! - [`cli`] — CLI types ([`Args`](cli::Args))
//! - [`error`] — Unified error types ([`ScanError`], [`Result`])
//! - [`prelude`] — Convenient re-exports

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod history;
pub mod message;
pub mod progress;
pub mod telegram;

// Re-export the main types at the crate root for convenience
pub use error::{Result, ScanError};
pub use message::RawMessage;

/// Convenient re-exports for common usage.
///
/// Import everything you need with a single line:
///
/// ```rust
/// use chatscan::prelude::*;
/// ```
pub mod prelude {
    // Error types
    pub use crate::error::{Result, ScanError};

    // Configuration
    pub use crate::config::Config;

    // Message types
    pub use crate::message::{MatchRecord, NO_TEXT_PLACEHOLDER, RawMessage};

    // The walker contract
    pub use crate::history::{BATCH_SIZE, FetchError, HistorySource};

    // Filtering and the pipeline
    pub use crate::core::filter::AuthorFilter;
    pub use crate::core::pipeline::{ScanOutcome, ScanPipeline};

    // Report sink
    pub use crate::core::report::{render_report, render_summary, write_report};

    // Progress reporting
    pub use crate::progress::{ProgressCallback, ScanProgress, ScanStats};

    // Telegram transport
    pub use crate::telegram::TelegramHistory;

    // CLI types
    pub use crate::cli::Args;
}
