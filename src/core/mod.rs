//! Core scanning logic for chatscan.
//!
//! This module contains:
//! - [`filter`] - Author matching for raw messages
//! - [`pipeline`] - The batch walk: fetch, filter, accumulate, retry
//! - [`report`] - The text report sink and run summary
//!
//! # Quick Start
//!
//! ```rust
//! use chatscan::core::{AuthorFilter, ScanPipeline, render_report, write_report};
//! ```

pub mod filter;
pub mod pipeline;
pub mod report;

// Re-export main types for convenience
pub use filter::AuthorFilter;
pub use pipeline::{BATCH_DELAY, RETRY_DELAY, ScanOutcome, ScanPipeline};
pub use report::{group_thousands, render_report, render_summary, write_report};
