//! The report sink.
//!
//! Matches are serialized to a flat text file, one block per match:
//!
//! ```text
//! 📅 Date: 2024-01-15 10:30:00
//! 📌 Message ID: 12345
//! 💬 Text: hello there
//! ────────────────────────────────────────
//! ```
//!
//! Blocks are concatenated with no separator beyond the dash rule. The
//! file is written once, after the walk completes, overwriting any
//! previous run's report.

use std::fs;
use std::path::Path;

use chrono::Local;

use crate::error::Result;
use crate::message::MatchRecord;
use crate::progress::ScanStats;

/// Width of the rule between report blocks.
const SEPARATOR_WIDTH: usize = 40;

/// Renders the full report body for the given matches.
pub fn render_report(matches: &[MatchRecord]) -> String {
    let mut out = String::new();
    for record in matches {
        let local = record.date.with_timezone(&Local);
        out.push_str(&format!(
            "📅 Date: {}\n",
            local.format("%Y-%m-%d %H:%M:%S")
        ));
        out.push_str(&format!("📌 Message ID: {}\n", record.message_id));
        out.push_str(&format!("💬 Text: {}\n", record.text));
        out.push_str(&"─".repeat(SEPARATOR_WIDTH));
        out.push('\n');
    }
    out
}

/// Writes the report to `path`, replacing any existing file.
///
/// The write happens in one call, so the file is never observed half
/// written by the caller.
pub fn write_report(matches: &[MatchRecord], path: impl AsRef<Path>) -> Result<()> {
    fs::write(path, render_report(matches))?;
    Ok(())
}

/// Renders the end-of-run summary block.
pub fn render_summary(stats: &ScanStats) -> String {
    format!(
        "📊 Statistics:\n   \
         • Total messages scanned: {}\n   \
         • Messages found: {}\n   \
         • Success rate: {:.2}%",
        group_thousands(stats.total_messages),
        group_thousands(stats.match_count as i64),
        stats.success_rate()
    )
}

/// Formats an integer with `,` thousands separators.
pub fn group_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if n < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::time::Duration;

    fn record(id: i64, text: &str) -> MatchRecord {
        MatchRecord {
            date: Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap(),
            message_id: id,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_block_layout() {
        let report = render_report(&[record(42, "hello")]);
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("📅 Date: "));
        assert_eq!(lines[1], "📌 Message ID: 42");
        assert_eq!(lines[2], "💬 Text: hello");
        assert_eq!(lines[3], "─".repeat(40));
    }

    #[test]
    fn test_blocks_concatenated_without_blank_lines() {
        let report = render_report(&[record(2, "a"), record(1, "b")]);
        assert!(!report.contains("\n\n"));
        assert_eq!(report.matches("📌 Message ID:").count(), 2);
    }

    #[test]
    fn test_empty_report_is_empty_file_body() {
        assert_eq!(render_report(&[]), "");
    }

    #[test]
    fn test_summary_guards_zero_total() {
        let stats = ScanStats {
            total_messages: 0,
            match_count: 0,
            elapsed: Duration::ZERO,
            interrupted: false,
        };
        let summary = render_summary(&stats);
        assert!(summary.contains("0.00%"));
        assert!(!summary.contains("NaN"));
        assert!(!summary.contains("inf"));
    }

    #[test]
    fn test_summary_contents() {
        let stats = ScanStats {
            total_messages: 1_234_567,
            match_count: 25,
            elapsed: Duration::from_secs(60),
            interrupted: false,
        };
        let summary = render_summary(&stats);
        assert!(summary.contains("1,234,567"));
        assert!(summary.contains("25"));
        assert!(summary.contains("%"));
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(250_000), "250,000");
        assert_eq!(group_thousands(-1234), "-1,234");
    }
}
