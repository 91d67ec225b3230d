//! Command-line interface definition using clap.
//!
//! Configuration comes from the environment (see [`crate::config`]); the
//! CLI only offers a few overrides on top, so a scan with a populated
//! `.env` is just `chatscan` with no arguments.

use clap::Parser;

use crate::config::Config;

/// Scan a Telegram chat's full history for one user's messages
/// and export a text report.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatscan")]
#[command(version, about, long_about = None)]
#[command(after_help = "CONFIGURATION (environment variables, or a .env file):
    API_ID           Telegram API id
    API_HASH         Telegram API hash
    SESSION_STRING   Saved session (optional; omit for interactive login)
    TARGET_USERNAME  Username to scan for (@ optional)
    CHAT_ID          Chat to scan (-100 prefix for supergroups)

EXAMPLES:
    chatscan
    chatscan --target @alice
    chatscan --chat-id=-1001234567890 --output alice.txt")]
pub struct Args {
    /// Username to scan for (overrides TARGET_USERNAME)
    #[arg(short, long, value_name = "USER")]
    pub target: Option<String>,

    /// Chat to scan (overrides CHAT_ID; -100 prefix for supergroups)
    #[arg(short, long, value_name = "ID", allow_hyphen_values = true)]
    pub chat_id: Option<i64>,

    /// Path to the report file (defaults to <TARGET>_messages.txt)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<String>,
}

impl Args {
    /// Applies the CLI overrides onto an environment-sourced config.
    pub fn apply(&self, config: &mut Config) {
        if let Some(target) = &self.target {
            config.target_username = target.clone();
        }
        if let Some(chat_id) = self.chat_id {
            config.chat_id = chat_id;
        }
    }

    /// The report path: the `--output` override, or the config default.
    pub fn output_path(&self, config: &Config) -> String {
        self.output
            .clone()
            .unwrap_or_else(|| config.report_filename())
    }
}
