//! # chatscan CLI
//!
//! Command-line interface for the chatscan library.

use std::process;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use chatscan::cli::Args;
use chatscan::config::Config;
use chatscan::core::{AuthorFilter, ScanPipeline, group_thousands, render_summary, write_report};
use chatscan::progress::{ProgressCallback, ScanProgress};
use chatscan::telegram::{self, TelegramHistory};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    if let Err(e) = run().await {
        eprintln!("\n❌ Error: {e}");
        process::exit(1);
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

async fn run() -> chatscan::Result<()> {
    let args = Args::parse();
    let mut config = Config::from_env()?;
    args.apply(&mut config);
    let output_path = args.output_path(&config);
    let filter = AuthorFilter::new(&config.target_username);

    // Header
    println!("🤖 chatscan v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("🎯 Target:  @{}", filter.target());
    println!("💬 Chat:    {}", config.chat_id);
    println!("💾 Output:  {}", output_path);
    println!();

    println!("🔄 Connecting to Telegram...");
    let client = telegram::connect(&config).await?;
    println!("✅ Connected successfully!\n");

    println!("🔍 Resolving chat...");
    let chat = telegram::resolve_chat(&client, config.chat_id).await?;
    println!("✅ Chat found: {}\n", chat.name());

    // Ctrl-C cancels the token; the pipeline notices at the next iteration
    // boundary and returns the matches collected so far.
    let cancel = CancellationToken::new();
    spawn_interrupt_handler(cancel.clone());

    let bar = progress_bar();
    let on_progress = progress_callback(bar.clone());

    let source = TelegramHistory::new(client, &chat);
    let outcome = ScanPipeline::new(source, filter)
        .with_cancellation(cancel)
        .with_progress(on_progress)
        .run()
        .await;
    bar.finish();

    write_report(&outcome.matches, &output_path)?;

    println!();
    if outcome.stats.interrupted {
        println!("⚠️  Scan interrupted - partial results saved.");
    } else {
        println!("✅ Operation completed successfully!");
    }
    println!("{}", render_summary(&outcome.stats));
    println!("📂 Output saved to: {output_path}");
    println!("\n👋 Session ended. Goodbye!");

    Ok(())
}

fn spawn_interrupt_handler(cancel: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel.cancel();
        }
    });
}

/// A 50-cell in-place progress line, updated once per batch.
fn progress_bar() -> ProgressBar {
    let bar = ProgressBar::new(100);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("💫 Progress: {bar:50} {percent:>3}% | {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█░"),
    );
    bar
}

fn progress_callback(bar: ProgressBar) -> ProgressCallback {
    let announced = AtomicBool::new(false);
    Arc::new(move |p: ScanProgress| {
        if !announced.swap(true, Ordering::Relaxed) {
            bar.println(format!(
                "📩 Total messages to scan: {}\n",
                group_thousands(p.total_messages)
            ));
        }
        bar.set_position(p.percent().floor() as u64);
        let eta = p
            .eta()
            .map_or_else(|| "--".to_string(), |d| format!("{}s", d.as_secs()));
        bar.set_message(format!("Found: {} messages | ETA: {eta}", p.matches_found));
    })
}
