//! coinwatch - live cryptocurrency price table.
//!
//! Subscribes to a server-push (SSE) asset feed and renders the latest
//! snapshot as a sortable table.
//!
//! Usage:
//!   coinwatch                              # default endpoint, 250ms tick
//!   coinwatch 1000                         # 1s tick
//!   coinwatch --url http://host/assets     # custom feed endpoint
//!   coinwatch --log-file /tmp/cw.log       # tracing output to a file
//!   coinwatch --no-reconnect               # single-shot subscription

use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use coinwatch::feed::FeedConfig;
use coinwatch::provider::{LiveProvider, SnapshotProvider};
use coinwatch::tui::App;

/// Default feed endpoint.
const DEFAULT_URL: &str = "http://127.0.0.1:3000/api/crypto/assets";

/// Live cryptocurrency price table.
#[derive(Parser)]
#[command(name = "coinwatch", about = "Live cryptocurrency price table")]
struct Args {
    /// UI tick interval in milliseconds (default: 250).
    /// Feed messages arriving between ticks coalesce; the last one wins.
    #[arg(value_name = "INTERVAL_MS")]
    interval_ms: Option<u64>,

    /// Feed endpoint (SSE).
    #[arg(long, default_value = DEFAULT_URL)]
    url: String,

    /// Write tracing output to this file. Without it, logging is off:
    /// the TUI owns the terminal.
    #[arg(long, value_name = "PATH")]
    log_file: Option<String>,

    /// Disable reconnection on transport failures.
    #[arg(long)]
    no_reconnect: bool,
}

/// Initializes the tracing subscriber writing to `path`.
/// Level defaults to INFO, overridable via RUST_LOG.
fn init_logging(path: &str) -> std::io::Result<()> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("coinwatch=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::sync::Arc::new(file))
        .with_ansi(false)
        .with_target(false)
        .init();
    Ok(())
}

fn main() {
    let args = Args::parse();

    if let Some(ref path) = args.log_file {
        if let Err(e) = init_logging(path) {
            eprintln!("Error opening log file '{}': {}", path, e);
            std::process::exit(1);
        }
    }

    if args.interval_ms == Some(0) {
        eprintln!("Error: interval must be at least 1ms");
        std::process::exit(1);
    }

    let provider: Box<dyn SnapshotProvider> = Box::new(LiveProvider::connect(FeedConfig {
        url: args.url,
        reconnect: !args.no_reconnect,
    }));

    let tick_rate = Duration::from_millis(args.interval_ms.unwrap_or(250));
    let app = App::new(provider);

    if let Err(e) = app.run(tick_rate) {
        eprintln!("Error running TUI: {}", e);
        std::process::exit(1);
    }
}
