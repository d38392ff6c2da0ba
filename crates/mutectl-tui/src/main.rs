//! `mutectl-tui` — live terminal status view for MuteDeck meeting controls.
//!
//! Built on [ratatui](https://ratatui.rs). A background poller fetches
//! `/v1/status` on the configured interval and streams snapshots into the
//! event loop; `m`/`c`/`l` fire the corresponding controls with the same
//! confirmation gates as the CLI.
//!
//! Logs are written to a file (default `/tmp/mutectl-tui.log`) to avoid
//! corrupting the terminal UI.

mod action;
mod app;
mod event;
mod poller;
mod theme;
mod tui;

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Result, eyre};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use mutectl_api::{ControllerClient, TransportConfig};

use crate::app::App;

/// Live status view for a MuteDeck meeting controller.
#[derive(Parser, Debug)]
#[command(name = "mutectl-tui", version, about)]
struct Cli {
    /// Controller endpoint (overrides the config file)
    #[arg(short = 'e', long, env = "MUTECTL_API_ENDPOINT")]
    endpoint: Option<String>,

    /// Poll interval in seconds (overrides the config file)
    #[arg(short = 'i', long, env = "MUTECTL_STATUS_REFRESH_INTERVAL")]
    interval: Option<u64>,

    /// Log file path
    #[arg(long, default_value = "/tmp/mutectl-tui.log")]
    log_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Set up file-based tracing. We MUST NOT log to stdout/stderr — that would
/// corrupt the TUI output. Returns a guard that must be held for the
/// lifetime of the application to ensure logs are flushed.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("mutectl_tui={log_level}")));

    let log_dir = cli.log_file.parent().unwrap_or(std::path::Path::new("/tmp"));
    let log_filename = cli
        .log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("mutectl-tui.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true),
        )
        .init();

    guard
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Install panic/error hooks BEFORE entering the terminal
    tui::install_hooks()?;

    // Tracing to file — hold the guard so logs flush on exit
    let _log_guard = setup_tracing(&cli);

    // Preferences: config file + env, then explicit flag overrides.
    let mut prefs = mutectl_config::load_preferences().map_err(|e| eyre!("{e}"))?;
    if let Some(ref endpoint) = cli.endpoint {
        prefs.api_endpoint = endpoint.clone();
    }
    if let Some(interval) = cli.interval {
        prefs.status_refresh_interval = interval;
    }
    prefs.validate().map_err(|e| eyre!("{e}"))?;

    info!(
        endpoint = %prefs.api_endpoint,
        interval = prefs.status_refresh_interval,
        "starting mutectl-tui"
    );

    let transport = TransportConfig::with_timeout_secs(prefs.timeout);
    let client =
        ControllerClient::new(&prefs.api_endpoint, &transport).map_err(|e| eyre!("{e}"))?;

    let mut app = App::new(client, prefs);
    app.run().await?;

    Ok(())
}
