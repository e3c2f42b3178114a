//! `covtrack`: terminal sparkline of COVID Tracking Project daily statistics.
//!
//! Fetches the national and per-state daily series once at startup and
//! draws the selected metric (positive / negative / death increases) over
//! the selected window (week / month / all time). Scrub with the mouse or
//! arrow keys to read any single day.
//!
//! Logs go to a file (default `covtrack.log` in the temp dir) so they never
//! corrupt the terminal.

mod action;
mod app;
mod component;
mod data_bridge;
mod event;
mod screens;
mod theme;
mod tui;
mod widgets;

use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use color_eyre::eyre::{Result, WrapErr};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use covtrack_config::Config;
use covtrack_core::{Metric, TimeWindow};

use crate::app::App;

/// Metric names accepted on the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum MetricArg {
    Positive,
    Negative,
    Death,
}

impl From<MetricArg> for Metric {
    fn from(arg: MetricArg) -> Self {
        match arg {
            MetricArg::Positive => Self::Positive,
            MetricArg::Negative => Self::Negative,
            MetricArg::Death => Self::Death,
        }
    }
}

/// Window names accepted on the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum WindowArg {
    Week,
    Month,
    #[value(alias = "max")]
    All,
}

impl From<WindowArg> for TimeWindow {
    fn from(arg: WindowArg) -> Self {
        match arg {
            WindowArg::Week => Self::Week,
            WindowArg::Month => Self::Month,
            WindowArg::All => Self::All,
        }
    }
}

/// Terminal sparkline of COVID-19 daily case statistics.
#[derive(Parser, Debug)]
#[command(name = "covtrack", version, about)]
struct Cli {
    /// API root (e.g., https://api.covidtracking.com/v1/)
    #[arg(short = 'u', long, env = "COVTRACK_BASE_URL")]
    base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(short = 't', long, env = "COVTRACK_TIMEOUT_SECS")]
    timeout: Option<u64>,

    /// Metric shown when data first loads
    #[arg(short = 'm', long, value_enum)]
    metric: Option<MetricArg>,

    /// Time window shown when data first loads
    #[arg(short = 'w', long, value_enum)]
    window: Option<WindowArg>,

    /// Config file (defaults to the platform config dir)
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Log file path (defaults to covtrack.log in the temp dir)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Write the effective configuration to the config file and exit
    #[arg(long)]
    write_config: bool,
}

impl Cli {
    /// Layer flags over the loaded config.
    fn apply(&self, cfg: &mut Config) {
        if let Some(ref url) = self.base_url {
            cfg.base_url.clone_from(url);
        }
        if let Some(timeout) = self.timeout {
            cfg.timeout_secs = timeout;
        }
        if let Some(metric) = self.metric {
            cfg.default_metric = metric.into();
        }
        if let Some(window) = self.window {
            cfg.default_window = window.into();
        }
        if let Some(ref path) = self.log_file {
            cfg.log_file = Some(path.clone());
        }
    }
}

/// File-only tracing. Stdout/stderr belong to the terminal UI. The
/// returned guard must live until exit so buffered lines are flushed.
fn setup_tracing(log_file: &Path, verbose: u8) -> WorkerGuard {
    let log_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "covtrack={log_level},covtrack_core={log_level},covtrack_api={log_level}"
        ))
    });

    let log_dir = log_file.parent().unwrap_or_else(|| Path::new("."));
    let log_filename = log_file
        .file_name()
        .unwrap_or_else(|| std::ffi::OsStr::new("covtrack.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true),
        )
        .init();

    guard
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tui::install_hooks()?;

    let mut cfg = match cli.config {
        Some(ref path) => covtrack_config::load_config_from(path)
            .wrap_err_with(|| format!("loading {}", path.display()))?,
        None => covtrack_config::load_config().wrap_err("loading configuration")?,
    };
    cli.apply(&mut cfg);

    let tracker = cfg.to_tracker_config().wrap_err("invalid configuration")?;

    if cli.write_config {
        let written = match cli.config {
            Some(ref path) => covtrack_config::save_config_to(&cfg, path).map(|()| path.clone()),
            None => covtrack_config::save_config(&cfg),
        }
        .wrap_err("writing configuration")?;
        println!("Wrote {}", written.display());
        return Ok(());
    }

    let log_file = cfg
        .log_file
        .clone()
        .unwrap_or_else(|| std::env::temp_dir().join("covtrack.log"));
    let _log_guard = setup_tracing(&log_file, cli.verbose);

    info!(
        base_url = %tracker.base_url,
        timeout_secs = tracker.timeout.as_secs(),
        metric = %tracker.default_selection.metric,
        window = %tracker.default_selection.window,
        "starting covtrack"
    );

    let client = tracker.client().wrap_err("building HTTP client")?;
    let mut app = App::new(client, tracker.default_selection);
    app.run().await
}
