// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.

//! wlanwatch - Wireless Scan Observation and Rogue Access Point Heuristics
//!
//! Samples `netsh wlan show networks mode=bssid` (or replays captured
//! output), keeps a timeline of every access point seen, and reports
//! suspicious configurations each cycle.

use std::path::PathBuf;

use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use tokio::sync::watch;
use tracing::{debug, info, warn, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use wlanwatch::{
    Config, ConsoleReporter, DetectionEngine, HistoryStore, NetshScanner, ReplaySource,
    ScanSource, WatchStats, Watcher, NAME, VERSION,
};

/// wlanwatch - Wireless access-point watch
#[derive(Parser, Debug)]
#[command(name = NAME)]
#[command(author = "bad-antics")]
#[command(version = VERSION)]
#[command(about = "Periodic WLAN scan parsing, timeline diffing and rogue AP heuristics")]
struct Args {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seconds between scans
    #[arg(short, long)]
    interval: Option<u64>,

    /// Replay captured scan output files instead of running the scanner
    #[arg(long, num_args = 1..)]
    replay: Vec<PathBuf>,

    /// Stop after this many cycles
    #[arg(long)]
    cycles: Option<u64>,

    /// Run a single cycle and exit
    #[arg(long, conflicts_with = "cycles")]
    once: bool,

    /// Data output directory
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// List every access point in each cycle report
    #[arg(short, long)]
    verbose: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Enable trace-level logging
    #[arg(long)]
    trace: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Load or create configuration
    let config_path = args.config.clone().unwrap_or_else(Config::default_path);
    let mut config = Config::load_or_create(&config_path)?;

    // Initialize logging
    let log_level = if args.trace {
        Level::TRACE
    } else if args.debug {
        Level::DEBUG
    } else {
        config.log_level.parse().unwrap_or(Level::INFO)
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.to_string()));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(true)
        .with_file(args.debug)
        .with_line_number(args.debug)
        .with_ansi(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("{} v{}", NAME, VERSION);
    let build = wlanwatch::build_info();
    debug!("Build: {} on {}/{}", build.version, build.os, build.target);
    info!("Configuration loaded from {:?}", config_path);

    // Override with command line args
    if let Some(data_dir) = args.data_dir {
        config.data_dir = data_dir;
    }
    if let Some(interval) = args.interval {
        config.watch.interval_secs = interval;
    } else if !args.replay.is_empty() {
        // Captures are replayed back to back unless asked otherwise
        config.watch.interval_secs = 0;
    }
    if args.once {
        config.watch.max_cycles = Some(1);
    } else if let Some(cycles) = args.cycles {
        config.watch.max_cycles = Some(cycles);
    }

    let rt = tokio::runtime::Runtime::new()?;
    let stats = rt.block_on(async {
        if args.replay.is_empty() {
            let scanner = NetshScanner::new(config.scanner.clone());
            watch_with(&config, scanner, args.verbose).await
        } else {
            info!("Replaying {} captures", args.replay.len());
            watch_with(&config, ReplaySource::new(args.replay), args.verbose).await
        }
    })?;

    info!(
        "Done: {} cycles, {} anomalies, {} churn events, {} failed scans",
        stats.cycles, stats.anomalies, stats.churn_events, stats.failed_scans
    );
    if stats.persist_failures > 0 {
        warn!("{} cycles could not be persisted", stats.persist_failures);
    }

    Ok(())
}

/// Run the poll loop over `source` until it ends or Ctrl+C is pressed
async fn watch_with<S: ScanSource>(config: &Config, source: S, verbose: bool) -> Result<WatchStats> {
    let history = HistoryStore::open(config, Utc::now())?;

    let detector = DetectionEngine::new(config.detection.clone());
    let reporter = ConsoleReporter::stdout().verbose(verbose);

    let (stop_tx, stop_rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Shutdown signal received, finishing current cycle...");
            let _ = stop_tx.send(true);
        }
    });

    info!("Press Ctrl+C to stop");
    let mut watcher = Watcher::new(&config.watch, source, reporter, history, detector);
    Ok(watcher.run(stop_rx).await)
}
