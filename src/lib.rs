// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.

//! wlanwatch - Wireless Scan Observation and Rogue Access Point Heuristics
//!
//! Periodically samples the platform's WLAN scan output and:
//! - parses it into per-BSSID observations (SSID, vendor prefix, band, channel, signal)
//! - keeps an append-only history, mirrored to a timeline log and a CSV/JSONL export
//! - diffs consecutive snapshots to spot transceivers appearing and vanishing
//! - flags duplicate transmitters, capability mismatches and vendor collisions
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                          Watcher                             │
//! ├──────────────────────────────────────────────────────────────┤
//! │  ┌──────────┐  ┌────────┐  ┌─────────┐  ┌──────┐  ┌───────┐  │
//! │  │   Scan   │→ │ Parser │→ │ History │→ │ Diff │→ │ Rules │  │
//! │  │  Source  │  │        │  │  Store  │  │      │  │       │  │
//! │  └──────────┘  └────────┘  └─────────┘  └──────┘  └───────┘  │
//! │                                 ↓                     ↓      │
//! │                      ┌──────────────────┐     ┌──────────┐   │
//! │                      │ Timeline / CSV   │     │ Reporter │   │
//! │                      └──────────────────┘     └──────────┘   │
//! └──────────────────────────────────────────────────────────────┘
//! ```

pub mod analysis;
pub mod config;
pub mod core;
pub mod detection;
pub mod error;
pub mod history;
pub mod model;
pub mod parser;
pub mod report;
pub mod scan;

// Re-exports for convenience
pub use analysis::{diff, DiffResult};
pub use config::Config;
pub use crate::core::{CycleReport, ScanStatus, WatchState, WatchStats, Watcher};
pub use detection::{DetectionEngine, Finding, Severity};
pub use error::{AddressError, BandError, ScanError, StorageError};
pub use history::HistoryStore;
pub use model::{AccessPointObservation, Band, Bssid, Oui, Snapshot};
pub use parser::{parse_scan, parse_scan_with_stats, ParseStats};
pub use report::{CollectingReporter, ConsoleReporter, Reporter};
pub use scan::{NetshScanner, ReplaySource, ScanSource, StaticSource};

/// wlanwatch version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// wlanwatch name
pub const NAME: &str = "wlanwatch";

/// Build info
pub fn build_info() -> BuildInfo {
    BuildInfo {
        version: VERSION.to_string(),
        target: std::env::consts::ARCH.to_string(),
        os: std::env::consts::OS.to_string(),
    }
}

/// Build information
#[derive(Debug, Clone)]
pub struct BuildInfo {
    /// Version string
    pub version: String,
    /// Target architecture
    pub target: String,
    /// Operating system
    pub os: String,
}
