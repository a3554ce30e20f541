// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.

//! Interval-driven, single-flight poll loop

use std::time::Duration;

use chrono::Utc;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use super::{CycleReport, ScanStatus, WatchState, WatchStats};
use crate::analysis::diff;
use crate::config::WatchConfig;
use crate::detection::DetectionEngine;
use crate::error::ScanError;
use crate::history::{Appended, HistoryStore};
use crate::parser::parse_scan_with_stats;
use crate::report::Reporter;
use crate::scan::ScanSource;

/// Samples a scan source at a fixed interval and reports each cycle
///
/// The next wait starts only after the current cycle has finished, so
/// cycles never overlap.
pub struct Watcher<S, R> {
    source: S,
    reporter: R,
    history: HistoryStore,
    detector: DetectionEngine,
    interval: Duration,
    max_cycles: Option<u64>,
    state: WatchState,
    stats: WatchStats,
}

impl<S: ScanSource, R: Reporter> Watcher<S, R> {
    pub fn new(
        config: &WatchConfig,
        source: S,
        reporter: R,
        history: HistoryStore,
        detector: DetectionEngine,
    ) -> Self {
        Self {
            source,
            reporter,
            history,
            detector,
            interval: config.interval(),
            max_cycles: config.max_cycles,
            state: WatchState::Idle,
            stats: WatchStats::default(),
        }
    }

    pub fn state(&self) -> WatchState {
        self.state
    }

    pub fn stats(&self) -> &WatchStats {
        &self.stats
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    pub fn into_reporter(self) -> R {
        self.reporter
    }

    /// Run until `stop` turns true, the source is exhausted, or
    /// `max_cycles` is reached. A cycle in progress always completes.
    pub async fn run(&mut self, mut stop: watch::Receiver<bool>) -> WatchStats {
        info!(
            "Watching via {} every {:?}",
            self.source.name(),
            self.interval
        );

        loop {
            if *stop.borrow() {
                info!("Stop requested");
                break;
            }

            if self.run_cycle().await.is_none() {
                info!("Scan source {} exhausted", self.source.name());
                break;
            }

            if self.max_cycles.is_some_and(|max| self.stats.cycles >= max) {
                info!("Reached {} cycles", self.stats.cycles);
                break;
            }

            if self.idle(&mut stop).await {
                info!("Stop requested");
                break;
            }
        }

        self.stats.clone()
    }

    /// One sampling pass. `None` only when the source is exhausted.
    pub async fn run_cycle(&mut self) -> Option<CycleReport> {
        self.state = WatchState::Sampling;
        let report = self.sample().await;
        self.state = WatchState::Idle;

        let report = report?;
        self.stats.record(&report);
        self.reporter.report(&report);
        Some(report)
    }

    async fn sample(&mut self) -> Option<CycleReport> {
        let (raw, scan_status) = match self.source.scan().await {
            Ok(text) if text.trim().is_empty() => (String::new(), ScanStatus::Empty),
            Ok(text) => (text, ScanStatus::Ok),
            Err(ScanError::Exhausted) => return None,
            Err(e) => {
                warn!("Scan via {} failed: {}", self.source.name(), e);
                (String::new(), ScanStatus::Failed(e.to_string()))
            }
        };

        let timestamp = Utc::now();
        let (snapshot, parse_stats) = parse_scan_with_stats(&raw, timestamp);
        if parse_stats.is_garbled() {
            warn!(
                "Scan text matched no known structure ({} lines skipped)",
                parse_stats.skipped_lines
            );
        }

        let Appended {
            previous,
            current,
            persisted,
        } = self.history.append(snapshot);

        let persist_error = match persisted {
            Ok(()) => None,
            Err(e) => {
                error!("Failed to persist snapshot: {}", e);
                Some(e.to_string())
            }
        };

        let diff = diff(previous.as_deref(), &current);
        let findings = self.detector.evaluate(&current, &diff);

        debug!(
            "Cycle {}: {} access points, +{} -{}, {} findings",
            self.history.total_appended(),
            current.len(),
            diff.added.len(),
            diff.removed.len(),
            findings.len()
        );

        Some(CycleReport {
            cycle: self.history.total_appended(),
            timestamp,
            snapshot: current,
            diff,
            findings,
            scan_status,
            parse_stats,
            persist_error,
        })
    }

    /// Wait out the interval. Returns true when a stop was requested.
    async fn idle(&self, stop: &mut watch::Receiver<bool>) -> bool {
        let sleep = tokio::time::sleep(self.interval);
        tokio::pin!(sleep);

        loop {
            tokio::select! {
                _ = &mut sleep => return false,
                changed = stop.changed() => match changed {
                    Ok(()) if *stop.borrow() => return true,
                    Ok(()) => continue,
                    Err(_) => {
                        // Sender gone, nobody can stop us any more
                        (&mut sleep).await;
                        return false;
                    }
                },
            }
        }
    }
}
