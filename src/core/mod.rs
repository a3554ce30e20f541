//! Core module - the poll loop and its per-cycle result bundle

mod watcher;

pub use watcher::Watcher;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::analysis::DiffResult;
use crate::detection::Finding;
use crate::model::Snapshot;
use crate::parser::ParseStats;

/// Poll loop state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WatchState {
    /// Waiting on the interval timer
    Idle,
    /// Scan, parse, store, diff and detect in progress
    Sampling,
}

/// How the raw scan for a cycle was obtained
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScanStatus {
    Ok,
    /// The source returned no text at all
    Empty,
    /// The source failed; the cycle ran on an empty snapshot
    Failed(String),
}

/// Everything one cycle produced, handed to the reporter
#[derive(Debug, Clone)]
pub struct CycleReport {
    /// 1-based cycle number
    pub cycle: u64,
    pub timestamp: DateTime<Utc>,
    pub snapshot: Arc<Snapshot>,
    pub diff: DiffResult,
    pub findings: Vec<Finding>,
    pub scan_status: ScanStatus,
    pub parse_stats: ParseStats,
    pub persist_error: Option<String>,
}

impl CycleReport {
    /// Every rule was checked and none fired.
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }

    /// Findings other than informational churn
    pub fn anomalies(&self) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(|f| f.is_anomaly())
    }
}

/// Running totals over a watch session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WatchStats {
    pub cycles: u64,
    pub failed_scans: u64,
    pub persist_failures: u64,
    pub anomalies: u64,
    pub churn_events: u64,
    pub last_anomaly: Option<DateTime<Utc>>,
}

impl WatchStats {
    fn record(&mut self, report: &CycleReport) {
        self.cycles += 1;
        if matches!(report.scan_status, ScanStatus::Failed(_)) {
            self.failed_scans += 1;
        }
        if report.persist_error.is_some() {
            self.persist_failures += 1;
        }

        let anomalies = report.anomalies().count() as u64;
        if anomalies > 0 {
            self.anomalies += anomalies;
            self.last_anomaly = Some(report.timestamp);
        }
        self.churn_events += (report.findings.len() as u64) - anomalies;
    }
}
