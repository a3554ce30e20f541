//! Report module - where each cycle's outcome is shown

use std::fmt::Write as _;
use std::io::{self, Write};

use tracing::warn;

use crate::core::{CycleReport, ScanStatus};

/// Receives every completed cycle in order
pub trait Reporter: Send {
    fn report(&mut self, report: &CycleReport);
}

/// Prints a human-readable block per cycle
pub struct ConsoleReporter<W: Write + Send = io::Stdout> {
    out: W,
    verbose: bool,
}

impl ConsoleReporter {
    pub fn stdout() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl<W: Write + Send> ConsoleReporter<W> {
    pub fn with_writer(out: W) -> Self {
        Self {
            out,
            verbose: false,
        }
    }

    /// Also list every access point seen in the cycle.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> Reporter for ConsoleReporter<W> {
    fn report(&mut self, report: &CycleReport) {
        let text = render(report, self.verbose);
        if let Err(e) = self.out.write_all(text.as_bytes()).and_then(|_| self.out.flush()) {
            warn!("Failed to write cycle report: {}", e);
        }
    }
}

/// Format one cycle the way [`ConsoleReporter`] prints it
pub fn render(report: &CycleReport, verbose: bool) -> String {
    let mut out = String::new();
    let snapshot = &report.snapshot;

    let status = match &report.scan_status {
        ScanStatus::Ok => "scan ok".to_string(),
        ScanStatus::Empty => "scan returned nothing".to_string(),
        ScanStatus::Failed(reason) => format!("scan failed: {}", reason),
    };
    let _ = writeln!(
        out,
        "[{}] cycle {}: {} access points ({})",
        report.timestamp.format("%Y-%m-%d %H:%M:%S"),
        report.cycle,
        snapshot.len(),
        status
    );

    if verbose {
        for obs in snapshot.sorted() {
            let ssid = if obs.is_hidden() { "<hidden>" } else { obs.ssid.as_str() };
            let channel = obs.channel.map_or_else(|| "?".to_string(), |c| c.to_string());
            let signal = obs.signal_percent.map_or_else(|| "?".to_string(), |s| s.to_string());
            let _ = writeln!(
                out,
                "    {:<24} {} {:>7} ch {:>3} {:>3}%",
                ssid,
                obs.bssid,
                obs.band.to_string(),
                channel,
                signal
            );
        }
    }

    if report.diff.baseline {
        let _ = writeln!(out, "  baseline recorded");
    }

    if let Some(err) = &report.persist_error {
        let _ = writeln!(out, "  ! history not persisted: {}", err);
    }

    for finding in &report.findings {
        let _ = writeln!(
            out,
            "  [{}] {}: {}",
            finding.severity(),
            finding.rule(),
            finding
        );
    }

    if report.is_clean() {
        let _ = writeln!(out, "  No anomalies detected");
    } else if report.anomalies().next().is_none() {
        let _ = writeln!(out, "  No anomalies detected (churn only)");
    }

    out
}

/// Keeps every report in memory
#[derive(Debug, Default)]
pub struct CollectingReporter {
    pub reports: Vec<CycleReport>,
}

impl Reporter for CollectingReporter {
    fn report(&mut self, report: &CycleReport) {
        self.reports.push(report.clone());
    }
}
