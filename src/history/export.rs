// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.

//! Tabular export of observations

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::config::{ExportFormat, ExportMode};
use crate::error::StorageError;
use crate::model::{AccessPointObservation, Snapshot};

/// One exported row
#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    timestamp: String,
    ssid: &'a str,
    bssid: String,
    vendor_oui: String,
    band: String,
    channel: Option<u32>,
    signal_percent: Option<u8>,
    details: Option<&'a str>,
    radio_type: Option<&'a str>,
    basic_rates: Option<&'a str>,
    other_rates: Option<&'a str>,
}

impl<'a> From<&'a AccessPointObservation> for ExportRow<'a> {
    fn from(obs: &'a AccessPointObservation) -> Self {
        Self {
            timestamp: obs.timestamp.to_rfc3339(),
            ssid: &obs.ssid,
            bssid: obs.bssid.to_string(),
            vendor_oui: obs.vendor_oui.to_string(),
            band: obs.band.to_string(),
            channel: obs.channel,
            signal_percent: obs.signal_percent,
            details: obs.details.as_deref(),
            radio_type: obs.radio_type.as_deref(),
            basic_rates: obs.basic_rates.as_deref(),
            other_rates: obs.other_rates.as_deref(),
        }
    }
}

/// Appends one row per observation, sorted by `(ssid, band, channel, bssid)`
pub struct TabularExport {
    path: PathBuf,
    format: ExportFormat,
    rows_written: u64,
}

impl TabularExport {
    /// In [`ExportMode::PerRun`] `path` is a directory and the file name
    /// carries the run start time.
    pub fn open(
        path: &Path,
        format: ExportFormat,
        mode: ExportMode,
        run_started: DateTime<Utc>,
    ) -> Result<Self, StorageError> {
        let path = match mode {
            ExportMode::Cumulative => path.to_path_buf(),
            ExportMode::PerRun => path.join(per_run_filename(format, run_started)),
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StorageError::io(parent, e))?;
        }

        info!("Exporting observations to {:?}", path);
        Ok(Self {
            path,
            format,
            rows_written: 0,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rows written by this instance
    pub fn rows_written(&self) -> u64 {
        self.rows_written
    }

    /// Render every row for `snapshot` in memory, then append in one write.
    pub fn append(&mut self, snapshot: &Snapshot) -> Result<usize, StorageError> {
        let rows = snapshot.sorted();
        if rows.is_empty() {
            return Ok(0);
        }

        let buf = match self.format {
            ExportFormat::Csv => self.render_csv(&rows)?,
            ExportFormat::JsonLines => render_json_lines(&rows)?,
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| StorageError::io(&self.path, e))?;
        file.write_all(&buf)
            .and_then(|_| file.sync_data())
            .map_err(|e| StorageError::io(&self.path, e))?;

        self.rows_written += rows.len() as u64;
        Ok(rows.len())
    }

    fn render_csv(&self, rows: &[&AccessPointObservation]) -> Result<Vec<u8>, StorageError> {
        let needs_header = std::fs::metadata(&self.path)
            .map(|m| m.len() == 0)
            .unwrap_or(true);

        let mut wtr = csv::WriterBuilder::new()
            .has_headers(needs_header)
            .from_writer(Vec::new());
        for obs in rows {
            wtr.serialize(ExportRow::from(*obs))?;
        }
        wtr.into_inner()
            .map_err(|e| StorageError::io(&self.path, e.into_error()))
    }
}

fn render_json_lines(rows: &[&AccessPointObservation]) -> Result<Vec<u8>, StorageError> {
    let mut buf = Vec::new();
    for obs in rows {
        serde_json::to_writer(&mut buf, &ExportRow::from(*obs))?;
        buf.push(b'\n');
    }
    Ok(buf)
}

fn per_run_filename(format: ExportFormat, run_started: DateTime<Utc>) -> String {
    let ext = match format {
        ExportFormat::Csv => "csv",
        ExportFormat::JsonLines => "jsonl",
    };
    format!("observations_{}.{}", run_started.format("%Y%m%d_%H%M%S"), ext)
}
