// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.

//! Plain-text append-only timeline log

use std::fmt::Write as _;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::StorageError;
use crate::model::{AccessPointObservation, Snapshot};

/// One human-readable block per cycle, never rewritten
pub struct TimelineLog {
    path: PathBuf,
}

impl TimelineLog {
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StorageError::io(parent, e))?;
        }
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append the block for one snapshot in a single write.
    pub fn append(&self, cycle: u64, snapshot: &Snapshot) -> Result<(), StorageError> {
        let block = render_block(cycle, snapshot);

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| StorageError::io(&self.path, e))?;
        file.write_all(block.as_bytes())
            .and_then(|_| file.sync_data())
            .map_err(|e| StorageError::io(&self.path, e))
    }
}

pub fn render_block(cycle: u64, snapshot: &Snapshot) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "=== {} | cycle {} | {} access points ===",
        snapshot.timestamp().to_rfc3339(),
        cycle,
        snapshot.len()
    );

    if snapshot.is_empty() {
        out.push_str("(no access points)\n");
    }
    for obs in snapshot.sorted() {
        out.push_str(&render_line(obs));
        out.push('\n');
    }
    out.push('\n');
    out
}

fn render_line(obs: &AccessPointObservation) -> String {
    let ssid = if obs.is_hidden() {
        "<hidden>".to_string()
    } else {
        format!("\"{}\"", obs.ssid)
    };
    let channel = obs
        .channel
        .map_or_else(|| "ch ?".to_string(), |c| format!("ch {c}"));
    let signal = obs
        .signal_percent
        .map_or_else(|| "?%".to_string(), |s| format!("{s}%"));

    format!(
        "{} {} oui {} | {} {} | {} | {} | {}",
        ssid,
        obs.bssid,
        obs.vendor_oui,
        obs.band,
        channel,
        signal,
        obs.details.as_deref().unwrap_or("-"),
        obs.radio_type.as_deref().unwrap_or("-")
    )
}
