// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.

//! History store - append-only snapshot timeline with persisted log and export

mod export;
mod timeline;

pub use export::TabularExport;
pub use timeline::{render_block, TimelineLog};

use std::collections::VecDeque;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, error, info};

use crate::config::Config;
use crate::error::StorageError;
use crate::model::Snapshot;

/// Result of appending one snapshot
#[derive(Debug)]
pub struct Appended {
    /// The snapshot appended just before this one
    pub previous: Option<Arc<Snapshot>>,
    pub current: Arc<Snapshot>,
    /// Outcome of the disk writes. The in-memory append always succeeds.
    pub persisted: Result<(), StorageError>,
}

/// Ordered, append-only sequence of snapshots
///
/// Only the in-memory window is bounded; nothing is ever removed from the
/// timeline log or the export.
pub struct HistoryStore {
    window: usize,
    snapshots: VecDeque<Arc<Snapshot>>,
    appended: u64,
    timeline: Option<TimelineLog>,
    export: Option<TabularExport>,
}

impl HistoryStore {
    /// Memory-only store. A `window` of 0 keeps everything.
    pub fn in_memory(window: usize) -> Self {
        Self {
            window,
            snapshots: VecDeque::new(),
            appended: 0,
            timeline: None,
            export: None,
        }
    }

    /// Store persisting to the locations named in `config`.
    pub fn open(config: &Config, run_started: DateTime<Utc>) -> Result<Self, StorageError> {
        let mut store = Self::in_memory(config.watch.history_window);
        let storage = &config.storage;

        if storage.timeline_enabled {
            let log = TimelineLog::open(&config.timeline_path())?;
            info!("Timeline log at {:?}", log.path());
            store.timeline = Some(log);
        }
        if storage.export_enabled {
            store.export = Some(TabularExport::open(
                &config.export_path(),
                storage.export_format,
                storage.export_mode,
                run_started,
            )?);
        }

        Ok(store)
    }

    pub fn with_timeline(mut self, timeline: TimelineLog) -> Self {
        self.timeline = Some(timeline);
        self
    }

    pub fn with_export(mut self, export: TabularExport) -> Self {
        self.export = Some(export);
        self
    }

    /// Append the newest snapshot and return the one before it.
    pub fn append(&mut self, snapshot: Snapshot) -> Appended {
        let current = Arc::new(snapshot);
        let previous = self.snapshots.back().cloned();

        self.appended += 1;
        let persisted = self.persist(self.appended, &current);

        self.snapshots.push_back(Arc::clone(&current));
        if self.window > 0 {
            while self.snapshots.len() > self.window {
                self.snapshots.pop_front();
            }
        }
        debug!(
            "History holds {} snapshots ({} appended)",
            self.snapshots.len(),
            self.appended
        );

        Appended {
            previous,
            current,
            persisted,
        }
    }

    /// Both sinks are attempted; the first failure is returned.
    fn persist(&mut self, cycle: u64, snapshot: &Snapshot) -> Result<(), StorageError> {
        let timeline = match &self.timeline {
            Some(log) => log.append(cycle, snapshot),
            None => Ok(()),
        };
        let export = match &mut self.export {
            Some(export) => export.append(snapshot).map(|_| ()),
            None => Ok(()),
        };

        match (timeline, export) {
            (Ok(()), Ok(())) => Ok(()),
            (Err(e), Ok(())) | (Ok(()), Err(e)) => Err(e),
            (Err(first), Err(second)) => {
                error!("Export also failed: {}", second);
                Err(first)
            }
        }
    }

    pub fn latest(&self) -> Option<&Arc<Snapshot>> {
        self.snapshots.back()
    }

    /// Snapshots held in memory, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Snapshot>> {
        self.snapshots.iter()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Snapshots appended over the store's lifetime, evicted ones included
    pub fn total_appended(&self) -> u64 {
        self.appended
    }

    pub fn export(&self) -> Option<&TabularExport> {
        self.export.as_ref()
    }

    pub fn timeline(&self) -> Option<&TimelineLog> {
        self.timeline.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ExportFormat, ExportMode};
    use crate::model::{AccessPointObservation, Bssid};
    use chrono::{Duration, TimeZone};

    fn snapshot(minute: i64, macs: &[&str]) -> Snapshot {
        let ts = Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap() + Duration::minutes(minute);
        let map = macs
            .iter()
            .map(|m| {
                let b = Bssid::parse(m).unwrap();
                (b, AccessPointObservation::new(ts, "net", b))
            })
            .collect();
        Snapshot::new(ts, map)
    }

    #[test]
    fn test_append_returns_previous() {
        let mut store = HistoryStore::in_memory(0);

        let first = store.append(snapshot(0, &["00:00:00:00:00:01"]));
        assert!(first.previous.is_none());
        assert!(first.persisted.is_ok());

        let second = store.append(snapshot(1, &["00:00:00:00:00:02"]));
        assert_eq!(second.previous.as_deref(), Some(&*first.current));
        assert_eq!(store.latest(), Some(&second.current));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_never_discards_without_window() {
        let mut store = HistoryStore::in_memory(0);
        for minute in 0..50 {
            store.append(snapshot(minute, &[]));
        }

        assert_eq!(store.len(), 50);
        let stamps: Vec<_> = store.iter().map(|s| s.timestamp()).collect();
        assert!(stamps.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_window_bounds_memory_only() {
        let dir = tempfile::tempdir().unwrap();
        let export = TabularExport::open(
            &dir.path().join("obs.csv"),
            ExportFormat::Csv,
            ExportMode::Cumulative,
            Utc::now(),
        )
        .unwrap();
        let mut store = HistoryStore::in_memory(3).with_export(export);

        let mut expected_rows = 0;
        for minute in 0..10 {
            let macs: Vec<String> = (0..=minute % 4).map(|i| format!("00:00:00:00:00:{i:02x}")).collect();
            let macs: Vec<&str> = macs.iter().map(String::as_str).collect();
            expected_rows += macs.len();
            let appended = store.append(snapshot(minute, &macs));
            assert!(appended.persisted.is_ok());
        }

        assert_eq!(store.len(), 3);
        assert_eq!(store.total_appended(), 10);
        assert_eq!(store.export().unwrap().rows_written(), expected_rows as u64);

        let text = std::fs::read_to_string(dir.path().join("obs.csv")).unwrap();
        assert_eq!(text.lines().count(), expected_rows + 1);
    }

    #[test]
    fn test_persistence_failure_keeps_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the log file should be makes every write fail
        let blocked = dir.path().join("timeline.log");
        std::fs::create_dir_all(&blocked).unwrap();
        let mut store = HistoryStore::in_memory(0).with_timeline(TimelineLog::open(&blocked).unwrap());

        let appended = store.append(snapshot(0, &["00:00:00:00:00:01"]));
        assert!(matches!(appended.persisted, Err(StorageError::Io { .. })));
        assert_eq!(store.len(), 1);

        let next = store.append(snapshot(1, &[]));
        assert!(next.previous.is_some());
        assert!(next.persisted.is_err());
    }
}
