// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.

//! BSSID set difference between consecutive snapshots

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::model::{Bssid, Snapshot};

/// Transceivers that appeared or vanished between two snapshots
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffResult {
    pub added: BTreeSet<Bssid>,
    pub removed: BTreeSet<Bssid>,
    /// No previous snapshot existed; everything counts as added.
    pub baseline: bool,
}

impl DiffResult {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }

    /// Steady-state change worth reporting.
    pub fn has_churn(&self) -> bool {
        !self.baseline && !self.is_empty()
    }

    pub fn changes(&self) -> usize {
        self.added.len() + self.removed.len()
    }
}

/// Diff `current` against `previous`.
pub fn diff(previous: Option<&Snapshot>, current: &Snapshot) -> DiffResult {
    let Some(previous) = previous else {
        return DiffResult {
            added: current.bssids().copied().collect(),
            removed: BTreeSet::new(),
            baseline: true,
        };
    };

    DiffResult {
        added: current
            .bssids()
            .filter(|b| !previous.contains(b))
            .copied()
            .collect(),
        removed: previous
            .bssids()
            .filter(|b| !current.contains(b))
            .copied()
            .collect(),
        baseline: false,
    }
}
