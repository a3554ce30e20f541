// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.

//! Rogue access point heuristics
//!
//! Each rule looks at one snapshot on its own. Groups are built in
//! `BTreeMap`s so findings come out in a stable order.

use std::collections::{BTreeMap, BTreeSet};

use crate::analysis::DiffResult;
use crate::model::{AccessPointObservation, Band, Bssid, Oui, Snapshot};

use super::Finding;

/// More than one BSSID advertising the same `(ssid, band, channel)` on a
/// watched band.
pub fn duplicate_transmitters(
    snapshot: &Snapshot,
    bands: &[Band],
    include_hidden: bool,
) -> Vec<Finding> {
    let mut groups: BTreeMap<(&str, Band, Option<u32>), BTreeSet<Bssid>> = BTreeMap::new();

    for obs in snapshot
        .observations()
        .filter(|o| bands.contains(&o.band))
        .filter(|o| include_hidden || !o.is_hidden())
    {
        groups
            .entry((obs.ssid.as_str(), obs.band, obs.channel))
            .or_default()
            .insert(obs.bssid);
    }

    groups
        .into_iter()
        .filter(|(_, bssids)| bssids.len() > 1)
        .map(|((ssid, band, channel), bssids)| Finding::DuplicateTransmitter {
            ssid: ssid.to_owned(),
            band,
            channel,
            bssids: bssids.into_iter().collect(),
        })
        .collect()
}

/// One SSID reporting more than one distinct non-empty capability string.
pub fn capability_inconsistencies(snapshot: &Snapshot, include_hidden: bool) -> Vec<Finding> {
    by_ssid(snapshot, include_hidden)
        .into_iter()
        .filter_map(|(ssid, members)| {
            let details: BTreeSet<&str> = members
                .iter()
                .filter_map(|o| o.details.as_deref())
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .collect();

            (details.len() > 1).then(|| Finding::CapabilityInconsistency {
                ssid: ssid.to_owned(),
                details: details.into_iter().map(str::to_owned).collect(),
                bssids: members.iter().map(|o| o.bssid).collect(),
            })
        })
        .collect()
}

/// One SSID served from more than one vendor prefix.
pub fn vendor_collisions(snapshot: &Snapshot, include_hidden: bool) -> Vec<Finding> {
    by_ssid(snapshot, include_hidden)
        .into_iter()
        .filter_map(|(ssid, members)| {
            let ouis: BTreeSet<Oui> = members.iter().map(|o| o.vendor_oui).collect();

            (ouis.len() > 1).then(|| Finding::VendorCollision {
                ssid: ssid.to_owned(),
                ouis: ouis.into_iter().collect(),
                bssids: members.iter().map(|o| o.bssid).collect(),
                locally_administered: members
                    .iter()
                    .map(|o| o.bssid)
                    .filter(Bssid::is_locally_administered)
                    .collect(),
            })
        })
        .collect()
}

/// Added/removed transceivers. The startup baseline never counts.
pub fn churn(diff: &DiffResult) -> Option<Finding> {
    diff.has_churn().then(|| Finding::Churn {
        added: diff.added.iter().copied().collect(),
        removed: diff.removed.iter().copied().collect(),
    })
}

fn by_ssid(
    snapshot: &Snapshot,
    include_hidden: bool,
) -> BTreeMap<&str, Vec<&AccessPointObservation>> {
    let mut groups: BTreeMap<&str, Vec<&AccessPointObservation>> = BTreeMap::new();
    for obs in snapshot
        .observations()
        .filter(|o| include_hidden || !o.is_hidden())
    {
        groups.entry(obs.ssid.as_str()).or_default().push(obs);
    }
    groups
}
