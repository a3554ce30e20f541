// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.

//! Access point observations and per-cycle snapshots

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Band, Bssid, Oui};

/// One transceiver seen in one snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessPointObservation {
    pub timestamp: DateTime<Utc>,
    /// Network name, empty for hidden networks
    pub ssid: String,
    pub bssid: Bssid,
    pub vendor_oui: Oui,
    pub band: Band,
    pub channel: Option<u32>,
    /// Vendor-reported signal quality, 0-100
    pub signal_percent: Option<u8>,
    /// Capability / security annotation as reported
    pub details: Option<String>,
    pub radio_type: Option<String>,
    pub basic_rates: Option<String>,
    pub other_rates: Option<String>,
}

impl AccessPointObservation {
    pub fn new(timestamp: DateTime<Utc>, ssid: impl Into<String>, bssid: Bssid) -> Self {
        Self {
            timestamp,
            ssid: ssid.into(),
            bssid,
            vendor_oui: bssid.oui(),
            band: Band::Unknown,
            channel: None,
            signal_percent: None,
            details: None,
            radio_type: None,
            basic_rates: None,
            other_rates: None,
        }
    }

    pub fn is_hidden(&self) -> bool {
        self.ssid.is_empty()
    }

    /// Approximate RSSI using the WLAN API linear mapping `pct / 2 - 100`.
    pub fn rssi_dbm(&self) -> Option<f64> {
        self.signal_percent.map(|pct| f64::from(pct) / 2.0 - 100.0)
    }

    /// Ordering key for stable persisted output.
    pub(crate) fn sort_key(&self) -> (&str, Band, Option<u32>, Bssid) {
        (self.ssid.as_str(), self.band, self.channel, self.bssid)
    }
}

/// Every observation from one sampling instant, keyed by BSSID.
///
/// Built once by the parser and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    timestamp: DateTime<Utc>,
    observations: BTreeMap<Bssid, AccessPointObservation>,
}

impl Snapshot {
    pub fn new(
        timestamp: DateTime<Utc>,
        observations: BTreeMap<Bssid, AccessPointObservation>,
    ) -> Self {
        Self {
            timestamp,
            observations,
        }
    }

    pub fn empty(timestamp: DateTime<Utc>) -> Self {
        Self::new(timestamp, BTreeMap::new())
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn get(&self, bssid: &Bssid) -> Option<&AccessPointObservation> {
        self.observations.get(bssid)
    }

    pub fn contains(&self, bssid: &Bssid) -> bool {
        self.observations.contains_key(bssid)
    }

    pub fn bssids(&self) -> impl Iterator<Item = &Bssid> {
        self.observations.keys()
    }

    /// Observations in BSSID order.
    pub fn observations(&self) -> impl Iterator<Item = &AccessPointObservation> {
        self.observations.values()
    }

    /// Observations ordered by `(ssid, band, channel, bssid)`.
    pub fn sorted(&self) -> Vec<&AccessPointObservation> {
        let mut rows: Vec<_> = self.observations.values().collect();
        rows.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    fn obs(ssid: &str, mac: &str, band: Band, channel: u32) -> AccessPointObservation {
        let mut o = AccessPointObservation::new(ts(), ssid, Bssid::parse(mac).unwrap());
        o.band = band;
        o.channel = Some(channel);
        o
    }

    #[test]
    fn test_new_derives_oui() {
        let o = AccessPointObservation::new(ts(), "Lab", Bssid::parse("11:22:33:44:55:66").unwrap());
        assert_eq!(o.vendor_oui.to_string(), "11:22:33");
        assert!(!o.is_hidden());
    }

    #[test]
    fn test_rssi_mapping() {
        let mut o = obs("Lab", "11:22:33:44:55:66", Band::FiveGhz, 36);
        assert_eq!(o.rssi_dbm(), None);

        o.signal_percent = Some(84);
        assert_eq!(o.rssi_dbm(), Some(-58.0));
    }

    #[test]
    fn test_sorted_order() {
        let rows = [
            obs("b-net", "00:00:00:00:00:01", Band::FiveGhz, 36),
            obs("a-net", "00:00:00:00:00:09", Band::FiveGhz, 44),
            obs("a-net", "00:00:00:00:00:05", Band::TwoPointFourGhz, 6),
            obs("a-net", "00:00:00:00:00:03", Band::FiveGhz, 44),
        ];
        let map = rows.into_iter().map(|o| (o.bssid, o)).collect();
        let snapshot = Snapshot::new(ts(), map);

        let order: Vec<String> = snapshot.sorted().iter().map(|o| o.bssid.to_string()).collect();
        assert_eq!(
            order,
            vec![
                "00:00:00:00:00:05",
                "00:00:00:00:00:03",
                "00:00:00:00:00:09",
                "00:00:00:00:00:01",
            ]
        );
    }
}
