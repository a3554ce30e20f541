// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.

//! Detection module - rogue and spoofed access point heuristics

pub mod rules;

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analysis::DiffResult;
use crate::config::DetectionConfig;
use crate::model::{Band, Bssid, Oui, Snapshot};

/// Severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    Info,
    Low,
    Medium,
    High,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::Info => "INFO",
            Severity::Low => "LOW",
            Severity::Medium => "MEDIUM",
            Severity::High => "HIGH",
        };
        f.write_str(label)
    }
}

/// One fired rule and the evidence behind it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum Finding {
    /// Several transmitters share one identity on a single channel
    DuplicateTransmitter {
        ssid: String,
        band: Band,
        channel: Option<u32>,
        bssids: Vec<Bssid>,
    },
    /// One SSID advertising conflicting security/capability flags
    CapabilityInconsistency {
        ssid: String,
        details: Vec<String>,
        bssids: Vec<Bssid>,
    },
    /// One SSID served from several vendor prefixes
    VendorCollision {
        ssid: String,
        ouis: Vec<Oui>,
        bssids: Vec<Bssid>,
        /// Members with the locally administered bit set (software APs,
        /// randomised addresses); their OUI names no real vendor
        locally_administered: Vec<Bssid>,
    },
    /// Transceivers appeared or vanished since the last cycle
    Churn {
        added: Vec<Bssid>,
        removed: Vec<Bssid>,
    },
}

impl Finding {
    pub fn rule(&self) -> &'static str {
        match self {
            Finding::DuplicateTransmitter { .. } => "duplicate_transmitter",
            Finding::CapabilityInconsistency { .. } => "capability_inconsistency",
            Finding::VendorCollision { .. } => "vendor_collision",
            Finding::Churn { .. } => "churn",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Finding::DuplicateTransmitter { .. } => Severity::High,
            Finding::CapabilityInconsistency { .. } => Severity::Medium,
            Finding::VendorCollision { .. } => Severity::Medium,
            Finding::Churn { .. } => Severity::Info,
        }
    }

    /// Churn is informational; everything else is a suspicion.
    pub fn is_anomaly(&self) -> bool {
        !matches!(self, Finding::Churn { .. })
    }

    pub fn ssid(&self) -> Option<&str> {
        match self {
            Finding::DuplicateTransmitter { ssid, .. }
            | Finding::CapabilityInconsistency { ssid, .. }
            | Finding::VendorCollision { ssid, .. } => Some(ssid),
            Finding::Churn { .. } => None,
        }
    }
}

fn join<T: fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Finding::DuplicateTransmitter { ssid, band, channel, bssids } => {
                let channel = channel.map_or_else(|| "?".to_string(), |c| c.to_string());
                write!(
                    f,
                    "{} BSSIDs advertise \"{}\" on {} channel {}: {}",
                    bssids.len(),
                    ssid,
                    band,
                    channel,
                    join(bssids)
                )
            }
            Finding::CapabilityInconsistency { ssid, details, bssids } => write!(
                f,
                "\"{}\" reports {} capability sets [{}] across {}",
                ssid,
                details.len(),
                details.join(" | "),
                join(bssids)
            ),
            Finding::VendorCollision {
                ssid,
                ouis,
                bssids,
                locally_administered,
            } => {
                write!(
                    f,
                    "\"{}\" served by {} vendor prefixes [{}] across {}",
                    ssid,
                    ouis.len(),
                    join(ouis),
                    join(bssids)
                )?;
                if !locally_administered.is_empty() {
                    write!(f, "; locally administered: {}", join(locally_administered))?;
                }
                Ok(())
            }
            Finding::Churn { added, removed } => write!(
                f,
                "{} added [{}], {} removed [{}]",
                added.len(),
                join(added),
                removed.len(),
                join(removed)
            ),
        }
    }
}

/// Runs the configured rule set over a snapshot
pub struct DetectionEngine {
    config: DetectionConfig,
}

impl DetectionEngine {
    pub fn new(config: DetectionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DetectionConfig {
        &self.config
    }

    /// Evaluate every enabled rule. Rules are independent; all that apply fire.
    pub fn evaluate(&self, snapshot: &Snapshot, diff: &DiffResult) -> Vec<Finding> {
        let cfg = &self.config;
        let mut findings = Vec::new();

        if cfg.duplicate_transmitter {
            findings.extend(rules::duplicate_transmitters(
                snapshot,
                &cfg.duplicate_bands,
                cfg.include_hidden,
            ));
        }
        if cfg.capability_inconsistency {
            findings.extend(rules::capability_inconsistencies(snapshot, cfg.include_hidden));
        }
        if cfg.vendor_collision {
            findings.extend(rules::vendor_collisions(snapshot, cfg.include_hidden));
        }
        findings.extend(rules::churn(diff));

        debug!(
            "Evaluated {} observations, {} findings",
            snapshot.len(),
            findings.len()
        );
        findings
    }
}

impl Default for DetectionEngine {
    fn default() -> Self {
        Self::new(DetectionConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::diff;
    use crate::model::AccessPointObservation;
    use chrono::{TimeZone, Utc};

    fn cafe_snapshot() -> Snapshot {
        let ts = Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap();
        let rows = [
            ("aa:bb:cc:00:00:01", "WPA3-Personal/GCMP"),
            ("11:22:33:00:00:01", "Open/None"),
        ]
        .into_iter()
        .map(|(mac, details)| {
            let mut o = AccessPointObservation::new(ts, "Cafe-WiFi", Bssid::parse(mac).unwrap());
            o.band = Band::SixGhz;
            o.channel = Some(37);
            o.details = Some(details.to_string());
            (o.bssid, o)
        })
        .collect();
        Snapshot::new(ts, rows)
    }

    #[test]
    fn test_all_applicable_rules_fire() {
        let engine = DetectionEngine::default();
        let snap = cafe_snapshot();
        let findings = engine.evaluate(&snap, &diff(None, &snap));

        let rules: Vec<&str> = findings.iter().map(Finding::rule).collect();
        assert_eq!(
            rules,
            vec!["duplicate_transmitter", "capability_inconsistency", "vendor_collision"]
        );
        assert!(findings.iter().all(Finding::is_anomaly));
    }

    #[test]
    fn test_disabled_rules_stay_silent() {
        let engine = DetectionEngine::new(DetectionConfig {
            duplicate_transmitter: false,
            capability_inconsistency: false,
            vendor_collision: true,
            ..DetectionConfig::default()
        });
        let snap = cafe_snapshot();
        let findings = engine.evaluate(&snap, &diff(None, &snap));

        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].rule(), "vendor_collision");
        assert_eq!(findings[0].severity(), Severity::Medium);
    }

    #[test]
    fn test_churn_reported_with_every_rule_off() {
        let engine = DetectionEngine::new(DetectionConfig {
            duplicate_transmitter: false,
            capability_inconsistency: false,
            vendor_collision: false,
            ..DetectionConfig::default()
        });
        let snap = cafe_snapshot();
        let empty = Snapshot::empty(snap.timestamp());

        let findings = engine.evaluate(&empty, &diff(Some(&snap), &empty));
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].rule(), "churn");

        let baseline = engine.evaluate(&snap, &diff(None, &snap));
        assert!(baseline.is_empty());
    }

    #[test]
    fn test_display_mentions_evidence() {
        let snap = cafe_snapshot();
        let findings = DetectionEngine::default().evaluate(&snap, &diff(None, &snap));
        let vendor = findings.iter().find(|f| f.rule() == "vendor_collision").unwrap();

        let text = vendor.to_string();
        assert!(text.contains("aa:bb:cc"));
        assert!(text.contains("11:22:33"));
        assert!(text.ends_with("locally administered: aa:bb:cc:00:00:01"));
        assert_eq!(vendor.ssid(), Some("Cafe-WiFi"));
    }

    #[test]
    fn test_serialises_with_rule_tag() {
        let finding = Finding::Churn {
            added: vec![Bssid::parse("00:11:22:33:44:55").unwrap()],
            removed: vec![],
        };
        let json = serde_json::to_value(&finding).unwrap();
        assert_eq!(json["rule"], "churn");
        assert_eq!(json["added"][0], "00:11:22:33:44:55");
    }
}
