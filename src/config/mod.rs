// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.

//! Configuration module

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

use crate::model::Band;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Data directory, relative storage paths resolve against it
    pub data_dir: PathBuf,

    /// Log level
    pub log_level: String,

    /// Scan command configuration
    pub scanner: ScannerConfig,

    /// Poll loop configuration
    pub watch: WatchConfig,

    /// Detection configuration
    pub detection: DetectionConfig,

    /// Timeline and export configuration
    pub storage: StorageConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            log_level: "info".to_string(),
            scanner: ScannerConfig::default(),
            watch: WatchConfig::default(),
            detection: DetectionConfig::default(),
            storage: StorageConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Saved configuration to {:?}", path);
        Ok(())
    }

    /// Load or create default configuration
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            let config = Self::default();

            // Create parent directories
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }

            config.save(path)?;
            Ok(config)
        }
    }

    /// Get configuration directory
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("wlanwatch"))
            .unwrap_or_else(|| PathBuf::from("./config"))
    }

    /// Get default configuration path
    pub fn default_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Timeline log location, resolved against `data_dir`
    pub fn timeline_path(&self) -> PathBuf {
        self.data_dir.join(&self.storage.timeline_path)
    }

    /// Tabular export location, resolved against `data_dir`
    pub fn export_path(&self) -> PathBuf {
        self.data_dir.join(&self.storage.export_path)
    }
}

/// External scan command
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerConfig {
    /// Program to run
    pub command: String,

    /// Arguments
    pub args: Vec<String>,

    /// Give up on a scan after this many seconds
    pub timeout_secs: u64,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            command: "netsh".to_string(),
            args: ["wlan", "show", "networks", "mode=bssid"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            timeout_secs: 20,
        }
    }
}

impl ScannerConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Poll loop configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchConfig {
    /// Seconds between the end of one cycle and the start of the next
    pub interval_secs: u64,

    /// Snapshots kept in memory; persisted files are unaffected
    pub history_window: usize,

    /// Stop after this many cycles
    pub max_cycles: Option<u64>,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            interval_secs: 30,
            history_window: 120,
            max_cycles: None,
        }
    }
}

impl WatchConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

/// Detection configuration
///
/// Churn has no switch: any change after the first cycle is always reported.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Several BSSIDs on one (ssid, band, channel)
    pub duplicate_transmitter: bool,

    /// One SSID advertising different capability strings
    pub capability_inconsistency: bool,

    /// One SSID served from more than one vendor prefix
    pub vendor_collision: bool,

    /// Bands the duplicate-transmitter rule applies to
    pub duplicate_bands: Vec<Band>,

    /// Apply SSID-grouped rules to hidden networks too
    pub include_hidden: bool,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            duplicate_transmitter: true,
            capability_inconsistency: true,
            vendor_collision: true,
            duplicate_bands: vec![Band::SixGhz],
            include_hidden: false,
        }
    }
}

/// Timeline and tabular export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Write the plain-text timeline log
    pub timeline_enabled: bool,
    pub timeline_path: PathBuf,

    /// Write the tabular export
    pub export_enabled: bool,
    /// File for cumulative mode, directory for per-run mode
    pub export_path: PathBuf,
    pub export_format: ExportFormat,
    pub export_mode: ExportMode,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            timeline_enabled: true,
            timeline_path: PathBuf::from("wlan_timeline.log"),
            export_enabled: true,
            export_path: PathBuf::from("wlan_observations.csv"),
            export_format: ExportFormat::Csv,
            export_mode: ExportMode::Cumulative,
        }
    }
}

/// Export format
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    JsonLines,
}

/// Whether every run appends to one export or starts its own
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ExportMode {
    Cumulative,
    PerRun,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_or_create_round_trips_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let created = Config::load_or_create(&path).unwrap();
        assert!(path.exists());

        let loaded = Config::load_or_create(&path).unwrap();
        assert_eq!(loaded.watch.interval_secs, created.watch.interval_secs);
        assert_eq!(loaded.scanner.command, "netsh");
        assert_eq!(loaded.detection.duplicate_bands, vec![Band::SixGhz]);

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("\"6 GHz\""));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            [watch]
            interval_secs = 5

            [detection]
            duplicate_bands = ["5 GHz", "6 GHz"]
            "#,
        )
        .unwrap();

        assert_eq!(config.watch.interval(), Duration::from_secs(5));
        assert_eq!(config.watch.history_window, 120);
        assert_eq!(
            config.detection.duplicate_bands,
            vec![Band::FiveGhz, Band::SixGhz]
        );
        assert!(config.detection.vendor_collision);
        assert_eq!(config.storage.export_format, ExportFormat::Csv);
    }

    #[test]
    fn test_storage_paths_resolve_against_data_dir() {
        let mut config = Config::default();
        config.data_dir = PathBuf::from("/var/lib/wlanwatch");

        assert_eq!(
            config.timeline_path(),
            PathBuf::from("/var/lib/wlanwatch/wlan_timeline.log")
        );
        assert_eq!(
            config.export_path(),
            PathBuf::from("/var/lib/wlanwatch/wlan_observations.csv")
        );
    }
}
