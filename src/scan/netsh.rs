// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.

//! Live scans through the native WLAN command line tool

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use super::ScanSource;
use crate::config::ScannerConfig;
use crate::error::ScanError;

/// Runs `netsh wlan show networks mode=bssid` (or the configured command)
pub struct NetshScanner {
    config: ScannerConfig,
}

impl NetshScanner {
    pub fn new(config: ScannerConfig) -> Self {
        Self { config }
    }
}

impl Default for NetshScanner {
    fn default() -> Self {
        Self::new(ScannerConfig::default())
    }
}

#[async_trait]
impl ScanSource for NetshScanner {
    fn name(&self) -> &str {
        &self.config.command
    }

    async fn scan(&mut self) -> Result<String, ScanError> {
        let timeout = self.config.timeout();
        let mut command = Command::new(&self.config.command);
        command.args(&self.config.args).kill_on_drop(true);

        let output = tokio::time::timeout(timeout, command.output())
            .await
            .map_err(|_| ScanError::Timeout(timeout))?
            .map_err(|source| ScanError::Spawn {
                command: self.config.command.clone(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ScanError::Failed {
                status: output.status.to_string(),
                stderr: stderr.trim().to_string(),
            });
        }

        let text = String::from_utf8_lossy(&output.stdout).into_owned();
        debug!("{} returned {} bytes", self.config.command, text.len());
        Ok(text)
    }
}
