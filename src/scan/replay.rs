// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.

//! Offline sources: captured scan files and in-memory text

use std::collections::VecDeque;
use std::path::PathBuf;

use async_trait::async_trait;
use tracing::debug;

use super::ScanSource;
use crate::error::ScanError;

/// Replays captured scan output files in order, then reports exhaustion
pub struct ReplaySource {
    files: VecDeque<PathBuf>,
}

impl ReplaySource {
    pub fn new(files: impl IntoIterator<Item = PathBuf>) -> Self {
        Self {
            files: files.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.files.len()
    }
}

#[async_trait]
impl ScanSource for ReplaySource {
    fn name(&self) -> &str {
        "replay"
    }

    async fn scan(&mut self) -> Result<String, ScanError> {
        let path = self.files.pop_front().ok_or(ScanError::Exhausted)?;
        debug!("Replaying capture {:?}", path);

        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|source| ScanError::Io { path, source })?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// Scripted results, one per call
pub struct StaticSource {
    results: VecDeque<Result<String, ScanError>>,
}

impl StaticSource {
    pub fn new(results: impl IntoIterator<Item = Result<String, ScanError>>) -> Self {
        Self {
            results: results.into_iter().collect(),
        }
    }

    pub fn from_texts<S: Into<String>>(texts: impl IntoIterator<Item = S>) -> Self {
        Self::new(texts.into_iter().map(|t| Ok(t.into())))
    }
}

#[async_trait]
impl ScanSource for StaticSource {
    fn name(&self) -> &str {
        "static"
    }

    async fn scan(&mut self) -> Result<String, ScanError> {
        self.results.pop_front().unwrap_or(Err(ScanError::Exhausted))
    }
}
