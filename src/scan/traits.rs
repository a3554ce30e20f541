// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.

//! Scan source trait

use async_trait::async_trait;

use crate::error::ScanError;

/// Anything that produces one raw scan text per call
#[async_trait]
pub trait ScanSource: Send {
    /// Short name for logs
    fn name(&self) -> &str;

    /// Obtain the next raw scan.
    ///
    /// [`ScanError::Exhausted`] means the source will never produce more
    /// text; every other error is a one-off failure for this cycle.
    async fn scan(&mut self) -> Result<String, ScanError>;
}
