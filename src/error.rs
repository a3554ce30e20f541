// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.

//! Error types

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Failure to turn text into a hardware address
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    /// Wrong number of octets
    #[error("expected {expected} octets in '{input}', found {found}")]
    OctetCount {
        /// Raw input
        input: String,
        /// Required octet count
        expected: usize,
        /// Octets present
        found: usize,
    },

    /// An octet was not two hex digits
    #[error("invalid octet '{octet}' in '{input}'")]
    InvalidOctet {
        /// Raw input
        input: String,
        /// Offending octet
        octet: String,
    },
}

/// Text that names no known band
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognised band '{0}'")]
pub struct BandError(pub String);

/// Errors raised while obtaining raw scan text
#[derive(Debug, Error)]
pub enum ScanError {
    /// The scan command could not be started
    #[error("failed to run '{command}': {source}")]
    Spawn {
        /// Program name
        command: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The scan command ran but reported failure
    #[error("scan command exited with {status}: {stderr}")]
    Failed {
        /// Exit status text
        status: String,
        /// Trimmed stderr
        stderr: String,
    },

    /// The scan command did not finish in time
    #[error("scan timed out after {0:?}")]
    Timeout(Duration),

    /// A replay source has no more captures
    #[error("scan source exhausted")]
    Exhausted,

    /// A captured scan file could not be read
    #[error("failed to read capture {path:?}: {source}")]
    Io {
        /// Capture path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised while persisting the timeline or tabular export
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem failure
    #[error("I/O error on {path:?}: {source}")]
    Io {
        /// File being written
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// CSV encoding failure
    #[error("CSV encoding failed: {0}")]
    Csv(#[from] csv::Error),

    /// JSON encoding failure
    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}

impl StorageError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
