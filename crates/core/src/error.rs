//! Error types shared across the workspace.
//!
//! The taxonomy distinguishes the two ledger read modes: the recording path
//! treats a corrupt file as empty (and only logs), so it never produces
//! `LedgerCorrupt`; the retry path surfaces it as a fatal error so a broken
//! ledger cannot masquerade as a successful no-op retry.

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, RetryError>;

/// Errors produced by ledger access and runner invocation.
#[derive(Debug, Error)]
pub enum RetryError {
    /// Filesystem access to the ledger failed.
    #[error("ledger I/O failed at {}: {source}", path.display())]
    Io {
        /// Path of the ledger file involved.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The ledger exists but is not a valid sequence of failure records.
    ///
    /// Only the retry path raises this; the recording path recovers by
    /// treating the file as empty.
    #[error("failure ledger at {} is corrupt: {source}", path.display())]
    LedgerCorrupt {
        /// Path of the unreadable ledger.
        path: PathBuf,
        /// Parse error from the JSON decoder.
        #[source]
        source: serde_json::Error,
    },

    /// Encoding a batch of failure records to JSON failed.
    #[error("failed to encode failure ledger: {0}")]
    Encode(#[from] serde_json::Error),

    /// Launching the external test runner failed.
    ///
    /// Distinct from "tests failed again": the child process never started.
    #[error("failed to launch test runner `{program}`: {source}")]
    Spawn {
        /// The program that could not be spawned.
        program: String,
        /// Underlying spawn error.
        #[source]
        source: std::io::Error,
    },
}

impl RetryError {
    /// True if this error means the ledger contents could not be parsed.
    pub fn is_corrupt_ledger(&self) -> bool {
        matches!(self, RetryError::LedgerCorrupt { .. })
    }
}
