//! The ledger persistence seam.
//!
//! [`LedgerStore`] abstracts where the failure ledger lives so the recorder
//! and the retry selector can be unit-tested against [`MemoryLedger`] while
//! [`FsLedger`] backs production use.
//!
//! ## Read modes
//!
//! The two read operations encode the deliberate asymmetry between the two
//! ends of the protocol:
//!
//! | Operation | Absent | Corrupt |
//! |-----------|--------|---------|
//! | `load` (record path) | empty | empty, logged |
//! | `load_for_retry` | `None` | `LedgerCorrupt` error |
//!
//! Recording favors "retry still works" over preserving unreadable history;
//! retrying favors surfacing corruption over silently selecting nothing and
//! appearing falsely successful.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use cyretry_core::{FailureRecord, Result, RetryError};
use parking_lot::Mutex;
use tracing::warn;

/// Conventional ledger location, relative to the project root.
pub const DEFAULT_LEDGER_PATH: &str = ".cypress-failures.json";

/// Persistence operations for the failure ledger.
///
/// ## Contract
///
/// - `load` never fails on missing or unparsable content; it degrades to an
///   empty ledger so a recording run can always proceed
/// - `load_for_retry` distinguishes "absent" (`None`, nothing to retry)
///   from "corrupt" (error) from "present" (`Some`, possibly empty)
/// - `clear` succeeds when the ledger is already absent
/// - `append_batch` is read-merge-write: it rewrites the full ledger with
///   the batch concatenated after existing records, never holding the
///   backing file open between calls
pub trait LedgerStore {
    /// Read the ledger for the record path; absent or corrupt means empty.
    fn load(&self) -> Result<Vec<FailureRecord>>;

    /// Read the ledger for the retry path.
    ///
    /// Returns `None` when no ledger exists, the parsed records when it
    /// does, and `RetryError::LedgerCorrupt` when it exists but cannot be
    /// parsed.
    fn load_for_retry(&self) -> Result<Option<Vec<FailureRecord>>>;

    /// Remove the ledger. Absent is success.
    fn clear(&self) -> Result<()>;

    /// Append a batch of records, preserving all existing records and
    /// their order.
    fn append_batch(&self, batch: &[FailureRecord]) -> Result<()>;
}

fn decode(text: &str) -> serde_json::Result<Vec<FailureRecord>> {
    serde_json::from_str(text)
}

fn encode(records: &[FailureRecord]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

// =============================================================================
// Filesystem implementation
// =============================================================================

/// Filesystem-backed ledger at a fixed path.
///
/// All operations are synchronous whole-file reads and writes; nothing is
/// kept open between calls, so a crash mid-run loses at most the in-flight
/// batch.
#[derive(Debug, Clone)]
pub struct FsLedger {
    path: PathBuf,
}

impl FsLedger {
    /// Ledger at an explicit path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Ledger at the conventional path under the current directory.
    pub fn at_default_path() -> Self {
        Self::new(DEFAULT_LEDGER_PATH)
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_text(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(Some(text)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(RetryError::Io {
                path: self.path.clone(),
                source: err,
            }),
        }
    }
}

impl LedgerStore for FsLedger {
    fn load(&self) -> Result<Vec<FailureRecord>> {
        match self.read_text()? {
            None => Ok(Vec::new()),
            Some(text) => match decode(&text) {
                Ok(records) => Ok(records),
                Err(err) => {
                    warn!(path = %self.path.display(), error = %err,
                        "failure ledger is unreadable, treating as empty");
                    Ok(Vec::new())
                }
            },
        }
    }

    fn load_for_retry(&self) -> Result<Option<Vec<FailureRecord>>> {
        match self.read_text()? {
            None => Ok(None),
            Some(text) => decode(&text).map(Some).map_err(|err| {
                RetryError::LedgerCorrupt {
                    path: self.path.clone(),
                    source: err,
                }
            }),
        }
    }

    fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(RetryError::Io {
                path: self.path.clone(),
                source: err,
            }),
        }
    }

    fn append_batch(&self, batch: &[FailureRecord]) -> Result<()> {
        let mut records = self.load()?;
        records.extend_from_slice(batch);
        let text = encode(&records)?;
        fs::write(&self.path, text).map_err(|err| RetryError::Io {
            path: self.path.clone(),
            source: err,
        })
    }
}

// =============================================================================
// In-memory implementation
// =============================================================================

/// In-memory ledger for tests.
///
/// Holds the raw serialized text rather than parsed records so corruption
/// can be simulated by seeding invalid JSON.
#[derive(Debug, Default)]
pub struct MemoryLedger {
    contents: Mutex<Option<String>>,
}

impl MemoryLedger {
    /// An absent ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// A ledger whose backing text is exactly `text`, valid or not.
    pub fn with_raw(text: impl Into<String>) -> Self {
        Self {
            contents: Mutex::new(Some(text.into())),
        }
    }

    /// The current raw backing text, if the ledger exists.
    pub fn raw(&self) -> Option<String> {
        self.contents.lock().clone()
    }

    fn pseudo_path() -> PathBuf {
        PathBuf::from("<memory>")
    }
}

impl LedgerStore for MemoryLedger {
    fn load(&self) -> Result<Vec<FailureRecord>> {
        match self.contents.lock().as_deref() {
            None => Ok(Vec::new()),
            Some(text) => match decode(text) {
                Ok(records) => Ok(records),
                Err(err) => {
                    warn!(error = %err, "in-memory ledger is unreadable, treating as empty");
                    Ok(Vec::new())
                }
            },
        }
    }

    fn load_for_retry(&self) -> Result<Option<Vec<FailureRecord>>> {
        match self.contents.lock().as_deref() {
            None => Ok(None),
            Some(text) => decode(text).map(Some).map_err(|err| {
                RetryError::LedgerCorrupt {
                    path: Self::pseudo_path(),
                    source: err,
                }
            }),
        }
    }

    fn clear(&self) -> Result<()> {
        *self.contents.lock() = None;
        Ok(())
    }

    fn append_batch(&self, batch: &[FailureRecord]) -> Result<()> {
        let mut records = self.load()?;
        records.extend_from_slice(batch);
        let text = encode(&records)?;
        *self.contents.lock() = Some(text);
        Ok(())
    }
}
