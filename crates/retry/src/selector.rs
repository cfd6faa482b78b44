//! Retry planning: classify the ledger into an actionable outcome.
//!
//! Planning is read-only. The ledger is left on disk for inspection and is
//! only cleared by the next recording run's start, so planning twice with
//! no intervening run yields the same plan.

use cyretry_core::Result;
use cyretry_ledger::LedgerStore;

use crate::filter::Selection;

/// Outcome of reading the ledger before a retry run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryPlan {
    /// No ledger exists: no prior run, or a fully clean one. Terminal
    /// success; the runner is not invoked.
    NothingToRetry,

    /// A ledger exists but records no failures. Terminal success; the
    /// runner is not invoked.
    NoFailuresRecorded,

    /// Failures were recorded; retry with this selection.
    Retry(Selection),
}

/// Read the ledger and derive the retry plan.
///
/// A corrupt ledger is a fatal error here, never an empty plan: silently
/// selecting nothing would make the retry appear falsely successful.
pub fn plan(store: &impl LedgerStore) -> Result<RetryPlan> {
    match store.load_for_retry()? {
        None => Ok(RetryPlan::NothingToRetry),
        Some(records) if records.is_empty() => Ok(RetryPlan::NoFailuresRecorded),
        Some(records) => Ok(RetryPlan::Retry(Selection::derive(&records))),
    }
}
