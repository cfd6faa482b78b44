//! cyretry — failure-ledger based retry for Cypress test runs.
//!
//! Two components coupled only through a JSON ledger file on disk:
//!
//! - the [`Recorder`] runs inside the test-runner process, observing run
//!   lifecycle events and keeping the ledger in sync with the failures of
//!   the most recent run
//! - the retry selector ([`plan`] + [`run_retry`]) runs as a later
//!   invocation, deriving a title expression and spec restriction from the
//!   ledger and delegating to the external runner
//!
//! This crate re-exports the public API of the member crates. The `cyretry`
//! binary in `cyretry-cli` is the command-line retry entry point.
//!
//! # Example
//!
//! ```
//! use cyretry::{plan, MemoryLedger, Recorder, RetryPlan, SpecResults, SpecSummary};
//!
//! let recorder = Recorder::new(MemoryLedger::new());
//! recorder.on_run_start();
//! // ... host delivers spec results as the run progresses ...
//! recorder.on_spec_complete(&SpecSummary::new("a.cy.js"), Some(&SpecResults::new(vec![])));
//!
//! // A later invocation plans the retry from the same store.
//! assert!(matches!(plan(recorder.store()).unwrap(), RetryPlan::NothingToRetry));
//! ```

pub use cyretry_core::{
    FailureRecord, Result, RetryError, SpecResults, SpecStats, SpecSummary, TestResult, TestState,
};
pub use cyretry_ledger::{FsLedger, LedgerStore, MemoryLedger, Recorder, DEFAULT_LEDGER_PATH};
pub use cyretry_retry::{plan, run_retry, RetryPlan, RunnerConfig, Selection};
