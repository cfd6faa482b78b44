//! Ledger persistence and the run-lifecycle recorder.
//!
//! The ledger is the single shared channel between a recording run and a
//! later retry run: a JSON array of failure records at a well-known path.
//! This crate provides:
//!
//! - [`LedgerStore`]: the injectable persistence seam, so both the record
//!   and retry paths can be exercised against an in-memory backend
//! - [`FsLedger`]: the production filesystem implementation
//! - [`MemoryLedger`]: the in-memory implementation used by tests
//! - [`Recorder`]: the writer that observes run-lifecycle events and keeps
//!   the ledger in sync with currently-known failures

pub mod recorder;
pub mod store;

pub use recorder::Recorder;
pub use store::{FsLedger, LedgerStore, MemoryLedger, DEFAULT_LEDGER_PATH};
