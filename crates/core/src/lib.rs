//! Core types for the cyretry failure-ledger system.
//!
//! This crate defines the shared vocabulary of the workspace:
//! - [`FailureRecord`]: one persisted ledger entry per failed test case
//! - Spec-result payload types ([`SpecSummary`], [`SpecResults`],
//!   [`TestResult`], [`TestState`]) mirroring the host runner's
//!   per-spec completion event
//! - [`RetryError`] and the crate-wide [`Result`] alias

pub mod error;
pub mod record;
pub mod results;

pub use error::{Result, RetryError};
pub use record::FailureRecord;
pub use results::{SpecResults, SpecStats, SpecSummary, TestResult, TestState};
