//! The retry selector: turns a failure ledger into runner-selection
//! parameters and invokes the external test runner with them.
//!
//! The pipeline is three independently testable stages:
//!
//! 1. [`plan`] reads the ledger through a [`LedgerStore`] and classifies the
//!    outcome: nothing to retry, no failures recorded, or a [`Selection`]
//! 2. [`Selection`] is the derived filter — an OR-joined title expression
//!    and a deduplicated spec-file list
//! 3. [`run_retry`] spawns the runner described by a [`RunnerConfig`] with
//!    the selection applied, and reports the child's exit code
//!
//! The selector never mutates the ledger; running it twice with no
//! intervening recording run re-issues the same selection.
//!
//! [`LedgerStore`]: cyretry_ledger::LedgerStore

pub mod filter;
pub mod runner;
pub mod selector;

pub use filter::Selection;
pub use runner::{run_retry, RunnerConfig};
pub use selector::{plan, RetryPlan};
