//! The ledger writer: observes run-lifecycle events inside the test-runner
//! process and keeps the ledger in sync with currently-known failures.
//!
//! The host dispatcher invokes the two methods synchronously: run-start
//! fires once before any spec executes, then spec-complete fires once per
//! finished spec file, strictly one at a time in completion order. There is
//! no in-run concurrency hazard; each read-merge-write cycle completes
//! before the next event can arrive.
//!
//! ## Degraded modes
//!
//! Recording never aborts the host run. A ledger that cannot be cleared at
//! run start, or a batch that cannot be written, is logged and dropped;
//! retry accuracy degrades but the run itself continues.

use cyretry_core::{FailureRecord, SpecResults, SpecSummary};
use tracing::{debug, warn};

use crate::store::LedgerStore;

/// Records failed tests into a ledger over the course of one run.
pub struct Recorder<S> {
    store: S,
}

impl<S: LedgerStore> Recorder<S> {
    /// Recorder writing through the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Run is starting: clear any ledger left by a previous run.
    ///
    /// Runs exactly once per recording run, before any spec completes, so
    /// the ledger only ever reflects the most recent run's failures. A
    /// failed clear is logged and swallowed; the run proceeds with the
    /// stale file as an accepted degraded mode.
    pub fn on_run_start(&self) {
        if let Err(err) = self.store.clear() {
            warn!(error = %err, "could not clear failure ledger at run start");
        }
    }

    /// A spec file finished: merge its failures into the ledger.
    ///
    /// A spec with no failures never touches the ledger. Failed cases —
    /// including cases that errored rather than failed an assertion — are
    /// appended as one batch in the order the runner reported them.
    pub fn on_spec_complete(&self, spec: &SpecSummary, results: Option<&SpecResults>) {
        let Some(results) = results else {
            return;
        };
        if results.stats.failures == 0 {
            return;
        }

        let batch: Vec<FailureRecord> = results
            .tests
            .iter()
            .filter(|test| test.is_failure())
            .map(|test| FailureRecord::new(&test.title, spec.relative.clone()))
            .collect();

        if batch.is_empty() {
            return;
        }

        debug!(spec = %spec.relative, failures = batch.len(), "recording spec failures");
        if let Err(err) = self.store.append_batch(&batch) {
            warn!(spec = %spec.relative, error = %err,
                "could not record failures, retry accuracy degraded");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryLedger;
    use cyretry_core::{TestResult, TestState};

    fn passing(title: &[&str]) -> TestResult {
        TestResult {
            title: title.iter().map(|s| s.to_string()).collect(),
            state: TestState::Passed,
            display_error: None,
        }
    }

    fn failing(title: &[&str]) -> TestResult {
        TestResult {
            title: title.iter().map(|s| s.to_string()).collect(),
            state: TestState::Failed,
            display_error: None,
        }
    }

    fn recorder() -> Recorder<MemoryLedger> {
        Recorder::new(MemoryLedger::new())
    }

    #[test]
    fn test_run_start_clears_any_prior_content() {
        let rec = Recorder::new(MemoryLedger::with_raw("leftover garbage"));
        rec.on_run_start();
        assert!(rec.store().raw().is_none());
        assert!(rec.store().load().unwrap().is_empty());
    }

    #[test]
    fn test_missing_results_is_noop() {
        let rec = recorder();
        rec.on_spec_complete(&SpecSummary::new("a.cy.js"), None);
        assert!(rec.store().raw().is_none());
    }

    #[test]
    fn test_zero_failure_spec_is_invisible() {
        let rec = recorder();
        let results = SpecResults::new(vec![passing(&["Suite", "ok"])]);
        rec.on_spec_complete(&SpecSummary::new("a.cy.js"), Some(&results));
        assert!(rec.store().raw().is_none());
    }

    #[test]
    fn test_failures_are_recorded_with_spec_path() {
        let rec = recorder();
        let results = SpecResults::new(vec![
            passing(&["Suite", "ok"]),
            failing(&["Suite", "bad"]),
        ]);
        rec.on_spec_complete(&SpecSummary::new("cypress/e2e/a.cy.js"), Some(&results));

        let records = rec.store().load().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "Suite bad");
        assert_eq!(records[0].full_title, vec!["Suite", "bad"]);
        assert_eq!(records[0].spec, "cypress/e2e/a.cy.js");
    }

    #[test]
    fn test_batches_merge_in_completion_order() {
        let rec = recorder();
        rec.on_run_start();

        rec.on_spec_complete(
            &SpecSummary::new("a.cy.js"),
            Some(&SpecResults::new(vec![
                failing(&["A", "one"]),
                failing(&["A", "two"]),
            ])),
        );
        rec.on_spec_complete(
            &SpecSummary::new("b.cy.js"),
            Some(&SpecResults::new(vec![failing(&["B", "three"])])),
        );

        let titles: Vec<String> = rec
            .store()
            .load()
            .unwrap()
            .into_iter()
            .map(|r| r.title)
            .collect();
        assert_eq!(titles, vec!["A one", "A two", "B three"]);
    }

    #[test]
    fn test_errored_case_is_recorded() {
        let rec = recorder();
        let errored = TestResult {
            title: vec!["Suite".into(), "hook blows up".into()],
            state: TestState::Pending,
            display_error: Some("Error: before hook failed".into()),
        };
        rec.on_spec_complete(
            &SpecSummary::new("a.cy.js"),
            Some(&SpecResults::new(vec![errored])),
        );

        let records = rec.store().load().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "Suite hook blows up");
    }

    #[test]
    fn test_corrupt_ledger_is_replaced_by_new_batch() {
        let rec = Recorder::new(MemoryLedger::with_raw("{ definitely not json"));
        rec.on_spec_complete(
            &SpecSummary::new("a.cy.js"),
            Some(&SpecResults::new(vec![failing(&["Suite", "bad"])])),
        );

        let records = rec.store().load().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "Suite bad");
    }

    #[test]
    fn test_run_start_then_no_failures_reads_empty() {
        let rec = Recorder::new(MemoryLedger::with_raw("[{\"bogus\": true}]"));
        rec.on_run_start();
        rec.on_spec_complete(
            &SpecSummary::new("a.cy.js"),
            Some(&SpecResults::new(vec![passing(&["Suite", "ok"])])),
        );
        assert!(rec.store().load().unwrap().is_empty());
    }
}
