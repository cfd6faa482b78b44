//! Per-spec completion payloads delivered by the host test runner.
//!
//! The host fires two lifecycle events the recorder reacts to: "run is
//! starting" (no payload) and "a spec file has finished" carrying these
//! structured results. The shapes mirror the runner's own result objects so
//! a host adapter can deserialize them directly from the runner's JSON.

use serde::{Deserialize, Serialize};

/// Identity of a completed spec file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecSummary {
    /// Spec path relative to the project root.
    pub relative: String,
}

impl SpecSummary {
    /// Summary for a spec at the given project-relative path.
    pub fn new(relative: impl Into<String>) -> Self {
        Self {
            relative: relative.into(),
        }
    }
}

/// Aggregate counters for one spec execution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecStats {
    /// Number of failed test cases in the spec.
    pub failures: u64,
}

/// Outcome of a single test case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestState {
    /// The test ran and passed.
    Passed,
    /// The test ran and failed an assertion.
    Failed,
    /// The test was declared but not executed.
    Pending,
    /// The test was skipped by the runner.
    Skipped,
}

/// One executed test case within a spec's results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestResult {
    /// Suite path plus test name, outermost suite first.
    pub title: Vec<String>,

    /// Final state reported by the runner.
    pub state: TestState,

    /// Rendered error for tests that errored rather than failed an
    /// assertion. Present means the case counts as a failure regardless
    /// of `state`.
    #[serde(rename = "displayError", default)]
    pub display_error: Option<String>,
}

impl TestResult {
    /// Whether this case should be recorded as a failure.
    ///
    /// Errored cases (runner-level exceptions, before/each hook crashes)
    /// carry a `display_error` without necessarily reporting
    /// `TestState::Failed`; both gates count.
    pub fn is_failure(&self) -> bool {
        self.display_error.is_some() || self.state == TestState::Failed
    }
}

/// Full structured results for one completed spec file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecResults {
    /// Aggregate counters.
    pub stats: SpecStats,

    /// Per-test outcomes, in execution order.
    pub tests: Vec<TestResult>,
}

impl SpecResults {
    /// Results with the failure counter derived from the test list.
    pub fn new(tests: Vec<TestResult>) -> Self {
        let failures = tests.iter().filter(|t| t.is_failure()).count() as u64;
        Self {
            stats: SpecStats { failures },
            tests,
        }
    }
}
