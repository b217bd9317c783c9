//! Collecting test outcomes.
//!
//! [`CollectingResult`] is a [`TestResult`] that keeps a record of every
//! test case and counts step outcomes.

#[cfg(test)]
mod tests;

use crate::execution::ExecutionError;
use crate::registry::StepError;
use crate::result::{StepInfo, TestInfo, TestResult};

/// Outcome of one test case.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TestStatus {
    /// Every step passed.
    Passed,
    /// A step failed, with the rendered error.
    Failed(String),
    /// A step errored, with the rendered error.
    Errored(String),
    /// The test was skipped, with the reason.
    Skipped(String),
}

impl TestStatus {
    /// Lowercase label of the status.
    ///
    /// ```
    /// use wishes::reporting::TestStatus;
    ///
    /// assert_eq!(TestStatus::Skipped("no steps defined".into()).label(), "skipped");
    /// ```
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Passed => "passed",
            Self::Failed(_) => "failed",
            Self::Errored(_) => "errored",
            Self::Skipped(_) => "skipped",
        }
    }

    /// Attached message, `None` for [`Passed`](Self::Passed).
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Passed => None,
            Self::Failed(message) | Self::Errored(message) | Self::Skipped(message) => {
                Some(message)
            }
        }
    }
}

/// A recorded test case.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TestRecord {
    id: String,
    tags: Vec<String>,
    status: TestStatus,
}

impl TestRecord {
    /// Build a record for `test`.
    #[must_use]
    pub fn new(test: &TestInfo, status: TestStatus) -> Self {
        Self {
            id: test.id(),
            tags: test.tags.iter().cloned().collect(),
            status,
        }
    }

    /// `"<feature>.<name>"`.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Effective tags, sorted.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Recorded status.
    #[must_use]
    pub fn status(&self) -> &TestStatus {
        &self.status
    }
}

/// Step outcome counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepCounts {
    /// Steps that passed.
    pub passed: usize,
    /// Steps that failed.
    pub failed: usize,
    /// Steps that errored.
    pub errored: usize,
    /// Steps without a definition.
    pub undefined: usize,
}

/// Hook invocation seen by a [`CollectingResult`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HookCall {
    /// Hook name, e.g. `start_step`.
    pub hook: &'static str,
    /// Test id or `"<Kind> <text>"`.
    pub subject: String,
}

/// In-memory [`TestResult`].
#[derive(Debug, Default)]
pub struct CollectingResult {
    records: Vec<TestRecord>,
    steps: StepCounts,
    calls: Vec<HookCall>,
}

impl CollectingResult {
    /// Create an empty collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records in completion order.
    #[must_use]
    pub fn records(&self) -> &[TestRecord] {
        &self.records
    }

    /// Step counters.
    #[must_use]
    pub fn step_counts(&self) -> StepCounts {
        self.steps
    }

    /// Every hook call in order.
    #[must_use]
    pub fn calls(&self) -> &[HookCall] {
        &self.calls
    }

    /// Number of recorded test cases.
    #[must_use]
    pub fn tests_run(&self) -> usize {
        self.records.len()
    }

    /// Number of records whose status has `label`.
    #[must_use]
    pub fn count(&self, label: &str) -> usize {
        self.records
            .iter()
            .filter(|record| record.status.label() == label)
            .count()
    }

    /// Status of the test with `id`.
    #[must_use]
    pub fn status_of(&self, id: &str) -> Option<&TestStatus> {
        self.records
            .iter()
            .find(|record| record.id == id)
            .map(TestRecord::status)
    }

    /// Whether nothing failed or errored.
    #[must_use]
    pub fn was_successful(&self) -> bool {
        self.records
            .iter()
            .all(|record| !matches!(record.status, TestStatus::Failed(_) | TestStatus::Errored(_)))
    }

    fn call(&mut self, hook: &'static str, subject: String) {
        self.calls.push(HookCall { hook, subject });
    }

    fn record(&mut self, test: &TestInfo, status: TestStatus) {
        self.call(status.label(), test.id());
        self.records.push(TestRecord::new(test, status));
    }
}

fn step_subject(step: &StepInfo<'_>) -> String {
    format!("{} {}", step.keyword, step.text)
}

impl TestResult for CollectingResult {
    fn start_test(&mut self, test: &TestInfo) {
        self.call("start_test", test.id());
    }

    fn stop_test(&mut self, test: &TestInfo) {
        self.call("stop_test", test.id());
    }

    fn add_success(&mut self, test: &TestInfo) {
        self.record(test, TestStatus::Passed);
    }

    fn add_failure(&mut self, test: &TestInfo, error: &ExecutionError) {
        self.record(test, TestStatus::Failed(error.to_string()));
    }

    fn add_error(&mut self, test: &TestInfo, error: &ExecutionError) {
        self.record(test, TestStatus::Errored(error.to_string()));
    }

    fn add_skip(&mut self, test: &TestInfo, reason: &str) {
        self.record(test, TestStatus::Skipped(reason.to_string()));
    }

    fn start_step(&mut self, step: &StepInfo<'_>) {
        self.call("start_step", step_subject(step));
    }

    fn stop_step(&mut self, step: &StepInfo<'_>) {
        self.call("stop_step", step_subject(step));
    }

    fn add_step_success(&mut self, step: &StepInfo<'_>) {
        self.steps.passed += 1;
        self.call("add_step_success", step_subject(step));
    }

    fn add_step_failure(&mut self, step: &StepInfo<'_>, _error: &StepError) {
        self.steps.failed += 1;
        self.call("add_step_failure", step_subject(step));
    }

    fn add_step_error(&mut self, step: &StepInfo<'_>, _error: &StepError) {
        self.steps.errored += 1;
        self.call("add_step_error", step_subject(step));
    }

    fn add_step_undefined(&mut self, step: &StepInfo<'_>) {
        self.steps.undefined += 1;
        self.call("add_step_undefined", step_subject(step));
    }
}
