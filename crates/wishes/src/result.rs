//! The downstream result boundary.
//!
//! A [`TestResult`] receives the outcome of every test case, and optionally
//! per-step notifications. The engine reports each outcome exactly once.

use wishes_patterns::StepKeyword;

use crate::execution::ExecutionError;
use crate::model::Step;
use crate::registry::StepError;
use crate::tags::TagSet;

/// Identity and metadata of one test case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestInfo {
    /// Test-case group name, `Feature_<slug>`.
    pub feature: String,
    /// Feature title as written.
    pub feature_title: String,
    /// Feature description, if any.
    pub feature_description: Option<String>,
    /// Test name, `test_Scenario_<slug>` or `run_test`.
    pub name: String,
    /// Scenario title, `None` for a feature without scenarios.
    pub scenario_title: Option<String>,
    /// Effective tags.
    pub tags: TagSet,
}

impl TestInfo {
    /// `"<feature>.<name>"`.
    #[must_use]
    pub fn id(&self) -> String {
        format!("{}.{}", self.feature, self.name)
    }
}

/// The step a hook refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepInfo<'a> {
    /// Step kind.
    pub keyword: StepKeyword,
    /// Step text.
    pub text: &'a str,
}

impl<'a, W> From<&'a Step<W>> for StepInfo<'a> {
    fn from(step: &'a Step<W>) -> Self {
        Self {
            keyword: step.keyword(),
            text: step.text(),
        }
    }
}

/// Receiver of test outcomes.
///
/// The four outcome methods are required. Step hooks default to no-ops.
pub trait TestResult {
    /// A test case is about to run.
    fn start_test(&mut self, _test: &TestInfo) {}

    /// A test case finished, whatever its outcome.
    fn stop_test(&mut self, _test: &TestInfo) {}

    /// Every step passed.
    fn add_success(&mut self, test: &TestInfo);

    /// A step assertion failed or panicked.
    fn add_failure(&mut self, test: &TestInfo, error: &ExecutionError);

    /// A step returned a non-assertion error.
    fn add_error(&mut self, test: &TestInfo, error: &ExecutionError);

    /// The test was skipped, with the reason.
    fn add_skip(&mut self, test: &TestInfo, reason: &str);

    /// A step is about to run.
    fn start_step(&mut self, _step: &StepInfo<'_>) {}

    /// A step finished.
    fn stop_step(&mut self, _step: &StepInfo<'_>) {}

    /// A step passed.
    fn add_step_success(&mut self, _step: &StepInfo<'_>) {}

    /// A step failed.
    fn add_step_failure(&mut self, _step: &StepInfo<'_>, _error: &StepError) {}

    /// A step errored.
    fn add_step_error(&mut self, _step: &StepInfo<'_>, _error: &StepError) {}

    /// A step has no definition.
    fn add_step_undefined(&mut self, _step: &StepInfo<'_>) {}
}
