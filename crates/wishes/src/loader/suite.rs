//! Test cases and suites.

use std::fmt;

use crate::config;
use crate::execution::ExecutionError;
use crate::model::Scenario;
use crate::result::{TestInfo, TestResult};
use crate::tags::TagExpression;

/// One runnable test: a scenario and its identity, or the placeholder for
/// a feature without scenarios.
pub struct TestCase<W> {
    info: TestInfo,
    scenario: Option<Scenario<W>>,
}

impl<W> TestCase<W> {
    pub(crate) fn new(info: TestInfo, scenario: Option<Scenario<W>>) -> Self {
        Self { info, scenario }
    }

    /// Identity and metadata.
    #[must_use]
    pub fn info(&self) -> &TestInfo {
        &self.info
    }

    /// The scenario, `None` for a feature without scenarios.
    #[must_use]
    pub fn scenario(&self) -> Option<&Scenario<W>> {
        self.scenario.as_ref()
    }

    /// `"Scenario: <title>"`, or `"Feature: <title>"` without scenarios.
    #[must_use]
    pub fn short_description(&self) -> String {
        self.scenario.as_ref().map_or_else(
            || format!("Feature: {}", self.info.feature_title),
            |scenario| format!("Scenario: {}", scenario.title()),
        )
    }

    /// Run against a fresh world and report exactly one outcome.
    pub fn run<R>(&self, result: &mut R)
    where
        W: Default,
        R: TestResult + ?Sized,
    {
        result.start_test(&self.info);
        let outcome = self.scenario.as_ref().map_or_else(
            || Err(ExecutionError::skip("no scenarios defined")),
            |scenario| scenario.run(&mut W::default(), result),
        );
        match outcome {
            Ok(()) => result.add_success(&self.info),
            Err(error @ ExecutionError::Pending { .. }) if config::fail_on_pending() => {
                result.add_failure(&self.info, &error);
            }
            Err(error) if error.is_skip() => result.add_skip(&self.info, &error.to_string()),
            Err(error) if error.is_failure() => result.add_failure(&self.info, &error),
            Err(error) => result.add_error(&self.info, &error),
        }
        result.stop_test(&self.info);
    }
}

impl<W> fmt::Debug for TestCase<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestCase")
            .field("info", &self.info)
            .field("scenario", &self.scenario)
            .finish()
    }
}

/// Ordered test cases from one or more features.
pub struct Suite<W> {
    cases: Vec<TestCase<W>>,
}

impl<W> Suite<W> {
    /// Create an empty suite.
    #[must_use]
    pub fn new() -> Self {
        Self { cases: Vec::new() }
    }

    /// Append a test case.
    pub fn push(&mut self, case: TestCase<W>) {
        self.cases.push(case);
    }

    /// Append every case of `other`.
    pub fn extend(&mut self, other: Self) {
        self.cases.extend(other.cases);
    }

    /// Number of test cases.
    #[must_use]
    pub fn count_test_cases(&self) -> usize {
        self.cases.len()
    }

    /// Whether the suite has no cases.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// Cases in order.
    pub fn iter(&self) -> std::slice::Iter<'_, TestCase<W>> {
        self.cases.iter()
    }

    /// Case whose `"<feature>.<name>"` id equals `id`.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&TestCase<W>> {
        self.cases.iter().find(|case| case.info.id() == id)
    }

    /// Keep the cases whose effective tags match `expression`.
    #[must_use]
    pub fn filter_tags(self, expression: &TagExpression) -> Self {
        self.cases
            .into_iter()
            .filter(|case| expression.matches(&case.info.tags))
            .collect()
    }

    /// Run every case in order.
    pub fn run<R>(&self, result: &mut R)
    where
        W: Default,
        R: TestResult + ?Sized,
    {
        for case in &self.cases {
            case.run(result);
        }
    }
}

impl<W> Default for Suite<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W> fmt::Debug for Suite<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.cases).finish()
    }
}

impl<W> FromIterator<TestCase<W>> for Suite<W> {
    fn from_iter<I: IntoIterator<Item = TestCase<W>>>(iter: I) -> Self {
        Self {
            cases: iter.into_iter().collect(),
        }
    }
}

impl<W> IntoIterator for Suite<W> {
    type Item = TestCase<W>;
    type IntoIter = std::vec::IntoIter<TestCase<W>>;

    fn into_iter(self) -> Self::IntoIter {
        self.cases.into_iter()
    }
}

impl<'a, W> IntoIterator for &'a Suite<W> {
    type Item = &'a TestCase<W>;
    type IntoIter = std::slice::Iter<'a, TestCase<W>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
