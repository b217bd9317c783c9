//! Collector bookkeeping.

use std::sync::Arc;

use rstest::{fixture, rstest};

use super::{CollectingResult, TestStatus};
use crate::execution::ExecutionError;
use crate::registry::StepError;
use crate::result::{TestInfo, TestResult};

#[fixture]
fn info() -> TestInfo {
    TestInfo {
        feature: "Feature_Reporting".into(),
        feature_title: "Reporting".into(),
        feature_description: None,
        name: "test_Scenario_one".into(),
        scenario_title: Some("one".into()),
        tags: ["b", "a"].into_iter().collect(),
    }
}

#[rstest]
fn records_outcomes_by_id(info: TestInfo) {
    let mut result = CollectingResult::new();
    result.start_test(&info);
    result.add_skip(&info, "no steps defined");
    result.stop_test(&info);

    assert_eq!(result.tests_run(), 1);
    assert_eq!(
        result.status_of("Feature_Reporting.test_Scenario_one"),
        Some(&TestStatus::Skipped("no steps defined".into()))
    );
    assert_eq!(
        result.records().first().map(|record| record.tags().to_vec()),
        Some(vec!["a".to_string(), "b".to_string()])
    );
    assert!(result.was_successful());
}

#[rstest]
fn failures_and_errors_are_unsuccessful(info: TestInfo) {
    let failed = ExecutionError::StepFailed {
        index: 0,
        keyword: wishes_patterns::StepKeyword::Then,
        text: "it works".into(),
        error: Arc::new(StepError::assertion("it did not")),
    };
    let mut result = CollectingResult::new();
    result.add_failure(&info, &failed);
    assert!(!result.was_successful());
    assert_eq!(result.count("failed"), 1);
    assert_eq!(
        result.records().first().and_then(|record| record.status().message()),
        Some("step 0 `Then it works` failed: it did not")
    );

    let mut result = CollectingResult::new();
    result.add_error(&info, &failed);
    assert_eq!(result.count("errored"), 1);
    assert!(!result.was_successful());
}
