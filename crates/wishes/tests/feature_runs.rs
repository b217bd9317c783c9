//! End-to-end behaviour: loading feature text and running the suite.

use std::sync::{Arc, Mutex, PoisonError};

use rstest::{fixture, rstest};
use serial_test::serial;
use wishes::config::{clear_fail_on_pending_override, set_fail_on_pending};
use wishes::reporting::{CollectingResult, TestStatus};
use wishes::{StepError, StepRegistry, load_feature};

type Sink = Arc<Mutex<Vec<String>>>;

#[derive(Debug, Default)]
struct World {
    count: u32,
}

fn push(sink: &Sink, entry: String) {
    sink.lock().unwrap_or_else(PoisonError::into_inner).push(entry);
}

fn drain(sink: &Sink) -> Vec<String> {
    std::mem::take(&mut *sink.lock().unwrap_or_else(PoisonError::into_inner))
}

#[fixture]
fn sink() -> Sink {
    Arc::default()
}

#[fixture]
fn registry(sink: Sink) -> (StepRegistry<World>, Sink) {
    let mut registry = StepRegistry::<World>::new();
    let (a, b, c, d) = (
        Arc::clone(&sink),
        Arc::clone(&sink),
        Arc::clone(&sink),
        Arc::clone(&sink),
    );
    let defined = registry
        .define_step(r"a (\w+) with (\w+)", move |ctx| {
            push(&a, format!("a {} with {}", ctx.arg(0).unwrap_or(""), ctx.arg(1).unwrap_or("")));
            Ok(())
        })
        .and_then(|r| {
            r.define_step("increment", move |ctx| {
                ctx.world_mut().count += 1;
                push(&b, ctx.world().count.to_string());
                Ok(())
            })
        })
        .and_then(|r| {
            r.define_step("a text", move |ctx| {
                push(&c, ctx.multiline().unwrap_or_default());
                Ok(())
            })
        })
        .and_then(|r| {
            r.define_step("a table", move |ctx| {
                for row in ctx.hashes().into_iter().flatten() {
                    push(&d, format!("{}={}", row.get("key").unwrap_or(""), row.get("value").unwrap_or("")));
                }
                Ok(())
            })
        })
        .and_then(|r| r.define_step("it holds", |_| Err(StepError::assertion("it did not hold"))))
        .map(|_| ());
    assert!(defined.is_ok());
    (registry, sink)
}

fn run(registry: &StepRegistry<World>, text: &str) -> CollectingResult {
    let suite = load_feature(text, registry).unwrap_or_else(|err| panic!("feature must load: {err}"));
    let mut result = CollectingResult::new();
    suite.run(&mut result);
    result
}

#[rstest]
fn outline_rows_run_in_order(registry: (StepRegistry<World>, Sink)) {
    let (registry, sink) = registry;
    let result = run(
        &registry,
        "\
Feature: Outlines
  Scenario Outline: pairs
    Given a <key> with <value>

  Examples:
    | key | value |
    | k1  | v1    |
    | k2  | v2    |
",
    );
    assert_eq!(result.tests_run(), 2);
    assert!(result.was_successful());
    assert_eq!(drain(&sink), ["a k1 with v1", "a k2 with v2"]);
    assert_eq!(
        result.records().iter().map(|r| r.id().to_string()).collect::<Vec<_>>(),
        [
            "Feature_Outlines.test_Scenario_pairs_1_Example_",
            "Feature_Outlines.test_Scenario_pairs_2_Example_",
        ]
    );
}

#[rstest]
fn plain_scenario_keeps_placeholders(registry: (StepRegistry<World>, Sink)) {
    let (registry, sink) = registry;
    let result = run(
        &registry,
        "Feature: Plain\n  Scenario: literal\n    Given a text\n      \"\"\"\n      <v>\n      \"\"\"\n",
    );
    assert!(result.was_successful());
    assert_eq!(drain(&sink), ["<v>\n"]);
}

#[rstest]
fn each_case_gets_a_fresh_world(registry: (StepRegistry<World>, Sink)) {
    let (registry, sink) = registry;
    let result = run(
        &registry,
        "\
Feature: Worlds
  Background:
    Given increment
  Scenario: first
    When increment
  Scenario: second
    When increment
",
    );
    assert_eq!(result.tests_run(), 2);
    assert_eq!(drain(&sink), ["1", "2", "1", "2"]);
}

#[rstest]
fn tables_reach_the_step(registry: (StepRegistry<World>, Sink)) {
    let (registry, sink) = registry;
    let result = run(
        &registry,
        "\
Feature: Tables
  Scenario: rows
    Given a table
      | key | value |
      | one | 1     |
      | two | 2     |
",
    );
    assert!(result.was_successful());
    assert_eq!(drain(&sink), ["one=1", "two=2"]);
}

#[rstest]
fn skips_explain_themselves(registry: (StepRegistry<World>, Sink)) {
    let (registry, _) = registry;
    let result = run(
        &registry,
        "\
Feature: Skips
  Scenario: nothing
  Scenario: pending
    Given there is a step
    Then increment
",
    );
    assert_eq!(
        result.status_of("Feature_Skips.test_Scenario_nothing"),
        Some(&TestStatus::Skipped("no steps defined".into()))
    );
    assert_eq!(
        result.status_of("Feature_Skips.test_Scenario_pending"),
        Some(&TestStatus::Skipped(
            "pending 1 step(s): [<Given there is a step>]".into()
        ))
    );
    assert_eq!(result.step_counts().passed, 0);

    let empty = run(&registry, "Feature: Nothing here\n");
    assert_eq!(
        empty.status_of("Feature_Nothing_here.run_test"),
        Some(&TestStatus::Skipped("no scenarios defined".into()))
    );
}

#[rstest]
#[serial]
fn strict_mode_fails_pending_scenarios(registry: (StepRegistry<World>, Sink)) {
    let (registry, _) = registry;
    set_fail_on_pending(true);
    let result = run(&registry, "Feature: Strict\n  Scenario: s\n    Given there is a step\n");
    clear_fail_on_pending_override();
    assert!(!result.was_successful());
    assert_eq!(result.count("failed"), 1);
}

#[rstest]
#[serial]
fn pending_is_a_skip_by_default(registry: (StepRegistry<World>, Sink)) {
    let (registry, _) = registry;
    set_fail_on_pending(false);
    let result = run(&registry, "Feature: Lenient\n  Scenario: s\n    Given there is a step\n");
    clear_fail_on_pending_override();
    assert!(result.was_successful());
    assert_eq!(result.count("skipped"), 1);
}

#[rstest]
fn failures_are_reported_once_with_hooks(registry: (StepRegistry<World>, Sink)) {
    let (registry, _) = registry;
    let result = run(
        &registry,
        "Feature: Hooks\n  Scenario: s\n    Given increment\n    Then it holds\n    And increment\n",
    );
    let calls: Vec<(&str, &str)> = result
        .calls()
        .iter()
        .map(|call| (call.hook, call.subject.as_str()))
        .collect();
    assert_eq!(
        calls,
        [
            ("start_test", "Feature_Hooks.test_Scenario_s"),
            ("start_step", "Given increment"),
            ("add_step_success", "Given increment"),
            ("stop_step", "Given increment"),
            ("start_step", "Then it holds"),
            ("add_step_failure", "Then it holds"),
            ("stop_step", "Then it holds"),
            ("failed", "Feature_Hooks.test_Scenario_s"),
            ("stop_test", "Feature_Hooks.test_Scenario_s"),
        ]
    );
}

#[rstest]
fn one_failure_does_not_stop_siblings(registry: (StepRegistry<World>, Sink)) {
    let (registry, _) = registry;
    let result = run(
        &registry,
        "Feature: Siblings\n  Scenario: bad\n    Then it holds\n  Scenario: good\n    Given increment\n",
    );
    assert_eq!(result.count("failed"), 1);
    assert_eq!(result.count("passed"), 1);
}
