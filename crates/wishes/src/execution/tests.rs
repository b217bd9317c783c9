//! Scenario execution and step hooks.

use std::sync::Arc;

use rstest::{fixture, rstest};
use wishes_patterns::StepKeyword;

use super::ExecutionError;
use crate::model::{Scenario, Step};
use crate::registry::{StepError, StepRegistry};
use crate::reporting::{CollectingResult, HookCall};

#[derive(Debug, Default)]
struct World {
    log: Vec<String>,
}

#[fixture]
fn registry() -> StepRegistry<World> {
    let mut registry = StepRegistry::<World>::new();
    let defined = registry
        .define_step(r"^Given record (\w+)$", |ctx| {
            let value = ctx.arg(0).unwrap_or_default().to_string();
            ctx.world_mut().log.push(value);
            Ok(())
        })
        .and_then(|r| r.define_step("fails", |_| Err(StepError::assertion("expected more"))))
        .and_then(|r| r.define_step("breaks", |_| Err(StepError::other(std::io::Error::other("disk")))))
        .and_then(|r| r.define_step("explodes", |_| panic!("kaboom")))
        .map(|_| ());
    assert!(defined.is_ok());
    registry
}

#[expect(clippy::expect_used, reason = "test steps are unambiguous")]
fn scenario(registry: &StepRegistry<World>, lines: &[(StepKeyword, &str)]) -> Scenario<World> {
    let mut scenario = Scenario::new("s");
    for (keyword, text) in lines {
        scenario.add_step(Step::new(*keyword, *text, registry).expect("binds"));
    }
    scenario
}

fn hooks(result: &CollectingResult) -> Vec<(&'static str, &str)> {
    result
        .calls()
        .iter()
        .map(|HookCall { hook, subject }| (*hook, subject.as_str()))
        .collect()
}

#[rstest]
fn runs_steps_in_order_with_hooks(registry: StepRegistry<World>) {
    let scenario = scenario(
        &registry,
        &[(StepKeyword::Given, "record one"), (StepKeyword::Given, "record two")],
    );
    let mut world = World::default();
    let mut result = CollectingResult::new();

    assert!(scenario.run(&mut world, &mut result).is_ok());

    assert_eq!(world.log, ["one", "two"]);
    assert_eq!(
        hooks(&result),
        [
            ("start_step", "Given record one"),
            ("add_step_success", "Given record one"),
            ("stop_step", "Given record one"),
            ("start_step", "Given record two"),
            ("add_step_success", "Given record two"),
            ("stop_step", "Given record two"),
        ]
    );
    assert_eq!(result.step_counts().passed, 2);
}

#[rstest]
fn background_runs_first(registry: StepRegistry<World>) {
    let background = Arc::new(scenario(&registry, &[(StepKeyword::Given, "record setup")]));
    let scenario = scenario(&registry, &[(StepKeyword::Given, "record body")])
        .with_background(background);
    let mut world = World::default();

    assert!(scenario.run(&mut world, &mut CollectingResult::new()).is_ok());
    assert_eq!(world.log, ["setup", "body"]);
}

#[rstest]
fn undefined_step_halts_as_pending(registry: StepRegistry<World>) {
    let scenario = scenario(
        &registry,
        &[
            (StepKeyword::Given, "record first"),
            (StepKeyword::Given, "there is a step"),
            (StepKeyword::Given, "record never"),
            (StepKeyword::Then, "there is another step"),
        ],
    );
    let mut world = World::default();
    let mut result = CollectingResult::new();

    let err = scenario.run(&mut world, &mut result).err();

    assert_eq!(
        err.as_ref().map(ToString::to_string).as_deref(),
        Some("pending 1 step(s): [<Given there is a step>]")
    );
    assert!(err.is_some_and(|err| err.is_skip()));
    assert_eq!(world.log, ["first"]);
    assert_eq!(result.step_counts().undefined, 1);
    assert!(
        hooks(&result).contains(&("add_step_undefined", "Given there is a step"))
    );
    assert!(
        !hooks(&result)
            .iter()
            .any(|(_, subject)| *subject == "Then there is another step")
    );
}

#[rstest]
#[case("fails", true)]
#[case("explodes", true)]
#[case("breaks", false)]
fn failing_step_stops_the_scenario(
    registry: StepRegistry<World>,
    #[case] text: &str,
    #[case] failure: bool,
) {
    let scenario = scenario(
        &registry,
        &[(StepKeyword::When, text), (StepKeyword::Then, "record after")],
    );
    let mut world = World::default();
    let mut result = CollectingResult::new();

    let err = scenario.run(&mut world, &mut result).err();

    let Some(ExecutionError::StepFailed { index, keyword, .. }) = &err else {
        panic!("expected a step failure, got {err:?}");
    };
    assert_eq!((*index, *keyword), (0, StepKeyword::When));
    assert_eq!(err.as_ref().map(ExecutionError::is_failure), Some(failure));
    assert!(world.log.is_empty());
    let counts = result.step_counts();
    assert_eq!((counts.failed, counts.errored), if failure { (1, 0) } else { (0, 1) });
}

#[rstest]
fn panic_message_is_kept(registry: StepRegistry<World>) {
    let scenario = scenario(&registry, &[(StepKeyword::When, "explodes")]);
    let err = scenario
        .run(&mut World::default(), &mut CollectingResult::new())
        .err()
        .map(|err| err.to_string());
    assert_eq!(
        err.as_deref(),
        Some("step 0 `When explodes` failed: step panicked: kaboom")
    );
}

#[rstest]
fn scenario_without_steps_is_skipped(registry: StepRegistry<World>) {
    let background = Arc::new(scenario(&registry, &[(StepKeyword::Given, "record setup")]));
    let empty = Scenario::new("empty").with_background(background);
    let mut world = World::default();

    let err = empty.run(&mut world, &mut CollectingResult::new()).err();

    assert_eq!(
        err.as_ref().and_then(ExecutionError::skip_message),
        Some("no steps defined")
    );
    assert!(world.log.is_empty());
}

#[rstest]
fn undefined_step_run_directly_reports_itself(registry: StepRegistry<World>) {
    let scenario = scenario(&registry, &[(StepKeyword::But, "nothing here")]);
    let outcome = scenario
        .steps()
        .first()
        .map(|step| step.run(&mut World::default()));
    assert!(matches!(
        outcome,
        Some(Err(StepError::Undefined(ref step))) if step == "But nothing here"
    ));
}
