//! Scenario outline expansion.

use std::sync::Arc;

use thiserror::Error;
use wishes_patterns::{PatternError, Substitution};

use super::{Hashes, Scenario};
use crate::registry::{StepDefinitionError, StepRegistry};
use crate::tags::TagSet;

/// An `Examples:` block: a name, its own tags and the value table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Examples {
    name: String,
    tags: TagSet,
    table: Hashes,
}

impl Examples {
    /// Create an examples block. Table keys are rewritten into the
    /// placeholders they replace.
    #[must_use]
    pub fn new(name: impl Into<String>, tags: TagSet, table: &Hashes) -> Self {
        Self {
            name: name.into(),
            tags,
            table: table.with_outline_keys(),
        }
    }

    /// Name used as the suffix of generated scenario titles.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Tags applied to the scenarios of this block only.
    #[must_use]
    pub fn tags(&self) -> &TagSet {
        &self.tags
    }

    /// Value table with placeholder keys.
    #[must_use]
    pub fn table(&self) -> &Hashes {
        &self.table
    }
}

/// Errors raised while expanding an outline.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExpansionError {
    /// A filled step matches several definitions.
    #[error(transparent)]
    Step(#[from] StepDefinitionError),
    /// The substitution for a row could not be built.
    #[error(transparent)]
    Pattern(#[from] PatternError),
}

impl<W> Scenario<W> {
    /// Expand `outline` into one scenario per row of `examples`.
    ///
    /// Generated titles read `"<filled title> <ordinal> <examples name>"`
    /// with a one-based ordinal. The outline's background is filled with
    /// the same row. Tags are the outline's plus those of the block.
    ///
    /// # Errors
    ///
    /// Returns [`ExpansionError`] when a filled step is ambiguous.
    pub fn from_outline(
        outline: &Self,
        examples: &Examples,
        registry: &StepRegistry<W>,
    ) -> Result<Vec<Self>, ExpansionError> {
        let mut scenarios = Vec::with_capacity(examples.table.len());
        for (index, row) in examples.table.iter().enumerate() {
            let substitution = Substitution::new(row.pairs())?;
            let title = format!(
                "{} {} {}",
                substitution.apply(outline.title()),
                index + 1,
                examples.name
            );
            let mut scenario = outline.fill(title, &substitution, registry)?;
            let background = outline
                .background()
                .map(|background| {
                    background
                        .fill(background.title().to_string(), &substitution, registry)
                        .map(Arc::new)
                })
                .transpose()?;
            scenario.replace_background(background);
            scenarios.push(scenario.with_tags(&examples.tags));
        }
        Ok(scenarios)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Step;
    use wishes_patterns::StepKeyword;

    fn registry() -> StepRegistry<()> {
        let mut registry = StepRegistry::new();
        let defined = registry
            .define_step(r"a (\w+) with (\w+)", |_| Ok(()))
            .and_then(|registry| registry.define_step(r"setup for (\w+)$", |_| Ok(())))
            .map(|_| ());
        assert!(defined.is_ok());
        registry
    }

    #[expect(clippy::expect_used, reason = "fixture steps are unambiguous")]
    fn outline(registry: &StepRegistry<()>) -> Scenario<()> {
        let mut background = Scenario::new("bg");
        background.add_step(
            Step::new(StepKeyword::Given, "setup for <key>", registry).expect("binds"),
        );
        let tags: TagSet = ["outline"].into_iter().collect();
        let mut outline = Scenario::new("<key> check")
            .with_tags(&tags)
            .with_background(Arc::new(background));
        outline.add_step(
            Step::new(StepKeyword::Given, "a <key> with <value>", registry).expect("binds"),
        );
        outline.add_step(Step::new(StepKeyword::Then, "done", registry).expect("binds"));
        outline
    }

    #[expect(clippy::expect_used, reason = "literal table rows")]
    fn examples() -> Examples {
        let mut table = Hashes::new(["key", "value"]);
        table.add_row(["k1", "v1"]).expect("row fits");
        table.add_row(["k2", "v2"]).expect("row fits");
        Examples::new("Example_values", ["rows"].into_iter().collect(), &table)
    }

    #[test]
    #[expect(clippy::expect_used, reason = "expansion of fixture data succeeds")]
    fn one_scenario_per_row_in_order() {
        let registry = registry();
        let scenarios = Scenario::from_outline(&outline(&registry), &examples(), &registry)
            .expect("expands");

        let titles: Vec<&str> = scenarios.iter().map(Scenario::title).collect();
        assert_eq!(titles, ["k1 check 1 Example_values", "k2 check 2 Example_values"]);
        let texts: Vec<Vec<&str>> = scenarios
            .iter()
            .map(|s| s.steps().iter().map(Step::text).collect())
            .collect();
        assert_eq!(
            texts,
            [vec!["a k1 with v1", "done"], vec!["a k2 with v2", "done"]]
        );
        assert!(scenarios.iter().all(|s| s.step_count() == 2));
        assert!(
            scenarios
                .iter()
                .flat_map(Scenario::steps)
                .all(|step| !step.text().contains('<'))
        );
    }

    #[test]
    #[expect(clippy::expect_used, reason = "expansion of fixture data succeeds")]
    fn background_is_filled_per_row() {
        let registry = registry();
        let scenarios = Scenario::from_outline(&outline(&registry), &examples(), &registry)
            .expect("expands");
        let background_steps: Vec<String> = scenarios
            .iter()
            .filter_map(|s| s.background())
            .flat_map(|bg| bg.steps().iter().map(|step| step.text().to_string()))
            .collect();
        assert_eq!(background_steps, ["setup for k1", "setup for k2"]);
    }

    #[test]
    #[expect(clippy::expect_used, reason = "expansion of fixture data succeeds")]
    fn examples_tags_join_outline_tags() {
        let registry = registry();
        let scenarios = Scenario::from_outline(&outline(&registry), &examples(), &registry)
            .expect("expands");
        for scenario in &scenarios {
            assert_eq!(scenario.tags().to_string(), "@outline @rows");
        }
    }

    #[test]
    fn keys_are_normalised_on_construction() {
        assert_eq!(examples().table().keys(), ["<key>", "<value>"]);
    }
}
