//! Scenarios and backgrounds.

use std::fmt;
use std::sync::Arc;

use wishes_patterns::Substitution;

use super::Step;
use crate::registry::{StepDefinitionError, StepRegistry};
use crate::tags::TagSet;

/// An ordered list of steps with a title, effective tags and an optional
/// background.
///
/// Backgrounds are scenarios too; they run before the steps of every
/// scenario that refers to them.
pub struct Scenario<W> {
    title: String,
    background: Option<Arc<Scenario<W>>>,
    tags: TagSet,
    steps: Vec<Step<W>>,
}

impl<W> Scenario<W> {
    /// Create an untagged scenario without steps.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            background: None,
            tags: TagSet::new(),
            steps: Vec::new(),
        }
    }

    /// Attach a background and inherit its tags.
    #[must_use]
    pub fn with_background(mut self, background: Arc<Self>) -> Self {
        self.tags.merge(&background.tags);
        self.background = Some(background);
        self
    }

    /// Add `tags` to the effective tag set.
    #[must_use]
    pub fn with_tags(mut self, tags: &TagSet) -> Self {
        self.tags.merge(tags);
        self
    }

    /// Append a step.
    pub fn add_step(&mut self, step: Step<W>) {
        self.steps.push(step);
    }

    /// Title as written, or as generated for outline rows.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Background run before the steps.
    #[must_use]
    pub fn background(&self) -> Option<&Arc<Self>> {
        self.background.as_ref()
    }

    /// Effective tags, inherited ones included.
    #[must_use]
    pub fn tags(&self) -> &TagSet {
        &self.tags
    }

    /// Steps in order, background steps excluded.
    #[must_use]
    pub fn steps(&self) -> &[Step<W>] {
        &self.steps
    }

    /// Number of own steps.
    #[must_use]
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Number of own steps with a definition.
    #[must_use]
    pub fn step_count_defined(&self) -> usize {
        self.steps.iter().filter(|step| step.is_defined()).count()
    }

    /// Number of own steps without a definition.
    #[must_use]
    pub fn step_count_undefined(&self) -> usize {
        self.step_count() - self.step_count_defined()
    }

    /// Copy with `substitution` applied to the title and every step.
    pub(crate) fn fill(
        &self,
        title: String,
        substitution: &Substitution,
        registry: &StepRegistry<W>,
    ) -> Result<Self, StepDefinitionError> {
        let steps = self
            .steps
            .iter()
            .map(|step| step.fill_from_example(substitution, registry))
            .collect::<Result<_, _>>()?;
        Ok(Self {
            title,
            background: self.background.clone(),
            tags: self.tags.clone(),
            steps,
        })
    }

    pub(crate) fn replace_background(&mut self, background: Option<Arc<Self>>) {
        self.background = background;
    }
}

impl<W> fmt::Debug for Scenario<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scenario")
            .field("title", &self.title)
            .field("background", &self.background)
            .field("tags", &self.tags)
            .field("steps", &self.steps)
            .finish()
    }
}
