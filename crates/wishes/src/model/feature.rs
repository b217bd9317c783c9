//! Features.

use std::fmt;

use super::Scenario;
use crate::tags::TagSet;

/// A named group of scenarios with an optional free-text description.
pub struct Feature<W> {
    title: String,
    description: Option<String>,
    tags: TagSet,
    scenarios: Vec<Scenario<W>>,
}

impl<W> Feature<W> {
    /// Create a feature without scenarios.
    #[must_use]
    pub fn new(title: impl Into<String>, tags: TagSet) -> Self {
        Self {
            title: title.into(),
            description: None,
            tags,
            scenarios: Vec::new(),
        }
    }

    /// Set the description, one line per entry joined with `\n`.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Append a scenario, which should already carry the feature's tags.
    pub fn add_scenario(&mut self, scenario: Scenario<W>) {
        self.scenarios.push(scenario);
    }

    /// Feature title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Description lines, if any were written.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Tags written on the feature.
    #[must_use]
    pub fn tags(&self) -> &TagSet {
        &self.tags
    }

    /// Scenarios in document order, outline rows included.
    #[must_use]
    pub fn scenarios(&self) -> &[Scenario<W>] {
        &self.scenarios
    }

    pub(crate) fn replace_scenario(&mut self, index: usize, scenario: Scenario<W>) {
        if let Some(slot) = self.scenarios.get_mut(index) {
            *slot = scenario;
        }
    }

    pub(crate) fn into_parts(self) -> (String, Option<String>, TagSet, Vec<Scenario<W>>) {
        (self.title, self.description, self.tags, self.scenarios)
    }
}

impl<W> fmt::Debug for Feature<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Feature")
            .field("title", &self.title)
            .field("description", &self.description)
            .field("tags", &self.tags)
            .field("scenarios", &self.scenarios)
            .finish()
    }
}
