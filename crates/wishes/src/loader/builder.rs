//! Parse handler that assembles features into suites.

use std::mem;
use std::sync::Arc;

use wishes_patterns::{StepKeyword, slugify};

use super::{LoadError, LoaderConfig, Suite, TestCase};
use crate::model::{Examples, Feature, Hashes, Scenario, Step};
use crate::parser::{ParseEvent, ParseHandler};
use crate::registry::StepRegistry;
use crate::result::TestInfo;
use crate::tags::TagSet;

/// Test name of the single case generated for a feature without scenarios.
pub const EMPTY_FEATURE_TEST: &str = "run_test";

pub(super) struct FeatureBuilder<'a, W> {
    registry: &'a StepRegistry<W>,
    config: &'a LoaderConfig,
    source: String,
    pending_tags: TagSet,
    feature: Option<Feature<W>>,
    names: Vec<String>,
    lines: Option<Vec<String>>,
    background: Option<Arc<Scenario<W>>>,
    current: Option<Scenario<W>>,
    outline: Option<Scenario<W>>,
    examples: Option<(String, TagSet)>,
    step: Option<(StepKeyword, String)>,
    multilines: Option<Vec<String>>,
    hashes: Option<Hashes>,
    suite: Suite<W>,
}

impl<'a, W> FeatureBuilder<'a, W> {
    pub(super) fn new(registry: &'a StepRegistry<W>, config: &'a LoaderConfig) -> Self {
        Self {
            registry,
            config,
            source: String::new(),
            pending_tags: TagSet::new(),
            feature: None,
            names: Vec::new(),
            lines: None,
            background: None,
            current: None,
            outline: None,
            examples: None,
            step: None,
            multilines: None,
            hashes: None,
            suite: Suite::new(),
        }
    }

    pub(super) fn into_suite(self) -> Suite<W> {
        self.suite
    }

    /// Open a block carrying the feature's tags and any pending ones.
    fn open_block(&mut self, title: &str, with_background: bool) {
        let feature_tags = self
            .feature
            .as_ref()
            .map(|feature| feature.tags().clone())
            .unwrap_or_default();
        let mut block = Scenario::new(title)
            .with_tags(&feature_tags)
            .with_tags(&mem::take(&mut self.pending_tags));
        if with_background {
            if let Some(background) = &self.background {
                block = block.with_background(Arc::clone(background));
            }
        }
        self.current = Some(block);
    }

    fn add_case(&mut self, scenario: Scenario<W>) {
        let name = format!("{}{}", self.config.scenario_prefix, slugify(scenario.title()));
        let Some(feature) = self.feature.as_mut() else {
            return;
        };
        if let Some(index) = self.names.iter().position(|existing| *existing == name) {
            log::warn!(
                "{}: scenario `{}` replaces an earlier scenario named {name}",
                self.source,
                scenario.title()
            );
            feature.replace_scenario(index, scenario);
        } else {
            log::debug!("{}: generated test case {name}", self.source);
            self.names.push(name);
            feature.add_scenario(scenario);
        }
    }

    fn finish_step(&mut self) -> Result<(), LoadError> {
        let Some((keyword, text)) = self.step.take() else {
            return Ok(());
        };
        let mut step = Step::new(keyword, text, self.registry)?;
        if let Some(lines) = self.multilines.take() {
            step = step.with_multiline(lines);
        } else if let Some(hashes) = self.hashes.take() {
            step = step.with_hashes(hashes);
        }
        // An empty registry leaves every step undefined.
        if !step.is_defined() && !self.registry.is_empty() {
            log::warn!("{}: undefined step `{step}`", self.source);
        }
        if let Some(block) = self.current.as_mut() {
            block.add_step(step);
        }
        Ok(())
    }

    fn finish_examples(&mut self) -> Result<(), LoadError> {
        let (Some((name, tags)), Some(table), Some(outline)) =
            (self.examples.take(), self.hashes.take(), self.outline.as_ref())
        else {
            return Ok(());
        };
        let examples = Examples::new(name, tags, &table);
        for scenario in Scenario::from_outline(outline, &examples, self.registry)? {
            self.add_case(scenario);
        }
        Ok(())
    }

    fn finish_feature(&mut self) {
        let Some(feature) = self.feature.take() else {
            return;
        };
        let group = format!("{}{}", self.config.feature_prefix, slugify(feature.title()));
        let (title, description, feature_tags, scenarios) = feature.into_parts();
        let info = |name: String, scenario_title: Option<String>, tags: TagSet| TestInfo {
            feature: group.clone(),
            feature_title: title.clone(),
            feature_description: description.clone(),
            name,
            scenario_title,
            tags,
        };
        let mut suite = Suite::new();
        if scenarios.is_empty() {
            suite.push(TestCase::new(
                info(EMPTY_FEATURE_TEST.to_string(), None, feature_tags),
                None,
            ));
        }
        let names = mem::take(&mut self.names);
        for (name, scenario) in names.into_iter().zip(scenarios) {
            let case_info = info(
                name,
                Some(scenario.title().to_string()),
                scenario.tags().clone(),
            );
            suite.push(TestCase::new(case_info, Some(scenario)));
        }
        log::debug!(
            "{}: loaded feature `{title}` as {group} with {} test case(s)",
            self.source,
            suite.count_test_cases()
        );
        self.suite.extend(suite);
    }
}

impl<W> ParseHandler for FeatureBuilder<'_, W> {
    type Error = LoadError;

    fn handle(&mut self, event: ParseEvent<'_>) -> Result<(), Self::Error> {
        match event {
            ParseEvent::StartParse { name } => {
                self.source = name.to_string();
                self.pending_tags = TagSet::new();
            }
            ParseEvent::StartFeature { title } => {
                let tags = mem::take(&mut self.pending_tags);
                self.feature = Some(Feature::new(title, tags));
                self.names.clear();
                self.background = None;
            }
            ParseEvent::FinishFeature => self.finish_feature(),
            ParseEvent::StartDescription | ParseEvent::StartMultiline { .. } => {
                self.lines = Some(Vec::new());
            }
            ParseEvent::FinishDescription => {
                let mut lines = self.lines.take().unwrap_or_default();
                while lines.last().is_some_and(String::is_empty) {
                    lines.pop();
                }
                if let Some(feature) = self.feature.take() {
                    self.feature = Some(feature.with_description(lines.join("\n")));
                }
            }
            ParseEvent::Data { text } => {
                if let Some(lines) = self.lines.as_mut() {
                    lines.push(text.to_string());
                }
            }
            ParseEvent::Whitespace { .. } => {
                if let Some(lines) = self.lines.as_mut() {
                    lines.push(String::new());
                }
            }
            ParseEvent::StartBackground { title } => self.open_block(title, false),
            ParseEvent::FinishBackground => {
                self.background = self.current.take().map(Arc::new);
            }
            ParseEvent::StartScenario { title } | ParseEvent::StartOutline { title } => {
                self.open_block(title, true);
            }
            ParseEvent::FinishScenario => {
                if let Some(scenario) = self.current.take() {
                    self.add_case(scenario);
                }
            }
            ParseEvent::FinishOutline => self.outline = self.current.take(),
            ParseEvent::StartExamples { name } => {
                let name = format!("{}{}", self.config.examples_prefix, slugify(name));
                self.examples = Some((name, mem::take(&mut self.pending_tags)));
            }
            ParseEvent::FinishExamples => self.finish_examples()?,
            ParseEvent::StartStep { keyword, text } => {
                self.step = Some((keyword, text.to_string()));
            }
            ParseEvent::FinishStep => self.finish_step()?,
            ParseEvent::FinishMultiline => self.multilines = self.lines.take(),
            ParseEvent::StartHash { keys } => self.hashes = Some(Hashes::new(keys.iter().cloned())),
            ParseEvent::HashData { values } => {
                if let Some(hashes) = self.hashes.as_mut() {
                    hashes.add_row(values.iter().cloned())?;
                }
            }
            ParseEvent::Tags { tags } => {
                for tag in tags {
                    self.pending_tags.insert(tag.clone());
                }
            }
            ParseEvent::FinishParse | ParseEvent::FinishHash | ParseEvent::Comment { .. } => {}
        }
        Ok(())
    }
}
