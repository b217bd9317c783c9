//! Declarative grammar driving the feature parser.
//!
//! The grammar is a table: for every parser [`State`] an ordered list of
//! [`Transition`] rows, each naming a line [`Matcher`], the [`Action`]s
//! fired when it matches, and the state to move to. Rows are tried in the
//! declared order and the first match wins. The table is static data; the
//! line patterns are compiled once per process by [`TransitionTable::standard`].

mod rows;

#[cfg(feature = "diagnostics")]
mod diagnostics;

use std::collections::{BTreeSet, HashMap, VecDeque};
use std::fmt;
use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};
use thiserror::Error;

#[cfg(feature = "diagnostics")]
pub use diagnostics::dump_grammar;

/// Parser states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "diagnostics", derive(serde::Serialize))]
#[cfg_attr(feature = "diagnostics", serde(rename_all = "snake_case"))]
pub enum State {
    /// Before the `Feature:` line.
    Start,
    /// Directly after the `Feature:` line.
    Feature,
    /// Inside the free-text feature description.
    Description,
    /// Between feature-level blocks, after a tag line.
    FeatureBody,
    /// After a `Background:` header, before or between steps.
    Background,
    /// After a background step line.
    BackgroundStep,
    /// Inside a multiline block of a background step.
    BackgroundMultiline,
    /// Inside a table of a background step.
    BackgroundTable,
    /// After a `Scenario:` header, before or between steps.
    Scenario,
    /// After a scenario step line.
    ScenarioStep,
    /// Inside a multiline block of a scenario step.
    ScenarioMultiline,
    /// Inside a table of a scenario step.
    ScenarioTable,
    /// After a `Scenario Outline:` header, before or between steps.
    Outline,
    /// After an outline step line.
    OutlineStep,
    /// Inside a multiline block of an outline step.
    OutlineMultiline,
    /// Inside a table of an outline step.
    OutlineTable,
    /// After an outline, where tags may lead into an `Examples:` block.
    AfterOutline,
    /// After an `Examples:` header.
    Examples,
    /// Inside an examples table.
    ExamplesTable,
    /// After end of input.
    End,
}

impl State {
    /// Every state in declaration order.
    pub const ALL: [Self; 20] = [
        Self::Start,
        Self::Feature,
        Self::Description,
        Self::FeatureBody,
        Self::Background,
        Self::BackgroundStep,
        Self::BackgroundMultiline,
        Self::BackgroundTable,
        Self::Scenario,
        Self::ScenarioStep,
        Self::ScenarioMultiline,
        Self::ScenarioTable,
        Self::Outline,
        Self::OutlineStep,
        Self::OutlineMultiline,
        Self::OutlineTable,
        Self::AfterOutline,
        Self::Examples,
        Self::ExamplesTable,
        Self::End,
    ];

    /// Return the `snake_case` name of the state.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Feature => "feature",
            Self::Description => "description",
            Self::FeatureBody => "feature_body",
            Self::Background => "background",
            Self::BackgroundStep => "background_step",
            Self::BackgroundMultiline => "background_multiline",
            Self::BackgroundTable => "background_table",
            Self::Scenario => "scenario",
            Self::ScenarioStep => "scenario_step",
            Self::ScenarioMultiline => "scenario_multiline",
            Self::ScenarioTable => "scenario_table",
            Self::Outline => "outline",
            Self::OutlineStep => "outline_step",
            Self::OutlineMultiline => "outline_multiline",
            Self::OutlineTable => "outline_table",
            Self::AfterOutline => "after_outline",
            Self::Examples => "examples",
            Self::ExamplesTable => "examples_table",
            Self::End => "end",
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Line classes recognised by the grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "diagnostics", derive(serde::Serialize))]
#[cfg_attr(feature = "diagnostics", serde(rename_all = "snake_case"))]
pub enum Matcher {
    /// The end-of-input sentinel; matches nothing else.
    EndOfInput,
    /// `# comment`
    Comment,
    /// `@tag @other`
    Tags,
    /// `Feature: <title>`
    Feature,
    /// `Background: <title>`
    Background,
    /// `Scenario: <title>`
    Scenario,
    /// `Scenario Outline: <title>`
    Outline,
    /// `Examples: <name>`
    Examples,
    /// `<Kind> <text>` with a case-insensitive kind.
    Step,
    /// The `"""` line opening a multiline block.
    MultilineOpen,
    /// The `"""` line closing a block, at the opening indentation.
    MultilineClose,
    /// Any line inside a multiline block.
    MultilineContent,
    /// `| cell | cell |`
    TableRow,
    /// Any other non-blank line.
    Text,
}

impl Matcher {
    /// Every matcher in declaration order.
    pub const ALL: [Self; 14] = [
        Self::EndOfInput,
        Self::Comment,
        Self::Tags,
        Self::Feature,
        Self::Background,
        Self::Scenario,
        Self::Outline,
        Self::Examples,
        Self::Step,
        Self::MultilineOpen,
        Self::MultilineClose,
        Self::MultilineContent,
        Self::TableRow,
        Self::Text,
    ];

    /// Return the `snake_case` name of the matcher.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EndOfInput => "end_of_input",
            Self::Comment => "comment",
            Self::Tags => "tags",
            Self::Feature => "feature",
            Self::Background => "background",
            Self::Scenario => "scenario",
            Self::Outline => "outline",
            Self::Examples => "examples",
            Self::Step => "step",
            Self::MultilineOpen => "multiline_open",
            Self::MultilineClose => "multiline_close",
            Self::MultilineContent => "multiline_content",
            Self::TableRow => "table_row",
            Self::Text => "text",
        }
    }

    /// Line pattern for matchers that are plain regular expressions.
    ///
    /// The sentinel and multiline content have no pattern. The parser
    /// evaluates those, and the indentation of a closing delimiter, against
    /// its own state.
    const fn pattern(self) -> Option<&'static str> {
        match self {
            Self::Comment => Some(r"^\s*#(.*)$"),
            Self::Tags => Some(r"^\s*(@\S+(?:\s+@\S+)*)\s*$"),
            Self::Feature => Some(r"^\s*Feature:(.*)$"),
            Self::Background => Some(r"^\s*Background:(.*)$"),
            Self::Scenario => Some(r"^\s*Scenario:(.*)$"),
            Self::Outline => Some(r"^\s*Scenario Outline:(.*)$"),
            Self::Examples => Some(r"^\s*Examples:(.*)$"),
            Self::Step => Some(r"^\s*(?i:(given|when|then|and|but))\b(.*)$"),
            Self::MultilineOpen | Self::MultilineClose => Some(r#"^(\s*)"""\s*$"#),
            Self::TableRow => Some(r"^\s*\|(.*)\|\s*$"),
            Self::Text => Some(r"^(.*\S.*)$"),
            Self::EndOfInput | Self::MultilineContent => None,
        }
    }
}

impl fmt::Display for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Handler callbacks a transition can fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "diagnostics", derive(serde::Serialize))]
#[cfg_attr(feature = "diagnostics", serde(rename_all = "snake_case"))]
pub enum Action {
    /// Open the feature with the matched title.
    StartFeature,
    /// Close the feature.
    FinishFeature,
    /// Open the feature description.
    StartDescription,
    /// Close the feature description.
    FinishDescription,
    /// Forward the matched line as description text.
    Data,
    /// Open a background with the matched title.
    StartBackground,
    /// Close the background.
    FinishBackground,
    /// Open a scenario with the matched title.
    StartScenario,
    /// Close the scenario.
    FinishScenario,
    /// Open an outline with the matched title.
    StartOutline,
    /// Close the outline.
    FinishOutline,
    /// Open an examples block with the matched name.
    StartExamples,
    /// Close the examples block.
    FinishExamples,
    /// Open a step from the matched kind and text.
    StartStep,
    /// Close the step.
    FinishStep,
    /// Open a multiline block and record its indentation.
    StartMultiline,
    /// Forward a multiline line with the block indentation removed.
    MultilineData,
    /// Close the multiline block.
    FinishMultiline,
    /// Open a table with the matched cells as column keys.
    StartHash,
    /// Forward the matched cells as a table row.
    HashData,
    /// Close the table.
    FinishHash,
    /// Forward the matched tag names.
    Tags,
    /// Forward the matched comment.
    Comment,
}

impl Action {
    /// Name of the handler callback this action fires.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::StartFeature => "start_feature",
            Self::FinishFeature => "finish_feature",
            Self::StartDescription => "start_description",
            Self::FinishDescription => "finish_description",
            Self::Data | Self::MultilineData => "data",
            Self::StartBackground => "start_background",
            Self::FinishBackground => "finish_background",
            Self::StartScenario => "start_scenario",
            Self::FinishScenario => "finish_scenario",
            Self::StartOutline => "start_outline",
            Self::FinishOutline => "finish_outline",
            Self::StartExamples => "start_examples",
            Self::FinishExamples => "finish_examples",
            Self::StartStep => "start_step",
            Self::FinishStep => "finish_step",
            Self::StartMultiline => "start_multiline",
            Self::FinishMultiline => "finish_multiline",
            Self::StartHash => "start_hash",
            Self::HashData => "hash_data",
            Self::FinishHash => "finish_hash",
            Self::Tags => "tags",
            Self::Comment => "comment",
        }
    }
}

/// One grammar row: when `matcher` accepts a line, fire `actions` in order
/// and move to `next`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// Line class accepted by this row.
    pub matcher: Matcher,
    /// Callbacks fired, in order.
    pub actions: &'static [Action],
    /// State entered after the actions ran.
    pub next: State,
}

impl Transition {
    const fn new(matcher: Matcher, actions: &'static [Action], next: State) -> Self {
        Self {
            matcher,
            actions,
            next,
        }
    }
}

/// Rows declared for one state.
#[derive(Debug, Clone, Copy)]
pub struct StateRows {
    /// State the rows belong to.
    pub state: State,
    /// Rows in priority order.
    pub rows: &'static [Transition],
}

/// Faults in a grammar declaration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GrammarError {
    /// A state other than [`State::End`] has no rows.
    #[error("state `{0}` declares no transitions")]
    MissingState(State),
    /// A state is declared more than once.
    #[error("state `{0}` is declared more than once")]
    DuplicateState(State),
    /// A line pattern does not compile.
    #[error("invalid pattern for matcher `{matcher}`: {source}")]
    Pattern {
        /// Matcher whose pattern failed.
        matcher: Matcher,
        /// Regex compilation failure.
        #[source]
        source: regex::Error,
    },
}

#[expect(
    clippy::expect_used,
    reason = "the standard grammar is static data exercised by the transition tests"
)]
static STANDARD: LazyLock<TransitionTable> = LazyLock::new(|| {
    TransitionTable::compile(rows::GRAMMAR).expect("standard grammar must compile")
});

/// A grammar with its line patterns compiled.
#[derive(Debug)]
pub struct TransitionTable {
    declared: &'static [StateRows],
    rows: HashMap<State, &'static [Transition]>,
    patterns: HashMap<Matcher, Regex>,
}

impl TransitionTable {
    /// Return the process-wide compiled feature grammar.
    #[must_use]
    pub fn standard() -> &'static Self {
        &STANDARD
    }

    /// Validate and compile a grammar declaration.
    ///
    /// # Errors
    ///
    /// Returns [`GrammarError`] when a state is missing or repeated, or a
    /// line pattern fails to compile.
    pub fn compile(declared: &'static [StateRows]) -> Result<Self, GrammarError> {
        let mut rows = HashMap::new();
        for entry in declared {
            if rows.insert(entry.state, entry.rows).is_some() {
                return Err(GrammarError::DuplicateState(entry.state));
            }
        }
        if let Some(missing) = State::ALL
            .into_iter()
            .find(|state| *state != State::End && !rows.contains_key(state))
        {
            return Err(GrammarError::MissingState(missing));
        }

        let mut patterns = HashMap::new();
        for matcher in Matcher::ALL {
            if let Some(pattern) = matcher.pattern() {
                let regex = RegexBuilder::new(pattern)
                    .build()
                    .map_err(|source| GrammarError::Pattern { matcher, source })?;
                patterns.insert(matcher, regex);
            }
        }
        Ok(Self {
            declared,
            rows,
            patterns,
        })
    }

    /// Rows for `state`, in priority order. [`State::End`] has none.
    #[must_use]
    pub fn rows(&self, state: State) -> &'static [Transition] {
        self.rows.get(&state).copied().unwrap_or_default()
    }

    /// Compiled regular expression behind `matcher`, if it has one.
    #[must_use]
    pub fn pattern(&self, matcher: Matcher) -> Option<&Regex> {
        self.patterns.get(&matcher)
    }

    /// Every declared `(state, matcher)` pair, in declaration order.
    #[must_use]
    pub fn declared_events(&self) -> Vec<(State, Matcher)> {
        self.declared
            .iter()
            .flat_map(|entry| entry.rows.iter().map(|row| (entry.state, row.matcher)))
            .collect()
    }

    /// Every declared `(state, next-state)` pair.
    #[must_use]
    pub fn reachable_transitions(&self) -> BTreeSet<(State, State)> {
        self.declared
            .iter()
            .flat_map(|entry| entry.rows.iter().map(|row| (entry.state, row.next)))
            .collect()
    }

    /// Every ordered pair of states.
    #[must_use]
    pub fn possible_transitions(&self) -> BTreeSet<(State, State)> {
        State::ALL
            .into_iter()
            .flat_map(|from| State::ALL.into_iter().map(move |to| (from, to)))
            .collect()
    }

    /// State pairs no row connects.
    #[must_use]
    pub fn unreachable_transitions(&self) -> BTreeSet<(State, State)> {
        let reachable = self.reachable_transitions();
        self.possible_transitions()
            .into_iter()
            .filter(|pair| !reachable.contains(pair))
            .collect()
    }

    /// States that cannot be entered from [`State::Start`].
    #[must_use]
    pub fn unreachable_states(&self) -> Vec<State> {
        let mut seen = BTreeSet::from([State::Start]);
        let mut queue = VecDeque::from([State::Start]);
        while let Some(state) = queue.pop_front() {
            for row in self.rows(state) {
                if seen.insert(row.next) {
                    queue.push_back(row.next);
                }
            }
        }
        State::ALL
            .into_iter()
            .filter(|state| !seen.contains(state))
            .collect()
    }
}
