//! Callbacks emitted by the parser.

use wishes_patterns::StepKeyword;

/// One callback in the ordered stream a [`Parser`](super::Parser) emits.
///
/// Text arguments are the captured groups of the matched line with
/// surrounding whitespace removed. Multiline content is the exception: it
/// keeps everything past the block indentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseEvent<'a> {
    /// Parsing of the named source begins.
    StartParse {
        /// Stream name, `<string>` for in-memory text.
        name: &'a str,
    },
    /// Parsing finished without error.
    FinishParse,
    /// `Feature:` line.
    StartFeature {
        /// Feature title.
        title: &'a str,
    },
    /// End of the feature.
    FinishFeature,
    /// First description line follows.
    StartDescription,
    /// Description ended.
    FinishDescription,
    /// A description line or a multiline content line.
    Data {
        /// Line content.
        text: &'a str,
    },
    /// `Background:` line.
    StartBackground {
        /// Background title.
        title: &'a str,
    },
    /// End of the background.
    FinishBackground,
    /// `Scenario:` line.
    StartScenario {
        /// Scenario title.
        title: &'a str,
    },
    /// End of the scenario.
    FinishScenario,
    /// `Scenario Outline:` line.
    StartOutline {
        /// Outline title.
        title: &'a str,
    },
    /// End of the outline steps.
    FinishOutline,
    /// `Examples:` line.
    StartExamples {
        /// Examples block name, possibly empty.
        name: &'a str,
    },
    /// End of the examples table.
    FinishExamples,
    /// A step line.
    StartStep {
        /// Step kind.
        keyword: StepKeyword,
        /// Step text after the keyword.
        text: &'a str,
    },
    /// End of the step and its attachments.
    FinishStep,
    /// Opening `"""` delimiter.
    StartMultiline {
        /// Width of the delimiter's indentation.
        indent: usize,
    },
    /// Closing `"""` delimiter.
    FinishMultiline,
    /// First table row.
    StartHash {
        /// Column keys.
        keys: &'a [String],
    },
    /// A table data row.
    HashData {
        /// Cell values.
        values: &'a [String],
    },
    /// End of the table.
    FinishHash,
    /// A tag line.
    Tags {
        /// Tag names without the leading `@`.
        tags: &'a [String],
    },
    /// A comment line.
    Comment {
        /// Comment text after `#`.
        text: &'a str,
    },
    /// A blank line no row accepted.
    Whitespace {
        /// The raw line.
        line: &'a str,
    },
}

impl ParseEvent<'_> {
    /// Callback name of the event.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::StartParse { .. } => "start_parse",
            Self::FinishParse => "finish_parse",
            Self::StartFeature { .. } => "start_feature",
            Self::FinishFeature => "finish_feature",
            Self::StartDescription => "start_description",
            Self::FinishDescription => "finish_description",
            Self::Data { .. } => "data",
            Self::StartBackground { .. } => "start_background",
            Self::FinishBackground => "finish_background",
            Self::StartScenario { .. } => "start_scenario",
            Self::FinishScenario => "finish_scenario",
            Self::StartOutline { .. } => "start_outline",
            Self::FinishOutline => "finish_outline",
            Self::StartExamples { .. } => "start_examples",
            Self::FinishExamples => "finish_examples",
            Self::StartStep { .. } => "start_step",
            Self::FinishStep => "finish_step",
            Self::StartMultiline { .. } => "start_multiline",
            Self::FinishMultiline => "finish_multiline",
            Self::StartHash { .. } => "start_hash",
            Self::HashData { .. } => "hash_data",
            Self::FinishHash => "finish_hash",
            Self::Tags { .. } => "tags",
            Self::Comment { .. } => "comment",
            Self::Whitespace { .. } => "whitespace",
        }
    }

    /// Arguments of the event rendered as strings, in callback order.
    #[must_use]
    pub fn args(&self) -> Vec<String> {
        match self {
            Self::StartParse { name } => vec![(*name).to_string()],
            Self::StartFeature { title }
            | Self::StartBackground { title }
            | Self::StartScenario { title }
            | Self::StartOutline { title } => vec![(*title).to_string()],
            Self::StartExamples { name } => vec![(*name).to_string()],
            Self::Data { text } | Self::Comment { text } => vec![(*text).to_string()],
            Self::StartStep { keyword, text } => vec![keyword.to_string(), (*text).to_string()],
            Self::StartMultiline { indent } => vec![indent.to_string()],
            Self::StartHash { keys: cells }
            | Self::HashData { values: cells }
            | Self::Tags { tags: cells } => cells.to_vec(),
            Self::Whitespace { line } => vec![(*line).to_string()],
            Self::FinishParse
            | Self::FinishFeature
            | Self::StartDescription
            | Self::FinishDescription
            | Self::FinishBackground
            | Self::FinishScenario
            | Self::FinishOutline
            | Self::FinishExamples
            | Self::FinishStep
            | Self::FinishMultiline
            | Self::FinishHash => Vec::new(),
        }
    }
}
