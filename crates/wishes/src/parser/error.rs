//! Errors raised while parsing a feature document.

use std::io;

use thiserror::Error;
use wishes_patterns::StepKeywordParseError;

use crate::grammar::{Matcher, State};

fn join(matchers: &[Matcher]) -> String {
    matchers
        .iter()
        .map(|matcher| matcher.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// A fatal parse failure. No partial document is produced.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ParseError {
    /// No row of the current state accepts a non-blank line.
    #[error(
        "line {line_number}: unexpected line {line:?} in state `{state}`, expected one of [{}]",
        join(.expected)
    )]
    UnexpectedLine {
        /// One-based line number.
        line_number: usize,
        /// Parser state when the line arrived.
        state: State,
        /// The offending line.
        line: String,
        /// Matchers the state would have accepted.
        expected: Vec<Matcher>,
    },
    /// Input ended in a state that cannot finish.
    #[error("unexpected end of input in state `{state}`, expected one of [{}]", join(.expected))]
    UnexpectedEnd {
        /// Parser state at end of input.
        state: State,
        /// Matchers the state would have accepted.
        expected: Vec<Matcher>,
    },
    /// A multiline content line is indented less than its opening delimiter.
    #[error(
        "line {line_number}: multiline content {line:?} is indented less than the opening delimiter ({indent} columns)"
    )]
    MultilineDedent {
        /// One-based line number.
        line_number: usize,
        /// Indentation of the opening delimiter.
        indent: usize,
        /// The offending line.
        line: String,
    },
    /// A step line carries an unknown keyword.
    #[error(transparent)]
    Keyword(#[from] StepKeywordParseError),
    /// Reading the input stream failed.
    #[error("cannot read {name}: {source}")]
    Io {
        /// Name of the stream.
        name: String,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
}

impl ParseError {
    /// Line number the error refers to, when it refers to one.
    #[must_use]
    pub fn line_number(&self) -> Option<usize> {
        match self {
            Self::UnexpectedLine { line_number, .. } | Self::MultilineDedent { line_number, .. } => {
                Some(*line_number)
            }
            _ => None,
        }
    }
}
