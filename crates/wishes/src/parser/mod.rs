//! Line-oriented feature parser.
//!
//! The [`Parser`] drives the [`TransitionTable`] over a stream of lines and
//! reports what it recognises to a [`ParseHandler`] as [`ParseEvent`]s. The
//! parser keeps no document model of its own; building one is the
//! handler's job (see [`crate::loader`]).

mod error;
mod event;

#[cfg(test)]
mod tests;

use std::io::BufRead;

use wishes_patterns::StepKeyword;

use crate::grammar::{Action, Matcher, State, TransitionTable};

pub use error::ParseError;
pub use event::ParseEvent;

/// Name reported for in-memory sources.
pub const STRING_SOURCE: &str = "<string>";

/// Receiver of parser callbacks.
///
/// A handler error aborts the parse and is returned unchanged.
pub trait ParseHandler {
    /// Error type returned by the handler. Parse failures convert into it.
    type Error: From<ParseError>;

    /// Handle one callback.
    ///
    /// # Errors
    ///
    /// Any error aborts parsing.
    fn handle(&mut self, event: ParseEvent<'_>) -> Result<(), Self::Error>;
}

/// Handler that logs every callback at `info` level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogHandler;

impl ParseHandler for LogHandler {
    type Error = ParseError;

    fn handle(&mut self, event: ParseEvent<'_>) -> Result<(), Self::Error> {
        log::info!("{}: {:?}", event.name(), event.args());
        Ok(())
    }
}

/// The line that fired the most recent transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineMatch {
    /// Matcher that accepted the line.
    pub matcher: Matcher,
    /// Captured groups handed to the actions.
    pub groups: Vec<String>,
}

/// Table-driven parser for feature documents.
///
/// # Examples
///
/// ```
/// use wishes::grammar::State;
/// use wishes::parser::Parser;
///
/// let mut parser = Parser::new();
/// parser.parse_str("Feature: logging only\n  Scenario: s\n    Given a step\n").unwrap();
/// assert_eq!(parser.state(), State::End);
/// ```
#[derive(Debug)]
pub struct Parser<H = LogHandler> {
    handler: H,
    table: &'static TransitionTable,
    state: State,
    line_number: usize,
    multiline_indent: Option<usize>,
    last_match: Option<LineMatch>,
}

impl Parser<LogHandler> {
    /// Create a parser that logs its callbacks.
    #[must_use]
    pub fn new() -> Self {
        Self::with_handler(LogHandler)
    }
}

impl Default for Parser<LogHandler> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: ParseHandler> Parser<H> {
    /// Create a parser reporting to `handler`.
    #[must_use]
    pub fn with_handler(handler: H) -> Self {
        Self {
            handler,
            table: TransitionTable::standard(),
            state: State::Start,
            line_number: 0,
            multiline_indent: None,
            last_match: None,
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> State {
        self.state
    }

    /// The most recent line that fired a transition.
    #[must_use]
    pub fn last_match(&self) -> Option<&LineMatch> {
        self.last_match.as_ref()
    }

    /// Borrow the handler.
    #[must_use]
    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// Mutably borrow the handler.
    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    /// Consume the parser and return its handler.
    #[must_use]
    pub fn into_handler(self) -> H {
        self.handler
    }

    /// Parse in-memory text, reported as [`STRING_SOURCE`].
    ///
    /// # Errors
    ///
    /// Returns the first parse or handler error.
    pub fn parse_str(&mut self, text: &str) -> Result<(), H::Error> {
        self.parse_lines(STRING_SOURCE, text.lines())
    }

    /// Parse a stream, reading it line by line.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Io`] if reading fails, otherwise the first
    /// parse or handler error.
    pub fn parse_reader<R: BufRead>(&mut self, name: &str, reader: R) -> Result<(), H::Error> {
        self.begin(name)?;
        for line in reader.lines() {
            let line = line.map_err(|source| ParseError::Io {
                name: name.to_string(),
                source,
            })?;
            self.handle_line(Some(&line))?;
        }
        self.end()
    }

    /// Parse a sequence of lines.
    ///
    /// # Errors
    ///
    /// Returns the first parse or handler error.
    pub fn parse_lines<I, S>(&mut self, name: &str, lines: I) -> Result<(), H::Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.begin(name)?;
        for line in lines {
            self.handle_line(Some(line.as_ref()))?;
        }
        self.end()
    }

    fn begin(&mut self, name: &str) -> Result<(), H::Error> {
        self.state = State::Start;
        self.line_number = 0;
        self.multiline_indent = None;
        self.last_match = None;
        self.handler.handle(ParseEvent::StartParse { name })
    }

    fn end(&mut self) -> Result<(), H::Error> {
        self.handle_line(None)?;
        self.handler.handle(ParseEvent::FinishParse)
    }

    /// Feed one line, or `None` for end of input.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] when no row accepts a non-blank line, or the
    /// first handler error raised by the fired actions.
    pub fn handle_line(&mut self, line: Option<&str>) -> Result<(), H::Error> {
        if line.is_some() {
            self.line_number += 1;
        }
        for row in self.table.rows(self.state) {
            let Some(groups) = self.match_line(row.matcher, line)? else {
                continue;
            };
            log::trace!(
                "line {}: {} --{}--> {}",
                self.line_number,
                self.state,
                row.matcher,
                row.next
            );
            for action in row.actions {
                self.fire(*action, &groups)?;
            }
            self.last_match = Some(LineMatch {
                matcher: row.matcher,
                groups,
            });
            self.state = row.next;
            return Ok(());
        }

        let expected = self.expected();
        match line {
            Some(text) if text.trim().is_empty() => {
                self.handler.handle(ParseEvent::Whitespace { line: text })
            }
            Some(text) => Err(ParseError::UnexpectedLine {
                line_number: self.line_number,
                state: self.state,
                line: text.to_string(),
                expected,
            }
            .into()),
            None => Err(ParseError::UnexpectedEnd {
                state: self.state,
                expected,
            }
            .into()),
        }
    }

    fn expected(&self) -> Vec<Matcher> {
        self.table
            .rows(self.state)
            .iter()
            .map(|row| row.matcher)
            .collect()
    }

    /// Test `line` against `matcher`, returning the captured groups.
    fn match_line(
        &self,
        matcher: Matcher,
        line: Option<&str>,
    ) -> Result<Option<Vec<String>>, ParseError> {
        let Some(line) = line else {
            return Ok((matcher == Matcher::EndOfInput).then(Vec::new));
        };
        match matcher {
            Matcher::EndOfInput => Ok(None),
            Matcher::MultilineContent => self.match_multiline_content(line),
            Matcher::MultilineClose => Ok(self
                .captures(matcher, line)
                .filter(|groups| {
                    let width = groups.first().map_or(0, |indent| indent.chars().count());
                    Some(width) == self.multiline_indent
                })
                .map(|_| Vec::new())),
            Matcher::MultilineOpen => Ok(self.captures(matcher, line)),
            Matcher::Tags => Ok(self.captures(matcher, line).map(|groups| {
                groups
                    .iter()
                    .flat_map(|group| group.split_whitespace())
                    .map(|tag| tag.trim_start_matches('@').to_string())
                    .collect()
            })),
            Matcher::TableRow => Ok(self.captures(matcher, line).map(|groups| {
                groups
                    .first()
                    .map(|inner| inner.split('|').map(|cell| cell.trim().to_string()).collect())
                    .unwrap_or_default()
            })),
            _ => Ok(self
                .captures(matcher, line)
                .map(|groups| groups.iter().map(|g| g.trim().to_string()).collect())),
        }
    }

    fn captures(&self, matcher: Matcher, line: &str) -> Option<Vec<String>> {
        let caps = self.table.pattern(matcher)?.captures(line)?;
        Some(
            caps.iter()
                .skip(1)
                .map(|group| group.map_or_else(String::new, |m| m.as_str().to_string()))
                .collect(),
        )
    }

    fn match_multiline_content(&self, line: &str) -> Result<Option<Vec<String>>, ParseError> {
        let indent = self.multiline_indent.unwrap_or(0);
        let leading = line.chars().take_while(|c| c.is_whitespace()).count();
        if leading < indent && !line.trim().is_empty() {
            return Err(ParseError::MultilineDedent {
                line_number: self.line_number,
                indent,
                line: line.to_string(),
            });
        }
        // A blank line narrower than the block strips down to nothing.
        Ok(Some(vec![line.chars().skip(indent).collect()]))
    }

    fn fire(&mut self, action: Action, groups: &[String]) -> Result<(), H::Error> {
        let first = groups.first().map_or("", String::as_str);
        let event = match action {
            Action::StartFeature => ParseEvent::StartFeature { title: first },
            Action::FinishFeature => ParseEvent::FinishFeature,
            Action::StartDescription => ParseEvent::StartDescription,
            Action::FinishDescription => ParseEvent::FinishDescription,
            Action::Data | Action::MultilineData => ParseEvent::Data { text: first },
            Action::StartBackground => ParseEvent::StartBackground { title: first },
            Action::FinishBackground => ParseEvent::FinishBackground,
            Action::StartScenario => ParseEvent::StartScenario { title: first },
            Action::FinishScenario => ParseEvent::FinishScenario,
            Action::StartOutline => ParseEvent::StartOutline { title: first },
            Action::FinishOutline => ParseEvent::FinishOutline,
            Action::StartExamples => ParseEvent::StartExamples { name: first },
            Action::FinishExamples => ParseEvent::FinishExamples,
            Action::StartStep => {
                let keyword: StepKeyword = first.parse().map_err(ParseError::from)?;
                let text = groups.get(1).map_or("", String::as_str);
                ParseEvent::StartStep { keyword, text }
            }
            Action::FinishStep => ParseEvent::FinishStep,
            Action::StartMultiline => {
                let indent = first.chars().count();
                self.multiline_indent = Some(indent);
                ParseEvent::StartMultiline { indent }
            }
            Action::FinishMultiline => {
                self.multiline_indent = None;
                ParseEvent::FinishMultiline
            }
            Action::StartHash => ParseEvent::StartHash { keys: groups },
            Action::HashData => ParseEvent::HashData { values: groups },
            Action::FinishHash => ParseEvent::FinishHash,
            Action::Tags => ParseEvent::Tags { tags: groups },
            Action::Comment => ParseEvent::Comment { text: first },
        };
        self.handler.handle(event)
    }
}
