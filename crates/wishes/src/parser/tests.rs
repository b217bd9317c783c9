//! Parser behaviour over whole documents.

use std::io::Cursor;

use rstest::{fixture, rstest};

use super::{ParseError, Parser, STRING_SOURCE};
use crate::grammar::{Matcher, State};
use crate::test_support::{RecordedEvent, RecordingHandler};

#[fixture]
fn parser() -> Parser<RecordingHandler> {
    Parser::with_handler(RecordingHandler::default())
}

fn event(name: &'static str, args: &[&str]) -> RecordedEvent {
    RecordedEvent {
        name,
        args: args.iter().map(ToString::to_string).collect(),
    }
}

#[rstest]
fn emits_callbacks_for_a_whole_feature(mut parser: Parser<RecordingHandler>) {
    let source = "\
@slow
Feature: Parsing
    Some description.

  Scenario: first
    Given a step
    And another
";
    assert!(parser.parse_str(source).is_ok());
    assert_eq!(
        parser.handler().events(),
        [
            event("start_parse", &[STRING_SOURCE]),
            event("tags", &["slow"]),
            event("start_feature", &["Parsing"]),
            event("start_description", &[]),
            event("data", &["Some description."]),
            event("whitespace", &[""]),
            event("finish_description", &[]),
            event("start_scenario", &["first"]),
            event("start_step", &["Given", "a step"]),
            event("finish_step", &[]),
            event("start_step", &["And", "another"]),
            event("finish_step", &[]),
            event("finish_scenario", &[]),
            event("finish_feature", &[]),
            event("finish_parse", &[]),
        ]
    );
}

#[rstest]
fn step_keywords_are_case_insensitive(mut parser: Parser<RecordingHandler>) {
    assert!(parser.parse_str("Feature: f\nScenario: s\n  gIVEN lower\n").is_ok());
    let step = parser
        .handler()
        .events()
        .iter()
        .find(|recorded| recorded.name == "start_step")
        .cloned();
    assert_eq!(step, Some(event("start_step", &["Given", "lower"])));
}

#[rstest]
fn multiline_content_loses_the_block_indentation(mut parser: Parser<RecordingHandler>) {
    let source = "\
Feature: f
  Scenario: s
    Given text
      \"\"\"
      first
        indented

      last
      \"\"\"
    Then done
";
    assert!(parser.parse_str(source).is_ok());
    let data: Vec<&str> = parser
        .handler()
        .events()
        .iter()
        .filter(|recorded| recorded.name == "data")
        .filter_map(|recorded| recorded.args.first().map(String::as_str))
        .collect();
    assert_eq!(data, ["first", "  indented", "", "last"]);
    assert!(
        parser
            .handler()
            .events()
            .contains(&event("start_multiline", &["6"]))
    );
}

#[rstest]
fn blank_multiline_lines_keep_width_past_the_block_indent(mut parser: Parser<RecordingHandler>) {
    let source = "Feature: f\nScenario: s\n  Given a\n  \"\"\"\n      \n \n  \"\"\"\n";
    assert!(parser.parse_str(source).is_ok());
    let data: Vec<&str> = parser
        .handler()
        .events()
        .iter()
        .filter(|recorded| recorded.name == "data")
        .filter_map(|recorded| recorded.args.first().map(String::as_str))
        .collect();
    assert_eq!(data, ["    ", ""]);
}

#[rstest]
fn deeper_delimiter_is_content(mut parser: Parser<RecordingHandler>) {
    let source = "Feature: f\nScenario: s\n  Given a\n  \"\"\"\n    \"\"\"\n  \"\"\"\n";
    assert!(parser.parse_str(source).is_ok());
    assert!(
        parser
            .handler()
            .events()
            .contains(&event("data", &["  \"\"\""]))
    );
}

#[rstest]
fn dedented_multiline_content_is_an_error(mut parser: Parser<RecordingHandler>) {
    let source = "Feature: f\nScenario: s\n  Given a\n  \"\"\"\nnot indented\n  \"\"\"\n";
    match parser.parse_str(source) {
        Err(ParseError::MultilineDedent {
            line_number,
            indent,
            line,
        }) => {
            assert_eq!(line_number, 5);
            assert_eq!(indent, 2);
            assert_eq!(line, "not indented");
        }
        other => panic!("expected a dedent error, got {other:?}"),
    }
}

#[rstest]
fn unterminated_multiline_fails_at_end_of_input(mut parser: Parser<RecordingHandler>) {
    let result = parser.parse_str("Feature: f\nScenario: s\n  Given a\n  \"\"\"\n  open\n");
    assert!(matches!(
        result,
        Err(ParseError::UnexpectedEnd {
            state: State::ScenarioMultiline,
            ..
        })
    ));
}

#[rstest]
fn table_cells_are_trimmed(mut parser: Parser<RecordingHandler>) {
    let source = "\
Feature: f
  Scenario: s
    Given a table
      | key  |value|
      |  k1  | v1  |
";
    assert!(parser.parse_str(source).is_ok());
    let events = parser.handler().events();
    assert!(events.contains(&event("start_hash", &["key", "value"])));
    assert!(events.contains(&event("hash_data", &["k1", "v1"])));
}

#[rstest]
fn tag_lines_yield_names_without_markers(mut parser: Parser<RecordingHandler>) {
    assert!(parser.parse_str("@a  @b-c\tFeature: f\n").is_err());
    let mut parser = Parser::with_handler(RecordingHandler::default());
    assert!(parser.parse_str("@a  @b-c\t@d\nFeature: f\n").is_ok());
    assert!(
        parser
            .handler()
            .events()
            .contains(&event("tags", &["a", "b-c", "d"]))
    );
}

#[rstest]
fn unexpected_line_reports_state_and_alternatives(mut parser: Parser<RecordingHandler>) {
    let err = parser.parse_str("# header\nGiven too early\n").err();
    let Some(ParseError::UnexpectedLine {
        line_number,
        state,
        line,
        expected,
    }) = err
    else {
        panic!("expected an unexpected-line error, got {err:?}");
    };
    assert_eq!(line_number, 2);
    assert_eq!(state, State::Start);
    assert_eq!(line, "Given too early");
    assert_eq!(
        expected,
        [
            Matcher::Comment,
            Matcher::Tags,
            Matcher::Feature,
            Matcher::EndOfInput
        ]
    );
}

#[test]
fn unexpected_line_message_is_readable() {
    let err = ParseError::UnexpectedLine {
        line_number: 3,
        state: State::Examples,
        line: "oops".into(),
        expected: vec![Matcher::Comment, Matcher::TableRow],
    };
    assert_eq!(
        err.to_string(),
        "line 3: unexpected line \"oops\" in state `examples`, expected one of [comment, table_row]"
    );
    assert_eq!(err.line_number(), Some(3));
}

#[rstest]
fn examples_header_needs_a_table(mut parser: Parser<RecordingHandler>) {
    let result = parser.parse_str("Feature: f\nScenario Outline: o\n  Given <a>\nExamples:\n");
    assert!(matches!(
        result,
        Err(ParseError::UnexpectedEnd {
            state: State::Examples,
            ..
        })
    ));
}

#[rstest]
fn empty_input_is_accepted(mut parser: Parser<RecordingHandler>) {
    assert!(parser.parse_str("").is_ok());
    assert_eq!(parser.state(), State::End);
    assert_eq!(parser.handler().names(), ["start_parse", "finish_parse"]);
}

#[rstest]
fn reader_input_reports_its_name(mut parser: Parser<RecordingHandler>) {
    let reader = Cursor::new("Feature: from a stream\n");
    assert!(parser.parse_reader("stream.feature", reader).is_ok());
    assert_eq!(
        parser.handler().events().first(),
        Some(&event("start_parse", &["stream.feature"]))
    );
    assert!(
        parser
            .handler()
            .events()
            .contains(&event("start_feature", &["from a stream"]))
    );
}

#[test]
fn log_handler_accepts_everything() {
    let mut parser = Parser::new();
    assert!(parser.parse_str("Feature: logged\n  Scenario: s\n").is_ok());
    assert_eq!(parser.state(), State::End);
}

#[rstest]
fn parser_can_be_reused(mut parser: Parser<RecordingHandler>) {
    assert!(parser.parse_str("Feature: one\n").is_ok());
    parser.handler_mut().clear();
    assert!(parser.parse_str("Feature: two\n").is_ok());
    assert!(
        parser
            .handler()
            .events()
            .contains(&event("start_feature", &["two"]))
    );
}
