//! JSON export of the grammar for external tooling.

use serde::Serialize;

use super::{Action, Matcher, State, TransitionTable};

#[derive(Serialize)]
struct DumpedRow {
    state: State,
    matcher: Matcher,
    actions: &'static [Action],
    next: State,
}

#[derive(Serialize)]
struct GrammarDump {
    rows: Vec<DumpedRow>,
    unreachable_transitions: Vec<(State, State)>,
    unreachable_states: Vec<State>,
}

/// Serialise the rows of `table` and its unreachable state pairs as JSON.
///
/// # Errors
///
/// Returns an error if serialisation fails.
///
/// # Examples
/// ```
/// use wishes::grammar::{TransitionTable, dump_grammar};
///
/// let json = dump_grammar(TransitionTable::standard()).unwrap();
/// assert!(json.contains("\"state\":\"start\""));
/// ```
pub fn dump_grammar(table: &TransitionTable) -> serde_json::Result<String> {
    let rows = table
        .declared
        .iter()
        .flat_map(|entry| {
            entry.rows.iter().map(|row| DumpedRow {
                state: entry.state,
                matcher: row.matcher,
                actions: row.actions,
                next: row.next,
            })
        })
        .collect();
    serde_json::to_string(&GrammarDump {
        rows,
        unreachable_transitions: table.unreachable_transitions().into_iter().collect(),
        unreachable_states: table.unreachable_states(),
    })
}
