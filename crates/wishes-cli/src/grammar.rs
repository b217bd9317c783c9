//! The `grammar` command.

use std::io::Write;

use eyre::{Context, Result};
use wishes::grammar::{State, Transition, TransitionTable, dump_grammar};

fn write_row(out: &mut dyn Write, state: State, row: &Transition) -> Result<()> {
    let actions: Vec<&str> = row.actions.iter().map(|action| action.as_str()).collect();
    writeln!(
        out,
        "{state} --{}--> {} [{}]",
        row.matcher,
        row.next,
        actions.join(", ")
    )
    .wrap_err("failed to write grammar row")
}

/// Print the transition rows, or the unreachable state pairs.
///
/// # Errors
///
/// Returns an error when writing or serialising fails.
pub(crate) fn run(out: &mut dyn Write, unreachable: bool, json: bool) -> Result<()> {
    let table = TransitionTable::standard();
    match (unreachable, json) {
        (false, false) => {
            for state in State::ALL {
                for row in table.rows(state) {
                    write_row(out, state, row)?;
                }
            }
        }
        (false, true) => {
            let dump = dump_grammar(table).wrap_err("failed to serialise grammar")?;
            writeln!(out, "{dump}").wrap_err("failed to write grammar")?;
        }
        (true, false) => {
            for (from, to) in table.unreachable_transitions() {
                writeln!(out, "{from} -> {to}").wrap_err("failed to write state pair")?;
            }
        }
        (true, true) => {
            let pairs = serde_json::to_string(&table.unreachable_transitions())
                .wrap_err("failed to serialise state pairs")?;
            writeln!(out, "{pairs}").wrap_err("failed to write state pairs")?;
        }
    }
    Ok(())
}
