//! Command-line checker for `wishes` feature files.

mod check;
mod config;
mod grammar;
mod logging;

use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use eyre::{Context, Result};

use crate::config::{CliConfig, LogLevel};

/// Inspect feature files and the feature grammar.
#[derive(Parser)]
#[command(name = "wishes", author, version, about)]
struct Cli {
    /// Diagnostic log level, overriding `WISHES_LOG_LEVEL`.
    #[arg(long, global = true, value_name = "LEVEL")]
    log_level: Option<LogLevel>,
    #[command(subcommand)]
    command: Commands,
}

/// Supported commands.
#[derive(Subcommand)]
enum Commands {
    /// Load feature files and list the test cases they generate.
    Check {
        /// Keep cases matching this tag expression; repeat to require all.
        #[arg(long = "tags", value_name = "EXPR")]
        tags: Vec<String>,
        /// Feature files, or directories of `.feature` files.
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// Print the parser's transition rows.
    Grammar {
        /// Print the state pairs no row connects instead.
        #[arg(long)]
        unreachable: bool,
        /// Emit JSON.
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = CliConfig::from_env()?.apply_overrides(cli.log_level);
    logging::init_logging(&config);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cli.command {
        Commands::Check { tags, paths } => check::run(&mut out, &paths, &tags)?,
        Commands::Grammar { unreachable, json } => grammar::run(&mut out, unreachable, json)?,
    }
    out.flush().wrap_err("failed to flush stdout")
}
