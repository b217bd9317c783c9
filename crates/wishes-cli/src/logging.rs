//! Diagnostics on stderr.
//!
//! Library crates log through the `log` facade; the subscriber installed
//! here also receives those records. Stdout carries command output only.

use tracing_subscriber::EnvFilter;

use crate::config::CliConfig;

fn filter_from_config(config: &CliConfig) -> EnvFilter {
    EnvFilter::new(config.log_level.as_filter_str())
}

/// Install the global subscriber.
///
/// If a subscriber is already set the call has no effect.
pub(crate) fn init_logging(config: &CliConfig) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter_from_config(config))
        .with_writer(std::io::stderr)
        .with_target(true)
        .without_time()
        .try_init();
}
