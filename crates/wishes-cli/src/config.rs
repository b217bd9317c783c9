//! Configuration read from the environment and the command line.

use std::env;
use std::str::FromStr;

use thiserror::Error;

/// Environment variable holding the default log level.
pub(crate) const LOG_LEVEL_ENV: &str = "WISHES_LOG_LEVEL";

/// Invalid configuration value.
#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    /// A setting could not be parsed.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Log level matching the `tracing` levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum LogLevel {
    /// Every parser transition.
    Trace,
    /// Loaded features and generated cases.
    Debug,
    /// Progress per file.
    Info,
    /// Problems worth a look.
    #[default]
    Warn,
    /// Failures only.
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            _ => Err(ConfigError::Invalid(format!(
                "unknown log level '{s}', expected one of: trace, debug, info, warn, error"
            ))),
        }
    }
}

impl LogLevel {
    /// Filter directive understood by `tracing_subscriber::EnvFilter`.
    pub(crate) fn as_filter_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Effective command-line configuration.
#[derive(Debug, Clone, Default)]
pub(crate) struct CliConfig {
    /// Log level for diagnostics on stderr.
    pub(crate) log_level: LogLevel,
}

impl CliConfig {
    /// Read `WISHES_LOG_LEVEL`, falling back to defaults when unset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for an unknown level.
    pub(crate) fn from_env() -> Result<Self, ConfigError> {
        let log_level = env::var(LOG_LEVEL_ENV)
            .ok()
            .map(|value| value.parse())
            .transpose()?
            .unwrap_or_default();
        Ok(Self { log_level })
    }

    /// Apply command-line overrides, which win over the environment.
    #[must_use]
    pub(crate) fn apply_overrides(mut self, log_level: Option<LogLevel>) -> Self {
        if let Some(level) = log_level {
            self.log_level = level;
        }
        self
    }
}
