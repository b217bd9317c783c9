//! Errors raised while loading a feature.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::model::{ExpansionError, HashesError};
use crate::parser::ParseError;
use crate::registry::StepDefinitionError;

/// A failure that aborts loading a whole feature.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoadError {
    /// The document does not follow the grammar.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// A step matches several definitions.
    #[error(transparent)]
    Step(#[from] StepDefinitionError),
    /// A table row does not fit its header.
    #[error(transparent)]
    Table(#[from] HashesError),
    /// An outline row could not be expanded.
    #[error(transparent)]
    Expansion(#[from] ExpansionError),
    /// The loader configuration was rejected.
    #[error("invalid loader configuration: {0}")]
    InvalidConfig(String),
    /// The feature file could not be opened.
    #[error("cannot open {}: {source}", .path.display())]
    Io {
        /// Path of the feature file.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
}
