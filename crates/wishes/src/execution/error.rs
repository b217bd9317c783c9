//! Outcomes that stop a running scenario.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;
use wishes_patterns::StepKeyword;

use crate::registry::StepError;

struct PendingList<'a>(&'a [String]);

impl fmt::Display for PendingList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (index, step) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "<{step}>")?;
        }
        f.write_str("]")
    }
}

/// Why a scenario did not pass.
///
/// [`Skip`](Self::Skip) and [`Pending`](Self::Pending) are control flow
/// signals reported as skips; [`StepFailed`](Self::StepFailed) carries the
/// error a step callback returned.
///
/// ```
/// use wishes::execution::ExecutionError;
///
/// let pending = ExecutionError::Pending {
///     steps: vec!["Given there is a step".into()],
/// };
/// assert_eq!(pending.to_string(), "pending 1 step(s): [<Given there is a step>]");
/// assert!(pending.is_skip());
/// ```
#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum ExecutionError {
    /// Nothing to run.
    #[error("{message}")]
    Skip {
        /// Reason shown to the result.
        message: String,
    },
    /// Execution stopped at an undefined step.
    #[error("pending {} step(s): {}", .steps.len(), PendingList(.steps))]
    Pending {
        /// Undefined steps reached, as `"<Kind> <text>"`.
        steps: Vec<String>,
    },
    /// A step callback returned an error or panicked.
    #[error("step {index} `{keyword} {text}` failed: {error}")]
    StepFailed {
        /// Zero-based index within the scenario or background.
        index: usize,
        /// Step kind.
        keyword: StepKeyword,
        /// Step text.
        text: String,
        /// The callback's error, shared so the outcome stays cloneable.
        #[source]
        error: Arc<StepError>,
    },
}

impl ExecutionError {
    pub(crate) fn skip(message: impl Into<String>) -> Self {
        Self::Skip {
            message: message.into(),
        }
    }

    /// Whether the outcome is reported as a skip by default.
    #[must_use]
    pub fn is_skip(&self) -> bool {
        matches!(self, Self::Skip { .. } | Self::Pending { .. })
    }

    /// Whether the outcome is a step failure rather than a step error.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        match self {
            Self::StepFailed { error, .. } => error.is_failure(),
            Self::Skip { .. } | Self::Pending { .. } => false,
        }
    }

    /// Skip reason for [`Skip`](Self::Skip), `None` otherwise.
    #[must_use]
    pub fn skip_message(&self) -> Option<&str> {
        match self {
            Self::Skip { message } => Some(message),
            _ => None,
        }
    }
}
