//! Error types shared by the pattern modules.

use thiserror::Error;

/// Errors surfaced while compiling step patterns or substitution tables.
///
/// # Examples
/// ```
/// use wishes_patterns::StepPattern;
/// let err = StepPattern::compile("unclosed (group").unwrap_err();
/// assert!(err.to_string().contains("unclosed (group"));
/// ```
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PatternError {
    /// The step pattern is not a valid regular expression.
    #[error("invalid step pattern `{pattern}`: {source}")]
    Regex {
        /// Pattern text as supplied by the caller.
        pattern: String,
        /// Underlying regex compilation failure.
        #[source]
        source: regex::Error,
    },
    /// The placeholder table could not be compiled into a matcher.
    #[error("cannot build placeholder substitution: {0}")]
    Substitution(#[source] regex::Error),
}
