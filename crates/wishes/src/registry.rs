//! Step definitions and their resolution.
//!
//! A [`StepRegistry`] is an explicit value owned by the caller. Steps are
//! bound while the document is built: each step's `"<Kind> <text>"` is
//! searched with every registered pattern, and exactly one hit binds the
//! step. More than one hit is an error; none leaves the step undefined.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use thiserror::Error;
use wishes_patterns::{PatternError, StepKeyword, StepPattern};

use crate::model::{Hashes, Step};

/// Boxed error type accepted from step callbacks.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Outcome of a step callback other than success.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StepError {
    /// An expectation did not hold. Reported as a failure.
    #[error("{0}")]
    Assertion(String),
    /// The callback panicked. Reported as a failure.
    #[error("step panicked: {0}")]
    Panic(String),
    /// Any other error. Reported as an error.
    #[error(transparent)]
    Other(BoxError),
    /// The step has no definition.
    #[error("undefined step: {0}")]
    Undefined(String),
}

impl StepError {
    /// Build an assertion failure.
    #[must_use]
    pub fn assertion(message: impl Into<String>) -> Self {
        Self::Assertion(message.into())
    }

    /// Wrap any error.
    #[must_use]
    pub fn other(error: impl Into<BoxError>) -> Self {
        Self::Other(error.into())
    }

    /// Whether the outcome counts as a failure rather than an error.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Assertion(_) | Self::Panic(_))
    }
}

/// Signature of a step callback.
pub type StepFn<W> = dyn Fn(&mut StepContext<'_, W>) -> Result<(), StepError> + Send + Sync;

/// What a step callback sees: the world, the step and its captures.
pub struct StepContext<'a, W> {
    world: &'a mut W,
    step: &'a Step<W>,
    args: &'a [String],
}

impl<'a, W> StepContext<'a, W> {
    pub(crate) fn new(world: &'a mut W, step: &'a Step<W>, args: &'a [String]) -> Self {
        Self { world, step, args }
    }

    /// Shared access to the world.
    #[must_use]
    pub fn world(&self) -> &W {
        self.world
    }

    /// Mutable access to the world.
    pub fn world_mut(&mut self) -> &mut W {
        self.world
    }

    /// The running step.
    #[must_use]
    pub fn step(&self) -> &Step<W> {
        self.step
    }

    /// Captured groups in pattern order.
    #[must_use]
    pub fn args(&self) -> &[String] {
        self.args
    }

    /// Captured group `index`, zero-based.
    #[must_use]
    pub fn arg(&self, index: usize) -> Option<&str> {
        self.args.get(index).map(String::as_str)
    }

    /// Parse captured group `index` into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`StepError::Assertion`] when the group is missing or does
    /// not parse.
    pub fn parse_arg<T>(&self, index: usize) -> Result<T, StepError>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        let raw = self
            .arg(index)
            .ok_or_else(|| StepError::assertion(format!("missing capture {index}")))?;
        raw.parse()
            .map_err(|err| StepError::assertion(format!("cannot parse capture {index} ({raw:?}): {err}")))
    }

    /// The step's multiline block, joined.
    #[must_use]
    pub fn multiline(&self) -> Option<String> {
        self.step.multiline()
    }

    /// The step's table.
    #[must_use]
    pub fn hashes(&self) -> Option<&Hashes> {
        self.step.hashes()
    }
}

/// A registered pattern and its callback.
pub struct StepDefinition<W> {
    pattern: StepPattern,
    callback: Arc<StepFn<W>>,
}

impl<W> StepDefinition<W> {
    /// The registered pattern text.
    #[must_use]
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    pub(crate) fn call(&self, context: &mut StepContext<'_, W>) -> Result<(), StepError> {
        (self.callback)(context)
    }
}

impl<W> fmt::Debug for StepDefinition<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepDefinition")
            .field("pattern", &self.pattern.as_str())
            .finish_non_exhaustive()
    }
}

/// A step's resolved definition and captured arguments.
pub struct Binding<W> {
    definition: Arc<StepDefinition<W>>,
    args: Vec<String>,
}

impl<W> Binding<W> {
    /// The bound definition.
    #[must_use]
    pub fn definition(&self) -> &StepDefinition<W> {
        &self.definition
    }

    /// Captured groups.
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl<W> Clone for Binding<W> {
    fn clone(&self) -> Self {
        Self {
            definition: Arc::clone(&self.definition),
            args: self.args.clone(),
        }
    }
}

impl<W> fmt::Debug for Binding<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("pattern", &self.definition.pattern())
            .field("args", &self.args)
            .finish()
    }
}

/// Errors raised while binding a step.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum StepDefinitionError {
    /// More than one registered pattern matches the step.
    #[error("ambiguous step `{step}` matches {}", .patterns.join(", "))]
    Ambiguous {
        /// The step as `"<Kind> <text>"`.
        step: String,
        /// Every matching pattern, in registration order.
        patterns: Vec<String>,
    },
}

/// Ordered collection of step definitions for world type `W`.
///
/// ```
/// use wishes::registry::StepRegistry;
/// use wishes_patterns::StepKeyword;
///
/// #[derive(Default)]
/// struct World {
///     count: u32,
/// }
///
/// let mut registry = StepRegistry::<World>::new();
/// registry
///     .define_step(r"there are (\d+) items", |ctx| {
///         let count = ctx.parse_arg(0)?;
///         ctx.world_mut().count = count;
///         Ok(())
///     })
///     .unwrap();
/// let binding = registry.resolve(StepKeyword::Given, "there are 3 items").unwrap();
/// assert_eq!(binding.map(|b| b.args().to_vec()), Some(vec!["3".to_string()]));
/// ```
pub struct StepRegistry<W> {
    definitions: Vec<Arc<StepDefinition<W>>>,
}

impl<W> StepRegistry<W> {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            definitions: Vec::new(),
        }
    }

    /// Register `callback` under a case-insensitive search `pattern`.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError`] when the pattern does not compile.
    pub fn define_step<F>(&mut self, pattern: &str, callback: F) -> Result<&mut Self, PatternError>
    where
        F: Fn(&mut StepContext<'_, W>) -> Result<(), StepError> + Send + Sync + 'static,
    {
        let pattern = StepPattern::compile(pattern)?;
        log::debug!("registered step pattern `{}`", pattern.as_str());
        self.definitions.push(Arc::new(StepDefinition {
            pattern,
            callback: Arc::new(callback),
        }));
        Ok(self)
    }

    /// Remove every definition.
    pub fn clear(&mut self) {
        self.definitions.clear();
    }

    /// Number of definitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Whether the registry has no definitions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Registered pattern texts in registration order.
    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.definitions.iter().map(|definition| definition.pattern())
    }

    /// Resolve a step to at most one definition.
    ///
    /// # Errors
    ///
    /// Returns [`StepDefinitionError::Ambiguous`] when several patterns match.
    pub fn resolve(
        &self,
        keyword: StepKeyword,
        text: &str,
    ) -> Result<Option<Binding<W>>, StepDefinitionError> {
        let subject = format!("{keyword} {text}");
        let mut hits = self.definitions.iter().filter_map(|definition| {
            definition
                .pattern
                .search(&subject)
                .map(|args| (definition, args))
        });
        let Some((definition, args)) = hits.next() else {
            return Ok(None);
        };
        let others: Vec<_> = hits.collect();
        if !others.is_empty() {
            let patterns = std::iter::once(definition.pattern().to_string())
                .chain(others.iter().map(|(other, _)| other.pattern().to_string()))
                .collect();
            return Err(StepDefinitionError::Ambiguous {
                step: subject,
                patterns,
            });
        }
        Ok(Some(Binding {
            definition: Arc::clone(definition),
            args,
        }))
    }
}

impl<W> Default for StepRegistry<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W> fmt::Debug for StepRegistry<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.patterns()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[derive(Default)]
    struct World;

    fn noop(_: &mut StepContext<'_, World>) -> Result<(), StepError> {
        Ok(())
    }

    #[fixture]
    fn registry() -> StepRegistry<World> {
        let mut registry = StepRegistry::new();
        let defined = registry
            .define_step("there is a step", noop)
            .and_then(|registry| registry.define_step(r"^Then (\w+) (\w+)$", noop))
            .map(|_| ());
        assert!(defined.is_ok());
        registry
    }

    #[rstest]
    fn resolves_by_search(registry: StepRegistry<World>) {
        let binding = registry.resolve(StepKeyword::And, "THERE IS A STEP too");
        assert!(matches!(binding, Ok(Some(_))));
    }

    #[rstest]
    fn passes_captures_in_order(registry: StepRegistry<World>) {
        let args = registry
            .resolve(StepKeyword::Then, "first second")
            .ok()
            .flatten()
            .map(|binding| binding.args().to_vec());
        assert_eq!(args, Some(vec!["first".to_string(), "second".to_string()]));
    }

    #[rstest]
    fn unmatched_step_is_undefined(registry: StepRegistry<World>) {
        assert!(matches!(
            registry.resolve(StepKeyword::When, "nothing matches"),
            Ok(None)
        ));
    }

    #[rstest]
    fn overlapping_patterns_are_ambiguous(mut registry: StepRegistry<World>) {
        let defined = registry
            .define_step(r"is step ([0-9]+)", noop)
            .and_then(|registry| registry.define_step(r"is step (.+)", noop))
            .map(|_| ());
        assert!(defined.is_ok());
        let err = registry.resolve(StepKeyword::Given, "there is step 1").err();
        assert_eq!(
            err,
            Some(StepDefinitionError::Ambiguous {
                step: "Given there is step 1".into(),
                patterns: vec!["is step ([0-9]+)".into(), "is step (.+)".into()],
            })
        );
    }

    #[rstest]
    fn clear_forgets_definitions(mut registry: StepRegistry<World>) {
        assert_eq!(registry.len(), 2);
        registry.clear();
        assert!(registry.is_empty());
        assert!(matches!(
            registry.resolve(StepKeyword::Given, "there is a step"),
            Ok(None)
        ));
    }

    #[test]
    fn invalid_pattern_is_rejected() {
        let mut registry = StepRegistry::<World>::new();
        assert!(registry.define_step("(", noop).is_err());
        assert!(registry.is_empty());
    }

    #[rstest]
    #[case(StepError::assertion("no"), true)]
    #[case(StepError::Panic("boom".into()), true)]
    #[case(StepError::other(std::io::Error::other("io")), false)]
    #[case(StepError::Undefined("Given x".into()), false)]
    fn classifies_step_errors(#[case] error: StepError, #[case] failure: bool) {
        assert_eq!(error.is_failure(), failure);
    }
}
