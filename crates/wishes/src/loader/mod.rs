//! Turning feature documents into runnable suites.
//!
//! The [`Loader`] parses a document with a handler that builds the
//! [`Feature`](crate::model::Feature) model, binds every step against the
//! caller's [`StepRegistry`] and materialises one [`TestCase`] per scenario
//! when the feature ends. Test cases are grouped under
//! `Feature_<slug>` and named `test_Scenario_<slug>`, where the slug is
//! the ASCII-folded title with punctuation removed.

mod builder;
mod error;
mod suite;


use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::parser::Parser;
use crate::registry::StepRegistry;

pub use builder::EMPTY_FEATURE_TEST;
pub use error::LoadError;
pub use suite::{Suite, TestCase};

use builder::FeatureBuilder;

/// Naming prefixes for generated test cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderConfig {
    /// Prefix of test-case group names.
    pub feature_prefix: String,
    /// Prefix of test names.
    pub scenario_prefix: String,
    /// Prefix of examples block names in generated titles.
    pub examples_prefix: String,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            feature_prefix: "Feature_".into(),
            scenario_prefix: "test_Scenario_".into(),
            examples_prefix: "Example_".into(),
        }
    }
}

impl LoaderConfig {
    /// Check that every prefix can start an identifier.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::InvalidConfig`] naming the first bad prefix.
    pub fn validate(&self) -> Result<(), LoadError> {
        for (field, prefix) in [
            ("feature_prefix", &self.feature_prefix),
            ("scenario_prefix", &self.scenario_prefix),
            ("examples_prefix", &self.examples_prefix),
        ] {
            let mut chars = prefix.chars();
            let starts_well = chars
                .next()
                .is_some_and(|first| first.is_ascii_alphabetic() || first == '_');
            if !starts_well || !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
                return Err(LoadError::InvalidConfig(format!(
                    "{field} {prefix:?} is not an identifier prefix"
                )));
            }
        }
        Ok(())
    }
}

/// Loads feature documents against a step registry.
///
/// ```
/// use wishes::loader::Loader;
/// use wishes::registry::StepRegistry;
///
/// let mut registry = StepRegistry::<()>::new();
/// registry.define_step("a step", |_| Ok(())).unwrap();
/// let suite = Loader::new(&registry)
///     .load_str("Feature: Demo\n  Scenario: one\n    Given a step\n")
///     .unwrap();
/// let case = suite.iter().next().unwrap();
/// assert_eq!(case.info().id(), "Feature_Demo.test_Scenario_one");
/// ```
#[derive(Debug)]
pub struct Loader<'r, W> {
    registry: &'r StepRegistry<W>,
    config: LoaderConfig,
}

impl<'r, W> Loader<'r, W> {
    /// Create a loader with the default naming.
    #[must_use]
    pub fn new(registry: &'r StepRegistry<W>) -> Self {
        Self {
            registry,
            config: LoaderConfig::default(),
        }
    }

    /// Create a loader with custom naming, validated immediately.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::InvalidConfig`] for a prefix that cannot start
    /// an identifier.
    pub fn with_config(registry: &'r StepRegistry<W>, config: LoaderConfig) -> Result<Self, LoadError> {
        config.validate()?;
        Ok(Self { registry, config })
    }

    /// Active naming configuration.
    #[must_use]
    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Load an in-memory document.
    ///
    /// # Errors
    ///
    /// Returns the first parse, binding or expansion error.
    pub fn load_str(&self, text: &str) -> Result<Suite<W>, LoadError> {
        let mut parser = Parser::with_handler(FeatureBuilder::new(self.registry, &self.config));
        parser.parse_str(text)?;
        Ok(parser.into_handler().into_suite())
    }

    /// Load a document from a stream reported as `name`.
    ///
    /// # Errors
    ///
    /// Returns the first read, parse, binding or expansion error.
    pub fn load_reader<R: BufRead>(&self, name: &str, reader: R) -> Result<Suite<W>, LoadError> {
        let mut parser = Parser::with_handler(FeatureBuilder::new(self.registry, &self.config));
        parser.parse_reader(name, reader)?;
        Ok(parser.into_handler().into_suite())
    }

    /// Load a feature file.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Io`] when the file cannot be opened, otherwise
    /// as [`load_reader`](Self::load_reader).
    pub fn load_path(&self, path: impl AsRef<Path>) -> Result<Suite<W>, LoadError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.load_reader(&path.display().to_string(), BufReader::new(file))
    }
}

/// Load `text` with the default naming.
///
/// # Errors
///
/// As [`Loader::load_str`].
pub fn load_feature<W>(text: &str, registry: &StepRegistry<W>) -> Result<Suite<W>, LoadError> {
    Loader::new(registry).load_str(text)
}
