//! Core library for `wishes`.
//!
//! `wishes` reads Gherkin-style feature documents, binds their steps to
//! regex step definitions and runs the resulting scenarios against a
//! caller-supplied world type.
//!
//! The pieces fit together as follows:
//!
//! - [`grammar`] holds the transition table driving the line parser;
//! - [`parser`] walks a document and emits [`parser::ParseEvent`]s;
//! - [`registry`] maps step text to callbacks;
//! - [`model`] holds features, scenarios, steps and tables, and expands
//!   scenario outlines;
//! - [`loader`] turns a document into a [`loader::Suite`] of test cases;
//! - [`execution`] and [`result`] run test cases and report outcomes.
//!
//! ```
//! use wishes::loader::Loader;
//! use wishes::registry::StepRegistry;
//! use wishes::reporting::CollectingResult;
//!
//! #[derive(Default)]
//! struct Basket {
//!     items: u32,
//! }
//!
//! let mut steps = StepRegistry::<Basket>::new();
//! steps
//!     .define_step(r"(\d+) items? in the basket", |ctx| {
//!         let count = ctx.parse_arg(0)?;
//!         ctx.world_mut().items = count;
//!         Ok(())
//!     })
//!     .unwrap();
//!
//! let suite = Loader::new(&steps)
//!     .load_str("Feature: Basket\n  Scenario: one\n    Given 1 item in the basket\n")
//!     .unwrap();
//! let mut result = CollectingResult::new();
//! suite.run(&mut result);
//! assert!(result.was_successful());
//! ```

pub mod config;
pub mod execution;
pub mod grammar;
pub mod loader;
pub mod model;
pub mod panic;
pub mod parser;
pub mod registry;
pub mod reporting;
pub mod result;
pub mod tags;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use loader::{LoadError, Loader, Suite, TestCase, load_feature};
pub use panic::panic_message;
pub use registry::{StepContext, StepError, StepRegistry};
pub use result::{TestInfo, TestResult};
pub use wishes_patterns::StepKeyword;
