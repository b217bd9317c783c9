//! Text utilities shared by the wishes runtime and command-line tool.
//!
//! The crate owns the small pieces of string handling that both the parser
//! and the step registry rely on: the step keyword, compiled step patterns,
//! outline placeholder substitution and identifier transliteration.

mod errors;
mod ident;
mod keyword;
mod pattern;
mod placeholder;

pub use errors::PatternError;
pub use ident::slugify;
pub use keyword::{StepKeyword, StepKeywordParseError};
pub use pattern::StepPattern;
pub use placeholder::{Substitution, outline_key};
