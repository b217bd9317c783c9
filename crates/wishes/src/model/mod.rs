//! Document model built from parsed feature files.
//!
//! Model values are assembled while parsing and are read-only afterwards.
//! Scenarios share their background through an [`Arc`](std::sync::Arc).

mod feature;
mod hashes;
mod outline;
mod scenario;
mod step;

pub use feature::Feature;
pub use hashes::{Hashes, HashesError, Row};
pub use outline::{Examples, ExpansionError};
pub use scenario::Scenario;
pub use step::Step;
