//! Step kinds recognised at the start of a step line.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Kind of a step line.
///
/// Conjunctions are kept as written: a step definition is matched against
/// `"<Kind> <text>"`, so `And` steps match patterns that mention `And`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StepKeyword {
    /// Setup preconditions for a scenario.
    Given,
    /// Perform the behaviour under test.
    When,
    /// Assert the expected outcome.
    Then,
    /// Continue the previous step kind.
    And,
    /// Contrast with the previous step kind.
    But,
}

impl StepKeyword {
    /// Every keyword in declaration order.
    pub const ALL: [Self; 5] = [Self::Given, Self::When, Self::Then, Self::And, Self::But];

    /// Return the canonical spelling of the keyword.
    ///
    /// # Examples
    ///
    /// ```
    /// use wishes_patterns::StepKeyword;
    ///
    /// assert_eq!(StepKeyword::Given.as_str(), "Given");
    /// assert_eq!(StepKeyword::But.as_str(), "But");
    /// ```
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Given => "Given",
            Self::When => "When",
            Self::Then => "Then",
            Self::And => "And",
            Self::But => "But",
        }
    }
}

impl fmt::Display for StepKeyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a word is not a step keyword.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid step keyword: {0}")]
pub struct StepKeywordParseError(pub String);

impl FromStr for StepKeyword {
    type Err = StepKeywordParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|keyword| trimmed.eq_ignore_ascii_case(keyword.as_str()))
            .ok_or_else(|| StepKeywordParseError(trimmed.to_string()))
    }
}

impl TryFrom<&str> for StepKeyword {
    type Error = StepKeywordParseError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}
