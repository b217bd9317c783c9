//! Compiled step patterns.
//!
//! A step pattern is a regular expression searched, case-insensitively,
//! anywhere inside `"<Kind> <text>"`. Anchors are the author's business.

use regex::{Regex, RegexBuilder};

use crate::errors::PatternError;

/// A compiled, case-insensitive step pattern.
#[derive(Debug, Clone)]
pub struct StepPattern {
    source: String,
    regex: Regex,
}

impl StepPattern {
    /// Compile `source` into a case-insensitive search pattern.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError::Regex`] when `source` is not a valid regular
    /// expression.
    ///
    /// # Examples
    ///
    /// ```
    /// use wishes_patterns::StepPattern;
    ///
    /// let pattern = StepPattern::compile(r"there is step (\d+)").unwrap();
    /// assert_eq!(pattern.as_str(), r"there is step (\d+)");
    /// ```
    pub fn compile(source: impl Into<String>) -> Result<Self, PatternError> {
        let source = source.into();
        let regex = RegexBuilder::new(&source)
            .case_insensitive(true)
            .build()
            .map_err(|err| PatternError::Regex {
                pattern: source.clone(),
                source: err,
            })?;
        Ok(Self { source, regex })
    }

    /// Return the pattern text as it was registered.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Search `text` and return the captured groups, or `None` when the
    /// pattern does not occur.
    ///
    /// Group 0 is skipped. Groups that do not participate in the match
    /// yield empty strings so the positions stay aligned with the pattern.
    ///
    /// ```
    /// use wishes_patterns::StepPattern;
    ///
    /// let pattern = StepPattern::compile(r"step (\d+)( twice)?").unwrap();
    /// assert_eq!(
    ///     pattern.search("Given there is STEP 7"),
    ///     Some(vec!["7".to_string(), String::new()])
    /// );
    /// assert!(pattern.search("Given nothing").is_none());
    /// ```
    #[must_use]
    pub fn search(&self, text: &str) -> Option<Vec<String>> {
        let caps = self.regex.captures(text)?;
        Some(
            caps.iter()
                .skip(1)
                .map(|group| group.map_or_else(String::new, |m| m.as_str().to_string()))
                .collect(),
        )
    }

    /// Report whether the pattern occurs anywhere in `text`.
    #[must_use]
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[expect(clippy::expect_used, reason = "test patterns are literals")]
    fn compile(source: &str) -> StepPattern {
        StepPattern::compile(source).expect("test pattern must compile")
    }

    #[rstest]
    #[case(r"there is a step", "Given there is a step")]
    #[case(r"THERE IS A STEP", "Given there is a step")]
    #[case(r"^given there", "Given there is a step")]
    #[case(r"is a", "Then this is a step")]
    fn searches_case_insensitively(#[case] source: &str, #[case] text: &str) {
        assert!(compile(source).is_match(text));
    }

    #[test]
    fn anchored_pattern_respects_kind() {
        assert!(!compile(r"^When there").is_match("Given there is a step"));
    }

    #[test]
    fn collects_captures_in_order() {
        let captures = compile(r"a (\w+) with (\w+)").search("Given a k1 with v1");
        assert_eq!(captures, Some(vec!["k1".to_string(), "v1".to_string()]));
    }

    #[test]
    fn reports_invalid_regex() {
        let err = StepPattern::compile("(").err();
        assert!(matches!(err, Some(PatternError::Regex { ref pattern, .. }) if pattern == "("));
    }
}
