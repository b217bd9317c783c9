//! Outline placeholder keys and substitution.

use std::collections::HashMap;

use regex::{Captures, Regex};

use crate::errors::PatternError;

const BRACKETS: [(char, char); 4] = [('<', '>'), ('[', ']'), ('{', '}'), ('(', ')')];

/// Normalise an Examples column key into the placeholder it replaces.
///
/// Keys already wrapped in `<>`, `[]`, `{}` or `()` are kept verbatim;
/// anything else is wrapped in angle brackets.
///
/// # Examples
///
/// ```
/// use wishes_patterns::outline_key;
///
/// assert_eq!(outline_key("name"), "<name>");
/// assert_eq!(outline_key("[name]"), "[name]");
/// ```
#[must_use]
pub fn outline_key(key: &str) -> String {
    let mut chars = key.chars();
    let bracketed = match (chars.next(), chars.next_back()) {
        (Some(first), Some(last)) => BRACKETS.contains(&(first, last)),
        _ => false,
    };
    if bracketed {
        key.to_string()
    } else {
        format!("<{key}>")
    }
}

/// A placeholder table applied in a single simultaneous pass.
///
/// Every occurrence of a key in the source text is replaced by its value;
/// text produced by a replacement is never rescanned, so one row value
/// that happens to contain another placeholder is inserted verbatim.
/// Where two keys start at the same offset the longer one wins.
#[derive(Debug, Clone)]
pub struct Substitution {
    matcher: Option<Regex>,
    values: HashMap<String, String>,
}

impl Substitution {
    /// Build a substitution from `(placeholder, value)` pairs.
    ///
    /// Empty placeholders are ignored. A repeated placeholder keeps its
    /// last value.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError::Substitution`] when the combined matcher
    /// exceeds the regex engine's size limits.
    pub fn new<I, K, V>(pairs: I) -> Result<Self, PatternError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let values: HashMap<String, String> = pairs
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .filter(|(key, _)| !key.is_empty())
            .collect();
        let mut keys: Vec<&str> = values.keys().map(String::as_str).collect();
        keys.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        let matcher = if keys.is_empty() {
            None
        } else {
            let alternation = keys
                .iter()
                .map(|key| regex::escape(key))
                .collect::<Vec<_>>()
                .join("|");
            Some(Regex::new(&alternation).map_err(PatternError::Substitution)?)
        };
        Ok(Self { matcher, values })
    }

    /// Return `true` when the table has no placeholders.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Replace every placeholder in `text`.
    ///
    /// ```
    /// use wishes_patterns::Substitution;
    ///
    /// let sub = Substitution::new([("<a>", "<b>"), ("<b>", "x")]).unwrap();
    /// assert_eq!(sub.apply("<a> then <b>"), "<b> then x");
    /// ```
    #[must_use]
    pub fn apply(&self, text: &str) -> String {
        let Some(matcher) = &self.matcher else {
            return text.to_string();
        };
        matcher
            .replace_all(text, |caps: &Captures<'_>| {
                let found = caps.get(0).map_or("", |m| m.as_str());
                self.values
                    .get(found)
                    .cloned()
                    .unwrap_or_else(|| found.to_string())
            })
            .into_owned()
    }
}
