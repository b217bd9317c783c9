//! Tag sets and tag-expression filters.
//!
//! Tags are inherited by union: a scenario's effective set contains its own
//! tags plus those of its feature, background, outline and examples block.
//! A [`TagExpression`] selects test cases by their effective tags, using the
//! `@tag`, `~@tag` and comma-for-OR syntax; separate expressions combine
//! with AND.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use derive_more::{Deref, From};
use thiserror::Error;

/// An ordered set of tag names, stored without the leading `@`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Deref, From)]
pub struct TagSet(BTreeSet<String>);

impl TagSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one tag. Returns `false` if it was already present.
    pub fn insert(&mut self, tag: impl Into<String>) -> bool {
        self.0.insert(tag.into())
    }

    /// Add every tag of `other`.
    pub fn merge(&mut self, other: &Self) {
        self.0.extend(other.0.iter().cloned());
    }

    /// Return the union of `self` and `other`.
    ///
    /// ```
    /// use wishes::tags::TagSet;
    ///
    /// let own: TagSet = ["fast"].into_iter().collect();
    /// let inherited: TagSet = ["db", "fast"].into_iter().collect();
    /// assert_eq!(own.union(&inherited).to_string(), "@db @fast");
    /// ```
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        let mut merged = self.clone();
        merged.merge(other);
        merged
    }

    /// Tag names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for TagSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl<'a> IntoIterator for &'a TagSet {
    type Item = &'a String;
    type IntoIter = std::collections::btree_set::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for TagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for tag in &self.0 {
            if !first {
                f.write_str(" ")?;
            }
            write!(f, "@{tag}")?;
            first = false;
        }
        Ok(())
    }
}

/// Error raised for malformed tag expressions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid tag expression at byte {offset}: {reason}")]
pub struct TagExpressionError {
    offset: usize,
    reason: String,
}

impl TagExpressionError {
    fn new(offset: usize, reason: impl Into<String>) -> Self {
        Self {
            offset,
            reason: reason.into(),
        }
    }

    /// Byte offset of the fault within the expression.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Term {
    Tag(String),
    Not(String),
}

impl Term {
    fn eval(&self, tags: &TagSet) -> bool {
        match self {
            Self::Tag(name) => tags.contains(name.as_str()),
            Self::Not(name) => !tags.contains(name.as_str()),
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tag(name) => write!(f, "@{name}"),
            Self::Not(name) => write!(f, "~@{name}"),
        }
    }
}

/// A conjunction of alternatives over tag names.
///
/// ```
/// use wishes::tags::{TagExpression, TagSet};
///
/// let expr = TagExpression::parse("@fast,@smoke")
///     .unwrap()
///     .and(TagExpression::parse("~@wip").unwrap());
/// let tags: TagSet = ["smoke"].into_iter().collect();
/// assert!(expr.matches(&tags));
/// let wip: TagSet = ["smoke", "wip"].into_iter().collect();
/// assert!(!expr.matches(&wip));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagExpression {
    clauses: Vec<Vec<Term>>,
}

impl TagExpression {
    /// Parse a comma-separated list of alternatives.
    ///
    /// # Errors
    ///
    /// Returns [`TagExpressionError`] when an alternative is empty, lacks
    /// its `@` marker or has an empty tag name.
    pub fn parse(input: &str) -> Result<Self, TagExpressionError> {
        let mut clause = Vec::new();
        let mut offset = 0;
        for alternative in input.split(',') {
            clause.push(parse_term(alternative, offset)?);
            offset += alternative.len() + 1;
        }
        Ok(Self {
            clauses: vec![clause],
        })
    }

    /// Require both `self` and `other` to match.
    #[must_use]
    pub fn and(mut self, other: Self) -> Self {
        self.clauses.extend(other.clauses);
        self
    }

    /// Parse several expressions and combine them with AND.
    ///
    /// An empty list matches everything.
    ///
    /// # Errors
    ///
    /// Returns the first [`TagExpressionError`].
    pub fn all<I, S>(inputs: I) -> Result<Self, TagExpressionError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        inputs
            .into_iter()
            .try_fold(Self::default(), |acc, input| {
                Ok(acc.and(Self::parse(input.as_ref())?))
            })
    }

    /// Evaluate the expression against `tags`.
    #[must_use]
    pub fn matches(&self, tags: &TagSet) -> bool {
        self.clauses
            .iter()
            .all(|clause| clause.iter().any(|term| term.eval(tags)))
    }
}

impl FromStr for TagExpression {
    type Err = TagExpressionError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        Self::parse(input)
    }
}

impl fmt::Display for TagExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self
            .clauses
            .iter()
            .map(|clause| {
                clause
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(",")
            })
            .collect();
        f.write_str(&rendered.join(" "))
    }
}

fn parse_term(raw: &str, offset: usize) -> Result<Term, TagExpressionError> {
    let leading = raw.len() - raw.trim_start().len();
    let start = offset + leading;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(TagExpressionError::new(start, "expected a tag"));
    }
    let (negated, rest) = trimmed
        .strip_prefix('~')
        .map_or((false, trimmed), |rest| (true, rest));
    let marker = start + usize::from(negated);
    let Some(name) = rest.strip_prefix('@') else {
        return Err(TagExpressionError::new(marker, "expected `@` before tag name"));
    };
    if name.is_empty() {
        return Err(TagExpressionError::new(marker + 1, "empty tag name"));
    }
    if let Some(position) = name.find(|c: char| c.is_whitespace() || c == '@' || c == '~') {
        return Err(TagExpressionError::new(
            marker + 1 + position,
            "unexpected character in tag name",
        ));
    }
    let name = name.to_string();
    Ok(if negated { Term::Not(name) } else { Term::Tag(name) })
}
