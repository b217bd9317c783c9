//! Pipe-delimited tables attached to steps and examples blocks.

use std::collections::HashMap;

use thiserror::Error;
use wishes_patterns::{Substitution, outline_key};

/// Table shape errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum HashesError {
    /// A data row has a different number of cells than the key row.
    #[error("table row {row} has {found} cells, expected {expected}")]
    UnevenRow {
        /// One-based data row index.
        row: usize,
        /// Number of column keys.
        expected: usize,
        /// Number of cells found.
        found: usize,
    },
}

/// A table: ordered column keys and ordered value rows.
///
/// ```
/// use wishes::model::Hashes;
///
/// let mut table = Hashes::new(["key", "value"]);
/// table.add_row(["k1", "v1"]).unwrap();
/// let row = table.iter().next().unwrap();
/// assert_eq!(row.get("value"), Some("v1"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hashes {
    keys: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Hashes {
    /// Create a table with the given column keys and no rows.
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a data row.
    ///
    /// # Errors
    ///
    /// Returns [`HashesError::UnevenRow`] when the cell count differs from
    /// the key count.
    pub fn add_row<I, S>(&mut self, values: I) -> Result<(), HashesError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let row: Vec<String> = values.into_iter().map(Into::into).collect();
        if row.len() != self.keys.len() {
            return Err(HashesError::UnevenRow {
                row: self.rows.len() + 1,
                expected: self.keys.len(),
                found: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    /// Column keys.
    #[must_use]
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Raw value rows.
    #[must_use]
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of data rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no data rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate over data rows as key/value views.
    pub fn iter(&self) -> impl Iterator<Item = Row<'_>> {
        self.rows.iter().map(|values| Row {
            keys: &self.keys,
            values,
        })
    }

    /// Rewrite each key into the placeholder it stands for in an outline.
    ///
    /// See [`outline_key`] for the bracket rules.
    #[must_use]
    pub fn with_outline_keys(&self) -> Self {
        Self {
            keys: self.keys.iter().map(|key| outline_key(key)).collect(),
            rows: self.rows.clone(),
        }
    }

    /// Replace placeholders in every key and value.
    #[must_use]
    pub fn fill(&self, substitution: &Substitution) -> Self {
        Self {
            keys: self.keys.iter().map(|key| substitution.apply(key)).collect(),
            rows: self
                .rows
                .iter()
                .map(|row| row.iter().map(|value| substitution.apply(value)).collect())
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Hashes {
    type Item = Row<'a>;
    type IntoIter = Box<dyn Iterator<Item = Row<'a>> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

/// One data row viewed through the column keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Row<'a> {
    keys: &'a [String],
    values: &'a [String],
}

impl<'a> Row<'a> {
    /// Value in the column named `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&'a str> {
        self.keys
            .iter()
            .position(|candidate| candidate == key)
            .and_then(|index| self.values.get(index))
            .map(String::as_str)
    }

    /// `(key, value)` pairs in column order.
    pub fn pairs(&self) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
        self.keys
            .iter()
            .zip(self.values)
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Owned key to value map.
    #[must_use]
    pub fn to_map(&self) -> HashMap<String, String> {
        self.pairs()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[expect(clippy::expect_used, reason = "test tables are well formed")]
    fn table(keys: &[&str], rows: &[&[&str]]) -> Hashes {
        let mut hashes = Hashes::new(keys.iter().copied());
        for row in rows {
            hashes
                .add_row(row.iter().copied())
                .expect("row must match the keys");
        }
        hashes
    }

    #[test]
    fn iterates_rows_as_maps() {
        let hashes = table(&["key", "value"], &[&["k1", "v1"], &["k2", "v2"]]);
        let maps: Vec<HashMap<String, String>> = hashes.iter().map(|row| row.to_map()).collect();
        assert_eq!(maps.len(), 2);
        assert_eq!(maps.first().and_then(|m| m.get("key")).map(String::as_str), Some("k1"));
        assert_eq!(maps.get(1).and_then(|m| m.get("value")).map(String::as_str), Some("v2"));
    }

    #[test]
    fn rejects_uneven_rows() {
        let mut hashes = Hashes::new(["a", "b"]);
        assert_eq!(
            hashes.add_row(["1"]),
            Err(HashesError::UnevenRow {
                row: 1,
                expected: 2,
                found: 1
            })
        );
        assert!(hashes.is_empty());
    }

    #[test]
    fn wraps_keys_for_outlines() {
        let hashes = table(&["name", "<done>", "(x)"], &[&["a", "b", "c"]]);
        assert_eq!(hashes.with_outline_keys().keys(), ["<name>", "<done>", "(x)"]);
    }

    #[test]
    #[expect(clippy::expect_used, reason = "substitution of literals must build")]
    fn fills_keys_and_values() {
        let hashes = table(&["<col>", "fixed"], &[&["<v>", "v"]]);
        let sub = Substitution::new([("<col>", "name"), ("<v>", "value")])
            .expect("substitution builds");
        let filled = hashes.fill(&sub);
        assert_eq!(filled.keys(), ["name", "fixed"]);
        assert_eq!(filled.rows(), [vec!["value".to_string(), "v".to_string()]]);
    }

    #[test]
    fn row_lookup_by_missing_key_is_none() {
        let hashes = table(&["a"], &[&["1"]]);
        assert_eq!(hashes.iter().next().and_then(|row| row.get("b")), None);
    }
}
