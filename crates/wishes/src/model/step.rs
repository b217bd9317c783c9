//! Steps and their attachments.

use std::fmt;

use wishes_patterns::{StepKeyword, Substitution};

use super::Hashes;
use crate::registry::{Binding, StepDefinitionError, StepRegistry};

/// One Given/When/Then/And/But line with its optional multiline block or
/// table, bound to at most one step definition.
pub struct Step<W> {
    keyword: StepKeyword,
    text: String,
    multilines: Option<Vec<String>>,
    hashes: Option<Hashes>,
    binding: Option<Binding<W>>,
}

impl<W> Step<W> {
    /// Create a step and bind it against `registry`.
    ///
    /// # Errors
    ///
    /// Returns [`StepDefinitionError::Ambiguous`] when more than one
    /// definition matches.
    pub fn new(
        keyword: StepKeyword,
        text: impl Into<String>,
        registry: &StepRegistry<W>,
    ) -> Result<Self, StepDefinitionError> {
        let text = text.into();
        let binding = registry.resolve(keyword, &text)?;
        if binding.is_none() {
            log::debug!("no definition for step `{keyword} {text}`");
        }
        Ok(Self {
            keyword,
            text,
            multilines: None,
            hashes: None,
            binding,
        })
    }

    /// Attach multiline block lines.
    #[must_use]
    pub fn with_multiline(mut self, lines: Vec<String>) -> Self {
        self.multilines = Some(lines);
        self
    }

    /// Attach a table.
    #[must_use]
    pub fn with_hashes(mut self, hashes: Hashes) -> Self {
        self.hashes = Some(hashes);
        self
    }

    /// Step kind.
    #[must_use]
    pub fn keyword(&self) -> StepKeyword {
        self.keyword
    }

    /// Step text after the keyword.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Raw multiline block lines.
    #[must_use]
    pub fn multilines(&self) -> Option<&[String]> {
        self.multilines.as_deref()
    }

    /// Multiline block as one string, every line newline-terminated.
    ///
    /// ```
    /// use wishes::model::Step;
    /// use wishes::registry::StepRegistry;
    /// use wishes_patterns::StepKeyword;
    ///
    /// let registry = StepRegistry::<()>::new();
    /// let step = Step::new(StepKeyword::Given, "a text", &registry)
    ///     .unwrap()
    ///     .with_multiline(vec!["multiline content".into()]);
    /// assert_eq!(step.multiline().as_deref(), Some("multiline content\n"));
    /// ```
    #[must_use]
    pub fn multiline(&self) -> Option<String> {
        self.multilines.as_ref().map(|lines| {
            lines.iter().fold(String::new(), |mut joined, line| {
                joined.push_str(line);
                joined.push('\n');
                joined
            })
        })
    }

    /// Attached table.
    #[must_use]
    pub fn hashes(&self) -> Option<&Hashes> {
        self.hashes.as_ref()
    }

    /// Resolved definition and captures, if the step is defined.
    #[must_use]
    pub fn binding(&self) -> Option<&Binding<W>> {
        self.binding.as_ref()
    }

    /// Whether a definition matched.
    #[must_use]
    pub fn is_defined(&self) -> bool {
        self.binding.is_some()
    }

    /// Copy the step with every placeholder replaced, then rebind it.
    ///
    /// Text, multiline lines and table keys and values are all filled in
    /// one simultaneous pass each.
    ///
    /// # Errors
    ///
    /// Returns [`StepDefinitionError::Ambiguous`] when the filled text
    /// matches more than one definition.
    pub fn fill_from_example(
        &self,
        substitution: &Substitution,
        registry: &StepRegistry<W>,
    ) -> Result<Self, StepDefinitionError> {
        let mut filled = Self::new(self.keyword, substitution.apply(&self.text), registry)?;
        filled.multilines = self.multilines.as_ref().map(|lines| {
            lines
                .iter()
                .map(|line| substitution.apply(line))
                .collect()
        });
        filled.hashes = self.hashes.as_ref().map(|hashes| hashes.fill(substitution));
        Ok(filled)
    }
}

impl<W> Clone for Step<W> {
    fn clone(&self) -> Self {
        Self {
            keyword: self.keyword,
            text: self.text.clone(),
            multilines: self.multilines.clone(),
            hashes: self.hashes.clone(),
            binding: self.binding.clone(),
        }
    }
}

impl<W> fmt::Display for Step<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.keyword, self.text)
    }
}

impl<W> fmt::Debug for Step<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Step")
            .field("keyword", &self.keyword)
            .field("text", &self.text)
            .field("multilines", &self.multilines)
            .field("hashes", &self.hashes)
            .field("binding", &self.binding)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::StepError;

    fn registry() -> StepRegistry<()> {
        let mut registry = StepRegistry::new();
        let defined = registry
            .define_step(r"a (\w+) with (\w+)", |_| Ok(()))
            .map(|_| ());
        assert!(defined.is_ok());
        registry
    }

    #[expect(clippy::expect_used, reason = "test steps are unambiguous")]
    fn step(text: &str, registry: &StepRegistry<()>) -> Step<()> {
        Step::new(StepKeyword::Given, text, registry).expect("step binds")
    }

    #[test]
    fn placeholders_stay_verbatim_outside_outlines() {
        let registry = registry();
        let step = step("a <key> with <value>", &registry);
        assert_eq!(step.text(), "a <key> with <value>");
        assert_eq!(step.to_string(), "Given a <key> with <value>");
    }

    #[test]
    #[expect(clippy::expect_used, reason = "literal substitution and unambiguous steps")]
    fn fill_replaces_text_multiline_and_table() {
        let registry = registry();
        let mut table = Hashes::new(["<key>"]);
        assert!(table.add_row(["<value>"]).is_ok());
        let template = step("a <key> with <value>", &registry)
            .with_multiline(vec!["<key>:".into(), "  <value>".into()])
            .with_hashes(table);
        let sub = Substitution::new([("<key>", "k1"), ("<value>", "v1")]).expect("builds");

        let filled = template
            .fill_from_example(&sub, &registry)
            .expect("filled step binds");

        assert_eq!(filled.text(), "a k1 with v1");
        assert_eq!(filled.multiline().as_deref(), Some("k1:\n  v1\n"));
        assert_eq!(filled.hashes().map(|h| h.keys().to_vec()), Some(vec!["k1".into()]));
        assert_eq!(
            filled.binding().map(|binding| binding.args().to_vec()),
            Some(vec!["k1".to_string(), "v1".to_string()])
        );
        assert_eq!(template.text(), "a <key> with <value>");
    }

    #[test]
    fn filled_text_is_rebound() {
        let mut registry = StepRegistry::<()>::new();
        let defined = registry
            .define_step("^Given exactly 1$", |_| Ok(()))
            .map(|_| ());
        assert!(defined.is_ok());
        let template = step("exactly <n>", &registry);
        assert!(!template.is_defined());
        let filled = Substitution::new([("<n>", "1")])
            .ok()
            .and_then(|sub| template.fill_from_example(&sub, &registry).ok());
        assert_eq!(filled.map(|step| step.is_defined()), Some(true));
    }

    #[test]
    fn fill_detects_new_ambiguity() {
        let mut registry = StepRegistry::<()>::new();
        let defined = registry
            .define_step("step 1", |_| Ok(()))
            .and_then(|registry| registry.define_step(r"step \d", |_| Err(StepError::assertion("x"))))
            .map(|_| ());
        assert!(defined.is_ok());
        let template = step("step <n>", &registry);
        let result = Substitution::new([("<n>", "1")])
            .ok()
            .map(|sub| template.fill_from_example(&sub, &registry));
        assert!(matches!(result, Some(Err(StepDefinitionError::Ambiguous { .. }))));
    }

    #[test]
    fn empty_block_is_a_blank_string() {
        let registry = registry();
        assert_eq!(
            step("x", &registry).with_multiline(Vec::new()).multiline(),
            Some(String::new())
        );
        assert_eq!(step("x", &registry).multiline(), None);
    }
}
