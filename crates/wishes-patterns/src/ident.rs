//! Identifier transliteration for generated test names.

use unicode_normalization::UnicodeNormalization;

/// Turn a free-text title into an identifier fragment.
///
/// The title is decomposed (NFKD) and reduced to ASCII, characters other
/// than word characters, whitespace and hyphens are dropped, surrounding
/// whitespace is trimmed, and runs of whitespace or hyphens collapse to a
/// single underscore. Case is preserved.
///
/// # Examples
///
/// ```
/// use wishes_patterns::slugify;
///
/// assert_eq!(slugify("With a Title"), "With_a_Title");
/// assert_eq!(slugify("Für-wahr!"), "Fur_wahr");
/// ```
#[must_use]
pub fn slugify(title: &str) -> String {
    let kept: String = title
        .nfkd()
        .filter(char::is_ascii)
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-' || c.is_ascii_whitespace())
        .collect();

    let mut slug = String::with_capacity(kept.len());
    let mut in_separator = false;
    for ch in kept.trim().chars() {
        if ch == '-' || ch.is_ascii_whitespace() {
            if !in_separator {
                slug.push('_');
                in_separator = true;
            }
        } else {
            slug.push(ch);
            in_separator = false;
        }
    }
    slug
}
