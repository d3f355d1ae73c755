//! Placeholder classification and extraction for template text.
//!
//! Template bodies reference their arguments with double-brace placeholders.
//! Two styles exist and a single text may only use one of them:
//!
//! - **Positional**: `{{1}}`, `{{2}}`, … (1-based, digits only)
//! - **Named**: `{{customer_name}}` (`[A-Za-z_][A-Za-z0-9_]*`)
//!
//! Every `{{…}}` occurrence is scanned exactly once and sorted into one of the
//! two styles, so `{{1}}` can never be counted as a named placeholder. Content
//! matching neither style (`{{123abc}}`, `{{ name }}`, `{{}}`) is *malformed*:
//! it does not influence the classification and is reported separately so the
//! validator can reject it.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{([^{}]*)\}\}").expect("placeholder regex is valid"));

static IDENTIFIER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier regex is valid")
});

/// The placeholder style used by a piece of template text.
///
/// Always derived from the text, never stored next to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterKind {
    #[default]
    None,
    Positional,
    Named,
    /// Both styles in one text. Never submittable.
    Mixed,
}

/// A single `{{…}}` occurrence, already sorted by style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placeholder<'a> {
    Positional(usize),
    Named(&'a str),
    Malformed(&'a str),
}

/// Iterates over every placeholder in `text`, in order of appearance.
pub fn placeholders(text: &str) -> impl Iterator<Item = Placeholder<'_>> {
    placeholder_spans(text).map(|(_, placeholder)| placeholder)
}

/// Like [`placeholders`], with the byte range each `{{…}}` occupies.
pub fn placeholder_spans(text: &str) -> impl Iterator<Item = (Range<usize>, Placeholder<'_>)> {
    PLACEHOLDER_RE.captures_iter(text).filter_map(|caps| {
        let whole = caps.get(0)?;
        let inner = caps.get(1)?.as_str();
        Some((whole.range(), sort_placeholder(inner)))
    })
}

fn sort_placeholder(inner: &str) -> Placeholder<'_> {
    if !inner.is_empty() && inner.bytes().all(|b| b.is_ascii_digit()) {
        // Digit runs that overflow are not addressable positions.
        return match inner.parse::<usize>() {
            Ok(index) => Placeholder::Positional(index),
            Err(_) => Placeholder::Malformed(inner),
        };
    }
    if IDENTIFIER_RE.is_match(inner) {
        Placeholder::Named(inner)
    } else {
        Placeholder::Malformed(inner)
    }
}

/// Classifies the placeholder style of `text`.
///
/// Total over every input, including the empty string.
pub fn classify(text: &str) -> ParameterKind {
    let mut positional = false;
    let mut named = false;
    for placeholder in placeholders(text) {
        match placeholder {
            Placeholder::Positional(_) => positional = true,
            Placeholder::Named(_) => named = true,
            Placeholder::Malformed(_) => {}
        }
        if positional && named {
            return ParameterKind::Mixed;
        }
    }
    match (positional, named) {
        (true, false) => ParameterKind::Positional,
        (false, true) => ParameterKind::Named,
        (true, true) => ParameterKind::Mixed,
        (false, false) => ParameterKind::None,
    }
}

/// All positional indices in order of appearance, duplicates included.
pub fn extract_positional(text: &str) -> Vec<usize> {
    placeholders(text)
        .filter_map(|p| match p {
            Placeholder::Positional(index) => Some(index),
            _ => None,
        })
        .collect()
}

/// All named identifiers in order of appearance, duplicates included.
pub fn extract_named(text: &str) -> Vec<String> {
    placeholders(text)
        .filter_map(|p| match p {
            Placeholder::Named(name) => Some(name.to_string()),
            _ => None,
        })
        .collect()
}

/// Distinct named identifiers, keeping the first occurrence order.
pub fn distinct_named(text: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for name in extract_named(text) {
        if !names.contains(&name) {
            names.push(name);
        }
    }
    names
}

/// Highest positional index referenced by `text`, `0` when there is none.
pub fn max_positional(text: &str) -> usize {
    extract_positional(text).into_iter().max().unwrap_or(0)
}

/// Raw contents of every placeholder that is neither positional nor named.
pub fn malformed_placeholders(text: &str) -> Vec<String> {
    placeholders(text)
        .filter_map(|p| match p {
            Placeholder::Malformed(raw) => Some(raw.to_string()),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_positional_only_text() {
        assert_eq!(classify("Hi {{1}}, your code is {{2}}"), ParameterKind::Positional);
        assert_eq!(classify("{{10}}{{3}}"), ParameterKind::Positional);
    }

    #[test]
    fn classifies_named_only_text() {
        assert_eq!(classify("Hi {{first_name}}"), ParameterKind::Named);
        assert_eq!(classify("{{_x}} and {{Order9}}"), ParameterKind::Named);
    }

    #[test]
    fn classifies_mixed_text() {
        assert_eq!(classify("Hello {{1}} and {{name}}"), ParameterKind::Mixed);
        assert_eq!(classify("{{name}} {{2}}"), ParameterKind::Mixed);
    }

    #[test]
    fn classifies_text_without_placeholders() {
        assert_eq!(classify(""), ParameterKind::None);
        assert_eq!(classify("Plain text with {single} braces"), ParameterKind::None);
        assert_eq!(classify("{{ }}"), ParameterKind::None);
    }

    #[test]
    fn digits_are_never_counted_as_named() {
        assert!(extract_named("{{1}} {{22}}").is_empty());
        assert_eq!(extract_positional("{{1}} {{22}}"), vec![1, 22]);
    }

    #[test]
    fn malformed_placeholders_do_not_change_classification() {
        assert_eq!(classify("Code {{123abc}}"), ParameterKind::None);
        assert_eq!(classify("Code {{123abc}} for {{1}}"), ParameterKind::Positional);
        assert_eq!(
            malformed_placeholders("{{123abc}} {{ name }} {{}} {{ok}}"),
            vec!["123abc", " name ", ""]
        );
    }

    #[test]
    fn overflowing_index_is_malformed() {
        let text = "{{99999999999999999999999999}}";
        assert_eq!(classify(text), ParameterKind::None);
        assert_eq!(malformed_placeholders(text).len(), 1);
    }

    #[test]
    fn extraction_keeps_order_and_duplicates() {
        assert_eq!(extract_positional("{{2}} {{1}} {{2}}"), vec![2, 1, 2]);
        assert_eq!(extract_named("{{b}} {{a}} {{b}}"), vec!["b", "a", "b"]);
        assert_eq!(distinct_named("{{b}} {{a}} {{b}}"), vec!["b", "a"]);
    }

    #[test]
    fn triple_braces_match_the_inner_placeholder() {
        assert_eq!(extract_positional("{{{1}}}"), vec![1]);
    }

    #[test]
    fn max_positional_tolerates_gaps() {
        assert_eq!(max_positional("{{1}} {{4}}"), 4);
        assert_eq!(max_positional("no params"), 0);
    }
}
