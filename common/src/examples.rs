//! Example values that accompany template placeholders.
//!
//! WhatsApp requires a sample value for every placeholder when a template is
//! submitted for review. While a user edits the text, the example collection is
//! reshaped by [`synchronize`] so that it always matches the placeholders that
//! are currently present:
//!
//! - positional text keeps one slot per index up to the highest index seen,
//!   preserving values by position;
//! - named text keeps one entry per distinct identifier in first-occurrence
//!   order, preserving values by name;
//! - anything else (no placeholders, or mixed styles) clears the collection.
//!
//! `synchronize` is a fixed point: feeding its output back in with the same text
//! yields an equal value, which lets callers skip writes when nothing changed.

use serde::{Deserialize, Serialize};

use crate::model::limits::MAX_POSITIONAL_INDEX;
use crate::params::{self, ParameterKind};

/// One example value for a named placeholder.
///
/// Field names follow the `body_text_named_params` wire format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedExample {
    pub param_name: String,
    #[serde(default)]
    pub example: String,
}

impl NamedExample {
    pub fn new(param_name: impl Into<String>, example: impl Into<String>) -> Self {
        Self {
            param_name: param_name.into(),
            example: example.into(),
        }
    }
}

/// Example values for a piece of template text.
///
/// Positional and named examples are mutually exclusive by construction.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Examples {
    #[default]
    None,
    /// Slot `i` holds the example for `{{i + 1}}`.
    Positional(Vec<String>),
    /// Ordered by first occurrence in the text; names are unique.
    Named(Vec<NamedExample>),
}

impl Examples {
    pub fn positional(&self) -> &[String] {
        match self {
            Examples::Positional(values) => values,
            _ => &[],
        }
    }

    pub fn named(&self) -> &[NamedExample] {
        match self {
            Examples::Named(values) => values,
            _ => &[],
        }
    }

    /// Example for a named placeholder, if that name has a slot.
    pub fn named_value(&self, name: &str) -> Option<&str> {
        self.named()
            .iter()
            .find(|ex| ex.param_name == name)
            .map(|ex| ex.example.as_str())
    }

    /// Example for a 1-based positional index, if that index has a slot.
    pub fn positional_value(&self, index: usize) -> Option<&str> {
        index
            .checked_sub(1)
            .and_then(|slot| self.positional().get(slot))
            .map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Examples::None => true,
            Examples::Positional(values) => values.is_empty(),
            Examples::Named(values) => values.is_empty(),
        }
    }
}

/// Builds the example collection that matches `text`, carrying over values
/// from `previous` wherever the same slot still exists.
pub fn synchronize(text: &str, previous: &Examples) -> Examples {
    match params::classify(text) {
        ParameterKind::Positional => {
            Examples::Positional(resize_positional(params::max_positional(text), previous.positional()))
        }
        ParameterKind::Named => Examples::Named(rekey_named(&params::distinct_named(text), previous.named())),
        ParameterKind::None | ParameterKind::Mixed => Examples::None,
    }
}

/// Resizes `previous` to `len` slots (clamped to the positional index limit),
/// keeping values by position and padding with empty strings.
pub fn resize_positional(len: usize, previous: &[String]) -> Vec<String> {
    let len = len.min(MAX_POSITIONAL_INDEX);
    (0..len)
        .map(|slot| previous.get(slot).cloned().unwrap_or_default())
        .collect()
}

fn rekey_named(names: &[String], previous: &[NamedExample]) -> Vec<NamedExample> {
    names
        .iter()
        .map(|name| {
            let example = previous
                .iter()
                .find(|ex| &ex.param_name == name)
                .map(|ex| ex.example.clone())
                .unwrap_or_default();
            NamedExample::new(name.clone(), example)
        })
        .collect()
}
