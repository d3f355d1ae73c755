use serde::{Deserialize, Serialize};

use crate::examples::{self, Examples, NamedExample};
use crate::model::template::DraftEditError;
use crate::params::{self, ParameterKind};

/// Message body of a template draft.
///
/// The text is the single source of truth: the parameter kind is derived from
/// it on every read, and the example collection is reshaped every time the
/// text changes. Fields are private so the two cannot drift apart.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "RawBody", into = "RawBody")]
pub struct Body {
    text: String,
    examples: Examples,
}

impl Body {
    pub fn new(text: impl Into<String>) -> Self {
        Self::with_examples(text, Examples::None)
    }

    /// Builds a body from text and a previous example collection, keeping the
    /// values that still have a slot.
    pub fn with_examples(text: impl Into<String>, previous: Examples) -> Self {
        let text = text.into();
        let examples = examples::synchronize(&text, &previous);
        Self { text, examples }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn examples(&self) -> &Examples {
        &self.examples
    }

    pub fn parameter_kind(&self) -> ParameterKind {
        params::classify(&self.text)
    }

    /// Replaces the text and reshapes the examples.
    ///
    /// Returns `true` when the example collection changed.
    pub fn set_text(&mut self, text: impl Into<String>) -> bool {
        self.text = text.into();
        self.resync()
    }

    /// Re-runs the example synchroniser against the current text, writing only
    /// when the result differs.
    pub fn resync(&mut self) -> bool {
        let next = examples::synchronize(&self.text, &self.examples);
        if next == self.examples {
            return false;
        }
        log::debug!(
            "body examples reshaped for {:?} parameters",
            self.parameter_kind()
        );
        self.examples = next;
        true
    }

    /// Sets the example for `{{index}}` (1-based).
    pub fn set_positional_example(
        &mut self,
        index: usize,
        value: impl Into<String>,
    ) -> Result<(), DraftEditError> {
        let slot = match &mut self.examples {
            Examples::Positional(values) => index.checked_sub(1).and_then(|i| values.get_mut(i)),
            _ => None,
        };
        match slot {
            Some(slot) => {
                *slot = value.into();
                Ok(())
            }
            None => Err(DraftEditError::NoPositionalSlot(index)),
        }
    }

    /// Sets the example for `{{name}}`.
    pub fn set_named_example(
        &mut self,
        name: &str,
        value: impl Into<String>,
    ) -> Result<(), DraftEditError> {
        let slot = match &mut self.examples {
            Examples::Named(values) => values.iter_mut().find(|ex| ex.param_name == name),
            _ => None,
        };
        match slot {
            Some(slot) => {
                slot.example = value.into();
                Ok(())
            }
            None => Err(DraftEditError::NoNamedSlot(name.to_string())),
        }
    }
}

/// JSON shape of [`Body`]. `parameter_type` is written for convenience and
/// ignored on input.
#[derive(Serialize, Deserialize)]
struct RawBody {
    #[serde(default)]
    text: String,
    #[serde(default, skip_deserializing)]
    parameter_type: ParameterKind,
    #[serde(default)]
    examples: Vec<String>,
    #[serde(default)]
    named_examples: Vec<NamedExample>,
}

impl From<RawBody> for Body {
    fn from(raw: RawBody) -> Self {
        let previous = if raw.named_examples.is_empty() {
            Examples::Positional(raw.examples)
        } else {
            Examples::Named(raw.named_examples)
        };
        Body::with_examples(raw.text, previous)
    }
}

impl From<Body> for RawBody {
    fn from(body: Body) -> Self {
        let parameter_type = body.parameter_kind();
        let (examples, named_examples) = match body.examples {
            Examples::None => (Vec::new(), Vec::new()),
            Examples::Positional(values) => (values, Vec::new()),
            Examples::Named(values) => (Vec::new(), values),
        };
        RawBody {
            text: body.text,
            parameter_type,
            examples,
            named_examples,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn set_text_reports_changes_only_once() {
        let mut body = Body::default();
        assert!(body.set_text("Order {{1}} shipped"));
        assert!(!body.resync());
        assert!(!body.set_text("Order {{1}} shipped!"));
    }

    #[test]
    fn typing_placeholders_keeps_entered_examples() {
        let mut body = Body::new("Hi {{1}}");
        body.set_positional_example(1, "Budi").unwrap();
        body.set_text("Hi {{1}}, total {{");
        body.set_text("Hi {{1}}, total {{2}}");
        assert_eq!(body.examples().positional(), ["Budi", ""]);
    }

    #[test]
    fn parameter_kind_follows_text() {
        let mut body = Body::new("{{name}}");
        assert_eq!(body.parameter_kind(), ParameterKind::Named);
        body.set_text("{{1}}");
        assert_eq!(body.parameter_kind(), ParameterKind::Positional);
    }

    #[test]
    fn slot_edits_reject_missing_slots() {
        let mut body = Body::new("{{name}}");
        assert!(body.set_named_example("name", "Budi").is_ok());
        assert_eq!(
            body.set_named_example("other", "x"),
            Err(DraftEditError::NoNamedSlot("other".into()))
        );
        assert_eq!(
            body.set_positional_example(1, "x"),
            Err(DraftEditError::NoPositionalSlot(1))
        );
    }

    #[test]
    fn deserialising_resyncs_examples_and_ignores_parameter_type() {
        let body: Body = serde_json::from_value(json!({
            "text": "Halo {{1}}",
            "parameter_type": "named",
            "examples": ["Budi", "stale"]
        }))
        .unwrap();
        assert_eq!(body.examples().positional(), ["Budi"]);
        assert_eq!(body.parameter_kind(), ParameterKind::Positional);
    }

    #[test]
    fn serialises_derived_parameter_type() {
        let body = Body::new("Hi {{first}}");
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(
            value,
            json!({
                "text": "Hi {{first}}",
                "parameter_type": "named",
                "examples": [],
                "named_examples": [{"param_name": "first", "example": ""}]
            })
        );
    }
}
