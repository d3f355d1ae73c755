//! The in-progress template form (`TemplateDraft`) and its sections.
//!
//! Sections whose fields depend on a kind tag (header formats, button types)
//! are sum types, so the validator and the wire serialiser match them
//! exhaustively instead of probing optional fields.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::examples;
use crate::model::body::Body;
use crate::model::limits::MAX_BUTTONS;
use crate::name;
use crate::params;

/// Errors for edits that address something the draft does not have.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftEditError {
    #[error("no example slot for positional parameter {{{{{0}}}}}")]
    NoPositionalSlot(usize),
    #[error("no example slot for named parameter {{{{{0}}}}}")]
    NoNamedSlot(String),
    #[error("a template can have at most {} buttons", MAX_BUTTONS)]
    ButtonLimitReached,
    #[error("no button at position {0}")]
    NoButton(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    /// Promotional content, offers and campaigns.
    #[default]
    Marketing,
    /// Order updates, notifications and alerts.
    Utility,
    /// One-time passwords and verification codes.
    Authentication,
}

impl Category {
    pub const ALL: [Category; 3] = [
        Category::Marketing,
        Category::Utility,
        Category::Authentication,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Marketing => "MARKETING",
            Category::Utility => "UTILITY",
            Category::Authentication => "AUTHENTICATION",
        }
    }

    pub fn parse(value: &str) -> Option<Category> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(value.trim()))
    }
}

/// Media formats a header can carry instead of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HeaderFormat {
    Text,
    Image,
    Video,
    Document,
}

impl HeaderFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            HeaderFormat::Text => "TEXT",
            HeaderFormat::Image => "IMAGE",
            HeaderFormat::Video => "VIDEO",
            HeaderFormat::Document => "DOCUMENT",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "UPPERCASE")]
pub enum Header {
    #[default]
    None,
    Text(TextHeader),
    Image(MediaHeader),
    Video(MediaHeader),
    Document(MediaHeader),
}

impl Header {
    pub fn text(text: impl Into<String>) -> Self {
        Header::Text(TextHeader::new(text))
    }

    pub fn media(format: HeaderFormat, media_url: impl Into<String>) -> Self {
        let media = MediaHeader {
            media_url: media_url.into(),
        };
        match format {
            HeaderFormat::Text => Header::Text(TextHeader::new(media.media_url)),
            HeaderFormat::Image => Header::Image(media),
            HeaderFormat::Video => Header::Video(media),
            HeaderFormat::Document => Header::Document(media),
        }
    }

    /// `None` for [`Header::None`].
    pub fn format(&self) -> Option<HeaderFormat> {
        match self {
            Header::None => None,
            Header::Text(_) => Some(HeaderFormat::Text),
            Header::Image(_) => Some(HeaderFormat::Image),
            Header::Video(_) => Some(HeaderFormat::Video),
            Header::Document(_) => Some(HeaderFormat::Document),
        }
    }

    pub fn media_url(&self) -> Option<&str> {
        match self {
            Header::Image(m) | Header::Video(m) | Header::Document(m) => Some(&m.media_url),
            Header::None | Header::Text(_) => None,
        }
    }
}

/// Text header. Headers only support positional placeholders; their examples
/// are kept in step with the text like the body's.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "RawTextHeader")]
pub struct TextHeader {
    text: String,
    examples: Vec<String>,
}

impl TextHeader {
    pub fn new(text: impl Into<String>) -> Self {
        Self::with_examples(text, Vec::new())
    }

    pub fn with_examples(text: impl Into<String>, previous: Vec<String>) -> Self {
        let text = text.into();
        let examples = examples::resize_positional(params::max_positional(&text), &previous);
        Self { text, examples }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn examples(&self) -> &[String] {
        &self.examples
    }

    pub fn set_text(&mut self, text: impl Into<String>) -> bool {
        self.text = text.into();
        let next = examples::resize_positional(params::max_positional(&self.text), &self.examples);
        if next == self.examples {
            return false;
        }
        self.examples = next;
        true
    }

    pub fn set_example(&mut self, index: usize, value: impl Into<String>) -> Result<(), DraftEditError> {
        match index.checked_sub(1).and_then(|i| self.examples.get_mut(i)) {
            Some(slot) => {
                *slot = value.into();
                Ok(())
            }
            None => Err(DraftEditError::NoPositionalSlot(index)),
        }
    }
}

#[derive(Deserialize)]
struct RawTextHeader {
    #[serde(default)]
    text: String,
    #[serde(default)]
    examples: Vec<String>,
}

impl From<RawTextHeader> for TextHeader {
    fn from(raw: RawTextHeader) -> Self {
        TextHeader::with_examples(raw.text, raw.examples)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MediaHeader {
    #[serde(default)]
    pub media_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Footer {
    #[serde(default)]
    pub text: String,
}

/// A call-to-action or quick-reply button.
///
/// The serde shape is the wire shape: `{"type": "URL", "text": ..., "url": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Button {
    PhoneNumber {
        #[serde(default)]
        text: String,
        #[serde(default)]
        phone_number: String,
    },
    Url {
        #[serde(default)]
        text: String,
        #[serde(default)]
        url: String,
    },
    QuickReply {
        #[serde(default)]
        text: String,
    },
    CopyCode {
        #[serde(default)]
        text: String,
        #[serde(default)]
        example: String,
    },
    Flow {
        #[serde(default)]
        text: String,
        #[serde(default)]
        flow_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        flow_name: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        flow_json: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        flow_action: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        navigate_screen: Option<String>,
    },
}

impl Button {
    pub fn text(&self) -> &str {
        match self {
            Button::PhoneNumber { text, .. }
            | Button::Url { text, .. }
            | Button::QuickReply { text }
            | Button::CopyCode { text, .. }
            | Button::Flow { text, .. } => text,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Button::PhoneNumber { .. } => "PHONE_NUMBER",
            Button::Url { .. } => "URL",
            Button::QuickReply { .. } => "QUICK_REPLY",
            Button::CopyCode { .. } => "COPY_CODE",
            Button::Flow { .. } => "FLOW",
        }
    }

    /// The field this button type cannot be submitted without, with its
    /// human-readable label. Quick replies need nothing beyond their text.
    pub fn required_field(&self) -> Option<(&'static str, &str)> {
        match self {
            Button::PhoneNumber { phone_number, .. } => Some(("phone number", phone_number)),
            Button::Url { url, .. } => Some(("URL", url)),
            Button::CopyCode { example, .. } => Some(("example", example)),
            Button::Flow { flow_id, .. } => Some(("flow ID", flow_id)),
            Button::QuickReply { .. } => None,
        }
    }
}

/// In-progress template form state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: Category,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default)]
    pub header: Header,
    #[serde(default)]
    pub body: Body,
    #[serde(default)]
    pub footer: Footer,
    #[serde(default)]
    pub buttons: Vec<Button>,
}

fn default_language() -> String {
    "en".to_string()
}

impl Default for TemplateDraft {
    fn default() -> Self {
        Self::new(Category::default())
    }
}

impl TemplateDraft {
    /// Starts the create flow once a category has been picked.
    pub fn new(category: Category) -> Self {
        Self {
            name: String::new(),
            category,
            language: default_language(),
            header: Header::None,
            body: Body::default(),
            footer: Footer::default(),
            buttons: Vec::new(),
        }
    }

    /// Stores `input` as the template name after keystroke sanitisation.
    pub fn set_name(&mut self, input: &str) {
        self.name = name::sanitize_name(input);
    }

    pub fn add_button(&mut self, button: Button) -> Result<(), DraftEditError> {
        if self.buttons.len() >= MAX_BUTTONS {
            return Err(DraftEditError::ButtonLimitReached);
        }
        self.buttons.push(button);
        Ok(())
    }

    pub fn remove_button(&mut self, index: usize) -> Result<Button, DraftEditError> {
        if index >= self.buttons.len() {
            return Err(DraftEditError::NoButton(index));
        }
        Ok(self.buttons.remove(index))
    }

    pub fn replace_button(&mut self, index: usize, button: Button) -> Result<Button, DraftEditError> {
        match self.buttons.get_mut(index) {
            Some(slot) => Ok(std::mem::replace(slot, button)),
            None => Err(DraftEditError::NoButton(index)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn set_name_sanitises_keystrokes() {
        let mut draft = TemplateDraft::new(Category::Utility);
        draft.set_name("Welcome Message!");
        assert_eq!(draft.name, "welcome_message_");
    }

    #[test]
    fn button_limit_is_enforced() {
        let mut draft = TemplateDraft::default();
        for i in 0..MAX_BUTTONS {
            draft
                .add_button(Button::QuickReply { text: format!("r{i}") })
                .unwrap();
        }
        assert_eq!(
            draft.add_button(Button::QuickReply { text: "one more".into() }),
            Err(DraftEditError::ButtonLimitReached)
        );
        assert!(draft.remove_button(3).is_ok());
        assert_eq!(draft.buttons.len(), MAX_BUTTONS - 1);
        assert_eq!(draft.remove_button(42), Err(DraftEditError::NoButton(42)));
    }

    #[test]
    fn header_text_examples_follow_text() {
        let mut header = TextHeader::new("Order {{1}}");
        header.set_example(1, "#123").unwrap();
        assert!(header.set_text("Order {{1}} for {{2}}"));
        assert_eq!(header.examples(), ["#123", ""]);
        assert!(header.set_text("Order"));
        assert!(header.examples().is_empty());
    }

    #[test]
    fn draft_json_uses_tagged_sections() {
        let draft: TemplateDraft = serde_json::from_value(json!({
            "name": "promo",
            "category": "MARKETING",
            "header": {"type": "IMAGE", "media_url": "https://cdn.example/promo.png"},
            "body": {"text": "Hi {{1}}", "examples": ["Ana"]},
            "buttons": [
                {"type": "QUICK_REPLY", "text": "Stop"},
                {"type": "FLOW", "text": "Book", "flow_id": "42"}
            ]
        }))
        .unwrap();
        assert_eq!(draft.language, "en");
        assert_eq!(draft.header.media_url(), Some("https://cdn.example/promo.png"));
        assert_eq!(draft.body.examples().positional(), ["Ana"]);
        assert_eq!(draft.buttons[1].required_field(), Some(("flow ID", "42")));
    }

    #[test]
    fn text_header_deserialisation_resizes_examples() {
        let header: Header = serde_json::from_value(json!({
            "type": "TEXT", "text": "Hi {{1}}", "examples": ["a", "b"]
        }))
        .unwrap();
        match header {
            Header::Text(text) => assert_eq!(text.examples(), ["a"]),
            other => panic!("unexpected header {other:?}"),
        }
    }

    #[test]
    fn category_parse_is_case_insensitive() {
        assert_eq!(Category::parse("utility"), Some(Category::Utility));
        assert_eq!(Category::parse("OTHER"), None);
    }
}
