//! Seeding drafts from existing templates.
//!
//! Two sources feed the editor besides an empty form:
//!
//! - **Edit flow**: a saved template, stored in the API's component format.
//! - **Library flow**: a catalogue template in the library's flat format
//!   (`header`/`body`/`footer` strings plus a `body_params` example list). The
//!   draft gets a derived name so it does not collide with the catalogue entry.
//!
//! Both go through the same example synchroniser as live editing, so the
//! resulting draft always satisfies the body invariants.

use serde::{Deserialize, Serialize};

use crate::examples::{Examples, NamedExample};
use crate::model::body::Body;
use crate::model::template::{Button, Category, Footer, Header, HeaderFormat, TextHeader, TemplateDraft};
use crate::name;
use crate::params::{self, ParameterKind};
use crate::wire::{BodyExample, Component};

/// Rebuilds an editable draft from a saved template's components.
pub fn draft_from_components(
    name: &str,
    category: Category,
    language: &str,
    components: &[Component],
) -> TemplateDraft {
    let mut draft = TemplateDraft::new(category);
    draft.name = name.to_string();
    draft.language = language.to_string();

    for component in components {
        match component {
            Component::Header {
                format,
                text,
                example,
            } => {
                let example = example.clone().unwrap_or_default();
                draft.header = match format {
                    HeaderFormat::Text => Header::Text(TextHeader::with_examples(
                        text.clone().unwrap_or_default(),
                        example,
                    )),
                    media => Header::media(*media, example.into_iter().next().unwrap_or_default()),
                };
            }
            Component::Body { text, example } => {
                let previous = match example {
                    Some(BodyExample::Positional { body_text }) => {
                        Examples::Positional(body_text.first().cloned().unwrap_or_default())
                    }
                    Some(BodyExample::Flat(values)) => Examples::Positional(values.clone()),
                    Some(BodyExample::Named {
                        body_text_named_params,
                    }) => Examples::Named(body_text_named_params.clone()),
                    None => Examples::None,
                };
                draft.body = Body::with_examples(text.clone(), previous);
            }
            Component::Footer { text } => {
                draft.footer = Footer { text: text.clone() };
            }
            Component::Buttons { buttons } => {
                draft.buttons = buttons.clone();
            }
        }
    }
    draft
}

/// A catalogue template as served by the template library.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LibraryTemplate {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub header: Option<String>,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub body_params: Vec<String>,
    #[serde(default)]
    pub footer: Option<String>,
    #[serde(default)]
    pub buttons: Vec<Button>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usecase: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
}

/// Problems found in a library template before it is turned into a draft.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
#[serde(tag = "issue", rename_all = "snake_case")]
pub enum LibraryIssue {
    #[error("Template name is required")]
    NameRequired,
    #[error("Template body is required")]
    BodyRequired,
    #[error("Template category is required")]
    CategoryRequired,
    #[error("Parameter count mismatch: expected {expected}, got {actual}")]
    PositionalCountMismatch { expected: usize, actual: usize },
    #[error("Named parameter count mismatch: expected {expected}, got {actual}")]
    NamedCountMismatch { expected: usize, actual: usize },
    #[error("Cannot mix positional and named parameters")]
    MixedParameters,
}

/// Collects every issue of `template`; an empty list means it can be used.
pub fn validate_library_template(template: &LibraryTemplate) -> Vec<LibraryIssue> {
    let mut issues = Vec::new();
    if template.name.trim().is_empty() {
        issues.push(LibraryIssue::NameRequired);
    }
    if template.body.trim().is_empty() {
        issues.push(LibraryIssue::BodyRequired);
    }
    if template.category.trim().is_empty() {
        issues.push(LibraryIssue::CategoryRequired);
    }

    let actual = template.body_params.len();
    match params::classify(&template.body) {
        ParameterKind::Positional => {
            let expected = params::max_positional(&template.body);
            if expected != actual {
                issues.push(LibraryIssue::PositionalCountMismatch { expected, actual });
            }
        }
        ParameterKind::Named => {
            let expected = params::extract_named(&template.body).len();
            if expected != actual {
                issues.push(LibraryIssue::NamedCountMismatch { expected, actual });
            }
        }
        ParameterKind::Mixed => issues.push(LibraryIssue::MixedParameters),
        ParameterKind::None => {}
    }
    issues
}

/// Turns a library template into a new draft named `<name>_custom_<millis>`.
///
/// An unknown category falls back to the default one; the caller picks it
/// again in the form.
pub fn draft_from_library(template: &LibraryTemplate, millis: u128) -> TemplateDraft {
    let category = Category::parse(&template.category).unwrap_or_else(|| {
        log::debug!(
            "library template {:?} has unknown category {:?}",
            template.name,
            template.category
        );
        Category::default()
    });
    let mut draft = TemplateDraft::new(category);
    draft.name = name::custom_name(&template.name, millis);
    if let Some(language) = template.language.as_deref().filter(|l| !l.is_empty()) {
        draft.language = language.to_string();
    }
    if let Some(header) = template.header.as_deref().filter(|h| !h.is_empty()) {
        draft.header = Header::text(header);
    }
    if let Some(footer) = &template.footer {
        draft.footer = Footer {
            text: footer.clone(),
        };
    }
    draft.buttons = template.buttons.clone();

    let previous = match params::classify(&template.body) {
        ParameterKind::Positional => Examples::Positional(template.body_params.clone()),
        ParameterKind::Named => Examples::Named(
            params::extract_named(&template.body)
                .into_iter()
                .enumerate()
                .map(|(i, name)| {
                    NamedExample::new(name, template.body_params.get(i).cloned().unwrap_or_default())
                })
                .collect(),
        ),
        ParameterKind::None | ParameterKind::Mixed => Examples::None,
    };
    draft.body = Body::with_examples(template.body.clone(), previous);
    draft
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire;
    use serde_json::json;

    fn account_setup() -> LibraryTemplate {
        serde_json::from_value(json!({
            "name": "account_setup",
            "category": "UTILITY",
            "language": "en",
            "header": "Finalize account set-up",
            "body": "Hi {{1}}, please verify {{2}} to finish set-up.",
            "body_params": ["John", "your email address"],
            "buttons": [{"type": "URL", "text": "Verify", "url": "https://example.com/verify"}]
        }))
        .unwrap()
    }

    #[test]
    fn library_positional_params_become_examples() {
        let draft = draft_from_library(&account_setup(), 1_700_000_000_000);
        assert_eq!(draft.name, "account_setup_custom_1700000000000");
        assert_eq!(draft.category, Category::Utility);
        assert_eq!(draft.body.examples().positional(), ["John", "your email address"]);
        assert!(matches!(&draft.header, Header::Text(h) if h.text() == "Finalize account set-up"));
        assert_eq!(draft.buttons.len(), 1);
        assert!(crate::validate::validate(&draft).is_ok());
    }

    #[test]
    fn library_named_params_pair_by_position() {
        let template = LibraryTemplate {
            name: "greeting".into(),
            category: "MARKETING".into(),
            body: "Hi {{first}}, meet {{agent}}".into(),
            body_params: vec!["Ana".into()],
            ..Default::default()
        };
        let draft = draft_from_library(&template, 1);
        assert_eq!(
            draft.body.examples().named(),
            [NamedExample::new("first", "Ana"), NamedExample::new("agent", "")]
        );
        assert_eq!(
            validate_library_template(&template),
            vec![LibraryIssue::NamedCountMismatch {
                expected: 2,
                actual: 1
            }]
        );
    }

    #[test]
    fn library_issues_are_aggregated() {
        let template = LibraryTemplate {
            body: "{{1}} {{x}}".into(),
            ..Default::default()
        };
        assert_eq!(
            validate_library_template(&template),
            vec![
                LibraryIssue::NameRequired,
                LibraryIssue::CategoryRequired,
                LibraryIssue::MixedParameters
            ]
        );
        assert!(validate_library_template(&account_setup()).is_empty());
        let issue = LibraryIssue::PositionalCountMismatch {
            expected: 3,
            actual: 2,
        };
        assert_eq!(issue.to_string(), "Parameter count mismatch: expected 3, got 2");
    }

    #[test]
    fn edit_flow_restores_a_serialised_draft() {
        let original = draft_from_library(&account_setup(), 7);
        let request = wire::serialize(&original);
        let restored = draft_from_components(
            &request.name,
            request.category,
            &request.language,
            &request.components,
        );
        assert_eq!(restored, original);
    }

    #[test]
    fn edit_flow_accepts_flat_and_named_examples() {
        let components: Vec<Component> = serde_json::from_value(json!([
            {"type": "HEADER", "format": "IMAGE", "example": ["https://cdn.example/x.png"]},
            {"type": "BODY", "text": "Hi {{1}} {{2}}", "example": ["a"]},
            {"type": "FOOTER", "text": "bye"}
        ]))
        .unwrap();
        let draft = draft_from_components("hi", Category::Marketing, "id", &components);
        assert_eq!(draft.header.media_url(), Some("https://cdn.example/x.png"));
        assert_eq!(draft.body.examples().positional(), ["a", ""]);
        assert_eq!(draft.footer.text, "bye");

        let named: Vec<Component> = serde_json::from_value(json!([{
            "type": "BODY",
            "text": "Hi {{who}}",
            "example": {"body_text_named_params": [
                {"param_name": "who", "example": "Ana"},
                {"param_name": "gone", "example": "x"}
            ]}
        }]))
        .unwrap();
        let draft = draft_from_components("hi", Category::Marketing, "en", &named);
        assert_eq!(draft.body.examples().named(), [NamedExample::new("who", "Ana")]);
    }

    #[test]
    fn header_without_format_defaults_to_text() {
        let components: Vec<Component> = serde_json::from_value(json!([
            {"type": "HEADER", "text": "Update"},
            {"type": "BODY", "text": "Done"}
        ]))
        .unwrap();
        let draft = draft_from_components("x", Category::Utility, "en", &components);
        assert!(matches!(&draft.header, Header::Text(h) if h.text() == "Update"));
    }
}
