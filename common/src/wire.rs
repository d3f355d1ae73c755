//! Wire format of the WhatsApp Business template API.
//!
//! A template is submitted as `{name, category, language, components}` where
//! `components` is an ordered array of `HEADER`, `BODY`, `FOOTER` and
//! `BUTTONS` objects. The order is part of the contract. Body examples use the
//! API's nesting as-is: positional examples are a single example set wrapped in
//! an outer array (`body_text: [["a", "b"]]`), named examples are a list of
//! `{param_name, example}` pairs.

use serde::{Deserialize, Serialize};

use crate::examples::{Examples, NamedExample};
use crate::model::template::{Button, Category, Header, HeaderFormat, TemplateDraft};
use crate::params::{self, ParameterKind};
use crate::validate::{self, ValidationError};

/// Request body for creating or editing a template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateRequest {
    pub name: String,
    pub category: Category,
    pub language: String,
    pub components: Vec<Component>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "UPPERCASE")]
pub enum Component {
    Header {
        #[serde(default = "text_format")]
        format: HeaderFormat,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        text: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        example: Option<Vec<String>>,
    },
    Body {
        #[serde(default)]
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        example: Option<BodyExample>,
    },
    Footer {
        #[serde(default)]
        text: String,
    },
    Buttons {
        #[serde(default)]
        buttons: Vec<Button>,
    },
}

fn text_format() -> HeaderFormat {
    HeaderFormat::Text
}

impl Component {
    pub fn type_name(&self) -> &'static str {
        match self {
            Component::Header { .. } => "HEADER",
            Component::Body { .. } => "BODY",
            Component::Footer { .. } => "FOOTER",
            Component::Buttons { .. } => "BUTTONS",
        }
    }
}

/// Example payload of a `BODY` component.
///
/// `Flat` only appears in templates saved by older clients; it is accepted
/// when reading and never produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BodyExample {
    Positional { body_text: Vec<Vec<String>> },
    Named { body_text_named_params: Vec<NamedExample> },
    Flat(Vec<String>),
}

/// Shapes a draft into the API request.
///
/// Expects a draft that passed [`validate::validate`]; use [`submit`] to do
/// both.
///
/// # Panics
///
/// Panics if the body mixes positional and named placeholders. Such a draft
/// can never be submitted and reaching this point means validation was
/// skipped.
pub fn serialize(draft: &TemplateDraft) -> TemplateRequest {
    let kind = draft.body.parameter_kind();
    assert!(
        kind != ParameterKind::Mixed,
        "cannot serialise a body that mixes positional and named parameters"
    );

    let mut components = Vec::with_capacity(4);

    if let Some(header) = header_component(&draft.header) {
        components.push(header);
    }

    let example = match draft.body.examples() {
        Examples::Positional(values) if kind == ParameterKind::Positional && !values.is_empty() => {
            Some(BodyExample::Positional {
                body_text: vec![values.clone()],
            })
        }
        Examples::Named(values) if kind == ParameterKind::Named && !values.is_empty() => {
            Some(BodyExample::Named {
                body_text_named_params: values.clone(),
            })
        }
        _ => None,
    };
    components.push(Component::Body {
        text: draft.body.text().to_string(),
        example,
    });

    if !draft.footer.text.is_empty() {
        components.push(Component::Footer {
            text: draft.footer.text.clone(),
        });
    }

    if !draft.buttons.is_empty() {
        components.push(Component::Buttons {
            buttons: draft.buttons.clone(),
        });
    }

    TemplateRequest {
        name: draft.name.clone(),
        category: draft.category,
        language: draft.language.clone(),
        components,
    }
}

fn header_component(header: &Header) -> Option<Component> {
    let format = header.format()?;
    let component = match header {
        Header::Text(text_header) => {
            let text = text_header.text();
            let example = (params::max_positional(text) > 0).then(|| text_header.examples().to_vec());
            Component::Header {
                format,
                text: Some(text.to_string()),
                example,
            }
        }
        _ => Component::Header {
            format,
            text: None,
            example: header
                .media_url()
                .filter(|url| !url.is_empty())
                .map(|url| vec![url.to_string()]),
        },
    };
    Some(component)
}

/// Validates `draft` and, when it passes, shapes it into the API request.
pub fn submit(draft: &TemplateDraft) -> Result<TemplateRequest, ValidationError> {
    validate::validate(draft)?;
    Ok(serialize(draft))
}
