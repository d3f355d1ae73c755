//! Pre-submission validation of a [`TemplateDraft`].
//!
//! Checks run in a fixed order and stop at the first failure, so a draft always
//! produces the same single reason. The order is:
//!
//! 1. name present, then name format
//! 2. body present, then no mixed placeholder styles
//! 3. an example for every positional index / every named parameter
//! 4. every button: text, then its type-specific field
//! 5. placeholder syntax, language, header, length and count limits

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::limits::{
    is_supported_language, BODY_TEXT_MAX_LENGTH, BUTTON_TEXT_MAX_LENGTH, COPY_CODE_MAX_LENGTH,
    FOOTER_TEXT_MAX_LENGTH, HEADER_TEXT_MAX_LENGTH, MAX_BUTTONS, MAX_POSITIONAL_INDEX,
    MAX_URL_BUTTONS, NAME_MAX_LENGTH,
};
use crate::model::template::{Button, Header, HeaderFormat, TemplateDraft};
use crate::name;
use crate::params::{self, ParameterKind};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Template name is required")]
    NameRequired,
    #[error("Template name must contain only lowercase letters, numbers, and underscores")]
    InvalidName,
    #[error("Message body is required")]
    BodyRequired,
    #[error("Cannot mix positional ({{{{1}}}}) and named ({{{{name}}}}) parameters in the same template")]
    MixedParameters,
    #[error("Please provide examples for all positional variables in the message body (missing: {})", join(.0))]
    MissingPositionalExamples(Vec<usize>),
    #[error("Please provide examples for variables: {}", .0.join(", "))]
    MissingNamedExamples(Vec<String>),
    #[error("Button {position} text is required")]
    ButtonTextRequired { position: usize },
    #[error("Button {position} {field} is required")]
    ButtonFieldRequired { position: usize, field: &'static str },
    #[error("Invalid placeholder {{{{{0}}}}}: use {{{{1}}}} or {{{{name}}}}")]
    MalformedPlaceholder(String),
    #[error("Positional parameters start at {{{{1}}}}")]
    PositionalStartsAtOne,
    #[error("Positional parameter {{{{{index}}}}} exceeds the limit of {max}")]
    PositionalIndexTooHigh { index: usize, max: usize },
    #[error("Language '{0}' is not supported")]
    UnsupportedLanguage(String),
    #[error("Header text is required")]
    HeaderTextRequired,
    #[error("Header only supports positional parameters")]
    HeaderNamedParameters,
    #[error("Please provide examples for all header variables")]
    MissingHeaderExamples,
    #[error("Header {} URL is required", .0.as_str().to_lowercase())]
    HeaderMediaRequired(HeaderFormat),
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },
    #[error("A template can have at most {} buttons", MAX_BUTTONS)]
    TooManyButtons,
    #[error("A template can have at most {} URL buttons", MAX_URL_BUTTONS)]
    TooManyUrlButtons,
}

fn join(indices: &[usize]) -> String {
    indices
        .iter()
        .map(|i| format!("{{{{{i}}}}}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Serialisable outcome of [`validate`], as returned to HTTP callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl From<Result<(), ValidationError>> for ValidationReport {
    fn from(result: Result<(), ValidationError>) -> Self {
        match result {
            Ok(()) => ValidationReport { ok: true, reason: None },
            Err(e) => ValidationReport {
                ok: false,
                reason: Some(e.to_string()),
            },
        }
    }
}

/// Checks `draft` for submission. Pure: the same draft always yields the same
/// result.
pub fn validate(draft: &TemplateDraft) -> Result<(), ValidationError> {
    if draft.name.trim().is_empty() {
        return Err(ValidationError::NameRequired);
    }
    if !name::is_valid_name(&draft.name) {
        return Err(ValidationError::InvalidName);
    }

    let body = &draft.body;
    if body.text().trim().is_empty() {
        return Err(ValidationError::BodyRequired);
    }
    match body.parameter_kind() {
        ParameterKind::Mixed => return Err(ValidationError::MixedParameters),
        ParameterKind::Positional => {
            let max = params::max_positional(body.text()).min(MAX_POSITIONAL_INDEX);
            let missing: Vec<usize> = (1..=max)
                .filter(|&i| is_blank(body.examples().positional_value(i)))
                .collect();
            if !missing.is_empty() {
                return Err(ValidationError::MissingPositionalExamples(missing));
            }
        }
        ParameterKind::Named => {
            let missing: Vec<String> = params::distinct_named(body.text())
                .into_iter()
                .filter(|n| is_blank(body.examples().named_value(n)))
                .collect();
            if !missing.is_empty() {
                return Err(ValidationError::MissingNamedExamples(missing));
            }
        }
        ParameterKind::None => {}
    }

    for (i, button) in draft.buttons.iter().enumerate() {
        let position = i + 1;
        if button.text().trim().is_empty() {
            return Err(ValidationError::ButtonTextRequired { position });
        }
        if let Some((field, value)) = button.required_field() {
            if value.trim().is_empty() {
                return Err(ValidationError::ButtonFieldRequired { position, field });
            }
        }
    }

    check_placeholder_syntax(body.text())?;

    if !is_supported_language(&draft.language) {
        return Err(ValidationError::UnsupportedLanguage(draft.language.clone()));
    }

    check_header(&draft.header)?;
    check_lengths(draft)?;
    check_button_counts(&draft.buttons)
}

fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|v| v.trim().is_empty())
}

fn check_placeholder_syntax(text: &str) -> Result<(), ValidationError> {
    if let Some(raw) = params::malformed_placeholders(text).into_iter().next() {
        return Err(ValidationError::MalformedPlaceholder(raw));
    }
    let indices = params::extract_positional(text);
    if indices.contains(&0) {
        return Err(ValidationError::PositionalStartsAtOne);
    }
    if let Some(&too_high) = indices.iter().find(|&&i| i > MAX_POSITIONAL_INDEX) {
        return Err(ValidationError::PositionalIndexTooHigh {
            index: too_high,
            max: MAX_POSITIONAL_INDEX,
        });
    }
    Ok(())
}

fn check_header(header: &Header) -> Result<(), ValidationError> {
    match header {
        Header::None => Ok(()),
        Header::Text(text_header) => {
            let text = text_header.text();
            if text.trim().is_empty() {
                return Err(ValidationError::HeaderTextRequired);
            }
            too_long("Header text", text, HEADER_TEXT_MAX_LENGTH)?;
            match params::classify(text) {
                ParameterKind::Named | ParameterKind::Mixed => {
                    Err(ValidationError::HeaderNamedParameters)
                }
                ParameterKind::Positional => {
                    check_placeholder_syntax(text)?;
                    let max = params::max_positional(text);
                    let complete = (1..=max).all(|i| {
                        !is_blank(text_header.examples().get(i - 1).map(String::as_str))
                    });
                    if complete {
                        Ok(())
                    } else {
                        Err(ValidationError::MissingHeaderExamples)
                    }
                }
                ParameterKind::None => check_placeholder_syntax(text),
            }
        }
        Header::Image(media) | Header::Video(media) | Header::Document(media) => {
            if media.media_url.trim().is_empty() {
                let format = header.format().unwrap_or(HeaderFormat::Image);
                return Err(ValidationError::HeaderMediaRequired(format));
            }
            Ok(())
        }
    }
}

/// Full check of a standalone template name: presence, format and length.
///
/// Used where a name is supplied without a draft, e.g. when copying a stored
/// template under a new name.
pub fn check_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::NameRequired);
    }
    if !name::is_valid_name(name) {
        return Err(ValidationError::InvalidName);
    }
    too_long("Template name", name, NAME_MAX_LENGTH)
}

fn too_long(field: &str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }
    Ok(())
}

fn check_lengths(draft: &TemplateDraft) -> Result<(), ValidationError> {
    too_long("Template name", &draft.name, NAME_MAX_LENGTH)?;
    too_long("Message body", draft.body.text(), BODY_TEXT_MAX_LENGTH)?;
    too_long("Footer text", &draft.footer.text, FOOTER_TEXT_MAX_LENGTH)?;
    for (i, button) in draft.buttons.iter().enumerate() {
        too_long(&format!("Button {} text", i + 1), button.text(), BUTTON_TEXT_MAX_LENGTH)?;
        if let Button::CopyCode { example, .. } = button {
            too_long(&format!("Button {} example", i + 1), example, COPY_CODE_MAX_LENGTH)?;
        }
    }
    Ok(())
}

fn check_button_counts(buttons: &[Button]) -> Result<(), ValidationError> {
    if buttons.len() > MAX_BUTTONS {
        return Err(ValidationError::TooManyButtons);
    }
    let url_buttons = buttons
        .iter()
        .filter(|b| matches!(b, Button::Url { .. }))
        .count();
    if url_buttons > MAX_URL_BUTTONS {
        return Err(ValidationError::TooManyUrlButtons);
    }
    Ok(())
}
