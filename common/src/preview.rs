//! WhatsApp-style preview of a draft with its example values filled in.
//!
//! Output is HTML: template text is escaped, substituted examples are escaped
//! and wrapped in `<strong>` so they stand out from the fixed text.
//! Placeholders without an example are left as written.

use serde::{Deserialize, Serialize};

use crate::examples::Examples;
use crate::model::template::{Button, Header, TemplateDraft};
use crate::params::{self, Placeholder};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Preview {
    pub header: Option<String>,
    pub body: String,
    pub footer: Option<String>,
    pub buttons: Vec<String>,
}

/// Escapes special HTML characters in a string.
pub fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Renders `text` with its examples substituted.
pub fn format_text_with_examples(text: &str, examples: &Examples) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for (span, placeholder) in params::placeholder_spans(text) {
        out.push_str(&escape_html(&text[last..span.start]));
        let example = match placeholder {
            Placeholder::Positional(index) => examples.positional_value(index),
            Placeholder::Named(name) => examples.named_value(name),
            Placeholder::Malformed(_) => None,
        };
        match example.filter(|e| !e.is_empty()) {
            Some(example) => {
                out.push_str("<strong>");
                out.push_str(&escape_html(example));
                out.push_str("</strong>");
            }
            None => out.push_str(&escape_html(&text[span.clone()])),
        }
        last = span.end;
    }
    out.push_str(&escape_html(&text[last..]));
    out
}

pub fn render_preview(draft: &TemplateDraft) -> Preview {
    let header = match &draft.header {
        Header::None => None,
        Header::Text(text_header) => Some(format_text_with_examples(
            text_header.text(),
            &Examples::Positional(text_header.examples().to_vec()),
        )),
        media => media.format().map(|format| format!("[{}]", format.as_str())),
    };

    let footer = (!draft.footer.text.is_empty()).then(|| escape_html(&draft.footer.text));

    let buttons = draft
        .buttons
        .iter()
        .map(|button| match button {
            Button::CopyCode { text, example } if !example.is_empty() => {
                format!("{} ({})", escape_html(text), escape_html(example))
            }
            other => escape_html(other.text()),
        })
        .collect();

    Preview {
        header,
        body: format_text_with_examples(draft.body.text(), draft.body.examples()),
        footer,
        buttons,
    }
}
