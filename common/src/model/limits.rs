//! Hard limits imposed by the WhatsApp Business template API.

pub const NAME_MAX_LENGTH: usize = 512;
pub const HEADER_TEXT_MAX_LENGTH: usize = 60;
pub const BODY_TEXT_MAX_LENGTH: usize = 1024;
pub const FOOTER_TEXT_MAX_LENGTH: usize = 60;
pub const BUTTON_TEXT_MAX_LENGTH: usize = 25;
pub const COPY_CODE_MAX_LENGTH: usize = 15;
pub const MAX_BUTTONS: usize = 10;
pub const MAX_URL_BUTTONS: usize = 2;

/// Highest positional index that gets an example slot.
pub const MAX_POSITIONAL_INDEX: usize = 100;

/// Language codes a template may be authored in, with display names.
pub const SUPPORTED_LANGUAGES: &[(&str, &str)] = &[
    ("en", "English"),
    ("id", "Indonesian"),
    ("es", "Spanish"),
    ("fr", "French"),
    ("de", "German"),
    ("pt_BR", "Portuguese (Brazil)"),
];

pub fn is_supported_language(code: &str) -> bool {
    SUPPORTED_LANGUAGES.iter().any(|(c, _)| *c == code)
}
