//! Template name handling.

use crate::model::limits::NAME_MAX_LENGTH;

/// Turns raw keyboard input into a valid template name.
///
/// Letters are lowercased and every character outside `[a-z0-9_]` becomes an
/// underscore. The result is cut at the name length limit.
pub fn sanitize_name(input: &str) -> String {
    input
        .chars()
        .flat_map(char::to_lowercase)
        .map(|c| match c {
            'a'..='z' | '0'..='9' | '_' => c,
            _ => '_',
        })
        .take(NAME_MAX_LENGTH)
        .collect()
}

/// `true` when `name` is non-empty and only uses `[a-z0-9_]`.
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_')
}

/// Derives a name for a draft copied from a library template so it does not
/// collide with the catalogue entry: `<name>_custom_<millis>`.
///
/// The base is shortened when needed so the result stays within the limit.
pub fn custom_name(original: &str, millis: u128) -> String {
    let suffix = format!("_custom_{millis}");
    let budget = NAME_MAX_LENGTH.saturating_sub(suffix.chars().count());
    let base: String = original.chars().take(budget).collect();
    format!("{base}{suffix}")
}
