use std::collections::BTreeSet;

use onekeymap_common::ParseError;

use super::KeyChord;
use crate::keycode::{KeyCode, KeyModifier};

/// Parses one chord such as `"ctrl+shift+f"` or `"ctrl-alt--"`.
///
/// - Input is matched case-insensitively.
/// - The last token is the key, unless it names a modifier, in which case the
///   chord is modifier-only.
/// - A trailing separator (`"ctrl++"`) makes the separator itself the key.
/// - Every earlier non-empty token must be a modifier.
/// - A modifier-only chord carries exactly one modifier, written once.
pub(super) fn parse_chord(text: &str, separator: &str) -> Result<KeyChord, ParseError> {
    if text.is_empty() {
        return Err(ParseError::EmptyInput);
    }
    let separator = if separator.is_empty() { "+" } else { separator };
    let lowered = text.to_lowercase();
    let parts: Vec<&str> = lowered.split(separator).collect();
    let (last, leading) = match parts.split_last() {
        Some(split) => split,
        None => return Err(ParseError::EmptyInput),
    };

    let mut modifiers = BTreeSet::new();
    let mut keycode = None;
    let mut repeated = false;

    if last.is_empty() && lowered.ends_with(separator) {
        keycode = Some(
            KeyCode::from_token(separator)
                .ok_or_else(|| ParseError::InvalidKeyCode(separator.to_string()))?,
        );
    } else if let Some(modifier) = KeyModifier::from_name(last) {
        modifiers.insert(modifier);
    } else {
        keycode =
            Some(KeyCode::from_token(last).ok_or_else(|| ParseError::InvalidKeyCode(last.to_string()))?);
    }

    for part in leading.iter().filter(|part| !part.is_empty()) {
        match KeyModifier::from_name(part) {
            Some(modifier) => {
                repeated |= !modifiers.insert(modifier);
            }
            None => {
                let found = keycode.map(|k| k.as_str()).unwrap_or_default();
                return Err(ParseError::MultipleKeyCodes(
                    part.to_string(),
                    found.to_string(),
                ));
            }
        }
    }

    if keycode.is_none() && (modifiers.len() != 1 || repeated) {
        return Err(ParseError::NoKeyCode(text.to_string()));
    }

    Ok(KeyChord { modifiers, keycode })
}
