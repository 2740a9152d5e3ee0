//! Helix key syntax: `C-`, `A-`, `S-` and `M-` prefixes before the key,
//! chords separated by spaces, e.g. `C-k C-c`.

use std::sync::LazyLock;

use onekeymap_common::{CodecError, ParseError};
use onekeymap_keymap::{BiMap, KeyChord, KeyCode, KeyModifier, Keybinding};

/// Helix key names that differ from the canonical token.
static KEY_NAMES: LazyLock<BiMap<&'static str, &'static str>> = LazyLock::new(|| {
    BiMap::from_pairs([
        ("backspace", "backspace"),
        ("space", "space"),
        ("ret", "enter"),
        ("esc", "escape"),
        ("del", "delete"),
        ("ins", "insert"),
        ("left", "left"),
        ("right", "right"),
        ("up", "up"),
        ("down", "down"),
        ("home", "home"),
        ("end", "end"),
        ("pageup", "pageup"),
        ("pagedown", "pagedown"),
        ("tab", "tab"),
        ("minus", "-"),
        ("F1", "f1"),
        ("F2", "f2"),
        ("F3", "f3"),
        ("F4", "f4"),
        ("F5", "f5"),
        ("F6", "f6"),
        ("F7", "f7"),
        ("F8", "f8"),
        ("F9", "f9"),
        ("F10", "f10"),
        ("F11", "f11"),
        ("F12", "f12"),
    ])
});

fn modifier_prefix(modifier: KeyModifier) -> &'static str {
    match modifier {
        KeyModifier::Meta => "M",
        KeyModifier::Ctrl => "C",
        KeyModifier::Shift => "S",
        KeyModifier::Alt => "A",
    }
}

fn prefix_modifier(prefix: char) -> Option<KeyModifier> {
    match prefix {
        'M' => Some(KeyModifier::Meta),
        'C' => Some(KeyModifier::Ctrl),
        'S' => Some(KeyModifier::Shift),
        'A' => Some(KeyModifier::Alt),
        _ => None,
    }
}

fn format_chord(chord: &KeyChord) -> Result<String, CodecError> {
    let Some(key) = chord.keycode() else {
        return Err(CodecError::Unencodable(
            "helix chords need a key".to_string(),
        ));
    };
    if key.as_str().starts_with("numpad") {
        return Err(CodecError::Unencodable(format!(
            "helix has no numpad keys: {key}"
        )));
    }

    let name = match KEY_NAMES.get_inverse(key.as_str()) {
        Some(name) => *name,
        None if key.as_str().chars().count() == 1 => key.as_str(),
        None => {
            return Err(CodecError::Unencodable(format!(
                "key {key} has no helix representation"
            )))
        }
    };

    let mut parts: Vec<&str> = chord.modifiers().map(modifier_prefix).collect();
    parts.push(name);
    Ok(parts.join("-"))
}

/// Formats a binding as Helix writes it. Modifiers come in `M C S A` order.
pub fn format_keybinding(keybinding: &Keybinding) -> Result<String, CodecError> {
    if keybinding.is_empty() {
        return Err(CodecError::EmptyKeybind);
    }
    let chords = keybinding
        .chords()
        .iter()
        .map(format_chord)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(chords.join(" "))
}

fn parse_chord(text: &str) -> Result<KeyChord, CodecError> {
    let mut rest = text;
    let mut modifiers = Vec::new();
    loop {
        let mut chars = rest.chars();
        let (Some(prefix), Some('-')) = (chars.next(), chars.next()) else {
            break;
        };
        let Some(modifier) = prefix_modifier(prefix) else {
            break;
        };
        if rest.len() == 2 {
            break;
        }
        modifiers.push(modifier);
        rest = &rest[2..];
    }

    if rest.is_empty() {
        return Err(CodecError::EmptyKeystroke);
    }
    let token = KEY_NAMES.get(rest).copied().unwrap_or(rest);
    let key = KeyCode::from_token(token).ok_or_else(|| ParseError::InvalidKeyCode(rest.to_string()))?;
    Ok(KeyChord::new(modifiers, key))
}

/// Parses a Helix key such as `C-S-f` or `g d`.
pub fn parse_keybinding(text: &str) -> Result<Keybinding, CodecError> {
    let chords = text
        .split_whitespace()
        .map(parse_chord)
        .collect::<Result<Vec<_>, _>>()?;
    if chords.is_empty() {
        return Err(CodecError::EmptyKeybind);
    }
    Ok(Keybinding::new(chords)?)
}
