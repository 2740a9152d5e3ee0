//! Xcode key syntax: modifier sigils followed by a single key character,
//! e.g. `@$k` for cmd+shift+k.

use std::sync::LazyLock;

use onekeymap_common::{CodecError, ParseError};
use onekeymap_keymap::{BiMap, KeyChord, KeyCode, KeyModifier, Keybinding};

/// Characters that stand for named keys, including the AppKit function-key
/// code points in the Unicode private use area.
static KEY_CHARS: LazyLock<BiMap<char, &'static str>> = LazyLock::new(|| {
    let mut map = BiMap::from_pairs([
        ('\t', "tab"),
        ('\r', "enter"),
        ('\u{8}', "backspace"),
        ('\u{1b}', "escape"),
        (' ', "space"),
        ('\u{F700}', "up"),
        ('\u{F701}', "down"),
        ('\u{F702}', "left"),
        ('\u{F703}', "right"),
        ('\u{F727}', "insert"),
        ('\u{F728}', "delete"),
        ('\u{F729}', "home"),
        ('\u{F72B}', "end"),
        ('\u{F72C}', "pageup"),
        ('\u{F72D}', "pagedown"),
    ]);
    // F1 is U+F704; the vocabulary stops at F20.
    for n in 1..=20u32 {
        let code = char::from_u32(0xF703 + n);
        let key = KeyCode::from_token(&format!("f{n}"));
        if let (Some(code), Some(key)) = (code, key) {
            map.insert(code, key.as_str());
        }
    }
    map
});

fn sigil_modifier(sigil: char) -> Option<KeyModifier> {
    match sigil {
        '@' => Some(KeyModifier::Meta),
        '^' => Some(KeyModifier::Ctrl),
        '$' => Some(KeyModifier::Shift),
        '~' => Some(KeyModifier::Alt),
        _ => None,
    }
}

fn modifier_sigil(modifier: KeyModifier) -> char {
    match modifier {
        KeyModifier::Meta => '@',
        KeyModifier::Ctrl => '^',
        KeyModifier::Shift => '$',
        KeyModifier::Alt => '~',
    }
}

fn key_from_char(c: char) -> Result<KeyCode, ParseError> {
    let name = match KEY_CHARS.get(&c) {
        Some(name) => (*name).to_string(),
        None => c.to_lowercase().collect(),
    };
    KeyCode::from_token(&name).ok_or(ParseError::InvalidKeyCode(name))
}

/// Parses an Xcode shortcut. The last character is the key; every earlier
/// one must be a modifier sigil.
pub fn parse_keybinding(keybind: &str) -> Result<Keybinding, CodecError> {
    let mut chars: Vec<char> = keybind.chars().collect();
    let Some(last) = chars.pop() else {
        return Err(CodecError::EmptyKeybind);
    };
    let key = key_from_char(last)?;

    let modifiers = chars
        .into_iter()
        .map(|sigil| sigil_modifier(sigil).ok_or(CodecError::UnknownModifierSymbol(sigil)))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Keybinding::single(KeyChord::new(modifiers, key)))
}

/// Formats a single-chord binding. Sigils are written in the order `@ ^ $ ~`.
pub fn format_keybinding(keybinding: &Keybinding) -> Result<String, CodecError> {
    let [chord] = keybinding.chords() else {
        return Err(if keybinding.is_empty() {
            CodecError::EmptyKeybind
        } else {
            CodecError::TooManyChords("xcode doesn't support multi-key-chords".to_string())
        });
    };
    let Some(key) = chord.keycode() else {
        return Err(CodecError::Unencodable(format!(
            "xcode shortcuts need a key: {}",
            keybinding.signature()
        )));
    };

    let mut out: String = chord.modifiers().map(modifier_sigil).collect();
    match KEY_CHARS.get_inverse(key.as_str()) {
        Some(c) => out.push(*c),
        None => {
            let mut chars = key.as_str().chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => out.push(c),
                _ => {
                    return Err(CodecError::Unencodable(format!(
                        "key {key} has no xcode representation"
                    )))
                }
            }
        }
    }
    Ok(out)
}
