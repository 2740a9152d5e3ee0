//! IntelliJ keystroke syntax: space-separated tokens such as `control alt S`.

use std::sync::LazyLock;

use onekeymap_common::{CodecError, ParseError};
use onekeymap_keymap::{BiMap, KeyChord, KeyCode, KeyModifier, Keybinding};

use super::keymap_xml::KeyboardShortcut;

/// IntelliJ chords per binding: `first-keystroke` and `second-keystroke`.
const MAX_CHORDS: usize = 2;

/// IntelliJ modifier token to canonical modifier name.
static MODIFIERS: LazyLock<BiMap<&'static str, &'static str>> = LazyLock::new(|| {
    BiMap::from_pairs([
        ("control", "ctrl"),
        ("shift", "shift"),
        ("alt", "alt"),
        ("meta", "meta"),
    ])
});

/// IntelliJ named-key token to canonical key code.
///
/// Function keys and numpad digits are absent: `F5` and `NUMPAD3` are the
/// upper-cased canonical names.
static STROKES: LazyLock<BiMap<&'static str, &'static str>> = LazyLock::new(|| {
    BiMap::from_pairs([
        ("BACK_QUOTE", "`"),
        ("MINUS", "-"),
        ("EQUALS", "="),
        ("OPEN_BRACKET", "["),
        ("CLOSE_BRACKET", "]"),
        ("BACK_SLASH", "\\"),
        ("SEMICOLON", ";"),
        ("QUOTE", "'"),
        ("COMMA", ","),
        ("PERIOD", "."),
        ("SLASH", "/"),
        ("PLUS", "+"),
        ("LEFT", "left"),
        ("UP", "up"),
        ("RIGHT", "right"),
        ("DOWN", "down"),
        ("END", "end"),
        ("HOME", "home"),
        ("PAGE_UP", "pageup"),
        ("PAGE_DOWN", "pagedown"),
        ("TAB", "tab"),
        ("ENTER", "enter"),
        ("ESCAPE", "escape"),
        ("BACK_SPACE", "backspace"),
        ("SPACE", "space"),
        ("DELETE", "delete"),
        ("CAPS_LOCK", "capslock"),
        ("INSERT", "insert"),
        ("DIVIDE", "numpad_divide"),
        ("MULTIPLY", "numpad_multiply"),
        ("SUBTRACT", "numpad_subtract"),
        ("ADD", "numpad_add"),
        ("DECIMAL", "numpad_decimal"),
        ("NUMPAD_ENTER", "numpad_enter"),
    ])
});

fn is_plain_char(token: &str) -> bool {
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => c.is_alphanumeric() || "`-=[].'".contains(c),
        _ => false,
    }
}

fn key_from_token(token: &str) -> Option<KeyCode> {
    if is_plain_char(token) {
        return KeyCode::from_token(&token.to_lowercase());
    }
    match STROKES.get(token.to_uppercase().as_str()) {
        Some(name) => KeyCode::from_token(name),
        None => KeyCode::from_token(token),
    }
}

/// Parses one keystroke into a chord.
///
/// `control` and `ctrl` both name the control key.
pub fn parse_keystroke(raw: &str) -> Result<KeyChord, CodecError> {
    if raw.trim().is_empty() {
        return Err(CodecError::EmptyKeystroke);
    }

    let mut parts: Vec<&str> = Vec::new();
    let mut key_seen = false;
    for token in raw.split_whitespace() {
        let lowered = token.to_lowercase();
        let canonical = MODIFIERS.get(lowered.as_str()).copied().or_else(|| {
            MODIFIERS
                .get_inverse(lowered.as_str())
                .and_then(|ij| MODIFIERS.get(*ij))
                .copied()
        });
        if let Some(canonical) = canonical {
            parts.push(canonical);
            continue;
        }

        if key_seen {
            return Err(CodecError::MultipleKeys(raw.to_string()));
        }
        key_seen = true;
        let key = key_from_token(token)
            .ok_or_else(|| ParseError::InvalidKeyCode(token.to_string()))?;
        parts.push(key.as_str());
    }

    Ok(KeyChord::parse(&parts.join("+"), "+")?)
}

fn key_to_token(key: KeyCode) -> String {
    let name = key.as_str();
    if let Some(token) = STROKES.get_inverse(name) {
        return (*token).to_string();
    }
    name.to_uppercase()
}

fn modifier_token(modifier: KeyModifier) -> &'static str {
    match modifier {
        KeyModifier::Ctrl => "control",
        KeyModifier::Shift => "shift",
        KeyModifier::Alt => "alt",
        KeyModifier::Meta => "meta",
    }
}

/// Formats one chord. Meta is written as `meta` on every platform; IntelliJ
/// maps it to Command itself on macOS.
pub fn format_keystroke(chord: &KeyChord) -> Result<String, CodecError> {
    let mut tokens: Vec<String> = chord
        .modifiers()
        .map(|modifier| modifier_token(modifier).to_string())
        .collect();
    if let Some(key) = chord.keycode() {
        tokens.push(key_to_token(key));
    }
    if tokens.is_empty() {
        return Err(CodecError::Unencodable(
            "invalid key chord: empty key code".to_string(),
        ));
    }
    Ok(tokens.join(" "))
}

/// Decodes a `<keyboard-shortcut>` into a one- or two-chord binding.
pub fn parse_shortcut(shortcut: &KeyboardShortcut) -> Result<Keybinding, CodecError> {
    let mut chords = vec![parse_keystroke(&shortcut.first)?];
    if let Some(second) = shortcut.second.as_deref().filter(|s| !s.is_empty()) {
        chords.push(parse_keystroke(second)?);
    }
    Ok(Keybinding::new(chords)?)
}

pub fn format_shortcut(keybinding: &Keybinding) -> Result<KeyboardShortcut, CodecError> {
    let chords = keybinding.chords();
    if chords.len() > MAX_CHORDS {
        return Err(CodecError::TooManyChords(
            "too many chords for intellij, only first two are supported".to_string(),
        ));
    }
    let Some(first) = chords.first() else {
        return Err(CodecError::EmptyKeybind);
    };
    let second = chords.get(1).map(format_keystroke).transpose()?;
    Ok(KeyboardShortcut {
        first: format_keystroke(first)?,
        second,
    })
}
