use std::fmt;

use onekeymap_common::Platform;
use serde::{Deserialize, Serialize};

/// A chord modifier.
///
/// Variant order is the canonical print order, so a `BTreeSet<KeyModifier>`
/// iterates Meta, Ctrl, Shift, Alt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyModifier {
    /// Command on macOS, Windows key on Windows, Super on Linux.
    Meta,
    Ctrl,
    Shift,
    Alt,
}

impl KeyModifier {
    /// Resolves a lowercase modifier name. `cmd` and `win` are spellings of `Meta`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "shift" => Some(KeyModifier::Shift),
            "ctrl" => Some(KeyModifier::Ctrl),
            "alt" => Some(KeyModifier::Alt),
            "meta" | "cmd" | "win" => Some(KeyModifier::Meta),
            _ => None,
        }
    }

    pub fn name(&self, platform: Platform) -> &'static str {
        match self {
            KeyModifier::Meta => match platform {
                Platform::MacOs => "cmd",
                Platform::Windows => "win",
                Platform::Linux => "meta",
            },
            KeyModifier::Ctrl => "ctrl",
            KeyModifier::Shift => "shift",
            KeyModifier::Alt => "alt",
        }
    }
}

const VOCABULARY: &[&str] = &[
    "a", "b", "c", "d", "e", "f", "g", "h", "i", "j", "k", "l", "m", "n", "o", "p", "q", "r",
    "s", "t", "u", "v", "w", "x", "y", "z",
    "0", "1", "2", "3", "4", "5", "6", "7", "8", "9",
    "capslock", "shift", "fn", "ctrl", "alt", "cmd", "rightcmd", "rightalt", "rightctrl",
    "rightshift", "enter", "\\", "`", ",", "=", "-", "+", ".", "'", ";", "/", "space", "tab",
    "[", "]",
    "pageup", "pagedown", "home", "end", "up", "right", "down", "left", "escape", "backspace",
    "delete", "insert", "mute", "volumeup", "volumedown",
    "f1", "f2", "f3", "f4", "f5", "f6", "f7", "f8", "f9", "f10", "f11", "f12", "f13", "f14",
    "f15", "f16", "f17", "f18", "f19", "f20",
    "numpad0", "numpad1", "numpad2", "numpad3", "numpad4", "numpad5", "numpad6", "numpad7",
    "numpad8", "numpad9",
    "numpad_clear", "numpad_decimal", "numpad_divide", "numpad_enter", "numpad_equals",
    "numpad_subtract", "numpad_multiply", "numpad_add",
];

/// A validated key token from the closed vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyCode(&'static str);

impl KeyCode {
    /// Looks up a token case-insensitively. Unknown tokens yield `None`.
    pub fn from_token(token: &str) -> Option<Self> {
        let lowered = token.to_lowercase();
        VOCABULARY
            .iter()
            .find(|candidate| **candidate == lowered)
            .map(|candidate| KeyCode(*candidate))
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }

    /// Every key code in vocabulary order.
    pub fn all() -> impl Iterator<Item = KeyCode> {
        VOCABULARY.iter().map(|candidate| KeyCode(*candidate))
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vocabulary_lookup_is_case_insensitive() {
        assert_eq!(KeyCode::from_token("PageUp").map(|k| k.as_str()), Some("pageup"));
        assert_eq!(KeyCode::from_token("F20").map(|k| k.as_str()), Some("f20"));
        assert!(KeyCode::from_token("f21").is_none());
        assert!(KeyCode::from_token("help").is_none());
    }

    #[test]
    fn meta_spelling_per_platform() {
        assert_eq!(KeyModifier::Meta.name(Platform::MacOs), "cmd");
        assert_eq!(KeyModifier::Meta.name(Platform::Windows), "win");
        assert_eq!(KeyModifier::Meta.name(Platform::Linux), "meta");
        for name in ["cmd", "win", "meta"] {
            assert_eq!(KeyModifier::from_name(name), Some(KeyModifier::Meta));
        }
    }

    #[test]
    fn canonical_order() {
        let mut mods = vec![
            KeyModifier::Alt,
            KeyModifier::Shift,
            KeyModifier::Meta,
            KeyModifier::Ctrl,
        ];
        mods.sort();
        assert_eq!(
            mods,
            vec![
                KeyModifier::Meta,
                KeyModifier::Ctrl,
                KeyModifier::Shift,
                KeyModifier::Alt
            ]
        );
    }
}
