mod format;
mod parse;

use std::collections::BTreeSet;

use onekeymap_common::{ParseError, Platform};

use crate::keycode::{KeyCode, KeyModifier};

/// Platform and separator used to render chords.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChordFormat<'a> {
    pub platform: Platform,
    pub separator: &'a str,
}

impl ChordFormat<'static> {
    /// The form used to compare bindings: macOS spelling joined by `+`.
    pub const CANONICAL: ChordFormat<'static> = ChordFormat {
        platform: Platform::MacOs,
        separator: "+",
    };
}

/// One simultaneous key press: a modifier set and an optional key.
///
/// A chord without a key carries exactly one modifier (a lone `shift`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyChord {
    modifiers: BTreeSet<KeyModifier>,
    keycode: Option<KeyCode>,
}

impl KeyChord {
    pub fn new(
        modifiers: impl IntoIterator<Item = KeyModifier>,
        keycode: KeyCode,
    ) -> KeyChord {
        KeyChord {
            modifiers: modifiers.into_iter().collect(),
            keycode: Some(keycode),
        }
    }

    pub fn modifier_only(modifier: KeyModifier) -> KeyChord {
        KeyChord {
            modifiers: BTreeSet::from([modifier]),
            keycode: None,
        }
    }

    pub fn parse(text: &str, separator: &str) -> Result<KeyChord, ParseError> {
        parse::parse_chord(text, separator)
    }

    pub fn format(&self, platform: Platform, separator: &str) -> String {
        format::format_chord(self, platform, separator)
    }

    pub fn format_with(&self, fmt: ChordFormat<'_>) -> String {
        self.format(fmt.platform, fmt.separator)
    }

    pub fn modifiers(&self) -> impl Iterator<Item = KeyModifier> + '_ {
        self.modifiers.iter().copied()
    }

    pub fn has_modifier(&self, modifier: KeyModifier) -> bool {
        self.modifiers.contains(&modifier)
    }

    pub fn keycode(&self) -> Option<KeyCode> {
        self.keycode
    }
}
