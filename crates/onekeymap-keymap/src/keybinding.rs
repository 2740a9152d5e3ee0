use onekeymap_common::{ParseError, Platform};

use crate::keychord::{ChordFormat, KeyChord};

/// An ordered press sequence such as `ctrl+k ctrl+s`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Keybinding {
    chords: Vec<KeyChord>,
}

impl Keybinding {
    /// Builds a binding from already-parsed chords. An empty list is rejected.
    pub fn new(chords: Vec<KeyChord>) -> Result<Keybinding, ParseError> {
        if chords.is_empty() {
            return Err(ParseError::EmptyInput);
        }
        Ok(Keybinding { chords })
    }

    pub fn single(chord: KeyChord) -> Keybinding {
        Keybinding {
            chords: vec![chord],
        }
    }

    /// Chords are separated by a single space; `separator` joins the parts of one chord.
    pub fn parse(text: &str, separator: &str) -> Result<Keybinding, ParseError> {
        let chords = text
            .split(' ')
            .map(|part| KeyChord::parse(part, separator))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Keybinding { chords })
    }

    pub fn format(&self, platform: Platform, separator: &str) -> String {
        self.chords
            .iter()
            .map(|chord| chord.format(platform, separator))
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn format_with(&self, fmt: ChordFormat<'_>) -> String {
        self.format(fmt.platform, fmt.separator)
    }

    /// Identity used for deduplication and change detection.
    pub fn signature(&self) -> String {
        self.format_with(ChordFormat::CANONICAL)
    }

    pub fn chords(&self) -> &[KeyChord] {
        &self.chords
    }

    pub fn len(&self) -> usize {
        self.chords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chords.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keycode::{KeyCode, KeyModifier};

    #[test]
    fn parse_multi_chord() {
        let kb = Keybinding::parse("ctrl+k ctrl+s", "+").unwrap();
        assert_eq!(kb.len(), 2);
        assert_eq!(
            kb.chords()[1],
            KeyChord::new([KeyModifier::Ctrl], KeyCode::from_token("s").unwrap())
        );
        assert_eq!(kb.format(Platform::Linux, "+"), "ctrl+k ctrl+s");
    }

    #[test]
    fn modifier_only_sequence() {
        let kb = Keybinding::parse("shift shift", "+").unwrap();
        assert_eq!(kb.len(), 2);
        assert_eq!(kb.chords()[0].keycode(), None);
    }

    #[test]
    fn errors_propagate_from_chords() {
        assert!(Keybinding::parse("ctrl+invalidkey", "+").is_err());
        assert_eq!(
            Keybinding::parse("", "+").unwrap_err(),
            ParseError::EmptyInput
        );
        assert!(Keybinding::parse("ctrl+k  ctrl+s", "+").is_err());
    }

    #[test]
    fn signature_ignores_cosmetics() {
        let a = Keybinding::parse("Ctrl+Alt+S", "+").unwrap();
        let b = Keybinding::parse("alt+ctrl+s", "+").unwrap();
        let c = Keybinding::parse("ctrl-alt-s", "-").unwrap();
        assert_eq!(a.signature(), "ctrl+alt+s");
        assert_eq!(a.signature(), b.signature());
        assert_eq!(b.signature(), c.signature());
    }

    #[test]
    fn canonicalization_is_idempotent() {
        for text in ["win+shift+f1", "alt+ctrl+k cmd+1", "ctrl++"] {
            let once = Keybinding::parse(text, "+").unwrap().signature();
            let twice = Keybinding::parse(&once, "+").unwrap().signature();
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn new_rejects_empty() {
        assert!(Keybinding::new(Vec::new()).is_err());
    }
}
