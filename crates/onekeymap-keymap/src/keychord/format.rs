use onekeymap_common::Platform;

use super::KeyChord;

/// Renders modifiers in canonical order followed by the key.
pub(super) fn format_chord(chord: &KeyChord, platform: Platform, separator: &str) -> String {
    let mut parts: Vec<&str> = chord
        .modifiers
        .iter()
        .map(|modifier| modifier.name(platform))
        .collect();
    match chord.keycode {
        Some(key) => parts.push(key.as_str()),
        None if chord.modifiers.len() == 1 => {}
        None => return String::new(),
    }
    parts.join(separator)
}
