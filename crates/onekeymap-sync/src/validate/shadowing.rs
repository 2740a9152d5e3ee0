use onekeymap_common::{EditorType, Platform};
use onekeymap_keymap::Keymap;

use super::{ValidationIssue, ValidationReport, ValidationRule};

// Keys are chords as the platform formats them with `+`, modifiers in
// canonical order.
const MACOS: &[(&str, &str)] = &[
    ("cmd+q", "quitting applications on macOS"),
    ("cmd+w", "closing windows on macOS"),
    ("cmd+m", "minimizing windows on macOS"),
    ("cmd+h", "hiding applications on macOS"),
    ("cmd+tab", "application switching on macOS"),
    ("cmd+space", "Spotlight search on macOS"),
    ("cmd+shift+3", "screenshot on macOS"),
    ("cmd+shift+4", "screenshot selection on macOS"),
    ("cmd+c", "copy on macOS"),
    ("cmd+v", "paste on macOS"),
    ("cmd+x", "cut on macOS"),
    ("cmd+z", "undo on macOS"),
    ("cmd+y", "redo on macOS"),
    ("cmd+s", "save on macOS"),
    ("cmd+a", "select all on macOS"),
];

const WINDOWS: &[(&str, &str)] = &[
    ("alt+f4", "closing applications on Windows"),
    ("alt+tab", "application switching on Windows"),
    ("ctrl+shift+escape", "task manager on Windows"),
    ("win+l", "locking screen on Windows"),
    ("ctrl+c", "copy on Windows"),
    ("ctrl+v", "paste on Windows"),
    ("ctrl+x", "cut on Windows"),
    ("ctrl+z", "undo on Windows"),
    ("ctrl+y", "redo on Windows"),
    ("ctrl+s", "save on Windows"),
    ("ctrl+a", "select all on Windows"),
];

const LINUX: &[(&str, &str)] = &[
    ("alt+f4", "closing applications on Linux"),
    ("alt+tab", "application switching on Linux"),
    ("meta+l", "locking screen on Linux"),
    ("ctrl+alt+t", "opening terminal on Linux"),
    ("ctrl+c", "copy on Linux"),
    ("ctrl+v", "paste on Linux"),
    ("ctrl+x", "cut on Linux"),
    ("ctrl+z", "undo on Linux"),
    ("ctrl+y", "redo on Linux"),
    ("ctrl+s", "save on Linux"),
    ("ctrl+a", "select all on Linux"),
];

fn critical_shortcuts(platform: Platform) -> &'static [(&'static str, &'static str)] {
    match platform {
        Platform::MacOs => MACOS,
        Platform::Windows => WINDOWS,
        Platform::Linux => LINUX,
    }
}

/// Warns about bindings that take over a system or editor default on
/// `platform`.
pub struct PotentialShadowingRule {
    target: Option<EditorType>,
    platform: Platform,
}

impl PotentialShadowingRule {
    pub fn new(target: Option<EditorType>, platform: Platform) -> Self {
        Self { target, platform }
    }
}

impl ValidationRule for PotentialShadowingRule {
    fn validate(&self, keymap: &Keymap, report: &mut ValidationReport) {
        let critical = critical_shortcuts(self.platform);
        for action in &keymap.actions {
            for binding in &action.bindings {
                let keybinding = binding.format(self.platform, "+");
                let normalized = keybinding.to_lowercase();
                let Some((_, description)) = critical.iter().find(|(keys, _)| *keys == normalized)
                else {
                    continue;
                };
                report.warnings.push(ValidationIssue::PotentialShadowing {
                    action: action.name.clone(),
                    keybinding,
                    target_editor: self.target,
                    message: format!("This key chord is the default for {description}."),
                });
            }
        }
    }
}
