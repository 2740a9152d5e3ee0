//! Checks run over a canonical keymap before it is saved or exported.
//!
//! A [`Validator`] runs its rules in order against one keymap. Issues count
//! against the summary; warnings are informational.

mod rules;
mod shadowing;


use std::fmt;

use onekeymap_common::EditorType;
use onekeymap_keymap::Keymap;

pub use rules::{
    DanglingActionRule, DuplicateMappingRule, KeybindConflictRule, UnsupportedActionRule,
};
pub use shadowing::PotentialShadowingRule;

/// One action taking part in a [`ValidationIssue::KeybindConflict`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictingAction {
    pub action: String,
    /// The command the source editor uses for the action, if known.
    pub editor_command: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    KeybindConflict {
        keybinding: String,
        actions: Vec<ConflictingAction>,
    },
    DanglingAction {
        action: String,
        suggestion: String,
    },
    UnsupportedAction {
        action: String,
        keybinding: String,
        target_editor: EditorType,
    },
    DuplicateMapping {
        action: String,
        keybinding: String,
        message: String,
    },
    PotentialShadowing {
        action: String,
        keybinding: String,
        target_editor: Option<EditorType>,
        message: String,
    },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::KeybindConflict {
                keybinding,
                actions,
            } => {
                write!(f, "keybind conflict on {keybinding}:")?;
                for (i, conflict) in actions.iter().enumerate() {
                    let sep = if i == 0 { " " } else { ", " };
                    if conflict.editor_command.is_empty() {
                        write!(f, "{sep}{}", conflict.action)?;
                    } else {
                        write!(f, "{sep}{} ({})", conflict.action, conflict.editor_command)?;
                    }
                }
                Ok(())
            }
            ValidationIssue::DanglingAction { action, suggestion } => {
                write!(f, "unknown action {action}: {suggestion}")
            }
            ValidationIssue::UnsupportedAction {
                action,
                keybinding,
                target_editor,
            } => write!(
                f,
                "{action} ({keybinding}) cannot be exported to {target_editor}"
            ),
            ValidationIssue::DuplicateMapping {
                action,
                keybinding,
                message,
            } => write!(f, "{action} ({keybinding}): {message}"),
            ValidationIssue::PotentialShadowing {
                action,
                keybinding,
                message,
                ..
            } => write!(f, "{action} ({keybinding}): {message}"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    /// Number of actions checked.
    pub processed: usize,
    /// `processed` minus the number of issues.
    pub succeeded: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub source_editor: Option<EditorType>,
    pub summary: Summary,
    pub issues: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// No issues and no warnings.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty() && self.warnings.is_empty()
    }
}

/// A single check. Rules append to the report and never fail.
pub trait ValidationRule: Send + Sync {
    fn validate(&self, keymap: &Keymap, report: &mut ValidationReport);
}

/// Runs a chain of [`ValidationRule`]s.
#[derive(Default)]
pub struct Validator {
    rules: Vec<Box<dyn ValidationRule>>,
}

impl Validator {
    pub fn new(rules: Vec<Box<dyn ValidationRule>>) -> Self {
        Self { rules }
    }

    pub fn with_rule(mut self, rule: impl ValidationRule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn validate(&self, keymap: &Keymap, source_editor: Option<EditorType>) -> ValidationReport {
        let mut report = ValidationReport {
            source_editor,
            summary: Summary {
                processed: keymap.len(),
                succeeded: 0,
            },
            ..Default::default()
        };

        for rule in &self.rules {
            rule.validate(keymap, &mut report);
        }

        report.summary.succeeded = report.summary.processed.saturating_sub(report.issues.len());
        report
    }
}
