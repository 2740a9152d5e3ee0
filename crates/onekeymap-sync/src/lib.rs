//! Import and export services on top of the editor plugins.
//!
//! [`ImportService`] turns an editor file into a canonical keymap, merges it
//! with a baseline and reports what changed. [`ExportService`] writes a keymap
//! back into an editor file and diffs the result against the current content.
//! Both share the [`validate`] rules.

pub mod export;
pub mod import;
pub mod validate;

pub use export::{unified_diff, ExportReport, ExportService};
pub use import::{ImportResult, ImportService, KeymapChanges, KeymapDiff};
pub use validate::{ValidationIssue, ValidationReport, ValidationRule, Validator};
