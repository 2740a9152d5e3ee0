//! Canonical keymap to editor file.

use onekeymap_common::{Platform, Result};
use onekeymap_keymap::Keymap;
use onekeymap_plugins::{ExportOptions, ExportSkipReport, Plugin};
use similar::TextDiff;
use tracing::info;

const CONTEXT_LINES: usize = 3;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportReport {
    /// Full content of the editor file.
    pub content: String,
    /// Unified diff from the existing file to `content`. `None` when there
    /// was no existing file; empty when nothing changed.
    pub diff: Option<String>,
    pub report: ExportSkipReport,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ExportService {
    platform: Platform,
}

impl ExportService {
    /// A service spelling modifiers for `platform`.
    pub fn new(platform: Platform) -> Self {
        Self { platform }
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Exports `keymap` through `plugin`, merging into `existing` when given.
    ///
    /// `file_path` only labels the diff header.
    pub fn export(
        &self,
        plugin: &dyn Plugin,
        keymap: &Keymap,
        existing: Option<&str>,
        file_path: &str,
    ) -> Result<ExportReport> {
        let result = plugin.export(
            keymap,
            ExportOptions {
                existing,
                platform: self.platform,
            },
        )?;
        info!(
            "exported {} actions to {}, {} bindings skipped",
            keymap.len(),
            plugin.editor_type(),
            result.report.skipped.len()
        );

        let diff = existing.map(|before| unified_diff(before, &result.content, file_path));
        Ok(ExportReport {
            content: result.content,
            diff,
            report: result.report,
        })
    }
}

/// A `git diff` style unified diff of `before` against `after`, empty when
/// they are equal.
pub fn unified_diff(before: &str, after: &str, file_path: &str) -> String {
    if before == after {
        return String::new();
    }
    let diff = TextDiff::from_lines(before, after);
    let body = diff
        .unified_diff()
        .context_radius(CONTEXT_LINES)
        .header(&format!("a/{file_path}"), &format!("b/{file_path}"))
        .to_string();
    format!("diff --git a/{file_path} b/{file_path}\n{body}")
}
