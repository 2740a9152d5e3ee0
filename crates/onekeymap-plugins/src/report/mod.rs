//! Ledgers of what an import or export carried through and what it skipped.

mod export;
mod import;

pub use export::{ExportMarker, ExportSkipAction, ExportSkipReport};
pub use import::{ImportMarker, ImportReport, ImportSkipAction, ImportedAction};

use onekeymap_common::{EditorType, ExportSkipReason};
use onekeymap_config::{ActionMappingConfig, EXPLICITLY_NOT_SUPPORTED};

/// Why `mapping` cannot be exported to `editor`.
pub(crate) fn unsupported_reason(
    mapping: Option<&ActionMappingConfig>,
    editor: EditorType,
) -> ExportSkipReason {
    let Some(mapping) = mapping else {
        return ExportSkipReason::ActionNotSupported;
    };
    match mapping.is_supported(editor) {
        (false, note) if note == EXPLICITLY_NOT_SUPPORTED => ExportSkipReason::NotSupported,
        (false, note) if !note.is_empty() => ExportSkipReason::Unsupported(note),
        _ => ExportSkipReason::ActionNotSupported,
    }
}
