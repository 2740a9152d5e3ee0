use std::fs;
use std::process::ExitCode;

use onekeymap_common::{Platform, Result};
use onekeymap_sync::{ExportService, ImportService};
use tracing::{debug, info, warn};

use crate::app::{read_optional, write_file, App};
use crate::cli::MigrateArgs;

/// Imports one editor's keymap and exports it straight into another's,
/// without touching onekeymap.json.
pub fn run(app: &App, args: MigrateArgs) -> Result<ExitCode> {
    let source_plugin = app.plugin(&args.from)?;
    let target_plugin = app.plugin(&args.to)?;
    let input = app.editor_path(source_plugin.as_ref(), args.input.as_deref())?;
    let output = app.editor_path(target_plugin.as_ref(), args.output.as_deref())?;
    info!(
        "migrating keymaps from {} to {}",
        source_plugin.editor_type(),
        target_plugin.editor_type()
    );

    let source = fs::read_to_string(&input)?;
    let imported = ImportService::new(app.mappings.clone()).import(
        source_plugin.as_ref(),
        &source,
        None,
    )?;
    debug!(
        "imported {} actions, {} skipped",
        imported.setting.len(),
        imported.report.skipped.len()
    );
    if imported.setting.is_empty() {
        warn!("{} has no keymaps to migrate", input.display());
        return Ok(ExitCode::SUCCESS);
    }

    let existing = read_optional(&output)?;
    let report = ExportService::new(Platform::current()).export(
        target_plugin.as_ref(),
        &imported.setting,
        existing.as_deref(),
        &output.display().to_string(),
    )?;

    for skipped in &report.report.skipped {
        println!(
            "skipped {} {}: {}",
            skipped.action, skipped.keybinding, skipped.reason
        );
    }
    match report.diff.as_deref() {
        Some("") => println!("(no changes)"),
        Some(diff) => print!("{diff}"),
        None => print!("{}", report.content),
    }

    if args.dry_run || report.diff.as_deref() == Some("") {
        return Ok(ExitCode::SUCCESS);
    }
    write_file(&output, &report.content)?;
    Ok(ExitCode::SUCCESS)
}
