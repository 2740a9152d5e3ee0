use std::process::ExitCode;

use onekeymap_common::{Platform, Result};
use onekeymap_sync::ExportService;
use tracing::{info, warn};

use crate::app::{read_optional, write_file, App};
use crate::cli::ExportArgs;

pub fn run(app: &App, args: ExportArgs) -> Result<ExitCode> {
    let plugin = app.plugin(&args.to)?;
    let input = app.onekeymap_path(args.input.as_deref())?;
    let output = app.editor_path(plugin.as_ref(), args.output.as_deref())?;

    let keymap = app.load_keymap(&input)?;
    if keymap.is_empty() {
        warn!("{} has no actions to export", input.display());
    }
    let existing = read_optional(&output)?;

    let service = ExportService::new(Platform::current());
    let report = service.export(
        plugin.as_ref(),
        &keymap,
        existing.as_deref(),
        &output.display().to_string(),
    )?;

    for skipped in &report.report.skipped {
        println!(
            "skipped {} {}: {}",
            skipped.action, skipped.keybinding, skipped.reason
        );
    }

    if args.dry_run {
        match &report.diff {
            Some(diff) if diff.is_empty() => println!("{} is up to date", output.display()),
            Some(diff) => print!("{diff}"),
            None => print!("{}", report.content),
        }
        return Ok(ExitCode::SUCCESS);
    }

    if report.diff.as_deref() == Some("") {
        info!("{} is up to date", output.display());
        return Ok(ExitCode::SUCCESS);
    }
    write_file(&output, &report.content)?;
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    use onekeymap_config::Settings;

    const ONEKEYMAP: &str = r#"{"version": "1.0", "keymaps": [{"id": "actions.edit.copy", "keybinding": "cmd+c"}]}"#;

    fn args(dir: &std::path::Path, dry_run: bool) -> ExportArgs {
        ExportArgs {
            to: "zed".into(),
            input: Some(dir.join("onekeymap.json")),
            output: Some(dir.join("keymap.json")),
            dry_run,
        }
    }

    #[test]
    fn writes_editor_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("onekeymap.json"), ONEKEYMAP).unwrap();
        let app = App::new(Settings::default(), None).unwrap();

        run(&app, args(dir.path(), false)).unwrap();
        let written = fs::read_to_string(dir.path().join("keymap.json")).unwrap();
        assert!(written.contains("editor::Copy"));
    }

    #[test]
    fn dry_run_leaves_file_alone() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("onekeymap.json"), ONEKEYMAP).unwrap();
        fs::write(dir.path().join("keymap.json"), "[]\n").unwrap();
        let app = App::new(Settings::default(), None).unwrap();

        run(&app, args(dir.path(), true)).unwrap();
        let untouched = fs::read_to_string(dir.path().join("keymap.json")).unwrap();
        assert_eq!(untouched, "[]\n");
    }
}
