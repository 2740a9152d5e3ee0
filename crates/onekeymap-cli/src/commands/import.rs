use std::fs;
use std::process::ExitCode;

use onekeymap_common::{Platform, Result};
use onekeymap_sync::{ImportResult, ImportService};
use tracing::{info, warn};

use crate::app::App;
use crate::cli::ImportArgs;

pub fn run(app: &App, args: ImportArgs) -> Result<ExitCode> {
    let plugin = app.plugin(&args.from)?;
    let input = app.editor_path(plugin.as_ref(), args.input.as_deref())?;
    let output = app.onekeymap_path(args.output.as_deref())?;
    info!("importing {} from {}", plugin.editor_type(), input.display());

    let source = fs::read_to_string(&input)?;
    let base = app.load_keymap(&output)?;
    let service = ImportService::new(app.mappings.clone());
    let result = service.import(plugin.as_ref(), &source, Some(&base))?;

    print_summary(&result);
    app.save_keymap(&output, &result.setting)?;
    Ok(ExitCode::SUCCESS)
}

fn print_summary(result: &ImportResult) {
    let changes = &result.changes;
    println!(
        "{} added, {} removed, {} updated",
        changes.add.len(),
        changes.remove.len(),
        changes.update.len()
    );
    for action in &changes.add {
        println!("  + {} {}", action.name, bindings(action));
    }
    for action in &changes.remove {
        println!("  - {} {}", action.name, bindings(action));
    }
    for diff in &changes.update {
        println!(
            "  ~ {} {} -> {}",
            diff.after.name,
            bindings(&diff.before),
            bindings(&diff.after)
        );
    }

    for skipped in &result.report.skipped {
        println!(
            "skipped {} [{}]: {}",
            skipped.editor_action,
            skipped.keybindings.join(", "),
            skipped.reason
        );
    }
    for issue in &result.validation.issues {
        warn!("{issue}");
    }
}

fn bindings(action: &onekeymap_keymap::Action) -> String {
    action
        .bindings
        .iter()
        .map(|binding| binding.format(Platform::current(), "+"))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use onekeymap_config::Settings;

    #[test]
    fn imports_into_a_new_onekeymap_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("keymap.json");
        let output = dir.path().join("onekeymap.json");
        fs::write(
            &input,
            r#"[{"context": "Editor", "bindings": {"cmd-c": "editor::Copy"}}]"#,
        )
        .unwrap();

        let app = App::new(Settings::default(), None).unwrap();
        run(
            &app,
            ImportArgs {
                from: "zed".into(),
                input: Some(input),
                output: Some(output.clone()),
            },
        )
        .unwrap();

        let saved = app.load_keymap(&output).unwrap();
        let copy = saved.get("actions.edit.copy").unwrap();
        assert_eq!(copy.bindings[0].signature(), "cmd+c");
    }

    #[test]
    fn unknown_editor_fails() {
        let app = App::new(Settings::default(), None).unwrap();
        let args = ImportArgs {
            from: "notepad".into(),
            input: None,
            output: None,
        };
        assert!(run(&app, args).is_err());
    }
}
