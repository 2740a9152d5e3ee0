use std::process::ExitCode;

use onekeymap_common::{EditorType, OnekeymapError, Platform, Result};
use onekeymap_sync::validate::{
    DanglingActionRule, DuplicateMappingRule, KeybindConflictRule, PotentialShadowingRule,
    UnsupportedActionRule,
};
use onekeymap_sync::{ValidationReport, Validator};

use crate::app::App;
use crate::cli::ValidateArgs;

pub fn run(app: &App, args: ValidateArgs) -> Result<ExitCode> {
    let target = args
        .editor
        .as_deref()
        .map(|name| {
            name.parse::<EditorType>()
                .map_err(|_| OnekeymapError::UnknownEditor(name.to_string()))
        })
        .transpose()?;

    let input = app.onekeymap_path(args.input.as_deref())?;
    let keymap = app.load_keymap(&input)?;
    let report = validator(app, target).validate(&keymap, target);

    print_report(&report);
    Ok(if report.issues.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn validator(app: &App, target: Option<EditorType>) -> Validator {
    let mut validator = Validator::default()
        .with_rule(KeybindConflictRule::new(Some(app.mappings.clone())))
        .with_rule(DanglingActionRule::new(app.mappings.clone()))
        .with_rule(DuplicateMappingRule)
        .with_rule(PotentialShadowingRule::new(target, Platform::current()));
    if let Some(target) = target {
        validator = validator.with_rule(UnsupportedActionRule::new(app.mappings.clone(), target));
    }
    validator
}

fn print_report(report: &ValidationReport) {
    for issue in &report.issues {
        println!("error: {issue}");
    }
    for warning in &report.warnings {
        println!("warning: {warning}");
    }
    println!(
        "{} of {} actions passed, {} warnings",
        report.summary.succeeded,
        report.summary.processed,
        report.warnings.len()
    );
}
