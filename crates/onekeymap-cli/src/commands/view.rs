use std::process::ExitCode;

use onekeymap_common::{Platform, Result};
use onekeymap_keymap::Keymap;

use crate::app::App;
use crate::cli::ViewArgs;

pub fn run(app: &App, args: ViewArgs) -> Result<ExitCode> {
    let input = app.onekeymap_path(args.input.as_deref())?;
    let keymap = app.load_keymap(&input)?;
    print!("{}", render(app, &keymap, Platform::current()));
    Ok(ExitCode::SUCCESS)
}

/// One line per action: id, display name, bindings.
fn render(app: &App, keymap: &Keymap, platform: Platform) -> String {
    let width = keymap
        .actions
        .iter()
        .map(|action| action.name.len())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for action in &keymap.actions {
        let display = action
            .meta
            .display_name
            .clone()
            .or_else(|| {
                app.mappings
                    .get(&action.name)
                    .map(|mapping| mapping.name.clone())
                    .filter(|name| !name.is_empty())
            })
            .unwrap_or_default();
        let bindings: Vec<String> = action
            .bindings
            .iter()
            .map(|binding| binding.format(platform, "+"))
            .collect();
        out.push_str(&format!(
            "{:width$}  {:24}  {}\n",
            action.name,
            display,
            bindings.join(", ")
        ));
    }
    out
}
