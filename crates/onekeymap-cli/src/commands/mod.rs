mod export;
mod import;
mod migrate;
mod validate;
mod view;

use std::process::ExitCode;

use onekeymap_common::Result;

use crate::app::App;
use crate::cli::Command;

pub fn run(app: &App, command: Command) -> Result<ExitCode> {
    match command {
        Command::Import(args) => import::run(app, args),
        Command::Export(args) => export::run(app, args),
        Command::Migrate(args) => migrate::run(app, args),
        Command::Validate(args) => validate::run(app, args),
        Command::View(args) => view::run(app, args),
    }
}
