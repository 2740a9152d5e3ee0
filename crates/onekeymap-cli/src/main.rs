mod app;
mod cli;
mod commands;

use std::process::ExitCode;

use onekeymap_config::{settings, Settings};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args = cli::parse();

    // Settings feed the log level, so they load before the subscriber.
    let loaded = settings::load_default();
    let (verbose, quiet) = loaded
        .as_ref()
        .map(|s| (s.verbose, s.quiet))
        .unwrap_or((false, false));

    let directive = args.log_directive(verbose, quiet);
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("onekeymap=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("onekeymap v{} starting", env!("CARGO_PKG_VERSION"));

    let settings = loaded.unwrap_or_else(|e| {
        tracing::warn!("Settings load failed, using defaults: {e}");
        Settings::default()
    });

    let app = match app::App::new(settings, args.mappings.as_deref()) {
        Ok(app) => app,
        Err(e) => {
            tracing::error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    match commands::run(&app, args.command) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
