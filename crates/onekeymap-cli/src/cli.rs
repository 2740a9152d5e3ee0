use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};

/// onekeymap: one keymap for every editor.
#[derive(Parser, Debug)]
#[command(name = "onekeymap", version, about)]
pub struct Args {
    /// Action mapping table to use instead of the built-in one.
    #[arg(long, global = true)]
    pub mappings: Option<PathBuf>,

    /// Log level override (debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Enable debug logging.
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log warnings and errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Read an editor keymap into onekeymap.json.
    Import(ImportArgs),
    /// Write onekeymap.json into an editor keymap.
    Export(ExportArgs),
    /// Convert one editor's keymap straight into another editor's keymap.
    Migrate(MigrateArgs),
    /// Check onekeymap.json for conflicts and unknown actions.
    Validate(ValidateArgs),
    /// Print the actions in onekeymap.json.
    View(ViewArgs),
}

#[derive(ClapArgs, Debug)]
pub struct ImportArgs {
    /// Source editor, e.g. `vscode`, `zed` or `intellij.goland`.
    #[arg(long)]
    pub from: String,

    /// Editor keymap file. Defaults to the editor's configured or detected file.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// onekeymap.json to merge into and write.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(ClapArgs, Debug)]
pub struct ExportArgs {
    /// Target editor.
    #[arg(long)]
    pub to: String,

    /// onekeymap.json to read.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Editor keymap file to update.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print the diff instead of writing the file.
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(ClapArgs, Debug)]
pub struct MigrateArgs {
    /// Source editor.
    #[arg(long)]
    pub from: String,

    /// Target editor, e.g. `helix`.
    #[arg(long)]
    pub to: String,

    /// Source editor keymap file.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Target editor keymap file to update.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print the diff instead of writing the file.
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(ClapArgs, Debug)]
pub struct ValidateArgs {
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Also check that every action can be exported to this editor.
    #[arg(long)]
    pub editor: Option<String>,
}

#[derive(ClapArgs, Debug)]
pub struct ViewArgs {
    #[arg(short, long)]
    pub input: Option<PathBuf>,
}

pub fn parse() -> Args {
    Args::parse()
}

impl Args {
    /// The `EnvFilter` directive implied by the flags.
    pub fn log_directive(&self, settings_verbose: bool, settings_quiet: bool) -> String {
        if let Some(level) = &self.log_level {
            if level.contains('=') {
                return level.clone();
            }
            return format!("onekeymap={level}");
        }
        if self.verbose || (settings_verbose && !self.quiet) {
            "onekeymap=debug".into()
        } else if self.quiet || settings_quiet {
            "onekeymap=warn".into()
        } else {
            "onekeymap=info".into()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(args).unwrap()
    }

    #[test]
    fn import_flags() {
        let args = parse(&["onekeymap", "import", "--from", "zed", "-i", "keymap.json"]);
        let Command::Import(import) = args.command else {
            panic!("expected import");
        };
        assert_eq!(import.from, "zed");
        assert_eq!(import.input, Some(PathBuf::from("keymap.json")));
        assert_eq!(import.output, None);
    }

    #[test]
    fn global_flags_after_subcommand() {
        let args = parse(&[
            "onekeymap",
            "export",
            "--to",
            "vscode",
            "--dry-run",
            "--mappings",
            "table.yaml",
        ]);
        assert_eq!(args.mappings, Some(PathBuf::from("table.yaml")));
        assert!(matches!(args.command, Command::Export(ExportArgs { dry_run: true, .. })));
    }

    #[test]
    fn migrate_needs_both_editors() {
        let args = parse(&["onekeymap", "migrate", "--from", "vscode", "--to", "helix", "--dry-run"]);
        let Command::Migrate(migrate) = args.command else {
            panic!("expected migrate");
        };
        assert_eq!(migrate.from, "vscode");
        assert_eq!(migrate.to, "helix");
        assert!(migrate.dry_run);
        assert!(Args::try_parse_from(["onekeymap", "migrate", "--from", "zed"]).is_err());
    }

    #[test]
    fn verbose_and_quiet_conflict() {
        assert!(Args::try_parse_from(["onekeymap", "-v", "-q", "view"]).is_err());
    }

    #[test]
    fn log_directive_precedence() {
        assert_eq!(parse(&["onekeymap", "view"]).log_directive(false, false), "onekeymap=info");
        assert_eq!(parse(&["onekeymap", "-v", "view"]).log_directive(false, true), "onekeymap=debug");
        assert_eq!(parse(&["onekeymap", "view"]).log_directive(false, true), "onekeymap=warn");
        assert_eq!(parse(&["onekeymap", "-q", "view"]).log_directive(true, false), "onekeymap=warn");
        assert_eq!(
            parse(&["onekeymap", "--log-level", "trace", "view"]).log_directive(false, false),
            "onekeymap=trace"
        );
        assert_eq!(
            parse(&["onekeymap", "--log-level", "onekeymap_sync=debug", "view"])
                .log_directive(false, false),
            "onekeymap_sync=debug"
        );
    }
}
