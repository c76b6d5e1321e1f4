//! CLI argument parsing via `clap`.

use crate::config::{FailMode, Overrides};
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "happypipe",
    version,
    about = "Lint SCSS files through an external linter",
    long_about = "happypipe — stream SCSS/Sass files through an external linter, report the issues, and fail the run on errors.\n\nConfiguration precedence: CLI > happypipe.toml > defaults.",
    after_help = "Examples:\n  happypipe run\n  happypipe run 'src/**/*.scss' --show-happy-files\n  happypipe run --fail immediate --no-report\n  happypipe run --linter happiness-scss --formatter compact",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
/// Supported subcommands.
pub enum Commands {
    /// Show version
    #[command(about = "Show version", long_about = "Print the current happypipe version.")]
    Version,
    /// Lint, report, and fail
    #[command(
        about = "Run the lint pipeline",
        long_about = "Lint every matched file, print the issues, then fail once all files were seen (or at the first failing file with --fail immediate).",
        after_help = "Examples:\n  happypipe run\n  happypipe run 'styles/**/*.scss' --no-underscore"
    )]
    Run(RunArgs),
}

#[derive(Args, Debug, Default)]
pub struct RunArgs {
    #[arg(help = "Glob patterns relative to the repo root (default: **/*.scss **/*.sass)")]
    pub patterns: Vec<String>,
    #[arg(long, help = "Repository root (default: current dir)")]
    pub repo_root: Option<String>,
    #[arg(long, action = clap::ArgAction::SetTrue, help = "Print issues for every file with problems")]
    pub report: bool,
    #[arg(long, action = clap::ArgAction::SetTrue, conflicts_with = "report", help = "Skip the report stage")]
    pub no_report: bool,
    #[arg(long, value_parser = ["after", "immediate", "none"], help = "When to fail: after|immediate|none (default: after)")]
    pub fail: Option<String>,
    #[arg(long, action = clap::ArgAction::SetTrue, help = "Print a notice for files without problems")]
    pub show_happy_files: bool,
    #[arg(long, action = clap::ArgAction::SetTrue, help = "Do not warn about skipped files")]
    pub silent: bool,
    #[arg(long, action = clap::ArgAction::SetTrue, help = "Skip partials (files starting with _)")]
    pub no_underscore: bool,
    #[arg(long, action = clap::ArgAction::SetTrue, help = "Lint empty files instead of skipping them")]
    pub allow_empty: bool,
    #[arg(long, action = clap::ArgAction::SetTrue, help = "Report errors without failing the run")]
    pub disabled: bool,
    #[arg(long, help = "Formatter: stylish|compact|json (default: stylish)")]
    pub formatter: Option<String>,
    #[arg(long, help = "Linter executable (default: sass-lint)")]
    pub linter: Option<String>,
    #[arg(long, action = clap::ArgAction::SetTrue, help = "Enable debug logging")]
    pub debug: bool,
}

fn flag(set: bool) -> Option<bool> {
    if set {
        Some(true)
    } else {
        None
    }
}

impl RunArgs {
    /// Flags as config overrides; unset flags defer to the config file.
    pub fn overrides(&self) -> Overrides {
        let report = if self.no_report {
            Some(false)
        } else {
            flag(self.report)
        };
        Overrides {
            repo_root: self.repo_root.clone(),
            patterns: self.patterns.clone(),
            silent: flag(self.silent),
            no_underscore: flag(self.no_underscore),
            no_empty: if self.allow_empty { Some(false) } else { None },
            show_happy_files: flag(self.show_happy_files),
            disabled: flag(self.disabled),
            report,
            fail: self.fail.as_deref().and_then(|f| f.parse::<FailMode>().ok()),
            formatter: self.formatter.clone(),
            linter: self.linter.clone(),
        }
    }
}
