//! happypipe CLI binary entry point.
//! Builds the stage chain from the effective config and runs it.

use clap::Parser;
use happypipe::cli::{Cli, Commands, RunArgs};
use happypipe::config::{self, FailMode};
use happypipe::linter::CommandLinter;
use happypipe::output::{error_prefix, info_prefix, note_prefix, use_colors};
use happypipe::pipeline::Pipeline;
use happypipe::reporter::{Reporter, TerminalReporter};
use happypipe::stages::{FailAfterErrorStage, FailOnErrorStage, LintStage, ReportStage};
use happypipe::{formatter, source};
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// `--debug` forces debug logs; otherwise `RUST_LOG`, defaulting to warnings.
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("happypipe=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("happypipe=warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        Commands::Run(args) => {
            init_tracing(args.debug);
            run(&args)
        }
    }
}

fn run(args: &RunArgs) -> ExitCode {
    tracing::debug!("run args: {:?}", args);
    let eff = config::resolve_effective(&args.overrides());
    if !eff.config_found {
        eprintln!("{} No happypipe.toml found; using defaults.", note_prefix());
    }

    let records = match source::collect_records(&eff.repo_root, &eff.patterns) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("{} {}", error_prefix(), e);
            return ExitCode::from(2);
        }
    };
    if records.is_empty() {
        eprintln!(
            "{} No files matched [{}]",
            info_prefix(),
            eff.patterns.join(", ")
        );
        return ExitCode::SUCCESS;
    }

    let reporter: Arc<dyn Reporter> = Arc::new(TerminalReporter);
    let linter = CommandLinter::new(eff.linter_command.clone()).with_args(eff.linter_args.clone());
    let mut pipeline = Pipeline::new().stage(LintStage::new(linter, &eff.run).with_reporter(reporter.clone()));

    if eff.report {
        let color = use_colors();
        let chosen = match formatter::resolve(eff.formatter.as_deref(), &eff.run.linter_options, color) {
            Ok(f) => f,
            Err(e) => {
                eprintln!("{} {}", error_prefix(), e);
                return ExitCode::from(2);
            }
        };
        pipeline = pipeline.stage(
            ReportStage::with_formatter(chosen, &eff.run)
                .with_reporter(reporter.clone())
                .with_color(color),
        );
    }
    match eff.fail {
        FailMode::After => {
            pipeline = pipeline.stage(FailAfterErrorStage::new(&eff.run).with_reporter(reporter.clone()));
        }
        FailMode::Immediate => {
            pipeline = pipeline.stage(FailOnErrorStage::new(&eff.run).with_reporter(reporter.clone()));
        }
        FailMode::None => {}
    }
    tracing::debug!(stages = ?pipeline.stage_names(), files = records.len(), "starting");

    match pipeline.run(records) {
        Ok(files) => {
            tracing::debug!(forwarded = files.len(), "finished");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{} [{}] {}", error_prefix(), e.plugin(), e);
            ExitCode::from(1)
        }
    }
}
