//! Pipeline stages.
//!
//! A stage handles one [`StagedFile`] at a time and either forwards it,
//! drops it, or fails. Stages that keep state across files emit their
//! verdict from [`Stage::flush`] once the stream has ended.

pub mod fail_after;
pub mod fail_on_error;
pub mod lint;
pub mod report;

pub use fail_after::FailAfterErrorStage;
pub use fail_on_error::FailOnErrorStage;
pub use lint::LintStage;
pub use report::ReportStage;

use crate::error::PluginError;
use crate::filter::{self, FilterOutcome};
use crate::models::LintResult;
use crate::options::RunOptions;
use crate::record::StagedFile;
use crate::reporter::Reporter;

#[derive(Debug)]
pub enum Emit {
    Forward(StagedFile),
    Drop,
}

pub trait Stage {
    fn name(&self) -> &'static str;

    fn transform(&mut self, file: StagedFile) -> Result<Emit, PluginError>;

    /// Called once after the last file.
    fn flush(&mut self) -> Result<Vec<StagedFile>, PluginError> {
        Ok(Vec::new())
    }
}

/// Result of running the file filter inside a stage.
pub(crate) enum Gate {
    Proceed(StagedFile),
    Skipped(StagedFile),
}

pub(crate) fn gate(
    file: StagedFile,
    options: &RunOptions,
    reporter: &dyn Reporter,
) -> Result<Gate, PluginError> {
    match filter::check(&file.record, &options.filter_options(), reporter) {
        FilterOutcome::Continue => Ok(Gate::Proceed(file)),
        FilterOutcome::Skip { .. } => Ok(Gate::Skipped(file)),
        FilterOutcome::Reject(err) => Err(err),
    }
}

pub(crate) fn lint_data(file: &StagedFile) -> Result<&LintResult, PluginError> {
    file.lint.as_ref().ok_or_else(|| PluginError::NoLintData {
        path: file.path().to_path_buf(),
    })
}
