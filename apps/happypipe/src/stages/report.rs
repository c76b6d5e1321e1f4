//! Report stage: prints lint results and marks the file as formatted.

use super::{gate, lint_data, Emit, Gate, Stage};
use crate::error::PluginError;
use crate::formatter::{self, FormatError, Formatter};
use crate::options::RunOptions;
use crate::output::{happy_line, use_colors};
use crate::record::StagedFile;
use crate::reporter::{Reporter, TerminalReporter};
use std::sync::Arc;

pub struct ReportStage {
    formatter: Box<dyn Formatter>,
    options: RunOptions,
    reporter: Arc<dyn Reporter>,
    color: bool,
}

impl ReportStage {
    /// Uses the formatter named by `linter_options.formatter`, else stylish.
    pub fn new(options: &RunOptions) -> Result<Self, FormatError> {
        let color = use_colors();
        let formatter = formatter::resolve(None, &options.linter_options, color)?;
        Ok(Self::with_formatter(formatter, options).with_color(color))
    }

    pub fn with_formatter(formatter: Box<dyn Formatter>, options: &RunOptions) -> Self {
        Self {
            formatter,
            options: options.clone(),
            reporter: Arc::new(TerminalReporter),
            color: use_colors(),
        }
    }

    pub fn with_reporter(mut self, reporter: Arc<dyn Reporter>) -> Self {
        self.reporter = reporter;
        self
    }

    /// Colors for the happy-file notice.
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }
}

impl Stage for ReportStage {
    fn name(&self) -> &'static str {
        "report"
    }

    fn transform(&mut self, file: StagedFile) -> Result<Emit, PluginError> {
        let mut file = match gate(file, &self.options, self.reporter.as_ref())? {
            Gate::Proceed(f) => f,
            Gate::Skipped(f) => return Ok(Emit::Forward(f)),
        };
        let result = lint_data(&file)?;
        if result.is_clean() {
            if self.options.show_happy_files {
                let path = file.path().to_string_lossy();
                self.reporter.info(&happy_line(&path, self.color));
            }
            return Ok(Emit::Forward(file));
        }
        let text = self
            .formatter
            .format(&result.results, &self.options.linter_options)?;
        self.reporter.info(&text);
        file.formatted = Some(true);
        Ok(Emit::Forward(file))
    }
}
