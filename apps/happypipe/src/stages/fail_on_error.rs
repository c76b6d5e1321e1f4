//! Fail-on-error stage: stops at the first file with lint errors.

use super::{gate, lint_data, Emit, Gate, Stage};
use crate::error::PluginError;
use crate::messages;
use crate::options::{EndReport, RunOptions};
use crate::record::StagedFile;
use crate::reporter::{Reporter, TerminalReporter};
use std::sync::Arc;
use tracing::debug;

pub struct FailOnErrorStage {
    options: RunOptions,
    reporter: Arc<dyn Reporter>,
}

impl FailOnErrorStage {
    pub fn new(options: &RunOptions) -> Self {
        Self {
            options: options.clone(),
            reporter: Arc::new(TerminalReporter),
        }
    }

    pub fn with_reporter(mut self, reporter: Arc<dyn Reporter>) -> Self {
        self.reporter = reporter;
        self
    }
}

impl Stage for FailOnErrorStage {
    fn name(&self) -> &'static str {
        "fail-on-error"
    }

    fn transform(&mut self, file: StagedFile) -> Result<Emit, PluginError> {
        let file = match gate(file, &self.options, self.reporter.as_ref())? {
            Gate::Proceed(f) => f,
            Gate::Skipped(f) => return Ok(Emit::Forward(f)),
        };
        let result = lint_data(&file)?;
        let count = result.errors();
        if count == 0 {
            self.options.notify(&EndReport::File {
                message: None,
                result,
            });
            return Ok(Emit::Forward(file));
        }

        let message = messages::fail_on_error(count, &result.file_paths(), file.formatted);
        self.options.notify(&EndReport::File {
            message: Some(&message),
            result,
        });
        if self.options.disabled {
            debug!(path = %file.path().display(), "errors found, stage disabled");
            return Ok(Emit::Forward(file));
        }
        Err(PluginError::LintErrors { message })
    }
}
