//! Fail-after-error stage.
//!
//! A sink: it never forwards files. It counts errors while the stream runs
//! and reports once, from `flush`, failing the run if anything was found.

use super::{gate, lint_data, Emit, Gate, Stage};
use crate::error::PluginError;
use crate::messages;
use crate::options::{EndReport, RunOptions};
use crate::record::StagedFile;
use crate::reporter::{Reporter, TerminalReporter};
use std::sync::Arc;
use tracing::debug;

pub struct FailAfterErrorStage {
    options: RunOptions,
    reporter: Arc<dyn Reporter>,
    total: usize,
    lines: Vec<String>,
    last_formatted: Option<bool>,
}

impl FailAfterErrorStage {
    pub fn new(options: &RunOptions) -> Self {
        Self {
            options: options.clone(),
            reporter: Arc::new(TerminalReporter),
            total: 0,
            lines: Vec::new(),
            last_formatted: Some(false),
        }
    }

    pub fn with_reporter(mut self, reporter: Arc<dyn Reporter>) -> Self {
        self.reporter = reporter;
        self
    }

    #[cfg(test)]
    fn total(&self) -> usize {
        self.total
    }
}

impl Stage for FailAfterErrorStage {
    fn name(&self) -> &'static str {
        "fail-after-error"
    }

    fn transform(&mut self, file: StagedFile) -> Result<Emit, PluginError> {
        let file = match gate(file, &self.options, self.reporter.as_ref())? {
            Gate::Proceed(f) => f,
            Gate::Skipped(_) => return Ok(Emit::Drop),
        };
        let result = lint_data(&file)?;
        if result.errors() == 0 {
            return Ok(Emit::Drop);
        }
        self.last_formatted = file.formatted;
        self.total = self.total.saturating_add(result.errors());
        for r in &result.results {
            self.lines
                .push(messages::has_errors_line(r.error_count, &r.file_path));
        }
        debug!(path = %file.path().display(), total = self.total, "accumulated");
        Ok(Emit::Drop)
    }

    fn flush(&mut self) -> Result<Vec<StagedFile>, PluginError> {
        let total = std::mem::take(&mut self.total);
        let lines = std::mem::take(&mut self.lines);
        if total == 0 {
            self.options.notify(&EndReport::Run {
                message: None,
                error_count: 0,
                lines: &lines,
            });
            return Ok(Vec::new());
        }

        let message = messages::fail_after_error(total, &lines, self.last_formatted);
        self.options.notify(&EndReport::Run {
            message: Some(&message),
            error_count: total,
            lines: &lines,
        });
        if self.options.disabled {
            debug!(total, "errors found, stage disabled");
            return Ok(Vec::new());
        }
        Err(PluginError::LintErrors { message })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::MORE_INFO;
    use crate::record::FileRecord;
    use crate::reporter::MemoryReporter;
    use crate::stages::testing::{linted, scss};
    use std::sync::Mutex;

    type Seen = Arc<Mutex<Vec<(Option<String>, usize, Vec<String>)>>>;

    fn recording(opts: RunOptions) -> (RunOptions, Seen) {
        let seen: Seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let opts = opts.with_on_end(move |r| {
            if let EndReport::Run {
                message,
                error_count,
                lines,
            } = r
            {
                sink.lock()
                    .unwrap()
                    .push((message.map(str::to_string), *error_count, lines.to_vec()));
            }
        });
        (opts, seen)
    }

    fn stage(opts: &RunOptions) -> FailAfterErrorStage {
        FailAfterErrorStage::new(opts).with_reporter(Arc::new(MemoryReporter::new()))
    }

    #[test]
    fn test_never_forwards_files() {
        let mut st = stage(&RunOptions::default());
        for file in [
            linted("/r/a.scss", 0, 0),
            linted("/r/b.scss", 2, 0),
            linted("/r/c.scss", 0, 5),
            StagedFile::from(FileRecord::new("/r/e.scss", Vec::<u8>::new())),
        ] {
            assert!(matches!(st.transform(file).unwrap(), Emit::Drop));
        }
    }

    #[test]
    fn test_clean_and_dirty_file_scenario() {
        let mut st = stage(&RunOptions::default());
        st.transform(linted("/r/a.scss", 0, 0)).unwrap();
        st.transform(linted("/r/b.scss", 2, 0)).unwrap();
        let err = st.flush().unwrap_err();
        assert_eq!(
            err.to_string(),
            format!(
                "Fail after Error! 2 errors in 1 path:\n    has 2 errors in /r/b.scss{}",
                MORE_INFO
            )
        );
    }

    #[test]
    fn test_total_is_sum_of_file_errors() {
        let (opts, seen) = recording(RunOptions {
            disabled: true,
            ..RunOptions::default()
        });
        let mut st = stage(&opts);
        let counts = [3usize, 0, 1, 7];
        for (i, n) in counts.iter().enumerate() {
            st.transform(linted(&format!("/r/{}.scss", i), *n, 1)).unwrap();
        }
        assert_eq!(st.total(), 11);
        assert!(st.flush().unwrap().is_empty());
        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        let (msg, total, lines) = &seen[0];
        assert_eq!(*total, 11);
        assert_eq!(lines.len(), 3);
        assert!(msg
            .as_deref()
            .unwrap()
            .starts_with("Fail after Error! 11 errors in 3 paths:\n    has 3 errors in /r/0.scss"));
    }

    #[test]
    fn test_total_saturates_on_huge_counts() {
        let mut st = stage(&RunOptions::default());
        let mut file = linted("/r/a.scss", 1, 0);
        if let Some(lint) = file.lint.as_mut() {
            lint.error_count.count = usize::MAX;
        }
        st.transform(file).unwrap();
        st.transform(linted("/r/b.scss", 2, 0)).unwrap();
        assert_eq!(st.total(), usize::MAX);
        assert!(matches!(st.flush(), Err(PluginError::LintErrors { .. })));
    }

    #[test]
    fn test_clean_run_calls_hook_with_nothing() {
        let (opts, seen) = recording(RunOptions::default());
        let mut st = stage(&opts);
        st.transform(linted("/r/a.scss", 0, 0)).unwrap();
        assert!(st.flush().unwrap().is_empty());
        assert_eq!(*seen.lock().unwrap(), vec![(None, 0, Vec::new())]);
    }

    #[test]
    fn test_hint_dropped_when_last_file_explicitly_unformatted() {
        let mut st = stage(&RunOptions::default());
        let mut file = linted("/r/b.scss", 1, 0);
        file.formatted = Some(false);
        st.transform(file).unwrap();
        assert_eq!(
            st.flush().unwrap_err().to_string(),
            "Fail after Error! 1 error in 1 path:\n    has 1 error in /r/b.scss"
        );
    }

    #[test]
    fn test_missing_lint_data_is_immediate_error() {
        let mut st = stage(&RunOptions::default());
        let err = st.transform(scss("/r/raw.scss").into()).unwrap_err();
        assert!(matches!(err, PluginError::NoLintData { .. }));
        assert_eq!(st.total(), 0);
    }
}
