//! Lint stage: runs the linter and attaches its result to the file.

use super::{gate, Emit, Gate, Stage};
use crate::error::PluginError;
use crate::linter::{LintInput, Linter};
use crate::options::RunOptions;
use crate::record::StagedFile;
use crate::reporter::{Reporter, TerminalReporter};
use std::sync::Arc;
use tracing::debug;

pub struct LintStage {
    linter: Box<dyn Linter>,
    options: RunOptions,
    reporter: Arc<dyn Reporter>,
}

impl LintStage {
    pub fn new(linter: impl Linter + 'static, options: &RunOptions) -> Self {
        Self {
            linter: Box::new(linter),
            options: options.clone(),
            reporter: Arc::new(TerminalReporter),
        }
    }

    pub fn with_reporter(mut self, reporter: Arc<dyn Reporter>) -> Self {
        self.reporter = reporter;
        self
    }
}

impl Stage for LintStage {
    fn name(&self) -> &'static str {
        "lint"
    }

    fn transform(&mut self, file: StagedFile) -> Result<Emit, PluginError> {
        let mut file = match gate(file, &self.options, self.reporter.as_ref())? {
            Gate::Proceed(f) => f,
            Gate::Skipped(f) => return Ok(Emit::Forward(f)),
        };
        let input = LintInput::from_record(&file.record);
        let result = self
            .linter
            .lint(&input, &self.options.linter_options)
            .map_err(|source| PluginError::Linter {
                path: file.path().to_path_buf(),
                source,
            })?;
        debug!(
            path = %file.path().display(),
            errors = result.errors(),
            warnings = result.warnings(),
            "linted"
        );
        file.lint = Some(result);
        Ok(Emit::Forward(file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::FileRecord;
    use crate::reporter::MemoryReporter;
    use crate::stages::testing::{scss, StubLinter};
    use serde_json::Value as Json;
    use std::rc::Rc;

    /// Shares the stub with the test so calls can be inspected afterwards.
    struct Shared(Rc<StubLinter>);

    impl Linter for Shared {
        fn lint(
            &self,
            input: &LintInput,
            options: &crate::options::LinterOptions,
        ) -> Result<crate::models::LintResult, crate::linter::LinterError> {
            self.0.lint(input, options)
        }
    }

    fn stage(stub: Rc<StubLinter>, opts: &RunOptions) -> (LintStage, Arc<MemoryReporter>) {
        let rep = Arc::new(MemoryReporter::new());
        let st = LintStage::new(Shared(stub), opts).with_reporter(rep.clone());
        (st, rep)
    }

    #[test]
    fn test_attaches_result_and_forwards() {
        let stub = Rc::new(StubLinter::with_errors("a.scss", 2));
        let (mut st, _) = stage(stub.clone(), &RunOptions::default());
        let out = st.transform(scss("/r/a.scss").into()).unwrap();
        let Emit::Forward(file) = out else {
            panic!("expected forward");
        };
        assert_eq!(file.lint.as_ref().unwrap().errors(), 2);
        assert_eq!(file.record, scss("/r/a.scss"));
        let calls = stub.calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0.format, "scss");
        assert_eq!(calls[0].0.text, "#main { color: red; }");
    }

    #[test]
    fn test_unsupported_extension_is_error() {
        let stub = Rc::new(StubLinter::default());
        let (mut st, _) = stage(stub.clone(), &RunOptions::default());
        let err = st.transform(FileRecord::new("/r/a.less", "a{}").into()).unwrap_err();
        assert!(matches!(err, PluginError::Unsupported { .. }));
        assert!(stub.calls.borrow().is_empty());
    }

    #[test]
    fn test_empty_file_never_reaches_linter() {
        let stub = Rc::new(StubLinter::default());
        let (mut st, rep) = stage(stub.clone(), &RunOptions::default());
        let out = st.transform(FileRecord::new("/r/e.scss", Vec::<u8>::new()).into()).unwrap();
        let Emit::Forward(file) = out else {
            panic!("expected forward");
        };
        assert!(file.lint.is_none());
        assert!(stub.calls.borrow().is_empty());
        assert_eq!(rep.warnings().len(), 1);
    }

    #[test]
    fn test_linter_failure_is_wrapped() {
        let stub = Rc::new(StubLinter {
            fail: true,
            ..StubLinter::default()
        });
        let (mut st, _) = stage(stub, &RunOptions::default());
        let err = st.transform(scss("/r/a.scss").into()).unwrap_err();
        assert!(matches!(err, PluginError::Linter { .. }));
        assert!(err.to_string().contains("/r/a.scss"));
    }

    #[test]
    fn test_linter_options_forwarded_and_copied_at_construction() {
        let stub = Rc::new(StubLinter::default());
        let mut opts = RunOptions::default();
        opts.linter_options
            .insert("config".into(), Json::String(".sass-lint.yml".into()));
        let (mut st, _) = stage(stub.clone(), &opts);
        opts.linter_options.clear();
        opts.extensions = vec!["css".into()];
        st.transform(scss("/r/a.scss").into()).unwrap();
        let calls = stub.calls.borrow();
        assert_eq!(calls[0].1["config"], ".sass-lint.yml");
    }
}
