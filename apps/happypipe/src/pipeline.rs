//! Linear composition of stages.
//!
//! Files are pushed one at a time through every stage in order. The first
//! stage error halts the run: no further files are delivered and the error
//! is returned. After the last file each stage is flushed in order, and
//! anything a flush emits continues through the stages after it.

use crate::error::PluginError;
use crate::record::{FileRecord, StagedFile};
use crate::stages::{Emit, Stage};
use tracing::debug;

#[derive(Default)]
pub struct Pipeline {
    stages: Vec<Box<dyn Stage>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(mut self, stage: impl Stage + 'static) -> Self {
        self.stages.push(Box::new(stage));
        self
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    /// Run every record through the pipeline.
    ///
    /// Returns the files that came out of the last stage.
    pub fn run<I>(&mut self, records: I) -> Result<Vec<StagedFile>, PluginError>
    where
        I: IntoIterator<Item = FileRecord>,
    {
        let mut out = Vec::new();
        for record in records {
            if let Some(file) = self.push(0, record.into())? {
                out.push(file);
            }
        }
        for idx in 0..self.stages.len() {
            let name = self.stages[idx].name();
            let flushed = self.stages[idx]
                .flush()
                .inspect_err(|e| debug!(stage = name, error = %e, "flush failed"))?;
            for file in flushed {
                if let Some(file) = self.push(idx + 1, file)? {
                    out.push(file);
                }
            }
        }
        Ok(out)
    }

    fn push(&mut self, from: usize, file: StagedFile) -> Result<Option<StagedFile>, PluginError> {
        let mut current = file;
        for stage in self.stages[from..].iter_mut() {
            let name = stage.name();
            match stage.transform(current) {
                Ok(Emit::Forward(next)) => current = next,
                Ok(Emit::Drop) => {
                    debug!(stage = name, "dropped");
                    return Ok(None);
                }
                Err(e) => {
                    debug!(stage = name, error = %e, "halted");
                    return Err(e);
                }
            }
        }
        Ok(Some(current))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::RunOptions;
    use crate::reporter::MemoryReporter;
    use crate::formatter::Stylish;
    use crate::stages::testing::{scss, StubLinter};
    use crate::stages::{FailAfterErrorStage, FailOnErrorStage, LintStage, ReportStage};
    use std::sync::Arc;

    /// Counts files it sees; used to observe what reaches the tail.
    struct Probe {
        seen: Arc<std::sync::atomic::AtomicUsize>,
    }

    impl Stage for Probe {
        fn name(&self) -> &'static str {
            "probe"
        }

        fn transform(&mut self, file: StagedFile) -> Result<Emit, PluginError> {
            self.seen.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            Ok(Emit::Forward(file))
        }
    }

    fn lint_and_report(
        linter: StubLinter,
        opts: &RunOptions,
        rep: &Arc<MemoryReporter>,
    ) -> Pipeline {
        Pipeline::new()
            .stage(LintStage::new(linter, opts).with_reporter(rep.clone()))
            .stage(
                ReportStage::with_formatter(Box::new(Stylish { color: false }), opts)
                    .with_reporter(rep.clone())
                    .with_color(false),
            )
    }

    #[test]
    fn test_default_chain_fails_after_all_files() {
        let rep = Arc::new(MemoryReporter::new());
        let opts = RunOptions {
            show_happy_files: true,
            ..RunOptions::default()
        };
        let mut p = lint_and_report(StubLinter::with_errors("b.scss", 2), &opts, &rep)
            .stage(FailAfterErrorStage::new(&opts).with_reporter(rep.clone()));
        assert_eq!(p.stage_names(), vec!["lint", "report", "fail-after-error"]);
        let err = p.run(vec![scss("/r/a.scss"), scss("/r/b.scss")]).unwrap_err();
        assert!(err
            .to_string()
            .starts_with("Fail after Error! 2 errors in 1 path:\n    has 2 errors in /r/b.scss"));
        let infos = rep.infos();
        assert_eq!(infos[0], "HAPPY FILE > /r/a.scss");
        assert!(infos[1].contains("/r/b.scss"));
    }

    #[test]
    fn test_clean_run_succeeds_with_no_output_files() {
        let rep = Arc::new(MemoryReporter::new());
        let opts = RunOptions::default();
        let mut p = lint_and_report(StubLinter::default(), &opts, &rep)
            .stage(FailAfterErrorStage::new(&opts).with_reporter(rep.clone()));
        let out = p.run(vec![scss("/r/a.scss"), scss("/r/b.scss")]).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_fail_on_error_halts_later_files() {
        let rep = Arc::new(MemoryReporter::new());
        let opts = RunOptions::default();
        let seen = Arc::new(std::sync::atomic::AtomicUsize::new(0));
        let mut p = lint_and_report(StubLinter::with_errors("a.scss", 1), &opts, &rep)
            .stage(FailOnErrorStage::new(&opts).with_reporter(rep.clone()))
            .stage(Probe { seen: seen.clone() });
        let err = p
            .run(vec![scss("/r/a.scss"), scss("/r/b.scss")])
            .unwrap_err();
        assert_eq!(err.to_string(), "Fail on Error! 1 error in 1 path:\n    /r/a.scss");
        assert_eq!(seen.load(std::sync::atomic::Ordering::SeqCst), 0);
    }

    #[test]
    fn test_fail_on_error_disabled_forwards_everything() {
        let rep = Arc::new(MemoryReporter::new());
        let opts = RunOptions {
            disabled: true,
            ..RunOptions::default()
        };
        let mut p = Pipeline::new()
            .stage(LintStage::new(StubLinter::with_errors("a.scss", 1), &opts).with_reporter(rep.clone()))
            .stage(FailOnErrorStage::new(&opts).with_reporter(rep.clone()));
        let out = p.run(vec![scss("/r/a.scss"), scss("/r/b.scss")]).unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].lint.as_ref().unwrap().errors(), 1);
        assert_eq!(out[0].formatted, None);
    }

    #[test]
    fn test_unsupported_file_stops_the_stream() {
        let rep = Arc::new(MemoryReporter::new());
        let opts = RunOptions::default();
        let mut p = lint_and_report(StubLinter::default(), &opts, &rep);
        let err = p
            .run(vec![
                crate::record::FileRecord::new("/r/x.css", "a{}"),
                scss("/r/a.scss"),
            ])
            .unwrap_err();
        assert!(matches!(err, PluginError::Unsupported { .. }));
        assert!(rep.infos().is_empty());
    }

    #[test]
    fn test_empty_pipeline_passes_records_through() {
        let mut p = Pipeline::new();
        assert!(p.stage_names().is_empty());
        let out = p.run(vec![scss("/r/a.scss")]).unwrap();
        assert_eq!(out.len(), 1);
        assert!(out[0].lint.is_none());
    }
}
