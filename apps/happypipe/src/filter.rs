//! File filter deciding whether a record gets processed.
//!
//! Rules, in order:
//! 1. a record without contents is skipped silently;
//! 2. an unsupported extension is rejected (never silent, never skipped);
//! 3. an empty file is skipped when `no_empty` is on;
//! 4. an underscore partial is skipped when `no_underscore` is on.
//!
//! Skips 3 and 4 print a warning through the reporter unless `silent`.

use crate::error::PluginError;
use crate::options::FilterOptions;
use crate::record::FileRecord;
use crate::reporter::Reporter;
use tracing::debug;

/// Marker prefix of partial stylesheets.
pub const PARTIAL_PREFIX: char = '_';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Null,
    Empty,
    Partial,
}

#[derive(Debug)]
pub enum FilterOutcome {
    Continue,
    Skip { reason: SkipReason, warned: bool },
    Reject(PluginError),
}

pub fn check(record: &FileRecord, opts: &FilterOptions<'_>, reporter: &dyn Reporter) -> FilterOutcome {
    if record.is_null() {
        debug!(path = %record.path.display(), "skip: no contents");
        return FilterOutcome::Skip {
            reason: SkipReason::Null,
            warned: false,
        };
    }

    let ext = record.extension().unwrap_or_default();
    if !opts.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)) {
        return FilterOutcome::Reject(PluginError::Unsupported {
            path: record.path.clone(),
            extension: ext.to_string(),
        });
    }

    if opts.no_empty && record.is_empty() {
        return skip(record, SkipReason::Empty, "Empty file", opts, reporter);
    }

    let partial = record
        .file_name()
        .is_some_and(|n| n.starts_with(PARTIAL_PREFIX));
    if opts.no_underscore && partial {
        return skip(record, SkipReason::Partial, "Partial file", opts, reporter);
    }

    FilterOutcome::Continue
}

fn skip(
    record: &FileRecord,
    reason: SkipReason,
    label: &str,
    opts: &FilterOptions<'_>,
    reporter: &dyn Reporter,
) -> FilterOutcome {
    debug!(path = %record.path.display(), ?reason, "skip");
    let warned = !opts.silent;
    if warned {
        reporter.warn(&format!(
            "{}: {} skipped > {}",
            crate::error::PLUGIN_NAME,
            label,
            record.relative().display()
        ));
    }
    FilterOutcome::Skip { reason, warned }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::RunOptions;
    use crate::reporter::MemoryReporter;

    fn run(record: &FileRecord, opts: &RunOptions) -> (FilterOutcome, MemoryReporter) {
        let reporter = MemoryReporter::new();
        let out = check(record, &opts.filter_options(), &reporter);
        (out, reporter)
    }

    #[test]
    fn test_supported_file_continues() {
        let rec = FileRecord::new("/p/main.scss", "a { color: red; }");
        let (out, rep) = run(&rec, &RunOptions::default());
        assert!(matches!(out, FilterOutcome::Continue));
        assert!(rep.lines().is_empty());
    }

    #[test]
    fn test_unsupported_extension_rejected_regardless_of_options() {
        let rec = FileRecord::new("/p/_main.css", "");
        let variants = [
            RunOptions::default(),
            RunOptions {
                silent: true,
                no_underscore: true,
                ..RunOptions::default()
            },
            RunOptions {
                no_empty: false,
                ..RunOptions::default()
            },
        ];
        for opts in variants.iter() {
            let (out, _) = run(&rec, opts);
            assert!(matches!(out, FilterOutcome::Reject(PluginError::Unsupported { .. })));
        }
    }

    #[test]
    fn test_empty_file_skipped_with_warning() {
        let rec = FileRecord::new("/p/empty.scss", Vec::<u8>::new());
        let (out, rep) = run(&rec, &RunOptions::default());
        assert!(matches!(
            out,
            FilterOutcome::Skip {
                reason: SkipReason::Empty,
                warned: true
            }
        ));
        assert_eq!(rep.warnings().len(), 1);
        assert!(rep.warnings()[0].contains("Empty file"));
    }

    #[test]
    fn test_silent_suppresses_warning() {
        let rec = FileRecord::new("/p/empty.scss", Vec::<u8>::new());
        let opts = RunOptions {
            silent: true,
            ..RunOptions::default()
        };
        let (out, rep) = run(&rec, &opts);
        assert!(matches!(out, FilterOutcome::Skip { warned: false, .. }));
        assert!(rep.lines().is_empty());
    }

    #[test]
    fn test_empty_allowed_when_no_empty_off() {
        let rec = FileRecord::new("/p/empty.scss", Vec::<u8>::new());
        let opts = RunOptions {
            no_empty: false,
            ..RunOptions::default()
        };
        assert!(matches!(run(&rec, &opts).0, FilterOutcome::Continue));
    }

    #[test]
    fn test_partials_only_skipped_when_enabled() {
        let rec = FileRecord::new("/p/_vars.scss", "$a: 1;");
        assert!(matches!(run(&rec, &RunOptions::default()).0, FilterOutcome::Continue));
        let opts = RunOptions {
            no_underscore: true,
            ..RunOptions::default()
        };
        assert!(matches!(
            run(&rec, &opts).0,
            FilterOutcome::Skip {
                reason: SkipReason::Partial,
                ..
            }
        ));
    }

    #[test]
    fn test_null_record_skipped_silently() {
        let rec = FileRecord::directory("/p/dir.scss");
        let (out, rep) = run(&rec, &RunOptions::default());
        assert!(matches!(
            out,
            FilterOutcome::Skip {
                reason: SkipReason::Null,
                warned: false
            }
        ));
        assert!(rep.lines().is_empty());
    }

    #[test]
    fn test_extension_match_ignores_case() {
        let rec = FileRecord::new("/p/MAIN.SCSS", "a {}");
        assert!(matches!(run(&rec, &RunOptions::default()).0, FilterOutcome::Continue));
    }
}
