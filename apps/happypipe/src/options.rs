//! Stage options.
//!
//! Stages take `&RunOptions` and keep their own clone, so later changes to
//! the caller's value never reach a stage that is already built.

use crate::models::LintResult;
use serde_json::{Map, Value as Json};
use std::fmt;
use std::sync::Arc;

/// Opaque options handed to the linter and the formatter.
pub type LinterOptions = Map<String, Json>;

/// Completion hook called by the fail stages.
pub type EndHook = Arc<dyn Fn(&EndReport<'_>) + Send + Sync>;

/// What the fail stages pass to the `on_end` hook.
#[derive(Debug, Clone, Copy)]
pub enum EndReport<'a> {
    /// One file checked by the fail-on-error stage.
    File {
        message: Option<&'a str>,
        result: &'a LintResult,
    },
    /// End of stream in the fail-after-error stage.
    Run {
        message: Option<&'a str>,
        error_count: usize,
        lines: &'a [String],
    },
}

pub const DEFAULT_EXTENSIONS: [&str; 2] = ["scss", "sass"];

#[derive(Clone)]
pub struct RunOptions {
    pub silent: bool,
    pub no_underscore: bool,
    pub no_empty: bool,
    pub extensions: Vec<String>,
    pub linter_options: LinterOptions,
    pub show_happy_files: bool,
    pub disabled: bool,
    pub on_end: Option<EndHook>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            silent: false,
            no_underscore: false,
            no_empty: true,
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            linter_options: LinterOptions::new(),
            show_happy_files: false,
            disabled: false,
            on_end: None,
        }
    }
}

impl fmt::Debug for RunOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunOptions")
            .field("silent", &self.silent)
            .field("no_underscore", &self.no_underscore)
            .field("no_empty", &self.no_empty)
            .field("extensions", &self.extensions)
            .field("linter_options", &self.linter_options)
            .field("show_happy_files", &self.show_happy_files)
            .field("disabled", &self.disabled)
            .field("on_end", &self.on_end.as_ref().map(|_| "<hook>"))
            .finish()
    }
}

impl RunOptions {
    pub fn with_on_end<F>(mut self, hook: F) -> Self
    where
        F: Fn(&EndReport<'_>) + Send + Sync + 'static,
    {
        self.on_end = Some(Arc::new(hook));
        self
    }

    pub fn filter_options(&self) -> FilterOptions<'_> {
        FilterOptions {
            silent: self.silent,
            no_underscore: self.no_underscore,
            no_empty: self.no_empty,
            extensions: &self.extensions,
        }
    }

    /// Invoke `on_end` when one is set.
    pub fn notify(&self, report: &EndReport<'_>) {
        if let Some(hook) = self.on_end.as_ref() {
            hook(report);
        }
    }
}

/// The subset of `RunOptions` the file filter looks at.
#[derive(Debug, Clone, Copy)]
pub struct FilterOptions<'a> {
    pub silent: bool,
    pub no_underscore: bool,
    pub no_empty: bool,
    pub extensions: &'a [String],
}
