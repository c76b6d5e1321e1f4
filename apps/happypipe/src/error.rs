//! Error types for pipeline stages and source loading.
//!
//! Every fatal stage condition is a [`PluginError`]. It carries a
//! human-readable, possibly multi-line message; nothing is retried.

use crate::formatter::FormatError;
use crate::linter::LinterError;
use std::path::PathBuf;
use thiserror::Error;

/// Name used to tag errors and terminal notices.
pub const PLUGIN_NAME: &str = "happypipe";

/// Fatal condition raised by a pipeline stage.
#[derive(Debug, Error)]
pub enum PluginError {
    /// The file's extension is not one the linter handles.
    #[error("Unsupported file extension '.{extension}': {}", .path.display())]
    Unsupported { path: PathBuf, extension: String },

    /// The external linter itself failed.
    #[error("Linter failed on {}: {source}", .path.display())]
    Linter {
        path: PathBuf,
        #[source]
        source: LinterError,
    },

    /// A report/fail stage received a file that was never linted.
    #[error("No lint data for {}; run the lint stage first", .path.display())]
    NoLintData { path: PathBuf },

    /// The formatter could not render the results.
    #[error("Formatter failed: {0}")]
    Formatter(#[from] FormatError),

    /// Linting succeeded and found errors.
    #[error("{message}")]
    LintErrors { message: String },
}

impl PluginError {
    pub fn plugin(&self) -> &'static str {
        PLUGIN_NAME
    }
}

/// Failure while expanding source patterns.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Invalid glob pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_render_paths() {
        let e = PluginError::Unsupported {
            path: PathBuf::from("a/b.css"),
            extension: "css".into(),
        };
        assert_eq!(e.to_string(), "Unsupported file extension '.css': a/b.css");
        let e = PluginError::LintErrors {
            message: "Fail on Error! 1 error in 1 path:\n    x".into(),
        };
        assert!(e.to_string().starts_with("Fail on Error!"));
        assert_eq!(e.plugin(), "happypipe");
    }
}
