//! happypipe core library.
//!
//! Streams SCSS/Sass files through an external linter and offers three
//! stages on top of the lint stage: report, fail-on-error, and
//! fail-after-error. Callers compose them into a linear [`pipeline::Pipeline`].
//!
//! High-level modules:
//! - `cli`: CLI argument parsing (binary uses this).
//! - `config`: Discovery and effective configuration resolution.
//! - `filter`: Which file records get processed at all.
//! - `linter`: The external linter seam and the process-backed linter.
//! - `formatter`: Result formatters used by the report stage.
//! - `stages`: The lint, report, and fail stages.
//! - `pipeline`: Linear stage composition with halt-on-error.
//! - `source`: Glob expansion into file records.
//! - `models`, `record`, `options`: Data passed between the pieces.
//! - `reporter`, `output`: Where user-facing lines go.
pub mod cli;
pub mod config;
pub mod error;
pub mod filter;
pub mod formatter;
pub mod linter;
pub mod messages;
pub mod models;
pub mod options;
pub mod output;
pub mod pipeline;
pub mod record;
pub mod reporter;
pub mod source;
pub mod stages;
