//! Result formatters used by the report stage.
//!
//! Three built-ins are available by name: `stylish` (default), `compact`
//! and `json`. A `formatter` string in the linter options selects one when
//! no explicit name is given.

use crate::models::{FileResult, Severity};
use crate::options::LinterOptions;
use owo_colors::OwoColorize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("unknown formatter '{name}' (expected stylish, compact or json)")]
    Unknown { name: String },
    #[error("could not serialize results: {0}")]
    Json(#[from] serde_json::Error),
}

pub trait Formatter {
    fn format(&self, results: &[FileResult], options: &LinterOptions) -> Result<String, FormatError>;
}

pub const DEFAULT_FORMATTER: &str = "stylish";

/// Look up a built-in formatter.
pub fn by_name(name: &str, color: bool) -> Result<Box<dyn Formatter>, FormatError> {
    match name {
        "stylish" => Ok(Box::new(Stylish { color })),
        "compact" => Ok(Box::new(Compact)),
        "json" => Ok(Box::new(JsonFormatter)),
        other => Err(FormatError::Unknown {
            name: other.to_string(),
        }),
    }
}

/// Explicit name, else `options.formatter`, else the default.
pub fn resolve(
    explicit: Option<&str>,
    options: &LinterOptions,
    color: bool,
) -> Result<Box<dyn Formatter>, FormatError> {
    let name = explicit
        .or_else(|| options.get("formatter").and_then(|v| v.as_str()))
        .unwrap_or(DEFAULT_FORMATTER);
    by_name(name, color)
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{} {}", n, word)
    } else {
        format!("{} {}s", n, word)
    }
}

/// Grouped per file with aligned columns and a totals line.
#[derive(Debug, Clone, Copy)]
pub struct Stylish {
    pub color: bool,
}

impl Formatter for Stylish {
    fn format(&self, results: &[FileResult], _options: &LinterOptions) -> Result<String, FormatError> {
        let mut out = String::new();
        let (mut errors, mut warnings) = (0usize, 0usize);
        for file in results.iter().filter(|r| !r.messages.is_empty()) {
            errors = errors.saturating_add(file.error_count);
            warnings = warnings.saturating_add(file.warning_count);
            out.push('\n');
            if self.color {
                out.push_str(&file.file_path.underline().to_string());
            } else {
                out.push_str(&file.file_path);
            }
            out.push('\n');

            let pos_w = file
                .messages
                .iter()
                .map(|m| format!("{}:{}", m.line, m.column).len())
                .max()
                .unwrap_or(0);
            let msg_w = file
                .messages
                .iter()
                .map(|m| m.message.chars().count())
                .max()
                .unwrap_or(0);
            for m in &file.messages {
                let pos = format!("{}:{}", m.line, m.column);
                let sev = format!("{:<7}", m.severity.label());
                let sev = match (self.color, m.severity) {
                    (true, Severity::Error) => sev.red().to_string(),
                    (true, Severity::Warning) => sev.yellow().to_string(),
                    (false, _) => sev,
                };
                let rule = m.rule_id.as_deref().unwrap_or("");
                let rule = if self.color {
                    rule.bright_black().to_string()
                } else {
                    rule.to_string()
                };
                let line = format!(
                    "  {:>pw$}  {}  {:<mw$}  {}",
                    pos,
                    sev,
                    m.message,
                    rule,
                    pw = pos_w,
                    mw = msg_w
                );
                out.push_str(line.trim_end());
                out.push('\n');
            }
        }
        let total = errors.saturating_add(warnings);
        if total > 0 {
            let summary = format!(
                "\n✖ {} ({}, {})",
                plural(total, "problem"),
                plural(errors, "error"),
                plural(warnings, "warning")
            );
            if !self.color {
                out.push_str(&summary);
            } else if errors > 0 {
                out.push_str(&summary.red().bold().to_string());
            } else {
                out.push_str(&summary.yellow().bold().to_string());
            }
            out.push('\n');
        }
        Ok(out)
    }
}

/// One line per issue, easy to grep.
#[derive(Debug, Clone, Copy, Default)]
pub struct Compact;

impl Formatter for Compact {
    fn format(&self, results: &[FileResult], _options: &LinterOptions) -> Result<String, FormatError> {
        let mut lines = Vec::new();
        let mut total = 0usize;
        for file in results {
            for m in &file.messages {
                total += 1;
                let sev = match m.severity {
                    Severity::Error => "Error",
                    Severity::Warning => "Warning",
                };
                let rule = m
                    .rule_id
                    .as_deref()
                    .map(|r| format!(" ({})", r))
                    .unwrap_or_default();
                lines.push(format!(
                    "{}: line {}, col {}, {} - {}{}",
                    file.file_path, m.line, m.column, sev, m.message, rule
                ));
            }
        }
        if total > 0 {
            lines.push(String::new());
            lines.push(plural(total, "problem"));
        }
        Ok(lines.join("\n"))
    }
}

/// Results as pretty JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format(&self, results: &[FileResult], _options: &LinterOptions) -> Result<String, FormatError> {
        Ok(serde_json::to_string_pretty(results)?)
    }
}
