//! Shared data models for lint results.
//!
//! The shapes follow the JSON emitted by ESLint-style linters (sass-lint and
//! friends): a list of per-file results, each with its own issues and
//! counters, plus aggregate error/warning counters for the whole call.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
/// Issue severity, numbered the ESLint way (1 = warning, 2 = error).
pub enum Severity {
    Warning,
    Error,
}

impl From<u8> for Severity {
    fn from(level: u8) -> Self {
        if level >= 2 {
            Severity::Error
        } else {
            Severity::Warning
        }
    }
}

impl From<Severity> for u8 {
    fn from(sev: Severity) -> Self {
        match sev {
            Severity::Warning => 1,
            Severity::Error => 2,
        }
    }
}

impl Severity {
    pub fn label(self) -> &'static str {
        match self {
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// A single issue reported by the linter.
pub struct Issue {
    #[serde(default)]
    pub rule_id: Option<String>,
    pub severity: Severity,
    pub message: String,
    #[serde(default)]
    pub line: usize,
    #[serde(default)]
    pub column: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Lint outcome for one file path.
pub struct FileResult {
    pub file_path: String,
    #[serde(default)]
    pub messages: Vec<Issue>,
    #[serde(default)]
    pub error_count: usize,
    #[serde(default)]
    pub warning_count: usize,
}

impl FileResult {
    /// Build a result and derive its counters from `messages`.
    pub fn new(file_path: impl Into<String>, messages: Vec<Issue>) -> Self {
        let error_count = messages
            .iter()
            .filter(|m| m.severity == Severity::Error)
            .count();
        let warning_count = messages.len() - error_count;
        Self {
            file_path: file_path.into(),
            messages,
            error_count,
            warning_count,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
/// Counter wrapper matching the linter's `{ "count": n }` shape.
pub struct Count {
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Everything one linter call produced. Stages read it, never change it.
pub struct LintResult {
    pub error_count: Count,
    pub warning_count: Count,
    #[serde(default)]
    pub results: Vec<FileResult>,
}

impl LintResult {
    /// Aggregate per-file results into a call-level result.
    pub fn from_results(results: Vec<FileResult>) -> Self {
        let errors = results
            .iter()
            .fold(0usize, |acc, r| acc.saturating_add(r.error_count));
        let warnings = results
            .iter()
            .fold(0usize, |acc, r| acc.saturating_add(r.warning_count));
        Self {
            error_count: Count { count: errors },
            warning_count: Count { count: warnings },
            results,
        }
    }

    pub fn errors(&self) -> usize {
        self.error_count.count
    }

    pub fn warnings(&self) -> usize {
        self.warning_count.count
    }

    /// True when neither errors nor warnings were found.
    pub fn is_clean(&self) -> bool {
        self.errors() == 0 && self.warnings() == 0
    }

    pub fn file_paths(&self) -> Vec<&str> {
        self.results.iter().map(|r| r.file_path.as_str()).collect()
    }
}
