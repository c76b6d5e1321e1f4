//! The external linter seam.
//!
//! [`Linter`] is what the lint stage calls. [`CommandLinter`] runs a linter
//! executable (sass-lint by default), feeds it the file text on stdin and
//! parses the ESLint-style JSON it prints.

use crate::models::{FileResult, LintResult};
use crate::options::LinterOptions;
use crate::record::FileRecord;
use serde::Deserialize;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::thread;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum LinterError {
    #[error("could not start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("I/O error talking to the linter: {0}")]
    Io(#[from] io::Error),
    #[error("linter exited with {code:?} and no report: {stderr}")]
    Exit { code: Option<i32>, stderr: String },
    #[error("linter output is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("linter output is not a lint report: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// What the linter gets for one file.
pub struct LintInput {
    pub text: String,
    /// Extension without the dot, e.g. `scss`.
    pub format: String,
    pub filename: PathBuf,
}

impl LintInput {
    pub fn from_record(record: &FileRecord) -> Self {
        Self {
            text: record.text(),
            format: record.extension().unwrap_or_default().to_string(),
            filename: record.path.clone(),
        }
    }
}

pub trait Linter {
    fn lint(&self, input: &LintInput, options: &LinterOptions) -> Result<LintResult, LinterError>;
}

impl<F> Linter for F
where
    F: Fn(&LintInput, &LinterOptions) -> Result<LintResult, LinterError>,
{
    fn lint(&self, input: &LintInput, options: &LinterOptions) -> Result<LintResult, LinterError> {
        self(input, options)
    }
}

pub const DEFAULT_PROGRAM: &str = "sass-lint";
pub const DEFAULT_ARGS: [&str; 4] = ["--verbose", "--no-exit", "--format", "json"];

#[derive(Debug, Clone)]
pub struct CommandLinter {
    program: String,
    args: Vec<String>,
}

impl Default for CommandLinter {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM).with_args(DEFAULT_ARGS.iter().map(|a| a.to_string()))
    }
}

impl CommandLinter {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Arguments for one call.
    ///
    /// `{filename}` and `{format}` placeholders are substituted. Without a
    /// `{filename}` placeholder the path is appended last. A string
    /// `config` linter option becomes `--config <path>`.
    pub fn render_args(&self, input: &LintInput, options: &LinterOptions) -> Vec<String> {
        let filename = input.filename.to_string_lossy();
        let mut has_filename = false;
        let mut out: Vec<String> = self
            .args
            .iter()
            .map(|a| {
                if a.contains("{filename}") {
                    has_filename = true;
                }
                a.replace("{filename}", &filename)
                    .replace("{format}", &input.format)
            })
            .collect();
        if let Some(cfg) = options.get("config").and_then(|v| v.as_str()) {
            out.push("--config".into());
            out.push(cfg.to_string());
        }
        if !has_filename {
            out.push(filename.into_owned());
        }
        out
    }
}

impl Linter for CommandLinter {
    fn lint(&self, input: &LintInput, options: &LinterOptions) -> Result<LintResult, LinterError> {
        let args = self.render_args(input, options);
        debug!(program = %self.program, ?args, "spawn linter");
        let mut child = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| LinterError::Spawn {
                program: self.program.clone(),
                source,
            })?;
        // Stdin is fed from its own thread: the linter may print its report
        // before reading its input, or never read it at all.
        let writer = child.stdin.take().map(|mut stdin| {
            let text = input.text.clone();
            thread::spawn(move || match stdin.write_all(text.as_bytes()) {
                // Linters that read the path instead of stdin close the pipe early.
                Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
                other => other,
            })
        });
        let output = child.wait_with_output()?;
        if let Some(handle) = writer {
            handle
                .join()
                .map_err(|_| io::Error::other("stdin writer thread panicked"))??;
        }
        let stdout = String::from_utf8(output.stdout)?;
        if stdout.trim().is_empty() {
            if output.status.success() {
                return Ok(LintResult::default());
            }
            return Err(LinterError::Exit {
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        parse_report(&stdout)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Report {
    Files(Vec<FileResult>),
    Full(LintResult),
}

/// Parse linter JSON: either an ESLint-style array of file results or a
/// full result object with aggregate counters.
pub fn parse_report(raw: &str) -> Result<LintResult, LinterError> {
    match serde_json::from_str::<Report>(raw) {
        Ok(Report::Files(files)) => Ok(LintResult::from_results(files)),
        Ok(Report::Full(res)) => Ok(res),
        // Re-parse as the array shape for a precise error message.
        Err(_) => Ok(LintResult::from_results(serde_json::from_str::<Vec<FileResult>>(raw)?)),
    }
}
