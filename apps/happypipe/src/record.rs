//! File records flowing through the pipeline.

use crate::models::LintResult;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq)]
/// A source file as read from disk. `contents` is `None` for directories.
pub struct FileRecord {
    pub path: PathBuf,
    pub base: PathBuf,
    pub contents: Option<Vec<u8>>,
}

impl FileRecord {
    pub fn new(path: impl Into<PathBuf>, contents: impl Into<Vec<u8>>) -> Self {
        let path = path.into();
        let base = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Self {
            path,
            base,
            contents: Some(contents.into()),
        }
    }

    /// A record that carries no contents at all.
    pub fn directory(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let base = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Self {
            path,
            base,
            contents: None,
        }
    }

    pub fn with_base(mut self, base: impl Into<PathBuf>) -> Self {
        self.base = base.into();
        self
    }

    pub fn is_null(&self) -> bool {
        self.contents.is_none()
    }

    /// True for a record with zero-byte contents (not for a null record).
    pub fn is_empty(&self) -> bool {
        matches!(&self.contents, Some(c) if c.is_empty())
    }

    pub fn file_name(&self) -> Option<&str> {
        self.path.file_name().and_then(|n| n.to_str())
    }

    /// Extension without the leading dot.
    pub fn extension(&self) -> Option<&str> {
        self.path.extension().and_then(|e| e.to_str())
    }

    pub fn text(&self) -> String {
        self.contents
            .as_deref()
            .map(|c| String::from_utf8_lossy(c).into_owned())
            .unwrap_or_default()
    }

    /// Path relative to `base`, falling back to the full path.
    pub fn relative(&self) -> PathBuf {
        pathdiff::diff_paths(&self.path, &self.base).unwrap_or_else(|| self.path.clone())
    }
}

#[derive(Debug, Clone, PartialEq)]
/// A record plus what the stages learned about it so far.
///
/// `lint` is filled by the lint stage; `formatted` is set to `Some(true)`
/// by the report stage once it has printed the file's issues.
pub struct StagedFile {
    pub record: FileRecord,
    pub lint: Option<LintResult>,
    pub formatted: Option<bool>,
}

impl StagedFile {
    pub fn path(&self) -> &Path {
        &self.record.path
    }

    pub fn with_lint(mut self, result: LintResult) -> Self {
        self.lint = Some(result);
        self
    }
}

impl From<FileRecord> for StagedFile {
    fn from(record: FileRecord) -> Self {
        Self {
            record,
            lint: None,
            formatted: None,
        }
    }
}
