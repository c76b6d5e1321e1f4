//! Source stream: glob patterns expanded into file records.

use crate::error::SourceError;
use crate::record::FileRecord;
use glob::glob;
use rayon::prelude::*;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const DEFAULT_PATTERNS: [&str; 2] = ["**/*.scss", "**/*.sass"];

/// Expand `patterns` under `root` and read the matches.
///
/// Matches are de-duplicated and returned sorted by path, so the stream
/// order does not depend on the parallel reads. Directories become records
/// without contents; unreadable files are logged and left out.
pub fn collect_records(root: &Path, patterns: &[String]) -> Result<Vec<FileRecord>, SourceError> {
    let mut paths: BTreeSet<PathBuf> = BTreeSet::new();
    for pat in patterns {
        let abs_glob = root.join(pat);
        let pattern = abs_glob.to_string_lossy().to_string();
        let entries = glob(&pattern).map_err(|source| SourceError::Pattern {
            pattern: pat.clone(),
            source,
        })?;
        for entry in entries {
            match entry {
                Ok(p) => {
                    paths.insert(p);
                }
                Err(e) => warn!("cannot read {}: {}", e.path().display(), e.error()),
            }
        }
    }
    debug!(count = paths.len(), "matched files");

    let paths: Vec<PathBuf> = paths.into_iter().collect();
    let records: Vec<FileRecord> = paths
        .par_iter()
        .filter_map(|path| load(root, path))
        .collect();
    Ok(records)
}

fn load(root: &Path, path: &Path) -> Option<FileRecord> {
    if path.is_dir() {
        return Some(FileRecord::directory(path).with_base(root));
    }
    match fs::read(path) {
        Ok(bytes) => Some(FileRecord::new(path, bytes).with_base(root)),
        Err(e) => {
            warn!("cannot read {}: {}", path.display(), e);
            None
        }
    }
}
