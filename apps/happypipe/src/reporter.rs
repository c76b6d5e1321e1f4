//! Console sink used by stages for everything a user should see.

use std::sync::Mutex;

/// Destination for user-facing lines (reports, happy notices, warnings).
pub trait Reporter: Send + Sync {
    fn info(&self, line: &str);
    fn warn(&self, line: &str);
}

/// Writes `info` to stdout and `warn` to stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalReporter;

impl Reporter for TerminalReporter {
    fn info(&self, line: &str) {
        println!("{}", line);
    }

    fn warn(&self, line: &str) {
        eprintln!("{} {}", crate::output::warn_prefix(), line);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Warn,
}

/// Captures lines in memory; used by tests and embedding callers.
#[derive(Debug, Default)]
pub struct MemoryReporter {
    lines: Mutex<Vec<(Level, String)>>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<(Level, String)> {
        self.lines
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn infos(&self) -> Vec<String> {
        self.by_level(Level::Info)
    }

    pub fn warnings(&self) -> Vec<String> {
        self.by_level(Level::Warn)
    }

    fn by_level(&self, level: Level) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, s)| s)
            .collect()
    }

    fn push(&self, level: Level, line: &str) {
        self.lines
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push((level, line.to_string()));
    }
}

impl Reporter for MemoryReporter {
    fn info(&self, line: &str) {
        self.push(Level::Info, line);
    }

    fn warn(&self, line: &str) {
        self.push(Level::Warn, line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_reporter_splits_levels() {
        let r = MemoryReporter::new();
        r.info("one");
        r.warn("two");
        r.info("three");
        assert_eq!(r.infos(), vec!["one", "three"]);
        assert_eq!(r.warnings(), vec!["two"]);
        assert_eq!(r.lines().len(), 3);
    }
}
