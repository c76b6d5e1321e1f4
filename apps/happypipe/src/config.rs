//! Configuration discovery and effective settings resolution.
//!
//! happypipe reads `happypipe.toml|yaml|yml` from the repository root (or
//! closest ancestor) and merges it with CLI flags to produce an `Effective`
//! config.
//! Defaults:
//! - `patterns`: `**/*.scss`, `**/*.sass`
//! - `report`: true, `fail`: `after`
//! - `noEmpty`: true, `noUnderscore`: false, `silent`: false
//! - `linter.command`: `sass-lint` with JSON output args
//!
//! Overrides precedence: CLI > config file > defaults.

use crate::linter::{DEFAULT_ARGS, DEFAULT_PROGRAM};
use crate::options::{LinterOptions, RunOptions};
use crate::source::DEFAULT_PATTERNS;
use serde::Deserialize;
use serde_json::Value as Json;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::warn;

pub const CONFIG_NAMES: [&str; 3] = ["happypipe.toml", "happypipe.yaml", "happypipe.yml"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Which fail stage closes the pipeline.
pub enum FailMode {
    #[default]
    After,
    Immediate,
    None,
}

impl FromStr for FailMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "after" => Ok(FailMode::After),
            "immediate" => Ok(FailMode::Immediate),
            "none" => Ok(FailMode::None),
            other => Err(format!("unknown fail mode '{}' (after|immediate|none)", other)),
        }
    }
}

impl fmt::Display for FailMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FailMode::After => "after",
            FailMode::Immediate => "immediate",
            FailMode::None => "none",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Linter process section under `[linter]`.
pub struct LinterCfg {
    pub command: Option<String>,
    pub args: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
/// Root configuration loaded from `happypipe.toml|yaml`.
pub struct HappyConfig {
    pub patterns: Option<Vec<String>>,
    pub extensions: Option<Vec<String>>,
    pub silent: Option<bool>,
    pub no_underscore: Option<bool>,
    pub no_empty: Option<bool>,
    pub show_happy_files: Option<bool>,
    pub disabled: Option<bool>,
    pub report: Option<bool>,
    pub fail: Option<FailMode>,
    pub formatter: Option<String>,
    #[serde(default)]
    pub linter: Option<LinterCfg>,
    #[serde(default)]
    pub linter_options: Option<Json>,
}

/// Flag values from the command line; `None` means "not given".
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub repo_root: Option<String>,
    pub patterns: Vec<String>,
    pub silent: Option<bool>,
    pub no_underscore: Option<bool>,
    pub no_empty: Option<bool>,
    pub show_happy_files: Option<bool>,
    pub disabled: Option<bool>,
    pub report: Option<bool>,
    pub fail: Option<FailMode>,
    pub formatter: Option<String>,
    pub linter: Option<String>,
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by the run after applying precedence.
pub struct Effective {
    pub repo_root: PathBuf,
    /// Whether a config file was found and parsed.
    pub config_found: bool,
    pub patterns: Vec<String>,
    pub run: RunOptions,
    pub report: bool,
    pub fail: FailMode,
    pub formatter: Option<String>,
    pub linter_command: String,
    pub linter_args: Vec<String>,
}

/// Walk upward from `start` to detect the repository root.
///
/// Stops when a `happypipe.toml|yaml|yml` or a `.git` directory is found.
pub fn detect_repo_root(start: &Path) -> PathBuf {
    let mut cur = start;
    loop {
        if CONFIG_NAMES.iter().any(|n| cur.join(n).exists()) {
            return cur.to_path_buf();
        }
        if cur.join(".git").exists() {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return start.to_path_buf(),
        }
    }
}

/// Load `HappyConfig` from `happypipe.toml` or `happypipe.yaml|yml` if present.
///
/// A file that fails to parse is reported and treated as absent.
pub fn load_config(root: &Path) -> Option<HappyConfig> {
    let toml_path = root.join("happypipe.toml");
    if toml_path.exists() {
        let s = read(&toml_path)?;
        return toml::from_str::<HappyConfig>(&s)
            .inspect_err(|e| warn!("ignoring {}: {}", toml_path.display(), e))
            .ok();
    }
    for yml in ["happypipe.yaml", "happypipe.yml"] {
        let p = root.join(yml);
        if p.exists() {
            let s = read(&p)?;
            return serde_yaml::from_str::<HappyConfig>(&s)
                .inspect_err(|e| warn!("ignoring {}: {}", p.display(), e))
                .ok();
        }
    }
    None
}

fn read(path: &Path) -> Option<String> {
    fs::read_to_string(path)
        .inspect_err(|e| warn!("cannot read {}: {}", path.display(), e))
        .ok()
}

/// Resolve `Effective` by merging CLI flags, discovered config, and defaults.
pub fn resolve_effective(cli: &Overrides) -> Effective {
    let start = PathBuf::from(cli.repo_root.as_deref().unwrap_or("."));
    let repo_root = detect_repo_root(&start);
    let loaded = load_config(&repo_root);
    let config_found = loaded.is_some();
    let cfg = loaded.unwrap_or_default();

    let patterns = if !cli.patterns.is_empty() {
        cli.patterns.clone()
    } else {
        cfg.patterns
            .clone()
            .unwrap_or_else(|| DEFAULT_PATTERNS.iter().map(|p| p.to_string()).collect())
    };

    let defaults = RunOptions::default();
    let linter_options = match cfg.linter_options {
        Some(Json::Object(map)) => map,
        Some(other) => {
            warn!("linterOptions must be a table, got {}", other);
            LinterOptions::new()
        }
        None => LinterOptions::new(),
    };
    let run = RunOptions {
        silent: cli.silent.or(cfg.silent).unwrap_or(defaults.silent),
        no_underscore: cli
            .no_underscore
            .or(cfg.no_underscore)
            .unwrap_or(defaults.no_underscore),
        no_empty: cli.no_empty.or(cfg.no_empty).unwrap_or(defaults.no_empty),
        extensions: cfg.extensions.unwrap_or(defaults.extensions),
        linter_options,
        show_happy_files: cli
            .show_happy_files
            .or(cfg.show_happy_files)
            .unwrap_or(defaults.show_happy_files),
        disabled: cli.disabled.or(cfg.disabled).unwrap_or(defaults.disabled),
        on_end: None,
    };

    let linter_cfg = cfg.linter.unwrap_or_default();
    let linter_command = cli
        .linter
        .clone()
        .or(linter_cfg.command)
        .unwrap_or_else(|| DEFAULT_PROGRAM.to_string());
    let linter_args = linter_cfg
        .args
        .unwrap_or_else(|| DEFAULT_ARGS.iter().map(|a| a.to_string()).collect());

    Effective {
        repo_root,
        config_found,
        patterns,
        run,
        report: cli.report.or(cfg.report).unwrap_or(true),
        fail: cli.fail.or(cfg.fail).unwrap_or_default(),
        formatter: cli.formatter.clone().or(cfg.formatter),
        linter_command,
        linter_args,
    }
}
