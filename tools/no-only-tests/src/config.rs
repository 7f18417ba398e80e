use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::options::{OptionsError, RuleOptions};

/// Options file looked up in the root directory when no `--config` is given.
pub const OPTIONS_FILE_NAME: &str = ".no-only-tests.json";

/// Directories that are never traversed.
pub const GLOBAL_SKIP_DIRS: &[&str] = &[
    "node_modules",
    ".git",
    "dist",
    "target",
    "build",
    "coverage",
    ".cache",
    ".next",
    ".turbo",
    "out",
];

/// Build a HashSet from the global skip dirs plus any extra entries.
pub fn skip_dirs(extra: &[&'static str]) -> HashSet<&'static str> {
    let mut set: HashSet<&'static str> = GLOBAL_SKIP_DIRS.iter().copied().collect();
    for e in extra {
        set.insert(e);
    }
    set
}

#[derive(Debug)]
pub enum ConfigError {
    Read { path: PathBuf, source: std::io::Error },
    Options { path: PathBuf, source: OptionsError },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Read { path, source } => {
                write!(f, "failed to read {}: {source}", path.display())
            }
            ConfigError::Options { path, source } => write!(f, "{}: {source}", path.display()),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Read { source, .. } => Some(source),
            ConfigError::Options { source, .. } => Some(source),
        }
    }
}

pub struct LinterConfig {
    pub root_dir: PathBuf,
    pub options: RuleOptions,
    /// Only lint `*.test.*`, `*.spec.*` and `__tests__/` files.
    pub tests_only: bool,
}

impl LinterConfig {
    pub fn from_root(root: &Path) -> Self {
        Self {
            root_dir: root.to_path_buf(),
            options: RuleOptions::default(),
            tests_only: false,
        }
    }

    /// Discover repo root by walking up from cwd to find .git directory
    pub fn discover() -> Option<Self> {
        let mut dir = std::env::current_dir().ok()?;
        loop {
            if dir.join(".git").exists() {
                return Some(Self::from_root(&dir));
            }
            if !dir.pop() {
                return None;
            }
        }
    }

    /// Load rule options from `path`, or from `.no-only-tests.json` in the
    /// root when `path` is None. A missing default file keeps the defaults.
    pub fn load_options_file(&mut self, path: Option<&Path>) -> Result<(), ConfigError> {
        let (path, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (self.root_dir.join(OPTIONS_FILE_NAME), false),
        };

        if !required && !path.exists() {
            return Ok(());
        }

        let text = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        self.options = RuleOptions::from_json_str(&text)
            .map_err(|source| ConfigError::Options { path, source })?;
        Ok(())
    }
}
