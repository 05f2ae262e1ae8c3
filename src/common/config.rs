use std::path::{Path, PathBuf};

use super::errors::{CleanError, Result};

/// Resolved run configuration. Built once from the command line and never
/// mutated afterwards; every combination of flags is legal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Options {
    /// Report what would happen without deleting or invoking anything
    pub dry_run: bool,
    /// Run the Xcode section
    pub include_xcode: bool,
    /// Run the Docker section
    pub include_docker: bool,
    /// Also remove caches that are expensive to re-download
    pub aggressive: bool,
    /// Debug-level logging
    pub verbose: bool,
    /// Disable ANSI colour
    pub no_color: bool,
}

/// Filesystem anchors every catalog path is resolved against
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    /// The user's home directory (`~`)
    pub home: PathBuf,
    /// The directory the tool was started from (project-local build output)
    pub project: PathBuf,
}

impl Paths {
    pub fn new(home: impl Into<PathBuf>, project: impl Into<PathBuf>) -> Self {
        Self {
            home: home.into(),
            project: project.into(),
        }
    }

    /// Resolve from the running process: `$HOME` and the current directory.
    pub fn from_env() -> Result<Self> {
        let home = dirs::home_dir().ok_or(CleanError::HomeNotFound)?;
        // An unreadable cwd leaves project-local entries pointing at paths
        // that do not exist, which the remover already skips.
        let project = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Ok(Self { home, project })
    }

    /// Path under the home directory
    pub fn home_join(&self, rel: impl AsRef<Path>) -> PathBuf {
        self.home.join(rel)
    }

    /// Path under the project directory
    pub fn project_join(&self, rel: impl AsRef<Path>) -> PathBuf {
        self.project.join(rel)
    }
}
