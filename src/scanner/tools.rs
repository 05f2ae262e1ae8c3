//! Environment capabilities the cleaner depends on.
//!
//! Everything that touches the real machine (search-path lookups, spawning
//! processes, deleting and measuring paths) goes through [`FileSystem`] and
//! [`CommandExecutor`], so the cleanup engine can run against fakes.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::common::errors::{CleanError, Result};
use super::walker;

/// Space on the filesystem containing a path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiskUsage {
    pub total: u64,
    pub available: u64,
}

impl DiskUsage {
    pub fn used(&self) -> u64 {
        self.total.saturating_sub(self.available)
    }
}

/// Filesystem operations used by the path remover and the engine
pub trait FileSystem {
    fn exists(&self, path: &Path) -> bool;

    /// Recursive on-disk size; 0 for anything missing or unreadable
    fn size_of(&self, path: &Path) -> u64;

    fn remove_all(&mut self, path: &Path) -> std::io::Result<()>;

    /// Entries of `dir` whose file name matches `pattern`
    fn glob(&self, dir: &Path, pattern: &str) -> Vec<PathBuf>;

    fn disk_usage(&self, path: &Path) -> Option<DiskUsage>;
}

/// Process operations used by the command runner and the engine
pub trait CommandExecutor {
    /// Whether `tool` resolves on the search path
    fn is_available(&self, tool: &str) -> bool;

    /// Run to completion with inherited stdio
    fn run(&mut self, program: &str, args: &[String]) -> Result<()>;

    /// Run and capture trimmed stdout; `None` on any failure or empty output
    fn query(&mut self, program: &str, args: &[String]) -> Option<String>;
}

/// The real local filesystem
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFileSystem;

impl FileSystem for LocalFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn size_of(&self, path: &Path) -> u64 {
        walker::dir_size(path)
    }

    fn remove_all(&mut self, path: &Path) -> std::io::Result<()> {
        // Never follow a symlink into its target; remove the link itself
        let metadata = std::fs::symlink_metadata(path)?;
        if metadata.is_dir() {
            std::fs::remove_dir_all(path)
        } else {
            std::fs::remove_file(path)
        }
    }

    fn glob(&self, dir: &Path, pattern: &str) -> Vec<PathBuf> {
        walker::expand_glob(dir, pattern)
    }

    fn disk_usage(&self, path: &Path) -> Option<DiskUsage> {
        let total = fs2::total_space(path).ok()?;
        let available = fs2::available_space(path).ok()?;
        Some(DiskUsage { total, available })
    }
}

/// Spawns real processes found on `PATH`
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemExecutor;

impl CommandExecutor for SystemExecutor {
    fn is_available(&self, tool: &str) -> bool {
        let found = which::which(tool).is_ok();
        tracing::debug!(tool, found, "search-path lookup");
        found
    }

    fn run(&mut self, program: &str, args: &[String]) -> Result<()> {
        let status = Command::new(program)
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|source| CleanError::Spawn {
                program: program.to_string(),
                source,
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(CleanError::CommandFailed {
                program: program.to_string(),
                code: status.code(),
            })
        }
    }

    fn query(&mut self, program: &str, args: &[String]) -> Option<String> {
        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .ok()?;

        if !output.status.success() {
            return None;
        }

        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if stdout.is_empty() {
            None
        } else {
            Some(stdout)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_local_remove_dir_and_file() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("cache/nested");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("f"), b"data").unwrap();
        let file = tmp.path().join("lone.txt");
        std::fs::write(&file, b"x").unwrap();

        let mut fs = LocalFileSystem;
        fs.remove_all(&tmp.path().join("cache")).unwrap();
        fs.remove_all(&file).unwrap();

        assert!(!fs.exists(&tmp.path().join("cache")));
        assert!(!fs.exists(&file));
    }

    #[test]
    fn test_local_remove_missing_is_error() {
        let tmp = TempDir::new().unwrap();
        let mut fs = LocalFileSystem;
        assert!(fs.remove_all(&tmp.path().join("missing")).is_err());
    }

    #[test]
    fn test_disk_usage_of_tempdir() {
        let tmp = TempDir::new().unwrap();
        let usage = LocalFileSystem.disk_usage(tmp.path()).unwrap();
        assert!(usage.total >= usage.available);
        assert_eq!(usage.used(), usage.total - usage.available);
    }

    #[test]
    fn test_unknown_tool_not_available() {
        assert!(!SystemExecutor.is_available("devsweep-no-such-tool-xyz"));
    }

    #[cfg(unix)]
    #[test]
    fn test_run_reports_exit_status() {
        let mut exec = SystemExecutor;
        assert!(exec.run("true", &[]).is_ok());

        let err = exec
            .run("sh", &["-c".to_string(), "exit 4".to_string()])
            .unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn test_run_missing_program_is_spawn_error() {
        let err = SystemExecutor
            .run("devsweep-no-such-tool-xyz", &[])
            .unwrap_err();
        assert!(matches!(err, CleanError::Spawn { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_query_captures_stdout() {
        let mut exec = SystemExecutor;
        let out = exec.query("echo", &["  /opt/cache  ".to_string()]);
        assert_eq!(out.as_deref(), Some("/opt/cache"));
        assert_eq!(exec.query("false", &[]), None);
    }
}
