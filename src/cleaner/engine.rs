use std::path::{Path, PathBuf};
use std::time::Instant;

use super::catalog::{self, Action, Section};
use super::remover::{remove_path, Removal};
use super::runner::{run_command, Invocation};
use crate::cli::output;
use crate::common::config::{Options, Paths};
use crate::common::errors::Result;
use crate::scanner::tools::{CommandExecutor, FileSystem};

/// Tally of one run. `freed_bytes` is the running total: it only grows on
/// real (non-dry-run) removals of paths that existed.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub freed_bytes: u64,
    pub would_free_bytes: u64,
    pub paths_removed: usize,
    pub paths_would_remove: usize,
    pub paths_missing: usize,
    pub commands_run: usize,
    pub commands_tolerated: usize,
    pub commands_skipped: usize,
}

impl RunReport {
    fn record_removal(&mut self, removal: Removal) {
        match removal {
            Removal::Missing => self.paths_missing += 1,
            Removal::WouldRemove(bytes) => {
                self.paths_would_remove += 1;
                self.would_free_bytes += bytes;
            }
            Removal::Removed(bytes) => {
                self.paths_removed += 1;
                self.freed_bytes += bytes;
            }
        }
    }

    fn record_invocation(&mut self, invocation: Invocation) {
        match invocation {
            Invocation::Skipped => self.commands_skipped += 1,
            Invocation::Completed => self.commands_run += 1,
            Invocation::Tolerated => {
                self.commands_run += 1;
                self.commands_tolerated += 1;
            }
        }
    }
}

/// Executes a cleanup catalog against a filesystem and a command executor
pub struct Cleaner<'a, F, E> {
    opts: Options,
    paths: &'a Paths,
    fs: F,
    exec: E,
    report: RunReport,
}

impl<'a, F: FileSystem, E: CommandExecutor> Cleaner<'a, F, E> {
    pub fn new(opts: Options, paths: &'a Paths, fs: F, exec: E) -> Self {
        Self {
            opts,
            paths,
            fs,
            exec,
            report: RunReport::default(),
        }
    }

    /// Full run: banner, disk usage, every catalog section, disk usage, summary.
    /// Stops at the first deletion error or non-tolerated command failure.
    pub fn run(&mut self) -> Result<RunReport> {
        let start = Instant::now();
        let root = Path::new("/");

        output::print_banner(&self.opts);
        output::print_disk_usage("before", self.fs.disk_usage(root));

        let sections = catalog::catalog(&self.opts, self.paths);
        self.run_sections(&sections)?;

        output::print_disk_usage("after", self.fs.disk_usage(root));
        output::print_summary(&self.report, &self.opts, start.elapsed().as_secs_f64());

        Ok(self.report.clone())
    }

    pub fn run_sections(&mut self, sections: &[Section]) -> Result<()> {
        for section in sections {
            tracing::debug!(section = %section.title, actions = section.actions.len(), "entering section");
            output::print_section(&section.title);
            for action in &section.actions {
                self.execute(action)?;
            }
        }
        Ok(())
    }

    fn execute(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::Remove { path, label } => self.remove(path, label),
            Action::Run(spec) => {
                let invocation = run_command(&mut self.exec, spec, self.opts.dry_run)?;
                self.report.record_invocation(invocation);
                Ok(())
            }
            Action::WhenTool {
                tool,
                then,
                otherwise,
            } => {
                if self.exec.is_available(tool) {
                    self.execute_all(then)
                } else {
                    match otherwise {
                        Some(note) => output::print_info(note),
                        None => tracing::debug!(tool = %tool, "not on PATH, skipping"),
                    }
                    Ok(())
                }
            }
            Action::WhenPath {
                path,
                then,
                otherwise,
            } => {
                if self.fs.exists(path) {
                    self.execute_all(then)
                } else {
                    self.execute_all(otherwise)
                }
            }
            Action::RemoveQueried {
                label,
                program,
                args,
                fallback,
            } => {
                let path = self.resolve_queried(program, args, fallback);
                self.remove(&path, label)
            }
            Action::RemoveGlob {
                dir,
                pattern,
                label,
            } => {
                let matches = self.fs.glob(dir, pattern);
                if matches.is_empty() {
                    output::print_info(&format!("{}: not found, skipping", label));
                    return Ok(());
                }
                for path in matches {
                    let name = path
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_default();
                    self.remove(&path, &format!("{} ({})", label, name))?;
                }
                Ok(())
            }
            Action::Note(text) => {
                output::print_info(text);
                Ok(())
            }
        }
    }

    fn execute_all(&mut self, actions: &[Action]) -> Result<()> {
        for action in actions {
            self.execute(action)?;
        }
        Ok(())
    }

    fn remove(&mut self, path: &Path, label: &str) -> Result<()> {
        let removal = remove_path(&mut self.fs, path, label, self.opts.dry_run, &self.paths.home)?;
        self.report.record_removal(removal);
        Ok(())
    }

    /// Best effort: whatever the tool reports if it is an absolute path,
    /// otherwise the fallback. Neither is guaranteed to be right.
    fn resolve_queried(&mut self, program: &str, args: &[String], fallback: &Path) -> PathBuf {
        match self.exec.query(program, args).map(PathBuf::from) {
            Some(path) if path.is_absolute() => {
                tracing::debug!(program, path = %path.display(), "resolved cache directory");
                path
            }
            other => {
                tracing::debug!(program, reported = ?other, "query failed, using fallback");
                fallback.to_path_buf()
            }
        }
    }

    pub fn report(&self) -> &RunReport {
        &self.report
    }

    /// Hand back the environment, e.g. to inspect it after a run
    pub fn into_parts(self) -> (F, E, RunReport) {
        (self.fs, self.exec, self.report)
    }
}
