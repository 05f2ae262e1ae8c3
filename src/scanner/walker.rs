use std::collections::HashSet;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Calculate total size of a path (physical disk usage).
///
/// Works for both directories and single files. A path that does not exist
/// contributes 0, and entries that vanish or cannot be read mid-walk are
/// skipped rather than reported. A symlink is measured as the link itself,
/// never its target, and a file with several hard links inside the tree is
/// counted once.
pub fn dir_size(path: &Path) -> u64 {
    let root = match std::fs::symlink_metadata(path) {
        Ok(m) => m,
        Err(_) => return 0,
    };
    if root.file_type().is_symlink() {
        return disk_usage_of(&root);
    }

    let mut seen = HashSet::new();
    WalkDir::new(path)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| e.metadata().ok())
        .filter(|m| first_link(&mut seen, m))
        .map(|m| disk_usage_of(&m))
        .sum()
}

/// Sum of `dir_size` over several paths
pub fn total_size<P: AsRef<Path>>(paths: &[P]) -> u64 {
    paths.iter().map(|p| dir_size(p.as_ref())).sum()
}

/// Expand a file-name glob inside `dir` into the paths that currently match.
/// `dir` is taken literally, so metacharacters in a home directory name do
/// not leak into the pattern. No matches (or a bad pattern) yields nothing.
pub fn expand_glob(dir: &Path, name_pattern: &str) -> Vec<PathBuf> {
    let pattern = format!(
        "{}/{}",
        glob::Pattern::escape(&dir.to_string_lossy()),
        name_pattern
    );
    match glob::glob(&pattern) {
        Ok(entries) => {
            let mut matches: Vec<PathBuf> = entries.filter_map(|e| e.ok()).collect();
            matches.sort();
            matches
        }
        Err(e) => {
            tracing::debug!(%pattern, error = %e, "invalid glob pattern");
            Vec::new()
        }
    }
}

/// Allocated size of a single file, in whole blocks
#[cfg(unix)]
fn disk_usage_of(metadata: &std::fs::Metadata) -> u64 {
    use std::os::unix::fs::MetadataExt;
    // st_blocks is always counted in 512-byte units
    metadata.blocks() * 512
}

#[cfg(not(unix))]
fn disk_usage_of(metadata: &std::fs::Metadata) -> u64 {
    metadata.len()
}

/// True the first time an inode is met; later hard links to it are skipped
#[cfg(unix)]
fn first_link(seen: &mut HashSet<(u64, u64)>, metadata: &std::fs::Metadata) -> bool {
    use std::os::unix::fs::MetadataExt;
    metadata.nlink() <= 1 || seen.insert((metadata.dev(), metadata.ino()))
}

#[cfg(not(unix))]
fn first_link(_seen: &mut HashSet<(u64, u64)>, _metadata: &std::fs::Metadata) -> bool {
    true
}
