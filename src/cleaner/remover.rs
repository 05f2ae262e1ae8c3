use std::path::Path;

use crate::cli::output;
use crate::common::errors::{CleanError, Result};
use crate::common::format::{format_path, format_size};
use crate::common::safety;
use crate::scanner::tools::FileSystem;

/// Outcome of a single path removal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    /// Nothing at that path
    Missing,
    /// Dry run: the path exists and holds this many bytes
    WouldRemove(u64),
    /// Deleted; this many bytes were freed
    Removed(u64),
}

impl Removal {
    /// Bytes that count toward the running total
    pub fn freed(&self) -> u64 {
        match self {
            Removal::Removed(bytes) => *bytes,
            Removal::Missing | Removal::WouldRemove(_) => 0,
        }
    }
}

/// Measure and (unless `dry_run`) recursively delete `path`.
///
/// Missing paths are reported and skipped. Deletion errors are returned
/// as-is; the caller is expected to stop the run on them.
pub fn remove_path<F: FileSystem + ?Sized>(
    fs: &mut F,
    path: &Path,
    label: &str,
    dry_run: bool,
    home: &Path,
) -> Result<Removal> {
    if safety::is_protected(path, home) {
        return Err(CleanError::Protected {
            path: path.to_path_buf(),
        });
    }

    if !fs.exists(path) {
        output::print_info(&format!("{}: not found, skipping", label));
        return Ok(Removal::Missing);
    }

    let size = fs.size_of(path);
    tracing::debug!(path = %path.display(), size, "measured");
    output::print_found(label, size);

    let shown = format_path(path, home);
    if dry_run {
        output::print_info(&format!("(dry-run) would remove {}", shown));
        return Ok(Removal::WouldRemove(size));
    }

    fs.remove_all(path).map_err(|source| CleanError::Remove {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), freed = %format_size(size), "removed");
    output::print_removed(&shown);

    Ok(Removal::Removed(size))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::tools::LocalFileSystem;
    use tempfile::TempDir;

    fn populated(tmp: &TempDir) -> std::path::PathBuf {
        let cache = tmp.path().join("cache");
        std::fs::create_dir_all(cache.join("sub")).unwrap();
        std::fs::write(cache.join("a.bin"), vec![0u8; 8192]).unwrap();
        std::fs::write(cache.join("sub/b.bin"), vec![0u8; 4096]).unwrap();
        cache
    }

    #[test]
    fn test_missing_path_skipped() {
        let tmp = TempDir::new().unwrap();
        let mut fs = LocalFileSystem;
        let result = remove_path(&mut fs, &tmp.path().join("absent"), "Absent", false, tmp.path()).unwrap();
        assert_eq!(result, Removal::Missing);
        assert_eq!(result.freed(), 0);
    }

    #[test]
    fn test_dry_run_leaves_path() {
        let tmp = TempDir::new().unwrap();
        let cache = populated(&tmp);
        let expected = crate::scanner::walker::dir_size(&cache);

        let mut fs = LocalFileSystem;
        let result = remove_path(&mut fs, &cache, "Cache", true, tmp.path()).unwrap();

        assert_eq!(result, Removal::WouldRemove(expected));
        assert_eq!(result.freed(), 0);
        assert!(cache.join("sub/b.bin").exists());
    }

    #[test]
    fn test_removes_and_reports_measured_size() {
        let tmp = TempDir::new().unwrap();
        let cache = populated(&tmp);
        let expected = crate::scanner::walker::dir_size(&cache);

        let mut fs = LocalFileSystem;
        let result = remove_path(&mut fs, &cache, "Cache", false, tmp.path()).unwrap();

        assert_eq!(result, Removal::Removed(expected));
        assert_eq!(result.freed(), expected);
        assert!(!cache.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_cache_credits_only_the_link() {
        let tmp = TempDir::new().unwrap();
        let target = populated(&tmp);
        std::fs::write(target.join("big.bin"), vec![9u8; 1024 * 1024]).unwrap();
        let link = tmp.path().join("linked-cache");
        std::os::unix::fs::symlink(&target, &link).unwrap();

        let mut fs = LocalFileSystem;
        let result = remove_path(&mut fs, &link, "Linked cache", false, tmp.path()).unwrap();

        assert!(result.freed() < 64 * 1024, "credited {}", result.freed());
        assert!(!link.exists());
        assert!(target.join("big.bin").exists());
    }

    #[test]
    fn test_protected_path_refused() {
        let tmp = TempDir::new().unwrap();
        let mut fs = LocalFileSystem;
        let err = remove_path(&mut fs, tmp.path(), "Home", true, tmp.path()).unwrap_err();
        assert!(matches!(err, CleanError::Protected { .. }));
        assert!(tmp.path().exists());
    }
}
