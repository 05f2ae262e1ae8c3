use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use walkdir::WalkDir;

use devsweep::cleaner::{catalog, Action, Cleaner, Removal};
use devsweep::common::config::{Options, Paths};
use devsweep::common::errors::Result;
use devsweep::scanner::tools::{CommandExecutor, LocalFileSystem};
use devsweep::scanner::walker;

/// Nothing is installed; any attempt to run a command is a test failure
struct NoTools;

impl CommandExecutor for NoTools {
    fn is_available(&self, _tool: &str) -> bool {
        false
    }

    fn run(&mut self, program: &str, _args: &[String]) -> Result<()> {
        panic!("unexpected invocation of {}", program);
    }

    fn query(&mut self, _program: &str, _args: &[String]) -> Option<String> {
        None
    }
}

fn write(path: &Path, len: usize) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, vec![1u8; len]).unwrap();
}

/// Every file under `root` with its contents
fn snapshot(root: &Path) -> BTreeMap<PathBuf, Vec<u8>> {
    WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| (e.path().to_path_buf(), std::fs::read(e.path()).unwrap()))
        .collect()
}

fn machine() -> (TempDir, Paths) {
    let tmp = TempDir::new().unwrap();
    let paths = Paths::new(tmp.path().join("home"), tmp.path().join("project"));
    std::fs::create_dir_all(&paths.home).unwrap();
    std::fs::create_dir_all(&paths.project).unwrap();

    write(&paths.home_join(".gradle/caches/transforms-3/a.bin"), 30_000);
    write(&paths.home_join(".dartServer/.analysis-driver/b"), 5_000);
    write(&paths.home_join(".pub-cache/hosted/pub.dev/c"), 12_000);
    write(&paths.home_join("Library/Caches/pip/http/d"), 9_000);
    write(&paths.home_join("Library/Caches/Google/AndroidStudio2024.2/e"), 2_000);
    write(&paths.home_join("Library/Developer/Xcode/DerivedData/App/f"), 40_000);
    write(&paths.home_join("Library/Developer/CoreSimulator/Devices/X/g"), 1_000);
    write(&paths.home_join("Documents/keep.txt"), 10);
    write(&paths.project_join("build/h"), 7_000);

    (tmp, paths)
}

#[test]
fn test_dry_run_leaves_filesystem_unchanged() {
    let (tmp, paths) = machine();
    let before = snapshot(tmp.path());

    let opts = Options {
        dry_run: true,
        include_xcode: true,
        include_docker: true,
        aggressive: true,
        ..Options::default()
    };
    let report = Cleaner::new(opts, &paths, LocalFileSystem, NoTools).run().unwrap();

    assert_eq!(snapshot(tmp.path()), before);
    assert_eq!(report.freed_bytes, 0);
    assert_eq!(report.paths_removed, 0);
    assert!(report.paths_would_remove >= 7);
}

#[test]
fn test_total_matches_measured_sizes() {
    let (_tmp, paths) = machine();
    let opts = Options {
        include_xcode: true,
        aggressive: true,
        ..Options::default()
    };

    let expected = walker::total_size(&[
        paths.home_join(".gradle/caches"),
        paths.home_join(".dartServer"),
        paths.home_join(".pub-cache/hosted"),
        paths.home_join("Library/Caches/pip"),
        paths.home_join("Library/Caches/Google/AndroidStudio2024.2"),
        paths.home_join("Library/Developer/Xcode/DerivedData"),
        paths.project_join("build"),
    ]);

    // Drop top-level commands (xcrun) so NoTools is never asked to run anything
    let sections: Vec<_> = catalog(&opts, &paths)
        .into_iter()
        .map(|mut s| {
            s.actions.retain(|a| !matches!(a, Action::Run(_)));
            s
        })
        .collect();

    let mut cleaner = Cleaner::new(opts, &paths, LocalFileSystem, NoTools);
    cleaner.run_sections(&sections).unwrap();
    let report = cleaner.report();

    assert_eq!(report.freed_bytes, expected);
    assert_eq!(report.paths_removed, 7);
    assert!(!paths.home_join(".gradle/caches").exists());
    assert!(!paths.home_join("Library/Developer/Xcode/DerivedData").exists());
    assert!(paths.home_join("Library/Developer/CoreSimulator/Devices/X/g").exists());
    assert!(paths.home_join("Documents/keep.txt").exists());
    assert!(paths.home.exists());
}

#[test]
fn test_second_run_is_idempotent() {
    let (_tmp, paths) = machine();

    let first = Cleaner::new(Options::default(), &paths, LocalFileSystem, NoTools)
        .run()
        .unwrap();
    assert!(first.freed_bytes > 0);

    let second = Cleaner::new(Options::default(), &paths, LocalFileSystem, NoTools)
        .run()
        .unwrap();
    assert_eq!(second.freed_bytes, 0);
    assert_eq!(second.paths_removed, 0);
}

#[test]
fn test_remove_path_contract() {
    let (_tmp, paths) = machine();
    let target = paths.home_join("Library/Caches/pip");
    let size = walker::dir_size(&target);
    let mut fs = LocalFileSystem;

    let missing = devsweep::cleaner::remove_path(
        &mut fs,
        &paths.home_join("no/such/dir"),
        "nothing",
        false,
        &paths.home,
    )
    .unwrap();
    assert_eq!(missing, Removal::Missing);

    let removed =
        devsweep::cleaner::remove_path(&mut fs, &target, "pip cache", false, &paths.home).unwrap();
    assert_eq!(removed, Removal::Removed(size));
    assert!(!target.exists());
}
