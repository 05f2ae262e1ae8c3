use std::path::Path;

/// Paths that must NEVER be deleted under any circumstances.
/// This is a safety net against bugs in the cleanup catalog.
const PROTECTED_PATHS: &[&str] = &[
    "/",
    "/System",
    "/Applications",
    "/Users",
    "/Library",
    "/home",
    "/usr",
    "/bin",
    "/sbin",
    "/var",
    "/etc",
    "/opt",
    "/private",
    "/Volumes",
];

/// Paths under home that must never be deleted entirely
const PROTECTED_HOME_DIRS: &[&str] = &[
    "", // home dir itself
    "Desktop",
    "Documents",
    "Downloads",
    "Pictures",
    "Music",
    "Movies",
    "Library",
    "Applications",
    ".ssh",
    ".gnupg",
    // Simulator device definitions; only their caches are ever cleaned
    "Library/Developer/CoreSimulator/Devices",
];

/// Check if a path is protected and should NEVER be deleted
pub fn is_protected(path: &Path, home: &Path) -> bool {
    if PROTECTED_PATHS.iter().any(|p| path == Path::new(p)) {
        return true;
    }

    PROTECTED_HOME_DIRS.iter().any(|dir| {
        if dir.is_empty() {
            path == home
        } else {
            path == home.join(dir)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOME: &str = "/Users/dev";

    #[test]
    fn test_root_is_protected() {
        assert!(is_protected(Path::new("/"), Path::new(HOME)));
    }

    #[test]
    fn test_system_dirs_protected() {
        let home = Path::new(HOME);
        assert!(is_protected(Path::new("/System"), home));
        assert!(is_protected(Path::new("/Users"), home));
        assert!(is_protected(Path::new("/Library"), home));
    }

    #[test]
    fn test_home_dir_protected() {
        let home = Path::new(HOME);
        assert!(is_protected(home, home));
        assert!(is_protected(&home.join("Documents"), home));
        assert!(is_protected(&home.join(".ssh"), home));
        assert!(is_protected(&home.join("Library"), home));
    }

    #[test]
    fn test_simulator_devices_protected() {
        let home = Path::new(HOME);
        assert!(is_protected(&home.join("Library/Developer/CoreSimulator/Devices"), home));
        assert!(!is_protected(&home.join("Library/Developer/CoreSimulator/Caches"), home));
    }

    #[test]
    fn test_cache_dirs_not_protected() {
        let home = Path::new(HOME);
        assert!(!is_protected(&home.join(".gradle/caches"), home));
        assert!(!is_protected(&home.join("Library/Caches/CocoaPods"), home));
        assert!(!is_protected(Path::new("/tmp/somefile"), home));
    }
}
