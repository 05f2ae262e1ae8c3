//! # devsweep
//!
//! Reclaims disk space on developer workstations by removing well-known
//! toolchain caches.
//!
//! - **Catalog-driven**: Gradle/Android, Flutter/Dart, Node, CocoaPods,
//!   SwiftPM, Python/Ruby, Homebrew and VS Code, plus opt-in Xcode and Docker
//! - **Tool-aware**: runs each tool's own cleanup command when it is on `PATH`
//! - **Dry-run**: reports sizes without touching anything
//! - **Fail-fast**: the first deletion error or unexpected command failure
//!   stops the run

pub mod cleaner;
pub mod cli;
pub mod common;
pub mod scanner;
