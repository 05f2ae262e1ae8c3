use std::path::PathBuf;

use thiserror::Error;

/// Typed errors for cleanup operations.
/// `anyhow` wraps these at the top level in `main`, but the library keeps
/// them typed so the binary can map a failing subprocess to its exit code.
#[derive(Debug, Error)]
pub enum CleanError {
    /// Recursive deletion failed part-way
    #[error("failed to remove '{}': {source}", .path.display())]
    Remove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Path is on the protected list and must never be deleted
    #[error("refusing to remove protected path '{}'", .path.display())]
    Protected { path: PathBuf },

    /// The command could not be started at all
    #[error("failed to start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The command ran and exited unsuccessfully
    #[error("'{program}' exited with {}", describe_code(.code))]
    CommandFailed { program: String, code: Option<i32> },

    /// No home directory could be resolved for this user
    #[error("could not determine the home directory")]
    HomeNotFound,
}

impl CleanError {
    /// Exit code the process should terminate with for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CleanError::CommandFailed { code: Some(c), .. } if *c != 0 => *c,
            _ => 1,
        }
    }
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!("status {}", c),
        None => "a signal".to_string(),
    }
}

pub type Result<T> = std::result::Result<T, CleanError>;
