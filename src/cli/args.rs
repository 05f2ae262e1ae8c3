use std::ffi::OsString;

use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::{CommandFactory, Parser};

use crate::common::config::Options;

/// devsweep: reclaim disk space from developer toolchain caches
#[derive(Parser, Debug)]
#[command(
    name = "devsweep",
    version,
    about = "Reclaim disk space from developer toolchain caches",
    long_about = "devsweep removes well-known cache directories left behind by build systems,\n\
                  package managers and IDEs, running each tool's own cleanup command first\n\
                  where one exists.",
    args_override_self = true,
    after_help = "EXAMPLES:\n  \
        devsweep --dry-run                     Show what would be removed\n  \
        devsweep                               Clean Gradle, Flutter, Node, Pods, SwiftPM, Python, Ruby, Homebrew, VS Code\n  \
        devsweep --aggressive                  Also drop the pub package cache\n  \
        devsweep --include-xcode               Also clean DerivedData, archives and simulator caches\n  \
        devsweep --include-docker              Also prune unused Docker data and build cache"
)]
pub struct Cli {
    /// Show what would be removed without deleting or running anything
    #[arg(long)]
    pub dry_run: bool,

    /// Include Xcode caches (DerivedData, Archives, device support)
    #[arg(long)]
    pub include_xcode: bool,

    /// Include Docker system and build-cache prune
    #[arg(long)]
    pub include_docker: bool,

    /// Also remove large caches that are costly to re-download
    #[arg(long)]
    pub aggressive: bool,

    /// Verbose output
    #[arg(long, short)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

impl From<Cli> for Options {
    fn from(cli: Cli) -> Self {
        Options {
            dry_run: cli.dry_run,
            include_xcode: cli.include_xcode,
            include_docker: cli.include_docker,
            aggressive: cli.aggressive,
            verbose: cli.verbose,
            no_color: cli.no_color,
        }
    }
}

/// Why argument parsing stopped short of producing `Options`
#[derive(Debug)]
pub enum ArgsError {
    /// `--help` or `--version`: print and exit successfully
    Info(clap::Error),
    /// An option (or stray positional) we do not recognise
    Unknown { token: String, source: clap::Error },
}

impl ArgsError {
    pub fn exit_code(&self) -> i32 {
        match self {
            ArgsError::Info(_) => 0,
            ArgsError::Unknown { .. } => 1,
        }
    }

    /// Print the help text, or the unknown-option message and usage
    pub fn print(&self) {
        match self {
            ArgsError::Info(e) => {
                let _ = e.print();
            }
            ArgsError::Unknown { token, source } => {
                tracing::debug!(kind = ?source.kind(), "argument parse failed");
                eprintln!("unknown option: {}", token);
                eprintln!();
                eprintln!("{}", Cli::command().render_usage());
                eprintln!();
                eprintln!("For more information, try '--help'.");
            }
        }
    }
}

/// Parse an argument vector (program name first) into `Options`.
pub fn parse_from<I, T>(args: I) -> Result<Options, ArgsError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    match Cli::try_parse_from(args.iter().cloned()) {
        Ok(cli) => Ok(cli.into()),
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => Err(ArgsError::Info(e)),
            _ => Err(ArgsError::Unknown {
                token: offending_token(&e, args.get(1..).unwrap_or_default()),
                source: e,
            }),
        },
    }
}

/// The argument clap rejected. When clap does not name it (invalid UTF-8),
/// fall back to the first argument that is not valid UTF-8, then to the
/// first argument at all.
fn offending_token(e: &clap::Error, args: &[OsString]) -> String {
    if let Some(ContextValue::String(s)) = e.get(ContextKind::InvalidArg) {
        return s.clone();
    }
    args.iter()
        .find(|a| a.to_str().is_none())
        .or_else(|| args.first())
        .map(|a| a.to_string_lossy().into_owned())
        .unwrap_or_else(|| e.kind().to_string())
}
