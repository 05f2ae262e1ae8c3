use std::process::ExitCode;

use anyhow::Result;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use devsweep::cleaner::Cleaner;
use devsweep::cli::args;
use devsweep::common::config::{Options, Paths};
use devsweep::common::errors::CleanError;
use devsweep::scanner::{LocalFileSystem, SystemExecutor};

fn main() -> ExitCode {
    let opts = match args::parse_from(std::env::args_os()) {
        Ok(opts) => opts,
        Err(e) => {
            e.print();
            return exit_code(e.exit_code());
        }
    };

    if opts.no_color {
        colored::control::set_override(false);
    }
    init_logging(&opts);

    match run(opts) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", "error:".red().bold(), e);
            let code = e
                .downcast_ref::<CleanError>()
                .map(CleanError::exit_code)
                .unwrap_or(1);
            exit_code(code)
        }
    }
}

fn run(opts: Options) -> Result<()> {
    let paths = Paths::from_env()?;
    tracing::debug!(?opts, home = %paths.home.display(), project = %paths.project.display(), "starting");

    let mut cleaner = Cleaner::new(opts, &paths, LocalFileSystem, SystemExecutor);
    let report = cleaner.run()?;

    tracing::debug!(?report, "finished");
    Ok(())
}

fn init_logging(opts: &Options) {
    let filter = if opts.verbose {
        EnvFilter::new("devsweep=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("devsweep=warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn exit_code(code: i32) -> ExitCode {
    // Process exit statuses are a single byte on unix
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}
