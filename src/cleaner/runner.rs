use super::catalog::{CommandSpec, FailurePolicy};
use crate::cli::output;
use crate::common::errors::Result;
use crate::common::format::format_command;
use crate::scanner::tools::CommandExecutor;

/// Outcome of a single command invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Invocation {
    /// Dry run: announced but not executed
    Skipped,
    /// Ran and exited successfully
    Completed,
    /// Failed, but the call site tolerates failure
    Tolerated,
}

/// Announce `spec` and (unless `dry_run`) execute it, applying its failure policy.
pub fn run_command<E: CommandExecutor + ?Sized>(
    exec: &mut E,
    spec: &CommandSpec,
    dry_run: bool,
) -> Result<Invocation> {
    output::print_step(&spec.description);
    output::print_command(&format_command(&spec.program, &spec.args));

    if dry_run {
        output::print_info("(dry-run) not executing");
        return Ok(Invocation::Skipped);
    }

    match exec.run(&spec.program, &spec.args) {
        Ok(()) => Ok(Invocation::Completed),
        Err(e) if spec.on_failure == FailurePolicy::Tolerate => {
            tracing::warn!(program = %spec.program, error = %e, "tolerated command failure");
            output::print_warning(&format!("{} failed, continuing: {}", spec.description, e));
            Ok(Invocation::Tolerated)
        }
        Err(e) => Err(e),
    }
}
