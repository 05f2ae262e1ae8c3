use colored::*;

use crate::cleaner::engine::RunReport;
use crate::common::config::Options;
use crate::common::format::{self, format_size, format_size_colored};
use crate::scanner::tools::DiskUsage;

/// Print the startup banner with the resolved configuration
pub fn print_banner(opts: &Options) {
    println!();
    println!("{}  devsweep: developer cache cleanup", "🧹");
    println!("{}", "─".repeat(60).dimmed());
    println!(
        "  dry-run: {}  •  xcode: {}  •  docker: {}  •  aggressive: {}",
        yes_no(opts.dry_run),
        yes_no(opts.include_xcode),
        yes_no(opts.include_docker),
        yes_no(opts.aggressive)
    );
    if opts.dry_run {
        println!(
            "  {} {}",
            "ℹ".cyan(),
            "Dry run: nothing will be deleted and no cleanup commands will run".cyan()
        );
    }
    println!("{}", "─".repeat(60).dimmed());
}

fn yes_no(flag: bool) -> ColoredString {
    if flag {
        "on".green().bold()
    } else {
        "off".dimmed()
    }
}

/// Print root filesystem usage; informational only
pub fn print_disk_usage(when: &str, usage: Option<DiskUsage>) {
    println!();
    match usage {
        Some(u) => println!(
            "  {} Disk usage {} (/): used {} of {} ({} available)",
            "💾",
            when,
            format_size(u.used()).bold(),
            format_size(u.total),
            format_size(u.available).green()
        ),
        None => println!("  {} Disk usage {} (/): disk usage unavailable", "💾", when),
    }
}

/// Print a section header
pub fn print_section(title: &str) {
    println!();
    println!("{}", format!("== {} ==", title).bold().underline());
}

/// Informational progress line
pub fn print_info(msg: &str) {
    println!("  {} {}", "•".dimmed(), msg);
}

/// Non-fatal problem the run continues past
pub fn print_warning(msg: &str) {
    println!("  {} {}", "⚠".yellow(), msg.yellow());
}

/// "Starting" banner for an external command
pub fn print_step(description: &str) {
    println!("  {} {}", "▶".cyan(), description.bold());
}

/// The literal command line about to run
pub fn print_command(cmdline: &str) {
    println!("    {} {}", "$".dimmed(), cmdline.dimmed());
}

/// Size line for a path that exists and is about to be handled
pub fn print_found(label: &str, bytes: u64) {
    println!("  {} {}: {}", "📁", label, format_size_colored(bytes));
}

/// Confirmation that a path is gone
pub fn print_removed(path_display: &str) {
    println!("    {} removed {}", "✓".green(), path_display.dimmed());
}

/// Print the final summary
pub fn print_summary(report: &RunReport, opts: &Options, elapsed_secs: f64) {
    println!();
    println!("{}", "─".repeat(60).dimmed());

    if opts.dry_run {
        println!(
            "  {} {}",
            "⚠".yellow(),
            "Dry run complete: nothing was removed".yellow().bold()
        );
        println!(
            "  {} {} would be removed ({}), {} would run",
            "ℹ".cyan(),
            plural(report.paths_would_remove, "path"),
            format_size_colored(report.would_free_bytes),
            plural(report.commands_skipped, "command"),
        );
        println!(
            "  {} Run again without {} to clean",
            "💡",
            "--dry-run".cyan()
        );
    } else {
        println!(
            "  {} Done! Freed {} from {}",
            "✓".green(),
            format_size_colored(report.freed_bytes),
            plural(report.paths_removed, "removed cache path"),
        );
        println!(
            "  {} Tool-level cleanups (npm/yarn/pnpm/etc.) freed additional space not reflected in this total ({} run)",
            "ℹ".cyan(),
            plural(report.commands_run, "command"),
        );
        if report.commands_tolerated > 0 {
            println!(
                "  {} {} failed and {} ignored",
                "⚠".yellow(),
                plural(report.commands_tolerated, "command"),
                if report.commands_tolerated == 1 { "was" } else { "were" }
            );
        }
    }

    println!(
        "  {} Finished in {}",
        "⏱",
        format::format_duration(elapsed_secs).cyan()
    );
    println!();
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("1 {}", noun)
    } else {
        format!("{} {}s", count, noun)
    }
}
