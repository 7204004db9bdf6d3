//! Terminal output formatting utilities.

use std::time::Duration;

use colored::Colorize;
use console::Term;
use indicatif::{ProgressBar, ProgressStyle};
use lane_core::BranchKind;

/// Print a success message.
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print an error message (always prints to stderr).
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Print a warning message (always prints to stderr).
pub fn warn(msg: &str) {
    eprintln!("{} {}", "!".yellow(), msg);
}

/// Print an info message.
pub fn info(msg: &str) {
    println!("{} {}", "→".blue(), msg);
}

/// Print a detail line without prefix.
///
/// Use for indented detail lines that accompany info or warn messages.
pub fn detail(msg: &str) {
    println!("{msg}");
}

/// Print essential machine-readable output.
///
/// Use for results that should be available for piping, like PR URLs.
pub fn essential(msg: &str) {
    println!("{msg}");
}

/// Whether stdout is an interactive terminal. Prompts and spinners are
/// skipped when it isn't.
#[must_use]
pub fn is_interactive() -> bool {
    Term::stdout().is_term()
}

/// Spinner shown while a child process runs. Returns a disabled bar on
/// non-interactive terminals.
#[must_use]
pub fn spinner(msg: &str) -> ProgressBar {
    if !is_interactive() {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new_spinner();
    bar.set_message(msg.to_string());
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        bar.set_style(style);
    }
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}

/// A branch line with its workflow kind annotation.
#[must_use]
pub fn branch_line(name: &str, is_current: bool) -> String {
    let kind = BranchKind::classify(name);
    let label = kind_label(kind);
    if is_current {
        format!("{} {} {label}", "▶".cyan(), name.cyan().bold())
    } else {
        format!("  {name} {label}")
    }
}

fn kind_label(kind: BranchKind) -> String {
    match kind {
        BranchKind::Feat => format!("[{}]", "feat".green()),
        BranchKind::Fix => format!("[{}]", "fix".yellow()),
        BranchKind::Feature => format!("[{}]", "feature".green().bold()),
        BranchKind::Dev => format!("[{}]", "dev".blue()),
        BranchKind::Main | BranchKind::Develop | BranchKind::Master => {
            format!("[{}]", kind.to_string().magenta())
        }
        BranchKind::Other => String::new(),
    }
}
