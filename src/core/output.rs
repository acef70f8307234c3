//! Terminal output for cache operations
//!
//! Headers and details go to stdout, warnings to stderr. Progress bars are
//! drawn with indicatif. [`set_quiet`] hides everything but warnings.

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use std::ops::Deref;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

const SPINNER_CHARS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏";
const SPINNER_TEMPLATE: &str = "     {spinner:.cyan} {msg}";
const BYTES_TEMPLATE: &str =
    "     {spinner:.cyan} {msg} [{bar:30.cyan/dim}] {bytes}/{total_bytes} ({eta})";

static QUIET: AtomicBool = AtomicBool::new(false);

pub fn set_quiet(quiet: bool) {
    QUIET.store(quiet, Ordering::Relaxed);
}

fn quiet() -> bool {
    QUIET.load(Ordering::Relaxed)
}

/// `==> Downloading client jar...`
pub fn action(message: &str) {
    if !quiet() {
        println!("{} {}", "==>".blue().bold(), message.bold());
    }
}

/// Indented, dimmed follow-up to the last action.
pub fn detail(message: &str) {
    if !quiet() {
        println!("     {}", message.dimmed());
    }
}

/// Print a success message (green)
/// Example: "==> Version cache cleared"
pub fn success(message: &str) {
    if !quiet() {
        println!("{} {}", "==>".green().bold(), message.green());
    }
}

/// Print an info message (cyan marker)
/// Example: ":: No yarn build for 1.19"
pub fn info(message: &str) {
    if !quiet() {
        println!("{} {}", "::".cyan(), message);
    }
}

/// Work that turned out to be unnecessary, e.g. another process won the lock.
pub fn skip(message: &str) {
    if !quiet() {
        println!("{} {}", "==>".dimmed(), message.dimmed());
    }
}

/// Print a warning to stderr, even when quiet
/// Example: "warning: removing leftover downloads/.Burger.partial"
pub fn warning(message: &str) {
    eprintln!("{} {}", "warning:".yellow().bold(), message.yellow());
}

/// One row of `mc-artifacts status`: green name and size when cached.
/// Example: "  client-1.20.jar                          25191691 bytes"
pub fn status_item(name: &str, detail: &str, present: bool) {
    if present {
        println!("  {:<40} {}", name.green(), detail.dimmed());
    } else {
        println!("  {:<40} {}", name.dimmed(), "missing".yellow());
    }
}

fn style(template: &str, fallback: ProgressStyle) -> ProgressStyle {
    ProgressStyle::with_template(template).unwrap_or(fallback)
}

/// Spinner for a transfer or clone of unknown length; hidden when quiet.
pub fn spinner(message: &str) -> ProgressBar {
    if quiet() {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        style(SPINNER_TEMPLATE, ProgressStyle::default_spinner()).tick_chars(SPINNER_CHARS),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

/// Clears its progress bar when dropped, so early returns leave no stale line.
pub struct ProgressGuard(ProgressBar);

impl ProgressGuard {
    pub fn new(pb: ProgressBar) -> Self {
        Self(pb)
    }
}

impl Deref for ProgressGuard {
    type Target = ProgressBar;

    fn deref(&self) -> &ProgressBar {
        &self.0
    }
}

impl Drop for ProgressGuard {
    fn drop(&mut self) {
        self.0.finish_and_clear();
    }
}

/// Switch `pb` to a byte bar once `Content-Length` is known.
pub fn upgrade_to_bytes(pb: &ProgressBar, total_bytes: u64) {
    pb.set_length(total_bytes);
    pb.set_style(style(BYTES_TEMPLATE, ProgressStyle::default_bar()).progress_chars("━╸━"));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_templates_parse() {
        assert!(ProgressStyle::with_template(SPINNER_TEMPLATE).is_ok());
        assert!(ProgressStyle::with_template(BYTES_TEMPLATE).is_ok());
    }

    #[test]
    fn test_spinner_upgrades_to_bytes() {
        let pb = spinner("client-1.20.jar");
        upgrade_to_bytes(&pb, 1000);
        pb.set_position(500);
        assert_eq!(pb.length(), Some(1000));
        pb.finish_and_clear();
    }

    #[test]
    fn test_guard_finishes_bar_on_early_return() {
        fn fails(pb: ProgressBar) -> Result<(), ()> {
            let guard = ProgressGuard::new(pb);
            guard.set_position(3);
            Err(())
        }

        let pb = ProgressBar::new(10);
        assert!(fails(pb.clone()).is_err());
        assert!(pb.is_finished());
    }
}
