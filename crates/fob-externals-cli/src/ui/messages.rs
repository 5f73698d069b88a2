//! Status message functions for terminal output.

use super::paint;
use owo_colors::{OwoColorize, Style};

/// Print an info message to stderr.
pub fn info(message: &str) {
    eprintln!("{} {}", "ℹ".style(paint(Style::new().blue().bold())), message);
}

/// Print a warning message to stderr.
pub fn warning(message: &str) {
    eprintln!(
        "{} {}",
        "⚠".style(paint(Style::new().yellow().bold())),
        message.style(paint(Style::new().yellow()))
    );
}
