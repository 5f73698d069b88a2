//! Terminal output helpers.
//!
//! Results go to stdout, status messages to stderr. Colors are decided once
//! at startup by [`init_colors`].

mod format;
mod messages;

use owo_colors::Style;
use std::sync::atomic::{AtomicBool, Ordering};

pub use format::{format_dependency, format_verdict};
pub use messages::{info, warning};

static COLORS: AtomicBool = AtomicBool::new(false);

/// Decide whether output is colored.
pub fn init_colors(no_color: bool) {
    COLORS.store(!no_color && should_use_color(), Ordering::Relaxed);
}

/// Check if color output should be enabled.
///
/// Respects NO_COLOR and FORCE_COLOR environment variables, falls back to
/// terminal capability detection.
pub fn should_use_color() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }

    if std::env::var_os("FORCE_COLOR").is_some() {
        return true;
    }

    console::user_attended() && console::user_attended_stderr()
}

/// `style` when colors are on, a no-op style otherwise.
pub(crate) fn paint(style: Style) -> Style {
    if COLORS.load(Ordering::Relaxed) {
        style
    } else {
        Style::new()
    }
}
