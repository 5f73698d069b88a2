//! Line formatting for command results.

use super::paint;
use fob_externals::{DependencySource, ExternalKind, Verdict};
use owo_colors::{OwoColorize, Style};

/// One result line of `check`: specifier, outcome and reported id.
///
/// `width` pads the specifier column.
pub fn format_verdict(specifier: &str, verdict: &Verdict, width: usize) -> String {
    let padded = format!("{:<width$}", specifier, width = width);

    match verdict {
        Verdict::External { id, kind } => {
            let kind = match kind {
                ExternalKind::Builtin => "builtin",
                ExternalKind::Dependency => "dependency",
            };
            format!(
                "{}  {}  {} {}",
                padded,
                "external".style(paint(Style::new().green().bold())),
                id,
                format!("({})", kind).style(paint(Style::new().dimmed()))
            )
        }
        Verdict::NotExternal => format!(
            "{}  {}",
            padded,
            "bundled".style(paint(Style::new().yellow()))
        ),
        Verdict::Ignore => format!("{}  {}", padded, "ignored".style(paint(Style::new().dimmed()))),
    }
}

/// One line of `deps`: name, declaring section and manifest.
pub fn format_dependency(name: &str, source: &DependencySource, width: usize) -> String {
    format!(
        "{:<width$}  {:<20}  {}",
        name,
        source.section.as_str(),
        source.manifest.display().style(paint(Style::new().dimmed())),
        width = width
    )
}
