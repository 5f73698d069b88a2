//! Check command implementation.
//!
//! Classifies each specifier the way the plugin's resolve hook would.

use crate::cli::CheckArgs;
use crate::commands::{Context, initialize};
use crate::error::Result;
use crate::ui;
use fob_externals::{ExternalKind, Verdict};
use serde::Serialize;

/// Importer used when `--importer` is not given.
const DEFAULT_IMPORTER: &str = "<cli>";

/// JSON form of one classification.
#[derive(Debug, Serialize)]
struct CheckResult<'a> {
    specifier: &'a str,
    verdict: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    kind: Option<&'static str>,
}

impl<'a> CheckResult<'a> {
    fn new(specifier: &'a str, verdict: &'a Verdict) -> Self {
        let (label, id, kind) = match verdict {
            Verdict::External { id, kind } => (
                "external",
                Some(id.as_str()),
                Some(match kind {
                    ExternalKind::Builtin => "builtin",
                    ExternalKind::Dependency => "dependency",
                }),
            ),
            Verdict::NotExternal => ("bundled", None, None),
            Verdict::Ignore => ("ignored", None, None),
        };

        Self {
            specifier,
            verdict: label,
            id,
            kind,
        }
    }
}

/// Execute the check command.
///
/// # Errors
///
/// Returns errors for invalid configuration and for manifests that cannot be
/// read or parsed.
pub fn execute(args: CheckArgs, ctx: &Context) -> Result<()> {
    let initialized = initialize(ctx, &args.options)?;
    let engine = &initialized.engine;
    let importer = args.importer.as_deref().unwrap_or(DEFAULT_IMPORTER);

    let verdicts: Vec<Verdict> = args
        .specifiers
        .iter()
        .map(|specifier| engine.classify(specifier, Some(importer), args.entry))
        .collect();

    if args.json {
        let results: Vec<CheckResult<'_>> = args
            .specifiers
            .iter()
            .zip(&verdicts)
            .map(|(specifier, verdict)| CheckResult::new(specifier, verdict))
            .collect();
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    let width = args.specifiers.iter().map(|s| s.len()).max().unwrap_or(0);
    for (specifier, verdict) in args.specifiers.iter().zip(&verdicts) {
        println!("{}", ui::format_verdict(specifier, verdict, width));
    }

    if !ctx.quiet {
        let external = verdicts.iter().filter(|v| v.is_external()).count();
        ui::info(&format!(
            "{} of {} specifiers external",
            external,
            verdicts.len()
        ));
    }

    Ok(())
}
