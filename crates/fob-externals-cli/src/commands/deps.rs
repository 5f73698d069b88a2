//! Deps command implementation.
//!
//! Shows the manifests that were read and where each dependency came from.

use crate::cli::DepsArgs;
use crate::commands::{Context, initialize};
use crate::error::Result;
use crate::ui;
use serde_json::json;

/// Execute the deps command.
///
/// # Errors
///
/// Returns errors for invalid configuration and for manifests that cannot be
/// read or parsed.
pub fn execute(args: DepsArgs, ctx: &Context) -> Result<()> {
    let initialized = initialize(ctx, &args.options)?;
    let dependencies = initialized.engine.dependencies();

    if args.json {
        let entries: Vec<_> = dependencies
            .iter()
            .map(|(name, source)| {
                json!({
                    "name": name,
                    "section": source.section,
                    "manifest": source.manifest.to_string_lossy(),
                })
            })
            .collect();
        let manifests: Vec<_> = initialized
            .manifests
            .iter()
            .map(|path| path.to_string_lossy())
            .collect();

        let report = json!({ "manifests": manifests, "dependencies": entries });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Manifests ({}):", initialized.manifests.len());
    for manifest in &initialized.manifests {
        println!("  {}", manifest.display());
    }

    println!("Dependencies ({}):", dependencies.len());
    let width = dependencies.names().map(str::len).max().unwrap_or(0);
    for (name, source) in dependencies.iter() {
        println!("  {}", ui::format_dependency(name, source, width));
    }

    if initialized.manifests.is_empty() && !ctx.quiet {
        ui::warning("No package.json found; only builtins and include patterns apply");
    }

    Ok(())
}
