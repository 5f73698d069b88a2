//! Command implementations for the fob-externals CLI.
//!
//! - [`check`] - Classify import specifiers
//! - [`deps`] - List manifests and discovered dependencies
//!
//! Each command provides an `execute` function that takes the parsed command
//! arguments and the global [`Context`].

pub mod check;
pub mod deps;

use crate::cli::OptionArgs;
use crate::config;
use crate::error::Result;
use crate::ui;
use fob_externals::{ExternalsEngine, Initialized};
use std::path::PathBuf;

pub use check::execute as check_execute;
pub use deps::execute as deps_execute;

/// Global flags shared by every command.
#[derive(Debug, Clone, Default)]
pub struct Context {
    pub cwd: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub quiet: bool,
}

/// Load options and initialize the engine, reporting configuration warnings.
pub(crate) fn initialize(ctx: &Context, options: &OptionArgs) -> Result<Initialized> {
    let options = config::load_options(ctx.cwd.as_deref(), ctx.config.as_deref(), options)?;
    let initialized = ExternalsEngine::initialize(&options)?;

    if !ctx.quiet {
        for warning in &initialized.warnings {
            ui::warning(&warning.to_string());
        }
    }

    Ok(initialized)
}
