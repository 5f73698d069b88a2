//! Command-line interface definition for fob-externals.
//!
//! # Command Structure
//!
//! - `fob-externals check <SPECIFIER>...` - Classify import specifiers
//! - `fob-externals deps` - List manifests and discovered dependencies

mod commands;
mod tests;
mod validation;

use clap::Parser;
use std::path::PathBuf;

pub use commands::{CheckArgs, Command, DepsArgs, OptionArgs};
pub use validation::{parse_builtins_prefix, parse_regex};

/// fob-externals - see which imports stay out of the bundle
#[derive(Parser, Debug)]
#[command(
    name = "fob-externals",
    version,
    about = "Inspect which imports the fob externals plugin keeps external",
    long_about = "Runs the same decisions as the fob externals plugin outside of a build.\n\
                  Node.js builtins and the dependencies declared in the package.json files\n\
                  around the working directory are reported as external."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    ///
    /// Shows every manifest read and every classification.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    ///
    /// Outputs plain text without ANSI color codes. The NO_COLOR environment
    /// variable has the same effect.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Directory to start the package.json search from
    #[arg(long, global = true, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    /// Path to externals.config.json
    ///
    /// Defaults to externals.config.json in the working directory, when present.
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}
