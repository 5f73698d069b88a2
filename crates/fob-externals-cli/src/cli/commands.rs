use clap::{Args, Subcommand};
use fob_externals::BuiltinsPrefix;
use regex::Regex;
use std::path::PathBuf;

use crate::cli::validation::{parse_builtins_prefix, parse_regex};

/// Available fob-externals subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Classify import specifiers
    ///
    /// Prints, for every specifier, whether it would be kept external and
    /// under which id.
    ///
    /// Examples:
    ///   fob-externals check fs react ./local.js
    ///   fob-externals check --dev-deps vitest
    Check(CheckArgs),

    /// List manifests and the dependencies they declare
    ///
    /// Shows which package.json files were read, in order, and which section
    /// of which manifest declared each dependency.
    Deps(DepsArgs),
}

/// Arguments for the check command
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Import specifiers to classify
    #[arg(required = true, value_name = "SPECIFIER")]
    pub specifiers: Vec<String>,

    /// Module the specifiers are imported from
    #[arg(long, value_name = "PATH")]
    pub importer: Option<String>,

    /// Treat the specifiers as entry points
    #[arg(long)]
    pub entry: bool,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub options: OptionArgs,
}

/// Arguments for the deps command
#[derive(Args, Debug)]
pub struct DepsArgs {
    /// Print results as JSON
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub options: OptionArgs,
}

/// Plugin options settable from the command line
///
/// Flags override the config file and environment. List flags add to the
/// lists coming from those sources.
#[derive(Args, Debug, Default, Clone)]
pub struct OptionArgs {
    /// Do not mark Node.js builtins as external
    #[arg(long)]
    pub no_builtins: bool,

    /// How to report builtin ids: add, strip or ignore the `node:` prefix
    #[arg(long, value_name = "MODE", value_parser = parse_builtins_prefix)]
    pub builtins_prefix: Option<BuiltinsPrefix>,

    /// package.json to read instead of searching upwards (repeatable)
    #[arg(long, value_name = "FILE")]
    pub package_path: Vec<PathBuf>,

    /// Do not mark `dependencies` as external
    #[arg(long)]
    pub no_deps: bool,

    /// Mark `devDependencies` as external
    #[arg(long)]
    pub dev_deps: bool,

    /// Do not mark `peerDependencies` as external
    #[arg(long)]
    pub no_peer_deps: bool,

    /// Do not mark `optionalDependencies` as external
    #[arg(long)]
    pub no_opt_deps: bool,

    /// Force a specifier external (repeatable)
    #[arg(long, value_name = "SPECIFIER")]
    pub include: Vec<String>,

    /// Force a specifier to be bundled (repeatable)
    #[arg(long, value_name = "SPECIFIER")]
    pub exclude: Vec<String>,

    /// Force specifiers matching a regular expression external (repeatable)
    #[arg(long, value_name = "REGEX", value_parser = parse_regex)]
    pub include_regex: Vec<Regex>,

    /// Force specifiers matching a regular expression to be bundled (repeatable)
    #[arg(long, value_name = "REGEX", value_parser = parse_regex)]
    pub exclude_regex: Vec<Regex>,
}
