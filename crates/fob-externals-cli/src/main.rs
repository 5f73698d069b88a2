//! fob-externals CLI entry point.
//!
//! Parses arguments, sets up logging and colors, and dispatches the command.

use clap::Parser;
use fob_externals_cli::{cli, commands, error, logger, ui};
use miette::Result;

fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);
    ui::init_colors(args.no_color);

    // Long manifest paths must stay on one line
    let _ = miette::set_hook(Box::new(|_| {
        Box::new(miette::MietteHandlerOpts::new().wrap_lines(false).build())
    }));

    let ctx = commands::Context {
        cwd: args.cwd,
        config: args.config,
        quiet: args.quiet,
    };

    let result = match args.command {
        cli::Command::Check(check_args) => commands::check_execute(check_args, &ctx),
        cli::Command::Deps(deps_args) => commands::deps_execute(deps_args, &ctx),
    };

    result.map_err(error::cli_error_to_miette)
}
