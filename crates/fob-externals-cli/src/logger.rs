//! Logging setup for the fob-externals CLI.
//!
//! Log events go to stderr so that command output on stdout stays usable in
//! pipes, including `--json` output.
//!
//! # Example
//!
//! ```rust,no_run
//! use fob_externals_cli::logger::init_logger;
//! use tracing::info;
//!
//! init_logger(false, false, false);
//!
//! info!("Reading manifests");
//! ```

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used by `--verbose`.
pub const VERBOSE_FILTER: &str = "fob_externals=debug,fob_externals_cli=debug";

/// Filter used by `--quiet`.
pub const QUIET_FILTER: &str = "fob_externals=error,fob_externals_cli=error";

/// Filter used when neither flag nor `RUST_LOG` is set.
pub const DEFAULT_FILTER: &str = "fob_externals=info,fob_externals_cli=info";

/// Initialize the tracing subscriber with the specified options.
///
/// Call once at the start of the program, before any logging occurs.
///
/// # Verbosity Levels
///
/// The logging level is determined in this order:
/// 1. `--verbose` flag: DEBUG for fob-externals crates
/// 2. `--quiet` flag: ERROR only
/// 3. `RUST_LOG` environment variable: custom filter
/// 4. Default: INFO for fob-externals crates
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    init_logger_with_filter(filter_for(verbose, quiet), no_color);
}

/// Initialize logger with a custom environment filter.
pub fn init_logger_with_filter(filter: EnvFilter, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

fn filter_for(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}
