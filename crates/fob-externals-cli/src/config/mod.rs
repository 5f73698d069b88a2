//! Option loading for the CLI.
//!
//! Options are layered with figment, lowest priority first:
//!
//! 1. `ExternalsOptions::default()`
//! 2. `externals.config.json` in the working directory, or `--config <FILE>`
//! 3. `FOB_EXTERNALS_*` environment variables (`FOB_EXTERNALS_DEV_DEPS=true`)
//! 4. Command-line flags
//!
//! The config file uses the plugin's own option names (`builtinsPrefix`,
//! `packagePath`, `devDeps`, ...). Command-line lists are appended to the lists
//! from the lower layers; everything else replaces them.

mod loading;
mod tests;

pub use loading::{CONFIG_FILE, ENV_PREFIX, env_key, load_options, overrides};
