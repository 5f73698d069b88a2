//! fob-externals CLI - inspect externals decisions outside of a build.
//!
//! The binary runs the same engine as the fob externals Rolldown plugin and
//! prints what it would do:
//!
//! ```text
//! $ fob-externals check fs react ./local.js
//! fs          external  node:fs (builtin)
//! react       external  react (dependency)
//! ./local.js  ignored
//! ```
//!
//! # Modules
//!
//! - [`cli`] - Argument definitions (clap)
//! - [`config`] - Option layering (figment)
//! - [`commands`] - `check` and `deps`
//! - [`error`] - Error types and miette conversion
//! - [`logger`] - tracing subscriber setup
//! - [`ui`] - Terminal output

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logger;
pub mod ui;

pub use error::{CliError, ConfigError, Result};
