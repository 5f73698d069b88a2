//! Externality resolution for bundling Node.js libraries and applications.
//!
//! Decides, for every module specifier a bundler encounters, whether it should
//! stay a runtime `import`/`require` instead of being bundled inline: Node.js
//! builtins, dependencies declared in the project's package.json files
//! (discovered upwards across monorepo boundaries), and anything matched by the
//! `include` option, unless `exclude` says otherwise.
//!
//! # Example
//!
//! ```no_run
//! use fob_externals::{ExternalsEngine, ExternalsOptions};
//!
//! let options = ExternalsOptions::default().exclude("left-pad");
//! let initialized = ExternalsEngine::initialize(&options)?;
//! for warning in &initialized.warnings {
//!     eprintln!("{warning}");
//! }
//!
//! let verdict = initialized.engine.classify("fs", Some("src/index.ts"), false);
//! assert_eq!(verdict.external_id(), Some("node:fs"));
//! # Ok::<(), fob_externals::ExternalsError>(())
//! ```

pub mod builtins;
pub mod config;
pub mod engine;
pub mod error;
pub mod locator;
pub mod manifest;
pub mod pattern;

pub use config::{BuiltinsPrefix, ExternalsOptions, PatternInput};
pub use engine::{ExternalKind, ExternalsEngine, Initialized, Verdict};
pub use error::{ConfigWarning, ExternalsError, PatternOption, Result};
pub use locator::ManifestLocator;
pub use manifest::{DependencySection, DependencySet, DependencySource, PackageManifest};
pub use pattern::CompiledMatchers;
