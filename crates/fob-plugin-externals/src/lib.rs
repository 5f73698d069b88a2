//! Rolldown plugin that keeps Node.js builtins and declared dependencies external
//!
//! Useful when bundling a Node.js library or application: packages installed
//! next to the bundle, and the runtime's own modules, stay `import`/`require`
//! calls instead of being inlined.
//!
//! ## How it works
//!
//! - `build_start` reads the project's package.json files (walking up from the
//!   working directory until a git root or a monorepo root), compiles the
//!   `include` / `exclude` options, and registers every manifest as a watch file.
//! - `resolve_id` answers, for each bare specifier, whether it is external.
//!   Builtins are reported as `node:name` (or as configured by `builtinsPrefix`).
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use fob_plugin_externals::{ExternalsOptions, FobExternalsPlugin};
//! use std::sync::Arc;
//!
//! let options = ExternalsOptions::default()
//!     .with_dev_deps(true)
//!     .exclude("my-internal-package");
//!
//! // Use with your Rolldown bundler configuration
//! let plugin = Arc::new(FobExternalsPlugin::with_options(options));
//! ```

use fob_externals::{ExternalKind, ExternalsEngine, ExternalsError, Verdict};
use parking_lot::RwLock;
use rolldown_common::side_effects::HookSideEffects;
use rolldown_common::{LogWithoutPlugin, ResolvedExternal};
use rolldown_plugin::{
    HookBuildStartArgs, HookNoopReturn, HookResolveIdArgs, HookResolveIdOutput,
    HookResolveIdReturn, HookUsage, Plugin, PluginContext,
};
use std::borrow::Cow;
use std::path::PathBuf;
use std::sync::Arc;

pub use fob_externals::{BuiltinsPrefix, ConfigWarning, ExternalsOptions, PatternInput};

/// Rolldown plugin marking builtins and dependencies as external
///
/// The engine is rebuilt from scratch on every `build_start` and is read-only
/// while the build resolves modules.
#[derive(Debug, Default)]
pub struct FobExternalsPlugin {
    options: ExternalsOptions,
    engine: RwLock<Option<Arc<ExternalsEngine>>>,
}

/// What a successful initialization leaves for the host to report.
#[derive(Debug, Clone, Default)]
pub struct BuildStartReport {
    /// Configuration warnings, in order
    pub warnings: Vec<ConfigWarning>,
    /// Manifests that were read and should be watched
    pub manifests: Vec<PathBuf>,
}

impl FobExternalsPlugin {
    /// Create a plugin with default options
    ///
    /// # Example
    ///
    /// ```rust
    /// use fob_plugin_externals::FobExternalsPlugin;
    ///
    /// let plugin = FobExternalsPlugin::new();
    /// assert!(!plugin.is_initialized());
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ExternalsOptions) -> Self {
        Self {
            options,
            engine: RwLock::new(None),
        }
    }

    pub fn options(&self) -> &ExternalsOptions {
        &self.options
    }

    /// Whether the last initialization succeeded.
    pub fn is_initialized(&self) -> bool {
        self.engine.read().is_some()
    }

    /// Rebuild the engine.
    ///
    /// The previous engine is dropped first, so a failed initialization never
    /// leaves stale decisions behind.
    pub fn initialize(&self) -> Result<BuildStartReport, ExternalsError> {
        *self.engine.write() = None;

        let initialized = ExternalsEngine::initialize(&self.options)?;
        *self.engine.write() = Some(Arc::new(initialized.engine));

        Ok(BuildStartReport {
            warnings: initialized.warnings,
            manifests: initialized.manifests,
        })
    }

    /// Resolution answer for one specifier.
    ///
    /// `None` defers to the next plugin or Rolldown's own resolver, which is
    /// also the answer for every request made before initialization.
    pub fn resolve(
        &self,
        specifier: &str,
        importer: Option<&str>,
        is_entry: bool,
    ) -> Option<HookResolveIdOutput> {
        let engine = self.engine.read().clone()?;

        match engine.classify(specifier, importer, is_entry) {
            Verdict::External { id, kind } => Some(HookResolveIdOutput {
                id: id.into(),
                external: Some(ResolvedExternal::Bool(true)),
                // Builtin modules are side-effect free
                side_effects: match kind {
                    ExternalKind::Builtin => Some(HookSideEffects::False),
                    ExternalKind::Dependency => None,
                },
                ..Default::default()
            }),
            Verdict::Ignore | Verdict::NotExternal => None,
        }
    }
}

impl From<ExternalsOptions> for FobExternalsPlugin {
    fn from(options: ExternalsOptions) -> Self {
        Self::with_options(options)
    }
}

impl Plugin for FobExternalsPlugin {
    fn name(&self) -> Cow<'static, str> {
        "fob-externals".into()
    }

    fn register_hook_usage(&self) -> HookUsage {
        HookUsage::BuildStart | HookUsage::ResolveId
    }

    /// Build start hook - reads manifests and compiles matchers
    ///
    /// Manifest failures abort the build. Warnings are flushed in order once
    /// initialization is over.
    fn build_start(
        &self,
        ctx: &PluginContext,
        _args: &HookBuildStartArgs<'_>,
    ) -> impl std::future::Future<Output = HookNoopReturn> + Send {
        let result = match self.initialize() {
            Ok(report) => {
                for manifest in &report.manifests {
                    ctx.add_watch_file(&manifest.to_string_lossy());
                }
                for warning in &report.warnings {
                    ctx.warn(LogWithoutPlugin {
                        message: warning.to_string(),
                        ..Default::default()
                    });
                }
                Ok(())
            }
            Err(err) => {
                tracing::error!("[fob-externals] {}", err);
                Err(anyhow::Error::new(err))
            }
        };

        async move { result }
    }

    /// Resolve ID hook - claims external specifiers
    ///
    /// # Returns
    ///
    /// - `Ok(Some(output))` - External, with the id to keep in the output
    /// - `Ok(None)` - Not ours, let Rolldown handle it
    fn resolve_id(
        &self,
        _ctx: &PluginContext,
        args: &HookResolveIdArgs<'_>,
    ) -> impl std::future::Future<Output = HookResolveIdReturn> + Send {
        let output = self.resolve(args.specifier, args.importer, args.is_entry);

        async move { Ok(output) }
    }
}
