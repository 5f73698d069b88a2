//! Classification engine.
//!
//! [`ExternalsEngine::initialize`] runs once per build: it compiles the
//! pattern options, reads the manifests and folds the discovered dependency
//! names into the `include` matchers. The resulting engine is immutable, so
//! [`ExternalsEngine::classify`] can be called concurrently from any number
//! of resolution requests.

use std::path::{Path, PathBuf};

use path_clean::PathClean;
use tracing::{debug, info};

use crate::builtins;
use crate::config::{BuiltinsPrefix, ExternalsOptions};
use crate::error::{ConfigWarning, ExternalsError, PatternOption, Result};
use crate::locator::ManifestLocator;
use crate::manifest::{DependencySection, DependencySet, PackageManifest};
use crate::pattern::{CompiledMatchers, compile_patterns, dependency_pattern};

/// Why a specifier is external.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExternalKind {
    /// Node.js builtin module
    Builtin,
    /// Declared dependency or `include` match
    Dependency,
}

/// Outcome of classifying one specifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Not handled here: entry points, virtual modules, relative and absolute paths.
    Ignore,
    /// Keep as a runtime import under `id`.
    External { id: String, kind: ExternalKind },
    /// Bundle normally.
    NotExternal,
}

impl Verdict {
    pub fn is_external(&self) -> bool {
        matches!(self, Verdict::External { .. })
    }

    /// Reported id for external verdicts.
    pub fn external_id(&self) -> Option<&str> {
        match self {
            Verdict::External { id, .. } => Some(id),
            _ => None,
        }
    }
}

/// Result of a successful initialization.
#[derive(Debug)]
pub struct Initialized {
    pub engine: ExternalsEngine,
    /// Non-fatal configuration problems, in the order they were found
    pub warnings: Vec<ConfigWarning>,
    /// Every manifest that was read, in reading order
    pub manifests: Vec<PathBuf>,
}

/// Immutable externality decisions for one build.
#[derive(Debug, Clone)]
pub struct ExternalsEngine {
    builtins: bool,
    builtins_prefix: BuiltinsPrefix,
    matchers: CompiledMatchers,
    dependencies: DependencySet,
}

impl ExternalsEngine {
    /// Build the engine from `options`.
    ///
    /// Manifest read and parse failures are fatal; malformed pattern entries
    /// only produce warnings.
    pub fn initialize(options: &ExternalsOptions) -> Result<Initialized> {
        let (mut include, mut warnings) = compile_patterns(PatternOption::Include, &options.include);
        let (exclude, exclude_warnings) = compile_patterns(PatternOption::Exclude, &options.exclude);
        warnings.extend(exclude_warnings);

        let mut dependencies = DependencySet::new();
        let mut manifests = Vec::new();

        if options.reads_manifests() {
            let sections = enabled_sections(options);
            let cwd = resolve_cwd(options.cwd.as_deref())?;

            for path in manifest_paths(options, &cwd) {
                let path = path?;
                let manifest = PackageManifest::read(&path)?;
                debug!(
                    manifest = %path.display(),
                    name = manifest.name.as_deref().unwrap_or("<unnamed>"),
                    "reading dependencies"
                );

                dependencies.merge(&manifest, &path, &sections);
                manifests.push(path);

                if manifest.is_workspace_root() {
                    debug!("workspace root reached, not looking further up");
                    break;
                }
            }
        }

        if let Some(pattern) = dependency_pattern(dependencies.names())
            .map_err(|source| ExternalsError::DependencyPattern { source })?
        {
            include.push(pattern);
        }

        info!(
            manifests = manifests.len(),
            dependencies = dependencies.len(),
            warnings = warnings.len(),
            "externals initialized"
        );

        Ok(Initialized {
            engine: ExternalsEngine {
                builtins: options.builtins,
                builtins_prefix: options.builtins_prefix,
                matchers: CompiledMatchers::new(include, exclude),
                dependencies,
            },
            warnings,
            manifests,
        })
    }

    /// Decide whether `specifier` is external.
    ///
    /// Never fails: anything not positively identified as external is either
    /// ignored or bundled.
    pub fn classify(&self, specifier: &str, importer: Option<&str>, is_entry: bool) -> Verdict {
        if is_entry || is_path_like(specifier) {
            return Verdict::Ignore;
        }

        let verdict = if builtins::is_builtin(specifier) {
            self.classify_builtin(specifier)
        } else if self.matchers.is_included(specifier) && !self.matchers.is_excluded(specifier) {
            Verdict::External {
                id: specifier.to_string(),
                kind: ExternalKind::Dependency,
            }
        } else {
            Verdict::NotExternal
        };

        debug!(specifier, importer, ?verdict, "classified");
        verdict
    }

    fn classify_builtin(&self, specifier: &str) -> Verdict {
        // Both spellings of a builtin must share one outcome. Prefix-only
        // builtins have no bare spelling; their bare name is an npm package.
        let bare = builtins::strip_prefix(specifier);
        let prefixed = builtins::with_prefix(specifier);
        let mut forms = vec![specifier, prefixed.as_str()];
        if builtins::NODE_BUILTINS.contains(bare) {
            forms.push(bare);
        }

        let included = self.builtins || forms.iter().any(|form| self.matchers.is_included(form));
        let excluded = forms.iter().any(|form| self.matchers.is_excluded(form));

        if included && !excluded {
            Verdict::External {
                id: builtins::normalize_builtin_id(specifier, self.builtins_prefix).into_owned(),
                kind: ExternalKind::Builtin,
            }
        } else {
            Verdict::NotExternal
        }
    }

    pub fn matchers(&self) -> &CompiledMatchers {
        &self.matchers
    }

    pub fn dependencies(&self) -> &DependencySet {
        &self.dependencies
    }
}

fn enabled_sections(options: &ExternalsOptions) -> Vec<DependencySection> {
    DependencySection::ALL
        .into_iter()
        .filter(|section| match section {
            DependencySection::Dependencies => options.deps,
            DependencySection::DevDependencies => options.dev_deps,
            DependencySection::PeerDependencies => options.peer_deps,
            DependencySection::OptionalDependencies => options.opt_deps,
        })
        .collect()
}

/// Absolute, lexically normalized start directory.
///
/// `..` segments are folded before the walk so that only real ancestors are
/// visited.
fn resolve_cwd(cwd: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = cwd.filter(|dir| dir.is_absolute()) {
        return Ok(dir.clean());
    }

    let current = std::env::current_dir().map_err(ExternalsError::CurrentDir)?;
    Ok(match cwd {
        Some(dir) => current.join(dir).clean(),
        None => current,
    })
}

/// Configured paths verbatim, or the upward walk from `cwd` when none are set.
fn manifest_paths(
    options: &ExternalsOptions,
    cwd: &Path,
) -> Box<dyn Iterator<Item = Result<PathBuf>>> {
    let configured: Vec<PathBuf> = options
        .package_path
        .iter()
        .filter(|path| !path.as_os_str().is_empty())
        .map(|path| cwd.join(path).clean())
        .collect();

    if configured.is_empty() {
        Box::new(ManifestLocator::new(cwd))
    } else {
        Box::new(configured.into_iter().map(Ok))
    }
}

/// Virtual, relative and absolute specifiers.
fn is_path_like(specifier: &str) -> bool {
    specifier.starts_with('\0')
        || specifier.starts_with('.')
        || specifier.starts_with('/')
        || specifier.starts_with('\\')
        || Path::new(specifier).is_absolute()
}
