//! Upward discovery of package.json files.
//!
//! Starting from a directory, every ancestor is listed once: its package.json
//! (if any) is yielded, then the walk stops if the directory is a git root or
//! holds a monorepo root marker. Otherwise it continues to the parent until
//! the filesystem root.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{ExternalsError, Result};

/// Manifest file name.
pub const MANIFEST_FILE: &str = "package.json";

/// Version-control root marker (a directory, or a file for worktrees and submodules).
pub const GIT_DIR: &str = ".git";

/// Files that mark the root of a monorepo.
pub const WORKSPACE_ROOT_FILES: &[&str] = &[
    "pnpm-workspace.yaml", // pnpm
    "lerna.json",          // Lerna / Lerna Light
    "rush.json",           // Rush
];

/// Lazy iterator over manifest paths, closest directory first.
///
/// The iterator is fused: after a boundary, the filesystem root, or the first
/// error, it only returns `None`.
///
/// # Example
///
/// ```no_run
/// use fob_externals::ManifestLocator;
///
/// for manifest in ManifestLocator::new("/repo/packages/app") {
///     println!("{}", manifest?.display());
/// }
/// # Ok::<(), fob_externals::ExternalsError>(())
/// ```
#[derive(Debug)]
pub struct ManifestLocator {
    current: Option<PathBuf>,
}

impl ManifestLocator {
    pub fn new(start: impl Into<PathBuf>) -> Self {
        Self {
            current: Some(start.into()),
        }
    }

    /// Run the walk to completion.
    pub fn collect_paths(self) -> Result<Vec<PathBuf>> {
        self.collect()
    }

    /// Look at one directory; returns its manifest and whether the walk stops here.
    fn visit(dir: &Path) -> Result<(Option<PathBuf>, bool)> {
        let entries = fs::read_dir(dir).map_err(|source| ExternalsError::DirectoryRead {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut manifest = None;
        let mut boundary = false;

        for entry in entries {
            let entry = entry.map_err(|source| ExternalsError::DirectoryRead {
                path: dir.to_path_buf(),
                source,
            })?;
            let file_name = entry.file_name();
            let Some(name) = file_name.to_str() else {
                continue;
            };

            if name == MANIFEST_FILE {
                let path = entry.path();
                if path.is_file() {
                    manifest = Some(path);
                }
            } else if name == GIT_DIR {
                debug!(dir = %dir.display(), "stopping manifest walk at git root");
                boundary = true;
            } else if WORKSPACE_ROOT_FILES.contains(&name) && entry.path().is_file() {
                debug!(dir = %dir.display(), marker = name, "stopping manifest walk at workspace root");
                boundary = true;
            }
        }

        Ok((manifest, boundary))
    }
}

impl Iterator for ManifestLocator {
    type Item = Result<PathBuf>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(dir) = self.current.take() {
            let (manifest, boundary) = match Self::visit(&dir) {
                Ok(visited) => visited,
                Err(err) => return Some(Err(err)),
            };

            if !boundary {
                // `parent()` is `None` at the root, which also guards against
                // walking in place forever.
                self.current = dir
                    .parent()
                    .filter(|parent| *parent != dir.as_path())
                    .map(Path::to_path_buf);
            }

            if let Some(path) = manifest {
                return Some(Ok(path));
            }
        }

        None
    }
}

impl std::iter::FusedIterator for ManifestLocator {}
