//! package.json model and dependency aggregation.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use indexmap::map::Entry;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{ExternalsError, Result};

/// Fields of interest in a package.json.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageManifest {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub version: Option<String>,

    /// npm/yarn workspaces, either `[...]` or `{ "packages": [...] }`
    #[serde(default)]
    pub workspaces: Option<Value>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub dependencies: IndexMap<String, Value>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub dev_dependencies: IndexMap<String, Value>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub peer_dependencies: IndexMap<String, Value>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub optional_dependencies: IndexMap<String, Value>,
}

impl PackageManifest {
    /// Read and parse a manifest.
    ///
    /// Read failures and invalid content are reported as distinct errors.
    pub fn read(path: &Path) -> Result<Self> {
        let content = fs::read(path).map_err(|source| ExternalsError::ManifestRead {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_slice(&content).map_err(|source| ExternalsError::ManifestParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Whether this manifest governs an npm/yarn workspace.
    pub fn is_workspace_root(&self) -> bool {
        match &self.workspaces {
            Some(Value::Array(_)) => true,
            Some(Value::Object(map)) => matches!(map.get("packages"), Some(Value::Array(_))),
            _ => false,
        }
    }

    /// Dependency names declared in `section`.
    pub fn section(&self, section: DependencySection) -> impl Iterator<Item = &str> {
        let map = match section {
            DependencySection::Dependencies => &self.dependencies,
            DependencySection::DevDependencies => &self.dev_dependencies,
            DependencySection::PeerDependencies => &self.peer_dependencies,
            DependencySection::OptionalDependencies => &self.optional_dependencies,
        };
        map.keys().map(String::as_str)
    }
}

/// `null` sections count as empty.
fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<IndexMap<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<IndexMap<String, Value>>::deserialize(deserializer)?.unwrap_or_default())
}

/// A dependency section of package.json.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DependencySection {
    Dependencies,
    DevDependencies,
    PeerDependencies,
    OptionalDependencies,
}

impl DependencySection {
    pub const ALL: [DependencySection; 4] = [
        DependencySection::Dependencies,
        DependencySection::DevDependencies,
        DependencySection::PeerDependencies,
        DependencySection::OptionalDependencies,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DependencySection::Dependencies => "dependencies",
            DependencySection::DevDependencies => "devDependencies",
            DependencySection::PeerDependencies => "peerDependencies",
            DependencySection::OptionalDependencies => "optionalDependencies",
        }
    }
}

impl fmt::Display for DependencySection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a discovered dependency name was declared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencySource {
    pub section: DependencySection,
    pub manifest: PathBuf,
}

/// Dependency names gathered from one or more manifests.
///
/// Keeps the first declaration seen for each name, except that a
/// `dependencies` declaration replaces any other kind: a regular dependency
/// is never reported as a dev/peer/optional one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencySet {
    names: IndexMap<String, DependencySource>,
}

impl DependencySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &str, section: DependencySection, manifest: &Path) {
        match self.names.entry(name.to_string()) {
            Entry::Vacant(entry) => {
                entry.insert(DependencySource {
                    section,
                    manifest: manifest.to_path_buf(),
                });
            }
            Entry::Occupied(mut entry) => {
                let current = entry.get_mut();
                if section == DependencySection::Dependencies
                    && current.section != DependencySection::Dependencies
                {
                    current.section = section;
                    current.manifest = manifest.to_path_buf();
                }
            }
        }
    }

    /// Merge the enabled sections of `manifest`, read from `path`.
    pub fn merge(&mut self, manifest: &PackageManifest, path: &Path, sections: &[DependencySection]) {
        for &section in sections {
            for name in manifest.section(section) {
                self.insert(name, section, path);
            }
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&DependencySource> {
        self.names.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DependencySource)> {
        self.names.iter().map(|(name, source)| (name.as_str(), source))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
