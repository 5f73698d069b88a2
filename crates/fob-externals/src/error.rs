//! Error and warning types for externals resolution.

use std::fmt;
use std::io;
use std::path::PathBuf;

use serde_json::Value;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ExternalsError>;

/// Fatal errors raised while initializing the engine.
///
/// Any of these must abort the build: a partially read dependency set would
/// silently bundle packages that were meant to stay external.
#[derive(Debug, Error)]
pub enum ExternalsError {
    /// A manifest path could not be read from disk.
    #[error("Cannot read {path:?}, error: {kind}.", kind = .source.kind())]
    ManifestRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A manifest was read but its content is not a valid package.json.
    #[error("File {path:?} does not look like a valid package.json.")]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The upward manifest walk could not list a directory.
    #[error("Cannot list directory {path:?} while looking for package.json files: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The discovered dependency names could not be compiled into a matcher.
    #[error("Cannot compile the dependency matcher: {source}")]
    DependencyPattern {
        #[source]
        source: regex::Error,
    },

    /// The process working directory is unavailable.
    #[error("Cannot determine the current working directory: {0}")]
    CurrentDir(#[source] io::Error),
}

impl ExternalsError {
    /// Path of the file or directory this error is about, if any.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::ManifestRead { path, .. }
            | Self::ManifestParse { path, .. }
            | Self::DirectoryRead { path, .. } => Some(path),
            Self::DependencyPattern { .. } | Self::CurrentDir(_) => None,
        }
    }
}

/// Pattern option a warning refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternOption {
    Include,
    Exclude,
}

impl PatternOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            PatternOption::Include => "include",
            PatternOption::Exclude => "exclude",
        }
    }
}

impl fmt::Display for PatternOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Non-fatal configuration problem, reported once initialization is over.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigWarning {
    /// Option holding the offending entry
    pub option: PatternOption,
    /// Position of the entry in the option list
    pub index: usize,
    /// The entry as it was given
    pub entry: Value,
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ignoring wrong entry type #{} in '{}' option: {}",
            self.index, self.option, self.entry
        )
    }
}
