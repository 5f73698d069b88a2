//! Shared fixtures for fob-externals integration tests

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use fob_externals::{ExternalsEngine, ExternalsOptions, Verdict};
use serde_json::Value;
use tempfile::TempDir;

/// Temporary directory tree holding package.json files and root markers.
pub struct Fixture {
    dir: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create fixture dir"),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    /// Write `<relative>/package.json` and return its path.
    pub fn manifest(&self, relative: &str, content: Value) -> PathBuf {
        let path = self.path(relative).join("package.json");
        self.write(&path, &serde_json::to_string_pretty(&content).unwrap());
        path
    }

    pub fn file(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.path(relative);
        self.write(&path, content);
        path
    }

    pub fn git_root(&self, relative: &str) {
        fs::create_dir_all(self.path(relative).join(".git")).unwrap();
    }

    pub fn dir(&self, relative: &str) -> PathBuf {
        let path = self.path(relative);
        fs::create_dir_all(&path).unwrap();
        path
    }

    fn write(&self, path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }
}

pub fn engine(options: &ExternalsOptions) -> ExternalsEngine {
    ExternalsEngine::initialize(options)
        .expect("initialization should succeed")
        .engine
}

/// Classify a specifier imported from a regular (non-entry) module.
pub fn classify(engine: &ExternalsEngine, specifier: &str) -> Verdict {
    engine.classify(specifier, Some("/project/src/index.js"), false)
}

pub fn is_external(engine: &ExternalsEngine, specifier: &str) -> bool {
    classify(engine, specifier).is_external()
}
