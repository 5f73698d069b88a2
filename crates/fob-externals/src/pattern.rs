//! Compilation of `include` / `exclude` entries into regex matchers.
//!
//! Patterns are compiled once per initialization and never per specifier.
//! Literal entries are escaped and anchored to the whole specifier; matching
//! also tries the package name of a deep import, so `lodash` covers
//! `lodash/fp` and `@scope/pkg` covers `@scope/pkg/sub/path`.

use regex::Regex;
use serde_json::Value;
use tracing::debug;

use crate::config::PatternInput;
use crate::error::{ConfigWarning, PatternOption};

/// Compile the entries of one pattern option.
///
/// Wrong-shaped entries are dropped and reported; falsy entries are dropped
/// silently. The order of the returned matchers follows the input.
pub fn compile_patterns(
    option: PatternOption,
    entries: &[PatternInput],
) -> (Vec<Regex>, Vec<ConfigWarning>) {
    let mut patterns = Vec::with_capacity(entries.len());
    let mut warnings = Vec::new();

    for (index, entry) in entries.iter().enumerate() {
        if entry.is_falsy() {
            continue;
        }

        match entry {
            PatternInput::Regex(regex) => patterns.push(regex.clone()),
            PatternInput::Literal(literal) => match literal_pattern(literal) {
                Ok(regex) => patterns.push(regex),
                Err(_) => warnings.push(dropped(option, index, Value::String(literal.clone()))),
            },
            PatternInput::Invalid(value) => warnings.push(dropped(option, index, value.clone())),
        }
    }

    (patterns, warnings)
}

fn dropped(option: PatternOption, index: usize, entry: Value) -> ConfigWarning {
    let warning = ConfigWarning {
        option,
        index,
        entry,
    };
    debug!(option = %option, index, "dropping pattern entry");
    warning
}

/// `^<escaped literal>$`
pub fn literal_pattern(literal: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!("^{}$", regex::escape(literal)))
}

/// Single alternation matching any of `names`, optionally followed by a subpath.
///
/// Returns `Ok(None)` when there are no names.
pub fn dependency_pattern<'a, I>(names: I) -> Result<Option<Regex>, regex::Error>
where
    I: IntoIterator<Item = &'a str>,
{
    let alternation = names
        .into_iter()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join("|");

    if alternation.is_empty() {
        return Ok(None);
    }

    Regex::new(&format!("^(?:{})(?:/.+)?$", alternation)).map(Some)
}

/// Package name of a bare specifier: `pkg/sub` → `pkg`, `@scope/pkg/sub` → `@scope/pkg`.
pub fn package_name(specifier: &str) -> &str {
    let segments = if specifier.starts_with('@') { 2 } else { 1 };
    match specifier.match_indices('/').nth(segments - 1) {
        Some((end, _)) => &specifier[..end],
        None => specifier,
    }
}

/// Compiled `include` and `exclude` matchers, immutable once built.
#[derive(Debug, Clone, Default)]
pub struct CompiledMatchers {
    include: Vec<Regex>,
    exclude: Vec<Regex>,
}

impl CompiledMatchers {
    pub fn new(include: Vec<Regex>, exclude: Vec<Regex>) -> Self {
        Self { include, exclude }
    }

    pub fn is_included(&self, specifier: &str) -> bool {
        matches_any(&self.include, specifier)
    }

    pub fn is_excluded(&self, specifier: &str) -> bool {
        matches_any(&self.exclude, specifier)
    }

    pub fn include_sources(&self) -> Vec<&str> {
        self.include.iter().map(Regex::as_str).collect()
    }

    pub fn exclude_sources(&self) -> Vec<&str> {
        self.exclude.iter().map(Regex::as_str).collect()
    }
}

fn matches_any(patterns: &[Regex], specifier: &str) -> bool {
    if patterns.is_empty() {
        return false;
    }

    let name = package_name(specifier);
    patterns
        .iter()
        .any(|pattern| pattern.is_match(specifier) || (name != specifier && pattern.is_match(name)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn literal_patterns_escape_metacharacters() {
        let pattern = literal_pattern("lodash.merge").unwrap();
        assert!(pattern.is_match("lodash.merge"));
        assert!(!pattern.is_match("lodashXmerge"));
        assert!(!pattern.is_match("lodash.merge2"));
    }

    #[test]
    fn compile_reports_wrong_entries_with_index() {
        let entries = vec![
            PatternInput::from("good-name"),
            PatternInput::Invalid(json!(42)),
            PatternInput::Invalid(json!(null)),
            PatternInput::from(""),
        ];
        let (patterns, warnings) = compile_patterns(PatternOption::Include, &entries);

        assert_eq!(patterns.len(), 1);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].index, 1);
        assert_eq!(warnings[0].option, PatternOption::Include);
    }

    #[test]
    fn dependency_pattern_matches_names_and_subpaths() {
        let pattern = dependency_pattern(["chalk", "@babel/core"]).unwrap().unwrap();
        assert_eq!(pattern.as_str(), r"^(?:chalk|@babel/core)(?:/.+)?$");
        assert!(pattern.is_match("chalk"));
        assert!(pattern.is_match("chalk/source/index.js"));
        assert!(pattern.is_match("@babel/core"));
        assert!(!pattern.is_match("chalky"));
        assert!(!pattern.is_match("chalk/"));
    }

    #[test]
    fn dependency_pattern_is_none_without_names() {
        assert!(dependency_pattern(std::iter::empty()).unwrap().is_none());
    }

    #[test]
    fn package_name_handles_scopes() {
        assert_eq!(package_name("lodash"), "lodash");
        assert_eq!(package_name("lodash/fp/map"), "lodash");
        assert_eq!(package_name("@scope/pkg"), "@scope/pkg");
        assert_eq!(package_name("@scope/pkg/deep/path"), "@scope/pkg");
        assert_eq!(package_name("@scope"), "@scope");
    }

    #[test]
    fn literal_matchers_cover_deep_imports() {
        let matchers = CompiledMatchers::new(
            vec![literal_pattern("lodash").unwrap()],
            vec![literal_pattern("lodash/fp").unwrap()],
        );

        assert!(matchers.is_included("lodash"));
        assert!(matchers.is_included("lodash/fp"));
        assert!(!matchers.is_excluded("lodash"));
        assert!(matchers.is_excluded("lodash/fp"));
        assert!(!matchers.is_included("lodash-es"));
    }

    #[test]
    fn empty_matchers_match_nothing() {
        let matchers = CompiledMatchers::default();
        assert!(!matchers.is_included("anything"));
        assert!(!matchers.is_excluded("anything"));
    }
}
