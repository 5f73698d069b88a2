//! Plugin options.
//!
//! `ExternalsOptions` is the single options record a plugin instance is built
//! from. It can be assembled programmatically with the builder methods or
//! deserialized from JSON (camelCase keys, as found in bundler config files).

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use regex::Regex;
use serde::de::{DeserializeOwned, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// How the reported id of a Node.js builtin is normalized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuiltinsPrefix {
    /// `path` becomes `node:path`
    #[default]
    Add,
    /// `node:path` becomes `path` (prefix-only builtins keep their prefix)
    Strip,
    /// Builtin ids are reported as written
    Ignore,
}

impl BuiltinsPrefix {
    pub fn as_str(&self) -> &'static str {
        match self {
            BuiltinsPrefix::Add => "add",
            BuiltinsPrefix::Strip => "strip",
            BuiltinsPrefix::Ignore => "ignore",
        }
    }
}

impl FromStr for BuiltinsPrefix {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "add" => Ok(BuiltinsPrefix::Add),
            "strip" => Ok(BuiltinsPrefix::Strip),
            "ignore" => Ok(BuiltinsPrefix::Ignore),
            other => Err(format!(
                "Invalid builtins prefix mode: {} (expected add, strip or ignore)",
                other
            )),
        }
    }
}

impl fmt::Display for BuiltinsPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the `include` / `exclude` options.
///
/// Deserialization never fails: entries that are neither a string nor a
/// `{"regex": "..."}` object with a valid source are kept as `Invalid` so
/// they can be reported as warnings instead of rejecting the whole config.
#[derive(Debug, Clone)]
pub enum PatternInput {
    /// Matched exactly against the whole specifier
    Literal(String),
    /// Used as given
    Regex(Regex),
    /// Wrong-shaped entry, dropped at initialization
    Invalid(Value),
}

impl PatternInput {
    /// Build from a loosely typed JSON value.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::String(literal) => PatternInput::Literal(literal),
            Value::Object(map) => match regex_source(&map).map(Regex::new) {
                Some(Ok(regex)) => PatternInput::Regex(regex),
                _ => PatternInput::Invalid(Value::Object(map)),
            },
            other => PatternInput::Invalid(other),
        }
    }

    /// Falsy entries (`null`, `false`, `""`) are skipped without a warning.
    pub fn is_falsy(&self) -> bool {
        match self {
            PatternInput::Literal(literal) => literal.is_empty(),
            PatternInput::Regex(_) => false,
            PatternInput::Invalid(value) => matches!(value, Value::Null | Value::Bool(false)),
        }
    }

    /// JSON form of the entry, as accepted by deserialization.
    pub fn to_value(&self) -> Value {
        match self {
            PatternInput::Literal(literal) => Value::String(literal.clone()),
            PatternInput::Regex(regex) => {
                let mut map = Map::new();
                map.insert("regex".to_string(), Value::String(regex.as_str().to_string()));
                Value::Object(map)
            }
            PatternInput::Invalid(value) => value.clone(),
        }
    }
}

fn regex_source(map: &Map<String, Value>) -> Option<&str> {
    if map.len() != 1 {
        return None;
    }
    map.get("regex").and_then(Value::as_str)
}

impl From<&str> for PatternInput {
    fn from(literal: &str) -> Self {
        PatternInput::Literal(literal.to_string())
    }
}

impl From<String> for PatternInput {
    fn from(literal: String) -> Self {
        PatternInput::Literal(literal)
    }
}

impl From<Regex> for PatternInput {
    fn from(regex: Regex) -> Self {
        PatternInput::Regex(regex)
    }
}

impl PartialEq for PatternInput {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (PatternInput::Literal(a), PatternInput::Literal(b)) => a == b,
            (PatternInput::Regex(a), PatternInput::Regex(b)) => a.as_str() == b.as_str(),
            (PatternInput::Invalid(a), PatternInput::Invalid(b)) => a == b,
            _ => false,
        }
    }
}

impl<'de> Deserialize<'de> for PatternInput {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(PatternInput::from_value)
    }
}

impl Serialize for PatternInput {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_value().serialize(serializer)
    }
}

/// Accept either a single value or a list of values.
fn one_or_many<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .map(|item| serde_json::from_value(item).map_err(serde::de::Error::custom))
            .collect(),
        Value::Null => Ok(Vec::new()),
        single => serde_json::from_value(single)
            .map(|item| vec![item])
            .map_err(serde::de::Error::custom),
    }
}

fn default_true() -> bool {
    true
}

/// Options of one externals plugin instance.
///
/// # Example
///
/// ```
/// use fob_externals::{BuiltinsPrefix, ExternalsOptions};
///
/// let options = ExternalsOptions::default()
///     .with_builtins_prefix(BuiltinsPrefix::Strip)
///     .with_dev_deps(true)
///     .exclude("chalk");
///
/// assert!(options.deps);
/// assert!(options.dev_deps);
/// assert_eq!(options.exclude.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalsOptions {
    /// Mark Node.js builtins (`path`, `fs`, ...) as external
    #[serde(default = "default_true")]
    pub builtins: bool,

    /// `node:` prefix handling for builtin ids
    #[serde(default)]
    pub builtins_prefix: BuiltinsPrefix,

    /// Explicit package.json paths; empty means discover them upwards from `cwd`
    #[serde(default, deserialize_with = "one_or_many")]
    pub package_path: Vec<PathBuf>,

    /// Mark `dependencies` as external
    #[serde(default = "default_true")]
    pub deps: bool,

    /// Mark `devDependencies` as external
    #[serde(default)]
    pub dev_deps: bool,

    /// Mark `peerDependencies` as external
    #[serde(default = "default_true")]
    pub peer_deps: bool,

    /// Mark `optionalDependencies` as external
    #[serde(default = "default_true")]
    pub opt_deps: bool,

    /// Force these specifiers external
    #[serde(default, deserialize_with = "one_or_many")]
    pub include: Vec<PatternInput>,

    /// Force these specifiers internal; wins over everything else
    #[serde(default, deserialize_with = "one_or_many", alias = "except")]
    pub exclude: Vec<PatternInput>,

    /// Directory the manifest walk starts from (process cwd when unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cwd: Option<PathBuf>,
}

impl Default for ExternalsOptions {
    fn default() -> Self {
        Self {
            builtins: true,
            builtins_prefix: BuiltinsPrefix::Add,
            package_path: Vec::new(),
            deps: true,
            dev_deps: false,
            peer_deps: true,
            opt_deps: true,
            include: Vec::new(),
            exclude: Vec::new(),
            cwd: None,
        }
    }
}

impl ExternalsOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse options from a JSON value, applying defaults to missing fields.
    pub fn from_value(value: Value) -> serde_json::Result<Self> {
        serde_json::from_value(value)
    }

    pub fn with_builtins(mut self, builtins: bool) -> Self {
        self.builtins = builtins;
        self
    }

    pub fn with_builtins_prefix(mut self, prefix: BuiltinsPrefix) -> Self {
        self.builtins_prefix = prefix;
        self
    }

    /// Append an explicit manifest path.
    pub fn with_package_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.package_path.push(path.into());
        self
    }

    pub fn with_deps(mut self, enabled: bool) -> Self {
        self.deps = enabled;
        self
    }

    pub fn with_dev_deps(mut self, enabled: bool) -> Self {
        self.dev_deps = enabled;
        self
    }

    pub fn with_peer_deps(mut self, enabled: bool) -> Self {
        self.peer_deps = enabled;
        self
    }

    pub fn with_opt_deps(mut self, enabled: bool) -> Self {
        self.opt_deps = enabled;
        self
    }

    /// Add a force-external pattern.
    pub fn include(mut self, pattern: impl Into<PatternInput>) -> Self {
        self.include.push(pattern.into());
        self
    }

    /// Add a force-internal pattern.
    pub fn exclude(mut self, pattern: impl Into<PatternInput>) -> Self {
        self.exclude.push(pattern.into());
        self
    }

    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    /// Whether any dependency section is enabled, i.e. manifests must be read.
    pub fn reads_manifests(&self) -> bool {
        self.deps || self.dev_deps || self.peer_deps || self.opt_deps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults_match_documented_values() {
        let options = ExternalsOptions::default();
        assert!(options.builtins);
        assert_eq!(options.builtins_prefix, BuiltinsPrefix::Add);
        assert!(options.package_path.is_empty());
        assert!(options.deps);
        assert!(!options.dev_deps);
        assert!(options.peer_deps);
        assert!(options.opt_deps);
        assert!(options.include.is_empty());
        assert!(options.exclude.is_empty());
    }

    #[test]
    fn empty_object_deserializes_to_defaults() {
        let options = ExternalsOptions::from_value(json!({})).unwrap();
        assert_eq!(options, ExternalsOptions::default());
    }

    #[test]
    fn single_values_are_promoted_to_lists() {
        let options = ExternalsOptions::from_value(json!({
            "packagePath": "/repo/package.json",
            "include": "lodash",
            "exclude": { "regex": "^@internal/" }
        }))
        .unwrap();

        assert_eq!(options.package_path, vec![PathBuf::from("/repo/package.json")]);
        assert_eq!(options.include, vec![PatternInput::from("lodash")]);
        assert!(matches!(&options.exclude[0], PatternInput::Regex(r) if r.as_str() == "^@internal/"));
    }

    #[test]
    fn wrong_shaped_entries_survive_deserialization() {
        let options = ExternalsOptions::from_value(json!({
            "include": ["good-name", 42, { "regex": "(" }, null]
        }))
        .unwrap();

        assert_eq!(options.include.len(), 4);
        assert!(matches!(options.include[1], PatternInput::Invalid(_)));
        assert!(matches!(options.include[2], PatternInput::Invalid(_)));
        assert!(options.include[3].is_falsy());
    }

    #[test]
    fn except_is_an_alias_of_exclude() {
        let options = ExternalsOptions::from_value(json!({ "except": ["react"] })).unwrap();
        assert_eq!(options.exclude, vec![PatternInput::from("react")]);
    }

    #[test]
    fn builtins_prefix_parses_case_insensitively() {
        assert_eq!("STRIP".parse::<BuiltinsPrefix>().unwrap(), BuiltinsPrefix::Strip);
        assert_eq!("ignore".parse::<BuiltinsPrefix>().unwrap(), BuiltinsPrefix::Ignore);
        assert!("remove".parse::<BuiltinsPrefix>().is_err());
        assert_eq!(BuiltinsPrefix::Add.to_string(), "add");
    }

    #[test]
    fn serialization_round_trips_regex_entries() {
        let options = ExternalsOptions::default().include(Regex::new("^lodash").unwrap());
        let value = serde_json::to_value(&options).unwrap();
        assert_eq!(value["include"], json!([{ "regex": "^lodash" }]));
        assert_eq!(ExternalsOptions::from_value(value).unwrap(), options);
    }

    #[test]
    fn reads_manifests_only_when_a_section_is_enabled() {
        let none = ExternalsOptions::default()
            .with_deps(false)
            .with_peer_deps(false)
            .with_opt_deps(false);
        assert!(!none.reads_manifests());
        assert!(none.with_dev_deps(true).reads_manifests());
    }
}
