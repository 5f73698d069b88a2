use crate::cli::OptionArgs;
use crate::error::{ConfigError, Result};
use figment::{
    Figment,
    providers::{Env, Format as _, Json, Serialized},
};
use fob_externals::{ExternalsOptions, PatternInput};
use path_clean::PathClean;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory.
pub const CONFIG_FILE: &str = "externals.config.json";

/// Prefix of the environment variables read as options.
pub const ENV_PREFIX: &str = "FOB_EXTERNALS_";

/// Load options from every layer.
///
/// `cwd` is where the config file is looked up and where the package.json
/// search starts; it defaults to the process working directory.
pub fn load_options(
    cwd: Option<&Path>,
    config_path: Option<&Path>,
    args: &OptionArgs,
) -> Result<ExternalsOptions> {
    let base = match cwd {
        Some(dir) if dir.is_absolute() => dir.clean(),
        Some(dir) => std::env::current_dir()?.join(dir).clean(),
        None => std::env::current_dir()?,
    };

    let mut figment = Figment::new().merge(Serialized::defaults(ExternalsOptions::default()));

    if let Some(path) = config_file(&base, config_path)? {
        tracing::debug!(config = %path.display(), "loading config file");
        figment = figment.merge(Json::file(path));
    }

    figment = figment.merge(
        Env::prefixed(ENV_PREFIX)
            .map(|key| env_key(key.as_str()).into())
            .lowercase(false),
    );

    // Flags last; lists are appended
    figment = figment.admerge(Serialized::defaults(overrides(args)));

    let mut options: ExternalsOptions =
        figment
            .extract()
            .map_err(|e| ConfigError::InvalidValue {
                value: e.to_string(),
                hint: format!("Check {} and {}* variables for wrong field types", CONFIG_FILE, ENV_PREFIX),
            })?;

    if cwd.is_some() || options.cwd.is_none() {
        options.cwd = Some(base);
    }

    Ok(options)
}

fn config_file(base: &Path, explicit: Option<&Path>) -> Result<Option<PathBuf>> {
    match explicit {
        Some(path) if path.is_file() => Ok(Some(path.to_path_buf())),
        Some(path) => Err(ConfigError::NotFound(path.to_path_buf()).into()),
        None => {
            let default_path = base.join(CONFIG_FILE);
            Ok(default_path.is_file().then_some(default_path))
        }
    }
}

/// Option name for an environment variable with the prefix stripped.
///
/// `DEV_DEPS` becomes `devDeps`, `BUILTINS_PREFIX` becomes `builtinsPrefix`.
pub fn env_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut upper = false;

    for ch in key.chars() {
        if ch == '_' {
            upper = !out.is_empty();
        } else if upper {
            out.push(ch.to_ascii_uppercase());
            upper = false;
        } else {
            out.push(ch.to_ascii_lowercase());
        }
    }

    out
}

/// The options set by command-line flags, and only those.
pub fn overrides(args: &OptionArgs) -> Value {
    let mut map = Map::new();

    if args.no_builtins {
        map.insert("builtins".into(), Value::Bool(false));
    }
    if let Some(prefix) = args.builtins_prefix {
        map.insert("builtinsPrefix".into(), Value::String(prefix.as_str().to_string()));
    }
    if !args.package_path.is_empty() {
        let paths = args
            .package_path
            .iter()
            .map(|path| Value::String(path.to_string_lossy().into_owned()))
            .collect();
        map.insert("packagePath".into(), Value::Array(paths));
    }
    if args.no_deps {
        map.insert("deps".into(), Value::Bool(false));
    }
    if args.dev_deps {
        map.insert("devDeps".into(), Value::Bool(true));
    }
    if args.no_peer_deps {
        map.insert("peerDeps".into(), Value::Bool(false));
    }
    if args.no_opt_deps {
        map.insert("optDeps".into(), Value::Bool(false));
    }

    let include = patterns(&args.include, &args.include_regex);
    if !include.is_empty() {
        map.insert("include".into(), Value::Array(include));
    }
    let exclude = patterns(&args.exclude, &args.exclude_regex);
    if !exclude.is_empty() {
        map.insert("exclude".into(), Value::Array(exclude));
    }

    Value::Object(map)
}

fn patterns(literals: &[String], regexes: &[regex::Regex]) -> Vec<Value> {
    literals
        .iter()
        .map(|literal| PatternInput::from(literal.as_str()))
        .chain(regexes.iter().cloned().map(PatternInput::from))
        .map(|pattern| pattern.to_value())
        .collect()
}
