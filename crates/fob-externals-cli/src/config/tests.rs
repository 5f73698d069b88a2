#[cfg(test)]
mod tests {
    use crate::cli::OptionArgs;
    use crate::config::{CONFIG_FILE, env_key, load_options, overrides};
    use crate::error::{CliError, ConfigError};
    use fob_externals::{BuiltinsPrefix, PatternInput};
    use serde_json::json;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_env_key_camel_cases() {
        assert_eq!(env_key("DEV_DEPS"), "devDeps");
        assert_eq!(env_key("BUILTINS_PREFIX"), "builtinsPrefix");
        assert_eq!(env_key("BUILTINS"), "builtins");
        assert_eq!(env_key("PACKAGE_PATH"), "packagePath");
    }

    #[test]
    fn test_overrides_only_contain_set_flags() {
        assert_eq!(overrides(&OptionArgs::default()), json!({}));

        let args = OptionArgs {
            no_builtins: true,
            dev_deps: true,
            builtins_prefix: Some(BuiltinsPrefix::Ignore),
            include: vec!["a".to_string()],
            include_regex: vec![regex::Regex::new("^b").unwrap()],
            ..Default::default()
        };
        assert_eq!(
            overrides(&args),
            json!({
                "builtins": false,
                "builtinsPrefix": "ignore",
                "devDeps": true,
                "include": ["a", { "regex": "^b" }]
            })
        );
    }

    #[test]
    fn test_defaults_without_config_file() {
        let dir = TempDir::new().unwrap();
        let options = load_options(Some(dir.path()), None, &OptionArgs::default()).unwrap();

        assert!(options.builtins);
        assert!(options.deps);
        assert!(!options.dev_deps);
        assert_eq!(options.cwd.as_deref(), Some(dir.path()));
    }

    #[test]
    fn test_config_file_in_cwd_is_picked_up() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            json!({
                "builtinsPrefix": "strip",
                "devDeps": true,
                "include": ["from-file", 42]
            })
            .to_string(),
        )
        .unwrap();

        let options = load_options(Some(dir.path()), None, &OptionArgs::default()).unwrap();

        assert_eq!(options.builtins_prefix, BuiltinsPrefix::Strip);
        assert!(options.dev_deps);
        assert_eq!(options.include.len(), 2);
        assert_eq!(options.include[0], PatternInput::from("from-file"));
        assert!(matches!(options.include[1], PatternInput::Invalid(_)));
    }

    #[test]
    fn test_flags_override_and_append() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            json!({ "devDeps": true, "exclude": ["from-file"] }).to_string(),
        )
        .unwrap();

        let args = OptionArgs {
            no_deps: true,
            exclude: vec!["from-flag".to_string()],
            ..Default::default()
        };
        let options = load_options(Some(dir.path()), None, &args).unwrap();

        assert!(!options.deps);
        assert!(options.dev_deps);
        assert_eq!(
            options.exclude,
            vec![PatternInput::from("from-file"), PatternInput::from("from-flag")]
        );
    }

    #[test]
    fn test_missing_explicit_config_is_an_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.json");

        let err = load_options(Some(dir.path()), Some(&missing), &OptionArgs::default()).unwrap_err();
        assert!(matches!(err, CliError::Config(ConfigError::NotFound(path)) if path == missing));
    }

    #[test]
    fn test_wrong_field_type_is_reported() {
        let dir = TempDir::new().unwrap();
        let config = dir.path().join("custom.json");
        fs::write(&config, json!({ "deps": "sometimes" }).to_string()).unwrap();

        let err = load_options(Some(dir.path()), Some(&config), &OptionArgs::default()).unwrap_err();
        assert!(matches!(err, CliError::Config(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_cwd_from_config_file_is_kept_without_flag() {
        let dir = TempDir::new().unwrap();
        let config = dir.path().join("custom.json");
        fs::write(&config, json!({ "cwd": "/srv/app" }).to_string()).unwrap();

        let options = load_options(None, Some(&config), &OptionArgs::default()).unwrap();
        assert_eq!(options.cwd, Some(PathBuf::from("/srv/app")));
    }

    #[test]
    fn test_cwd_with_parent_segments_is_normalized() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("a")).unwrap();
        fs::create_dir_all(dir.path().join("b")).unwrap();
        fs::write(dir.path().join("b").join(CONFIG_FILE), json!({ "devDeps": true }).to_string())
            .unwrap();

        let cwd = dir.path().join("a").join("..").join("b");
        let options = load_options(Some(&cwd), None, &OptionArgs::default()).unwrap();

        assert_eq!(options.cwd, Some(dir.path().join("b")));
        assert!(options.dev_deps);
    }
}
