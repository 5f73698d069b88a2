#[cfg(test)]
mod tests {
    use crate::cli::validation::{parse_builtins_prefix, parse_regex};
    use crate::cli::{Cli, Command};
    use clap::Parser;
    use fob_externals::BuiltinsPrefix;
    use std::path::PathBuf;

    #[test]
    fn test_parse_builtins_prefix() {
        assert_eq!(parse_builtins_prefix("add"), Ok(BuiltinsPrefix::Add));
        assert_eq!(parse_builtins_prefix("Strip"), Ok(BuiltinsPrefix::Strip));
        assert_eq!(parse_builtins_prefix("IGNORE"), Ok(BuiltinsPrefix::Ignore));
        assert!(parse_builtins_prefix("drop").is_err());
    }

    #[test]
    fn test_parse_regex() {
        assert!(parse_regex("^@scope/").is_ok());
        assert!(parse_regex("(unclosed").is_err());
        assert_eq!(
            parse_regex("").unwrap_err(),
            "Regular expression cannot be empty"
        );
    }

    #[test]
    fn test_check_requires_specifier() {
        assert!(Cli::try_parse_from(["fob-externals", "check"]).is_err());
    }

    #[test]
    fn test_check_with_options() {
        let cli = Cli::try_parse_from([
            "fob-externals",
            "check",
            "react",
            "node:fs",
            "--dev-deps",
            "--no-peer-deps",
            "--builtins-prefix",
            "strip",
            "--include",
            "a",
            "--include",
            "b",
            "--exclude-regex",
            "^@internal/",
        ])
        .unwrap();

        let Command::Check(args) = cli.command else {
            panic!("expected check command");
        };
        assert_eq!(args.specifiers, vec!["react", "node:fs"]);
        assert!(args.options.dev_deps);
        assert!(args.options.no_peer_deps);
        assert!(!args.options.no_deps);
        assert_eq!(args.options.builtins_prefix, Some(BuiltinsPrefix::Strip));
        assert_eq!(args.options.include, vec!["a", "b"]);
        assert_eq!(args.options.exclude_regex[0].as_str(), "^@internal/");
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "fob-externals",
            "deps",
            "--cwd",
            "packages/app",
            "--no-color",
            "--config",
            "custom.json",
        ])
        .unwrap();

        assert!(matches!(cli.command, Command::Deps(_)));
        assert!(cli.no_color);
        assert_eq!(cli.cwd, Some(PathBuf::from("packages/app")));
        assert_eq!(cli.config, Some(PathBuf::from("custom.json")));
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(Cli::try_parse_from(["fob-externals", "-v", "-q", "deps"]).is_err());
    }

    #[test]
    fn test_invalid_regex_is_rejected() {
        assert!(
            Cli::try_parse_from(["fob-externals", "check", "x", "--include-regex", "("]).is_err()
        );
    }
}
