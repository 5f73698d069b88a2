//! Miette diagnostic conversion for CLI errors.

use crate::error::CliError;
use fob_externals::ExternalsError;
use miette::Report;

/// Convert CliError to miette Report
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Externals(e) => externals_error_to_miette(e),
        _ => miette::miette!("{}", err),
    }
}

/// Convert ExternalsError to miette Report
pub fn externals_error_to_miette(err: ExternalsError) -> Report {
    match &err {
        ExternalsError::ManifestRead { .. } => miette::miette!(
            help = "Check --package-path, the packagePath option and --cwd",
            "{}",
            err
        ),
        ExternalsError::ManifestParse { source, .. } => miette::miette!(
            help = "package.json must be a JSON object; check it with a JSON validator",
            "{}\n{}",
            err,
            source
        ),
        ExternalsError::DirectoryRead { .. } => miette::miette!(
            help = "Pass --package-path to skip the package.json search",
            "{}",
            err
        ),
        _ => miette::miette!("{}", err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_parse_error_includes_json_location() {
        let source = serde_json::from_str::<serde_json::Value>("{\n  \"name\": ").unwrap_err();
        let report = externals_error_to_miette(ExternalsError::ManifestParse {
            path: PathBuf::from("package.json"),
            source,
        });
        let message = report.to_string();
        assert!(message.contains("does not look like a valid package.json"));
        assert!(message.contains("line 2"));
    }

    #[test]
    fn test_other_errors_keep_their_message() {
        let err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let report = cli_error_to_miette(CliError::Io(err));
        assert_eq!(report.to_string(), "I/O error: denied");
    }
}
