use fob_externals::BuiltinsPrefix;
use regex::Regex;

/// Parse the `--builtins-prefix` mode.
///
/// Accepts `add`, `strip` and `ignore`, in any case.
pub fn parse_builtins_prefix(s: &str) -> Result<BuiltinsPrefix, String> {
    s.parse()
}

/// Parse and compile a `--include-regex` / `--exclude-regex` value.
///
/// # Errors
///
/// Returns the regex compiler's message for invalid patterns, so clap can
/// reject the argument before anything is read.
pub fn parse_regex(s: &str) -> Result<Regex, String> {
    if s.is_empty() {
        return Err("Regular expression cannot be empty".to_string());
    }
    Regex::new(s).map_err(|e| e.to_string())
}
