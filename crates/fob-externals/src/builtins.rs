//! Registry of Node.js builtin modules.
//!
//! The sets are compiled into the binary, so the registry is process-wide and
//! read-only. Names are stored without the `node:` prefix.

use std::borrow::Cow;

use phf::{Set, phf_set};

use crate::config::BuiltinsPrefix;

/// Namespace prefix of Node.js builtins.
pub const NODE_PREFIX: &str = "node:";

/// Builtins importable both as `name` and `node:name`.
pub static NODE_BUILTINS: Set<&'static str> = phf_set! {
    "_http_agent",
    "_http_client",
    "_http_common",
    "_http_incoming",
    "_http_outgoing",
    "_http_server",
    "_stream_duplex",
    "_stream_passthrough",
    "_stream_readable",
    "_stream_transform",
    "_stream_wrap",
    "_stream_writable",
    "_tls_common",
    "_tls_wrap",
    "assert",
    "assert/strict",
    "async_hooks",
    "buffer",
    "child_process",
    "cluster",
    "console",
    "constants",
    "crypto",
    "dgram",
    "diagnostics_channel",
    "dns",
    "dns/promises",
    "domain",
    "events",
    "fs",
    "fs/promises",
    "http",
    "http2",
    "https",
    "inspector",
    "inspector/promises",
    "module",
    "net",
    "os",
    "path",
    "path/posix",
    "path/win32",
    "perf_hooks",
    "process",
    "punycode",
    "querystring",
    "readline",
    "readline/promises",
    "repl",
    "stream",
    "stream/consumers",
    "stream/promises",
    "stream/web",
    "string_decoder",
    "sys",
    "timers",
    "timers/promises",
    "tls",
    "trace_events",
    "tty",
    "url",
    "util",
    "util/types",
    "v8",
    "vm",
    "wasi",
    "worker_threads",
    "zlib",
};

/// Builtins that only exist in their `node:` form.
pub static PREFIX_ONLY_BUILTINS: Set<&'static str> = phf_set! {
    "quic",
    "sea",
    "sqlite",
    "test",
    "test/reporters",
};

/// Whether `specifier` names a builtin, in whichever form is valid for it.
pub fn is_builtin(specifier: &str) -> bool {
    match specifier.strip_prefix(NODE_PREFIX) {
        Some(name) => NODE_BUILTINS.contains(name) || PREFIX_ONLY_BUILTINS.contains(name),
        None => NODE_BUILTINS.contains(specifier),
    }
}

/// Remove a leading `node:` if present.
pub fn strip_prefix(specifier: &str) -> &str {
    specifier.strip_prefix(NODE_PREFIX).unwrap_or(specifier)
}

/// `node:` form of a builtin name.
pub fn with_prefix(specifier: &str) -> String {
    format!("{}{}", NODE_PREFIX, strip_prefix(specifier))
}

/// Id a builtin should be reported under.
///
/// `strip` keeps the prefix of builtins that have no unprefixed alias.
pub fn normalize_builtin_id(specifier: &str, mode: BuiltinsPrefix) -> Cow<'_, str> {
    match mode {
        BuiltinsPrefix::Ignore => Cow::Borrowed(specifier),
        BuiltinsPrefix::Add => Cow::Owned(with_prefix(specifier)),
        BuiltinsPrefix::Strip => {
            let stripped = strip_prefix(specifier);
            if is_builtin(stripped) {
                Cow::Borrowed(stripped)
            } else {
                Cow::Owned(with_prefix(specifier))
            }
        }
    }
}
