// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! CLI configuration loaded from environment variables.

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// CLI configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// `tracing` filter directives.
    pub log_filter: String,
    pub log_format: LogFormat,
    /// Pretty-print the JSON report.
    pub pretty_output: bool,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            log_filter: lookup("RUST_LOG").unwrap_or_else(|| "info,interior_layout=debug".into()),
            log_format: match lookup("LOG_FORMAT").as_deref().map(str::trim) {
                Some(f) if f.eq_ignore_ascii_case("json") => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
            pretty_output: lookup("OUTPUT_PRETTY").map_or(true, |v| !is_off(&v)),
        }
    }
}

/// `0`, `false`, `no` and `off`, in any case.
fn is_off(value: &str) -> bool {
    let value = value.trim();
    ["0", "false", "no", "off"]
        .iter()
        .any(|off| value.eq_ignore_ascii_case(off))
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
