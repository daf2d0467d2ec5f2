//! Environment variable configuration.
//!
//! Every setting the CLI exposes can also be supplied through a `WR_*`
//! environment variable. Invalid values are reported and ignored rather
//! than aborting the run; precedence (CLI > environment > defaults) is
//! applied by the caller.

use std::str::FromStr;

use tracing::warn;

/// Settings read from `WR_*` environment variables.
///
/// `None` means the variable was unset or unparseable.
#[derive(Debug, Clone, Default)]
pub struct EnvConfig {
    /// `WR_WORKERS` - extraction worker count
    pub workers: Option<usize>,
    /// `WR_RPM` - request-rate ceiling per minute
    pub requests_per_minute: Option<u32>,
    /// `WR_VOCAB_URL` - vocabulary source override
    pub vocabulary_url: Option<String>,
    /// `WR_URL_LIST_URL` - article URL list source override
    pub url_list_url: Option<String>,
}

/// Load configuration overrides from the environment.
pub fn load_env_config() -> EnvConfig {
    EnvConfig {
        workers: parse_var("WR_WORKERS"),
        requests_per_minute: parse_var("WR_RPM"),
        vocabulary_url: string_var("WR_VOCAB_URL"),
        url_list_url: string_var("WR_URL_LIST_URL"),
    }
}

fn string_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    let raw = std::env::var(name).ok()?;
    parse_value(name, &raw)
}

fn parse_value<T: FromStr>(name: &str, raw: &str) -> Option<T> {
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(variable = name, value = raw, "ignoring unparseable value");
            None
        }
    }
}
