//! Client configuration structures and loaders.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use runtime::config::APP_NAME;

/// Settings that only concern the terminal client.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub log_dir: PathBuf,
    /// Mirror log output to stderr in addition to the log file.
    pub log_to_stderr: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            log_dir: default_log_dir(),
            log_to_stderr: false,
        }
    }
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `WARGAME_LOG_DIR` - Log directory (default: platform cache dir + `logs`)
    /// - `WARGAME_LOG_STDERR` - Also log to stderr (default: false)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(dir) = read_env::<PathBuf>("WARGAME_LOG_DIR") {
            config.log_dir = dir;
        }
        if let Some(enabled) = read_env_bool("WARGAME_LOG_STDERR") {
            config.log_to_stderr = enabled;
        }

        config
    }
}

/// Platform cache directory joined with `logs`, or `./logs` when no home
/// directory can be resolved.
pub fn default_log_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", APP_NAME)
        .map(|dirs| dirs.cache_dir().join("logs"))
        .unwrap_or_else(|| PathBuf::from("./logs"))
}

fn read_env<T: FromStr>(key: &str) -> Option<T> {
    env::var(key)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .and_then(|value| value.trim().parse().ok())
}

fn read_env_bool(key: &str) -> Option<bool> {
    env::var(key).ok().and_then(|value| parse_bool(&value))
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_common_boolean_spellings() {
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool(" on "), Some(true));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }

    #[test]
    fn default_log_dir_is_named_logs() {
        assert!(default_log_dir().ends_with("logs"));
    }
}
