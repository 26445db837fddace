//! Runtime configuration with defaults and environment overrides.
//!
//! Precedence, lowest to highest: [`Config::default`], environment variables
//! ([`Config::from_env`]), then whatever the binary applies from its command
//! line via the `with_*` builders.
//!
//! | Variable | Field |
//! |----------|-------|
//! | `GEMINI_API_KEY` (or `API_KEY`) | `api_key` |
//! | `PROMPTSMITH_MODEL` | `model` |
//! | `PROMPTSMITH_API_BASE` | `api_base` |
//! | `PROMPTSMITH_DATA_DIR` | `data_dir` |

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_TOP_P: f32 = 0.95;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("no API key configured (set GEMINI_API_KEY or pass --api-key)")]
    MissingApiKey,
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Generation API key. Only required for commands that call the API.
    pub api_key: Option<String>,
    /// Model identifier. Default: `"gemini-2.5-flash"`.
    pub model: String,
    /// API base URL, without trailing slash.
    pub api_base: String,
    /// Sampling temperature. Default: `0.7`.
    pub temperature: f32,
    /// Nucleus sampling. Default: `0.95`.
    pub top_p: f32,
    /// Whole-request timeout. Default: 120 s.
    pub timeout: Duration,
    /// Directory holding the persisted history.
    pub data_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            top_p: DEFAULT_TOP_P,
            timeout: DEFAULT_TIMEOUT,
            data_dir: default_data_dir(),
        }
    }
}

impl Config {
    /// Defaults overlaid with the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Defaults overlaid with values from `lookup`. Empty values are ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();
        if let Some(key) = get("GEMINI_API_KEY").or_else(|| get("API_KEY")) {
            config.api_key = Some(key);
        }
        if let Some(model) = get("PROMPTSMITH_MODEL") {
            config.model = model;
        }
        if let Some(base) = get("PROMPTSMITH_API_BASE") {
            config = config.with_api_base(base);
        }
        if let Some(dir) = get("PROMPTSMITH_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        config
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The API key, or [`ConfigError::MissingApiKey`].
    pub fn require_api_key(&self) -> Result<&str, ConfigError> {
        self.api_key.as_deref().ok_or(ConfigError::MissingApiKey)
    }
}

/// Platform data directory (e.g. `~/.local/share/promptsmith`), or
/// `./.promptsmith` when no home directory can be determined.
pub fn default_data_dir() -> PathBuf {
    directories::ProjectDirs::from("rs", "promptsmith", "promptsmith")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".promptsmith"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn defaults_match_generation_settings() {
        let config = Config::default();
        assert_eq!(config.model, "gemini-2.5-flash");
        assert!((config.temperature - 0.7).abs() < f32::EPSILON);
        assert!((config.top_p - 0.95).abs() < f32::EPSILON);
        assert_eq!(config.timeout, Duration::from_secs(120));
        assert!(config.api_key.is_none());
    }

    #[test]
    fn env_overrides_defaults() {
        let config = Config::from_lookup(lookup(&[
            ("GEMINI_API_KEY", "k1"),
            ("PROMPTSMITH_MODEL", "gemini-2.5-pro"),
            ("PROMPTSMITH_API_BASE", "http://localhost:9999/v1/"),
            ("PROMPTSMITH_DATA_DIR", "/tmp/ps"),
        ]));
        assert_eq!(config.api_key.as_deref(), Some("k1"));
        assert_eq!(config.model, "gemini-2.5-pro");
        assert_eq!(config.api_base, "http://localhost:9999/v1");
        assert_eq!(config.data_dir, PathBuf::from("/tmp/ps"));
    }

    #[test]
    fn api_key_falls_back_to_generic_name() {
        let config = Config::from_lookup(lookup(&[("API_KEY", "k2")]));
        assert_eq!(config.require_api_key().unwrap(), "k2");

        let both = Config::from_lookup(lookup(&[("API_KEY", "k2"), ("GEMINI_API_KEY", "k1")]));
        assert_eq!(both.require_api_key().unwrap(), "k1");
    }

    #[test]
    fn blank_values_ignored() {
        let config = Config::from_lookup(lookup(&[("GEMINI_API_KEY", "  "), ("PROMPTSMITH_MODEL", "")]));
        assert!(matches!(config.require_api_key(), Err(ConfigError::MissingApiKey)));
        assert_eq!(config.model, DEFAULT_MODEL);
    }

    #[test]
    fn builders_override_env() {
        let config = Config::from_lookup(lookup(&[("PROMPTSMITH_MODEL", "from-env")]))
            .with_model("from-flag")
            .with_api_key("flag-key");
        assert_eq!(config.model, "from-flag");
        assert_eq!(config.api_key.as_deref(), Some("flag-key"));
    }
}
