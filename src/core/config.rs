//! Environment-driven configuration
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use anyhow::{bail, Context, Result};
use std::env;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1/";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_GREETING: &str = "Hello I'm Perso9! Set up a persona and ask me anything.";

#[derive(Clone)]
pub struct Config {
    /// None disables the completion path
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub openai_model: String,
    pub completion_timeout: Duration,
    pub presets_path: String,
    pub bind_address: String,
    pub greeting: String,
    pub session_idle: chrono::Duration,
    pub reap_interval: Duration,
    pub log_level: String,
}

// Manual impl keeps the API key out of debug output
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("openai_api_key", &self.openai_api_key.as_ref().map(|_| "<redacted>"))
            .field("openai_base_url", &self.openai_base_url)
            .field("openai_model", &self.openai_model)
            .field("completion_timeout", &self.completion_timeout)
            .field("presets_path", &self.presets_path)
            .field("bind_address", &self.bind_address)
            .field("greeting", &self.greeting)
            .field("session_idle", &self.session_idle)
            .field("reap_interval", &self.reap_interval)
            .field("log_level", &self.log_level)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            openai_api_key: None,
            openai_base_url: DEFAULT_BASE_URL.to_string(),
            openai_model: DEFAULT_MODEL.to_string(),
            completion_timeout: Duration::from_secs(60),
            presets_path: "presets.json".to_string(),
            bind_address: "127.0.0.1:8501".to_string(),
            greeting: DEFAULT_GREETING.to_string(),
            session_idle: chrono::Duration::minutes(60),
            reap_interval: Duration::from_secs(60),
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the config from any variable source, `from_env` uses the process env
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let openai_api_key = lookup("OPENAI_API_KEY").filter(|key| !key.trim().is_empty());

        let timeout_secs: u64 = parse_var(&lookup, "COMPLETION_TIMEOUT_SECS", 60)?;
        if timeout_secs == 0 {
            bail!("COMPLETION_TIMEOUT_SECS must be at least 1");
        }

        let reap_interval_secs: u64 = parse_var(&lookup, "SESSION_REAP_INTERVAL_SECS", 60)?;
        if reap_interval_secs == 0 {
            bail!("SESSION_REAP_INTERVAL_SECS must be at least 1");
        }

        let idle_minutes: u64 = parse_var(&lookup, "SESSION_IDLE_MINUTES", 60)?;
        if idle_minutes == 0 {
            bail!("SESSION_IDLE_MINUTES must be at least 1");
        }
        let session_idle = i64::try_from(idle_minutes)
            .ok()
            .and_then(chrono::Duration::try_minutes)
            .with_context(|| format!("Invalid value for SESSION_IDLE_MINUTES: '{idle_minutes}' is too large"))?;

        Ok(Config {
            openai_api_key,
            openai_base_url: lookup("OPENAI_BASE_URL").unwrap_or(defaults.openai_base_url),
            openai_model: lookup("OPENAI_MODEL").unwrap_or(defaults.openai_model),
            completion_timeout: Duration::from_secs(timeout_secs),
            presets_path: lookup("PRESETS_PATH").unwrap_or(defaults.presets_path),
            bind_address: lookup("BIND_ADDRESS").unwrap_or(defaults.bind_address),
            greeting: lookup("GREETING").unwrap_or(defaults.greeting),
            session_idle,
            reap_interval: Duration::from_secs(reap_interval_secs),
            log_level: lookup("LOG_LEVEL").unwrap_or(defaults.log_level),
        })
    }

    pub fn completions_enabled(&self) -> bool {
        self.openai_api_key.is_some()
    }
}

/// Read a numeric variable, falling back to `default` when unset
fn parse_var<T, F>(lookup: &F, name: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(name) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Invalid value for {name}: '{raw}'")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(!config.completions_enabled());
        assert_eq!(config.openai_model, "gpt-3.5-turbo");
        assert_eq!(config.completion_timeout, Duration::from_secs(60));
        assert_eq!(config.bind_address, "127.0.0.1:8501");
    }

    #[test]
    fn test_from_lookup_empty_matches_defaults() {
        let config = config_from(&[]).unwrap();
        let defaults = Config::default();
        assert!(config.openai_api_key.is_none());
        assert_eq!(config.completion_timeout, defaults.completion_timeout);
        assert_eq!(config.session_idle, chrono::Duration::minutes(60));
        assert_eq!(config.reap_interval, defaults.reap_interval);
        assert_eq!(config.presets_path, "presets.json");
    }

    #[test]
    fn test_from_lookup_reads_values() {
        let config = config_from(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("OPENAI_MODEL", "gpt-4o"),
            ("COMPLETION_TIMEOUT_SECS", " 15 "),
            ("SESSION_IDLE_MINUTES", "5"),
            ("SESSION_REAP_INTERVAL_SECS", "10"),
            ("GREETING", "Ahoy!"),
        ])
        .unwrap();
        assert!(config.completions_enabled());
        assert_eq!(config.openai_model, "gpt-4o");
        assert_eq!(config.completion_timeout, Duration::from_secs(15));
        assert_eq!(config.session_idle, chrono::Duration::minutes(5));
        assert_eq!(config.reap_interval, Duration::from_secs(10));
        assert_eq!(config.greeting, "Ahoy!");
    }

    #[test]
    fn test_blank_api_key_disables_completions() {
        let config = config_from(&[("OPENAI_API_KEY", "   ")]).unwrap();
        assert!(config.openai_api_key.is_none());
        assert!(!config.completions_enabled());
    }

    #[test]
    fn test_rejects_garbage_number() {
        let err = config_from(&[("COMPLETION_TIMEOUT_SECS", "soon")]).unwrap_err();
        assert!(err.to_string().contains("COMPLETION_TIMEOUT_SECS"));
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let err = config_from(&[("COMPLETION_TIMEOUT_SECS", "0")]).unwrap_err();
        assert!(err.to_string().contains("COMPLETION_TIMEOUT_SECS"));
    }

    #[test]
    fn test_rejects_zero_reap_interval() {
        let err = config_from(&[("SESSION_REAP_INTERVAL_SECS", "0")]).unwrap_err();
        assert!(err.to_string().contains("SESSION_REAP_INTERVAL_SECS"));
    }

    #[test]
    fn test_rejects_zero_idle_minutes() {
        let err = config_from(&[("SESSION_IDLE_MINUTES", "0")]).unwrap_err();
        assert!(err.to_string().contains("SESSION_IDLE_MINUTES"));
    }

    #[test]
    fn test_rejects_negative_idle_minutes() {
        let err = config_from(&[("SESSION_IDLE_MINUTES", "-5")]).unwrap_err();
        assert!(err.to_string().contains("SESSION_IDLE_MINUTES"));
    }

    #[test]
    fn test_rejects_huge_idle_minutes_without_panic() {
        let err = config_from(&[("SESSION_IDLE_MINUTES", "9223372036854775807")]).unwrap_err();
        assert!(err.to_string().contains("SESSION_IDLE_MINUTES"));

        let err = config_from(&[("SESSION_IDLE_MINUTES", "18446744073709551615")]).unwrap_err();
        assert!(err.to_string().contains("SESSION_IDLE_MINUTES"));
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = Config {
            openai_api_key: Some("sk-secret".to_string()),
            ..Config::default()
        };
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("sk-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
