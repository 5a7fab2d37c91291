//! Client configuration.
//!
//! Values come from the process environment, optionally seeded from
//! `.env.local` / `.env` in the working directory.

use std::time::Duration;

use url::Url;

/// Default engine base URL.
pub const DEFAULT_API_URL: &str = "https://llm-adventure.de.r.appspot.com";

/// Narrative generation on the engine can take minutes.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// How long the "please log in again" notification stays up before sign-out.
pub const DEFAULT_SIGN_OUT_DELAY: Duration = Duration::from_secs(2);

/// Automatic new-game recoveries allowed per `load_game`.
pub const DEFAULT_MAX_INFO_RETRIES: u8 = 1;

/// Engine endpoints, relative to the base URL.
pub mod endpoints {
    pub const NEW_GAME: &str = "/newgame";
    pub const LOAD_GAME: &str = "/loadgame";
    pub const LOAD_INFO: &str = "/loadinfo";
    pub const SELECT_CHOICE: &str = "/selectchoice";
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid API URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },

    #[error("Unsupported API URL scheme '{0}' (expected http or https)")]
    UnsupportedScheme(String),
}

/// Transport settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL without a trailing slash
    pub base_url: String,
    pub timeout: Duration,
}

impl ApiConfig {
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        let trimmed = base_url.trim().trim_end_matches('/');
        let parsed = Url::parse(trimmed).map_err(|e| ConfigError::InvalidUrl {
            url: base_url.to_string(),
            message: e.to_string(),
        })?;
        match parsed.scheme() {
            "http" | "https" => {}
            other => return Err(ConfigError::UnsupportedScheme(other.to_string())),
        }

        Ok(Self {
            base_url: trimmed.to_string(),
            timeout: DEFAULT_TIMEOUT,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Create config from environment variables.
    ///
    /// Uses `UDH_API_URL` (or `NEXT_PUBLIC_API_URL`) and `UDH_API_TIMEOUT_SECS`,
    /// falling back to defaults if not set.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let base_url = first_set(&lookup, &["UDH_API_URL", "NEXT_PUBLIC_API_URL"])
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let timeout = parse_duration(&lookup, "UDH_API_TIMEOUT_SECS", Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT);

        Ok(Self::new(&base_url)?.with_timeout(timeout))
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Session coordinator settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoordinatorConfig {
    pub sign_out_delay: Duration,
    pub max_info_retries: u8,
}

impl CoordinatorConfig {
    pub fn with_sign_out_delay(mut self, delay: Duration) -> Self {
        self.sign_out_delay = delay;
        self
    }

    /// Reads `UDH_SIGN_OUT_DELAY_MS`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let sign_out_delay = parse_duration(&lookup, "UDH_SIGN_OUT_DELAY_MS", Duration::from_millis)
            .unwrap_or(DEFAULT_SIGN_OUT_DELAY);
        Self {
            sign_out_delay,
            ..Self::default()
        }
    }
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            sign_out_delay: DEFAULT_SIGN_OUT_DELAY,
            max_info_retries: DEFAULT_MAX_INFO_RETRIES,
        }
    }
}

/// Load `.env.local` then `.env` from the working directory, if present.
/// Variables already set in the environment are not overridden.
pub fn load_dotenv() {
    for filename in [".env.local", ".env"] {
        let path = std::path::Path::new(filename);
        if path.exists() {
            if let Err(e) = dotenvy::from_path(path) {
                tracing::warn!(file = filename, error = %e, "Failed to load env file");
            }
        }
    }
}

fn first_set(lookup: &impl Fn(&str) -> Option<String>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| lookup(key))
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
}

fn parse_duration(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    unit: fn(u64) -> Duration,
) -> Option<Duration> {
    let raw = first_set(lookup, &[key])?;
    match raw.parse::<u64>() {
        Ok(value) => Some(unit(value)),
        Err(e) => {
            tracing::warn!(key, value = %raw, error = %e, "Ignoring invalid duration, using default");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_environment_is_empty() {
        let config = ApiConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.base_url, DEFAULT_API_URL);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let config = ApiConfig::new("http://localhost:8080/").unwrap();
        assert_eq!(config.base_url, "http://localhost:8080");
    }

    #[test]
    fn primary_variable_wins_over_legacy() {
        let config = ApiConfig::from_lookup(lookup_from(&[
            ("UDH_API_URL", "http://engine.local"),
            ("NEXT_PUBLIC_API_URL", "http://legacy.local"),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "http://engine.local");
    }

    #[test]
    fn legacy_variable_is_honoured() {
        let config =
            ApiConfig::from_lookup(lookup_from(&[("NEXT_PUBLIC_API_URL", "http://legacy.local")]))
                .unwrap();
        assert_eq!(config.base_url, "http://legacy.local");
    }

    #[test]
    fn invalid_timeout_falls_back_to_default() {
        let config =
            ApiConfig::from_lookup(lookup_from(&[("UDH_API_TIMEOUT_SECS", "soon")])).unwrap();
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);

        let config =
            ApiConfig::from_lookup(lookup_from(&[("UDH_API_TIMEOUT_SECS", "30")])).unwrap();
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn rejects_non_http_scheme() {
        let err = ApiConfig::new("ftp://engine.local").unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedScheme(s) if s == "ftp"));
    }

    #[test]
    fn rejects_garbage_url() {
        assert!(matches!(
            ApiConfig::new("not a url"),
            Err(ConfigError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn coordinator_reads_sign_out_delay() {
        let config = CoordinatorConfig::from_lookup(lookup_from(&[("UDH_SIGN_OUT_DELAY_MS", "50")]));
        assert_eq!(config.sign_out_delay, Duration::from_millis(50));
        assert_eq!(config.max_info_retries, 1);
    }
}
