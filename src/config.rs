// src/config.rs
//
// Client configuration, read from the environment

use std::env;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{AppError, AppResult};

pub const DEFAULT_API_URL: &str = "http://localhost:5000";
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 2000;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend base URL, without a trailing slash
    pub api_base_url: String,
    /// Parent directory of the session database
    pub data_dir: PathBuf,
    /// Profile refresh interval while the profile is still loading
    pub poll_interval_ms: u64,
    pub request_timeout_secs: u64,
}

impl ClientConfig {
    /// Load from `JOBBOARD_*` variables, falling back to defaults
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load through an arbitrary lookup, so tests don't touch the process environment
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_dir = match lookup("JOBBOARD_DATA_DIR") {
            Some(dir) => PathBuf::from(dir),
            None => dirs::data_dir().ok_or_else(|| {
                AppError::Config("Could not determine app data directory".to_string())
            })?,
        };

        Ok(Self {
            api_base_url: trim_base_url(&load(&lookup, "JOBBOARD_API_URL", DEFAULT_API_URL.to_string())?),
            data_dir,
            poll_interval_ms: load(&lookup, "JOBBOARD_POLL_INTERVAL_MS", DEFAULT_POLL_INTERVAL_MS)?,
            request_timeout_secs: load(
                &lookup,
                "JOBBOARD_REQUEST_TIMEOUT_SECS",
                DEFAULT_REQUEST_TIMEOUT_SECS,
            )?,
        })
    }

    /// Defaults pointing at `data_dir`
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            data_dir: data_dir.into(),
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn load<F, T>(lookup: &F, key: &str, default: T) -> AppResult<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Display,
    T::Err: Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::Config(format!("Invalid {key} value {raw:?}: {e}"))),
        None => {
            log::info!("{key} not set, using default: {default}");
            Ok(default)
        }
    }
}

fn trim_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
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
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::from_lookup(lookup_from(&[("JOBBOARD_DATA_DIR", "/tmp/jb")])).unwrap();

        assert_eq!(config.api_base_url, DEFAULT_API_URL);
        assert_eq!(config.data_dir, PathBuf::from("/tmp/jb"));
        assert_eq!(config.poll_interval(), Duration::from_millis(2000));
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_overrides_and_trailing_slash() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            ("JOBBOARD_DATA_DIR", "/tmp/jb"),
            ("JOBBOARD_API_URL", "https://api.example.com/"),
            ("JOBBOARD_POLL_INTERVAL_MS", "500"),
        ]))
        .unwrap();

        assert_eq!(config.api_base_url, "https://api.example.com");
        assert_eq!(config.poll_interval_ms, 500);
    }

    #[test]
    fn test_invalid_number_is_config_error() {
        let result = ClientConfig::from_lookup(lookup_from(&[
            ("JOBBOARD_DATA_DIR", "/tmp/jb"),
            ("JOBBOARD_REQUEST_TIMEOUT_SECS", "soon"),
        ]));

        assert!(matches!(result, Err(AppError::Config(_))));
    }
}
