// API client settings, loaded from a JSON file or the environment
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::error::ClientError;

/// Environment variable holding the backend base URL.
pub const API_URL_ENV: &str = "DASHBOARD_API_URL";

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ClientSettings {
    pub base_url: String,
    pub cache_ttl_secs: u64,
    pub cache_capacity: usize,
    pub request_timeout_ms: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        ClientSettings {
            base_url: "http://localhost:8000".to_string(),
            cache_ttl_secs: 60,
            cache_capacity: 100,
            request_timeout_ms: 10_000,
        }
    }
}

impl ClientSettings {
    /// Reads settings from a JSON file. Missing keys keep their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ClientError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| ClientError::Config(format!("cannot read {}: {}", path.display(), e)))?;
        let settings: ClientSettings = serde_json::from_str(&raw)
            .map_err(|e| ClientError::Config(format!("invalid settings in {}: {}", path.display(), e)))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Defaults, with the base URL taken from `DASHBOARD_API_URL` when set.
    pub fn from_env() -> Self {
        let settings = ClientSettings::default();
        match std::env::var(API_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => settings.with_base_url(url),
            _ => settings,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn validate(&self) -> Result<(), ClientError> {
        if self.base_url.trim().is_empty() {
            return Err(ClientError::Config("base_url must not be empty".to_string()));
        }
        if self.request_timeout_ms == 0 {
            return Err(ClientError::Config("request_timeout_ms must be greater than 0".to_string()));
        }
        Ok(())
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_documented_limits() {
        let settings = ClientSettings::default();
        assert_eq!(settings.cache_ttl(), Duration::from_secs(60));
        assert_eq!(settings.cache_capacity, 100);
        assert_eq!(settings.request_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"base_url": "https://api.example.com", "request_timeout_ms": 2500}}"#).unwrap();

        let settings = ClientSettings::from_file(file.path()).unwrap();
        assert_eq!(settings.base_url, "https://api.example.com");
        assert_eq!(settings.request_timeout(), Duration::from_millis(2500));
        assert_eq!(settings.cache_capacity, 100);
    }

    #[test]
    fn malformed_file_is_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let err = ClientSettings::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));
    }

    #[test]
    fn zero_timeout_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"request_timeout_ms": 0}}"#).unwrap();
        assert!(ClientSettings::from_file(file.path()).is_err());
    }

    // Only test in this crate that touches the process environment.
    #[test]
    fn base_url_from_environment() {
        std::env::set_var(API_URL_ENV, "https://env.example.com");
        let from_var = ClientSettings::from_env();
        std::env::set_var(API_URL_ENV, "   ");
        let blank_var = ClientSettings::from_env();
        std::env::remove_var(API_URL_ENV);
        let unset = ClientSettings::from_env();

        assert_eq!(from_var.base_url, "https://env.example.com");
        assert_eq!(from_var.request_timeout(), Duration::from_secs(10));
        assert_eq!(blank_var, ClientSettings::default());
        assert_eq!(unset, ClientSettings::default());
    }

    #[test]
    fn missing_file_is_config_error() {
        let err = ClientSettings::from_file("/definitely/not/here.json").unwrap_err();
        assert!(err.to_string().starts_with("Configuration error: cannot read"));
    }
}
