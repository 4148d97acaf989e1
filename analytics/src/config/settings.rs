// Analytics settings, loaded from a JSON config file or built from defaults + environment
use client::ClientSettings;
use serde::Deserialize;
use shared::models::HistoryPeriod;
use std::path::Path;

use crate::error::{AnalyticsError, Result};

/// Environment variable pointing at an optional JSON settings file.
pub const CONFIG_PATH_ENV: &str = "DASHBOARD_CONFIG";

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct AnalyticsSettings {
    pub client: ClientSettings,
    pub history_period: String,
    pub sma_period: usize,
    pub ema_period: usize,
    pub rsi_period: usize,
    pub bollinger_period: usize,
    pub bollinger_std_dev: f64,
    pub risk_free_rate: f64,
    pub periods_per_year: u32,
}

impl Default for AnalyticsSettings {
    fn default() -> Self {
        AnalyticsSettings {
            client: ClientSettings::default(),
            history_period: "1y".to_string(),
            sma_period: 20,
            ema_period: 20,
            rsi_period: 14,
            bollinger_period: 20,
            bollinger_std_dev: 2.0,
            risk_free_rate: 0.0,
            periods_per_year: 252,
        }
    }
}

impl AnalyticsSettings {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let settings: AnalyticsSettings = serde_json::from_str(&raw)
            .map_err(|e| AnalyticsError::ConfigError(format!("invalid settings file: {}", e)))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Uses the file named by `DASHBOARD_CONFIG` when set, otherwise defaults
    /// with the client base URL taken from the environment.
    pub fn load() -> Result<Self> {
        match std::env::var_os(CONFIG_PATH_ENV) {
            Some(path) => {
                tracing::info!(path = ?path, "Loading analytics settings from file");
                Self::from_file(path)
            }
            None => {
                let settings = AnalyticsSettings {
                    client: ClientSettings::from_env(),
                    ..AnalyticsSettings::default()
                };
                settings.validate()?;
                Ok(settings)
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.client.validate()?;
        self.period()?;
        let periods = [
            ("sma_period", self.sma_period),
            ("ema_period", self.ema_period),
            ("rsi_period", self.rsi_period),
            ("bollinger_period", self.bollinger_period),
        ];
        for (name, value) in periods {
            if value == 0 {
                return Err(AnalyticsError::ConfigError(format!("{} must be greater than 0", name)));
            }
        }
        Ok(())
    }

    pub fn period(&self) -> Result<HistoryPeriod> {
        HistoryPeriod::from_query(&self.history_period).ok_or_else(|| {
            AnalyticsError::ConfigError(format!("unknown history period '{}'", self.history_period))
        })
    }
}
