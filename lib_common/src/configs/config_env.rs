//! # Monitor Configuration
//!
//! Builds the monitor's configuration from environment-style key/value
//! injection at process start. The resulting struct is constructed once and
//! passed by reference into the coordinator and its adapters; business logic
//! never reads ambient environment state.
//!
//! Only the upstream API credential is mandatory. Missing notification
//! channel credentials silently disable that channel.

use log::warn;
use std::env;
use std::path::PathBuf;
use thiserror::Error;

/// Default base URL of the 4YouSee signage API.
pub const DEFAULT_API_BASE_URL: &str = "https://api.4yousee.com.br/";
/// Default location of the status snapshot (Cloud Run style ephemeral /tmp).
pub const DEFAULT_STATUS_FILE: &str = "/tmp/player_status.json";
/// Default IANA timezone for the scan timestamp in notifications.
pub const DEFAULT_TIMEZONE: &str = "America/Sao_Paulo";

/// Errors raised while assembling the configuration.
#[derive(Debug, Error, Clone)]
pub enum MonitorConfigError {
    /// A mandatory environment variable is unset or empty.
    #[error("missing environment variable: {0}")]
    MissingEnvVar(String),
}

/// Immutable configuration for one monitor process.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Base URL of the player API.
    pub api_base_url: String,
    /// Secret token for the player API. Mandatory.
    pub api_token: String,
    /// Telegram bot token; the channel needs both token and chat id.
    pub telegram_token: Option<String>,
    /// Telegram destination chat id.
    pub telegram_chat_id: Option<String>,
    /// Discord webhook URL; absence disables the channel.
    pub discord_webhook_url: Option<String>,
    /// Path of the persisted status snapshot.
    pub status_file: PathBuf,
    /// IANA timezone name used for the scan timestamp.
    pub timezone: String,
}

impl MonitorConfig {
    /// Builds the configuration from the process environment.
    pub fn from_env() -> Result<Self, MonitorConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// Empty and whitespace-only values count as unset, matching the empty
    /// string fallbacks the deployment platform injects for absent secrets.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, MonitorConfigError> {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let api_token = get("API_TOKEN")
            .ok_or_else(|| MonitorConfigError::MissingEnvVar("API_TOKEN".to_string()))?;

        let telegram_token = get("TELEGRAM_TOKEN");
        let telegram_chat_id = get("TELEGRAM_CHAT_ID");
        if telegram_token.is_some() != telegram_chat_id.is_some() {
            warn!("TELEGRAM_TOKEN and TELEGRAM_CHAT_ID must both be set; telegram channel disabled");
        }

        Ok(Self {
            api_base_url: get("API_BASE_URL").unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
            api_token,
            telegram_token,
            telegram_chat_id,
            discord_webhook_url: get("DISCORD_WEBHOOK_URL"),
            status_file: PathBuf::from(
                get("STATUS_FILE").unwrap_or_else(|| DEFAULT_STATUS_FILE.to_string()),
            ),
            timezone: get("MONITOR_TIMEZONE").unwrap_or_else(|| DEFAULT_TIMEZONE.to_string()),
        })
    }

    /// True when both telegram credentials are present.
    pub fn telegram_enabled(&self) -> bool {
        self.telegram_token.is_some() && self.telegram_chat_id.is_some()
    }

    /// True when a discord webhook is configured.
    pub fn discord_enabled(&self) -> bool {
        self.discord_webhook_url.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(entries: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn missing_api_token_is_fatal() {
        let result = MonitorConfig::from_lookup(lookup_from(&[]));
        assert!(matches!(
            result,
            Err(MonitorConfigError::MissingEnvVar(ref key)) if key == "API_TOKEN"
        ));
    }

    #[test]
    fn empty_api_token_counts_as_unset() {
        let result = MonitorConfig::from_lookup(lookup_from(&[("API_TOKEN", "   ")]));
        assert!(result.is_err());
    }

    #[test]
    fn defaults_are_applied() {
        let config = MonitorConfig::from_lookup(lookup_from(&[("API_TOKEN", "secret")])).unwrap();
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.status_file, PathBuf::from(DEFAULT_STATUS_FILE));
        assert_eq!(config.timezone, DEFAULT_TIMEZONE);
        assert!(!config.telegram_enabled());
        assert!(!config.discord_enabled());
    }

    #[test]
    fn half_configured_telegram_is_disabled() {
        let config = MonitorConfig::from_lookup(lookup_from(&[
            ("API_TOKEN", "secret"),
            ("TELEGRAM_TOKEN", "bot-token"),
        ]))
        .unwrap();
        assert!(!config.telegram_enabled());
    }

    #[test]
    fn fully_configured_channels_are_enabled() {
        let config = MonitorConfig::from_lookup(lookup_from(&[
            ("API_TOKEN", "secret"),
            ("TELEGRAM_TOKEN", "bot-token"),
            ("TELEGRAM_CHAT_ID", "-100200300"),
            ("DISCORD_WEBHOOK_URL", "https://discord.com/api/webhooks/1/abc"),
        ]))
        .unwrap();
        assert!(config.telegram_enabled());
        assert!(config.discord_enabled());
    }
}
