//! Runtime configuration for the InkSync shell.
//!
//! Values come from the command line or environment (see the CLI crate);
//! this module owns the defaults and the wiring into core components.

use crate::logging::default_log_level;
use crate::suggestion::{GeminiBackend, SuggestionClient, DEFAULT_API_BASE_URL, DEFAULT_MODEL};
use std::path::PathBuf;
use std::time::Duration;

/// Splash delay before the workspace is shown.
pub const SPLASH_DELAY_MS: u64 = 1200;
const DEFAULT_DB_FILE_NAME: &str = "inksync.sqlite3";
const DEFAULT_LOG_DIR_NAME: &str = "inksync-logs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Credential for the suggestion service; absence is not validated.
    pub api_key: Option<String>,
    pub model: String,
    pub api_base_url: String,
    pub db_path: PathBuf,
    /// Absolute directory for rolling log files.
    pub log_dir: PathBuf,
    pub log_level: String,
    pub splash_delay_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            db_path: PathBuf::from(DEFAULT_DB_FILE_NAME),
            log_dir: std::env::temp_dir().join(DEFAULT_LOG_DIR_NAME),
            log_level: default_log_level().to_string(),
            splash_delay_ms: SPLASH_DELAY_MS,
        }
    }
}

impl AppConfig {
    pub fn splash_delay(&self) -> Duration {
        Duration::from_millis(self.splash_delay_ms)
    }

    /// Builds the suggestion client for the configured service.
    pub fn suggestion_client(&self) -> SuggestionClient<GeminiBackend> {
        SuggestionClient::new(GeminiBackend::with_endpoint(
            self.api_key.clone(),
            self.model.as_str(),
            self.api_base_url.as_str(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::{AppConfig, SPLASH_DELAY_MS};
    use crate::suggestion::DEFAULT_MODEL;

    #[test]
    fn defaults_match_shell_expectations() {
        let config = AppConfig::default();
        assert!(config.api_key.is_none());
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.splash_delay().as_millis(), u128::from(SPLASH_DELAY_MS));
        assert!(config.log_dir.is_absolute());
    }

    #[test]
    fn suggestion_client_targets_configured_model() {
        let config = AppConfig {
            model: "custom-model".to_string(),
            api_base_url: "http://127.0.0.1:9".to_string(),
            ..AppConfig::default()
        };
        let client = config.suggestion_client();
        assert_eq!(
            client.backend().endpoint(),
            "http://127.0.0.1:9/v1beta/models/custom-model:generateContent"
        );
    }
}
