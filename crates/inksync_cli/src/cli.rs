//! Command-line and environment configuration.

use clap::Parser;
use inksync_core::suggestion::{DEFAULT_API_BASE_URL, DEFAULT_MODEL};
use inksync_core::AppConfig;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "inksync", version, about = "InkSync writing studio in your terminal")]
pub struct Args {
    /// Credential for the suggestion service.
    #[arg(long, env = "API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Generative model used for suggestions.
    #[arg(long, env = "INKSYNC_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Base URL of the suggestion service.
    #[arg(long, env = "INKSYNC_API_BASE", default_value = DEFAULT_API_BASE_URL)]
    pub api_base: String,

    /// SQLite file holding the document collection.
    #[arg(long, env = "INKSYNC_DB")]
    pub db: Option<PathBuf>,

    /// Absolute directory for rolling log files.
    #[arg(long, env = "INKSYNC_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error
    #[arg(long, env = "INKSYNC_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Skip the welcome splash.
    #[arg(long)]
    pub no_splash: bool,
}

impl Args {
    pub fn into_config(self) -> AppConfig {
        let defaults = AppConfig::default();
        AppConfig {
            api_key: self.api_key.filter(|key| !key.trim().is_empty()),
            model: self.model,
            api_base_url: self.api_base,
            db_path: self.db.unwrap_or(defaults.db_path),
            log_dir: self.log_dir.unwrap_or(defaults.log_dir),
            log_level: self.log_level.unwrap_or(defaults.log_level),
            splash_delay_ms: if self.no_splash {
                0
            } else {
                defaults.splash_delay_ms
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Args;
    use clap::Parser;

    #[test]
    fn no_splash_zeroes_delay_and_blank_key_is_dropped() {
        let args = Args::try_parse_from([
            "inksync",
            "--no-splash",
            "--api-key",
            "  ",
            "--db",
            "/tmp/ink.sqlite3",
        ])
        .unwrap();
        let config = args.into_config();
        assert_eq!(config.splash_delay_ms, 0);
        assert!(config.api_key.is_none());
        assert_eq!(config.db_path.to_str(), Some("/tmp/ink.sqlite3"));
    }
}
