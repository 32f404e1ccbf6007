//! Service configuration
//!
//! Read from a TOML file (`ADS_NAVIGATOR_CONFIG`, default `config.toml`);
//! every field has a default, and a few environment variables override the
//! file.

use std::path::{Path, PathBuf};

use ads_navigator_provider::GoogleAdsConfig;
use ads_navigator_provider::utils::log_sanitizer::redact_secret;
use anyhow::Context;
use serde::Deserialize;

const CONFIG_PATH_ENV: &str = "ADS_NAVIGATOR_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub log: LogConfig,
    pub google_ads: GoogleAdsConfig,
    pub session: SessionConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Worker threads; the CPU count when unset.
    pub workers: Option<usize>,
    /// Hides internal error details from responses.
    pub production: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            workers: None,
            production: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `EnvFilter` directive; `RUST_LOG` wins when set.
    pub level: String,
    pub format: LogFormat,
    /// Daily-rolling log files are written here in addition to stdout.
    pub directory: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
            directory: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub cookie_name: String,
    /// Sessions created at startup. Sign-in happens elsewhere; these stand
    /// in for it during development.
    pub dev_sessions: Vec<DevSession>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: "sid".to_string(),
            dev_sessions: Vec::new(),
        }
    }
}

#[derive(Clone, Deserialize)]
pub struct DevSession {
    pub id: String,
    /// Without one the session exists but has no Ads account connected.
    #[serde(default)]
    pub refresh_token: Option<String>,
}

impl std::fmt::Debug for DevSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DevSession")
            .field("id", &self.id)
            .field(
                "refresh_token",
                &self.refresh_token.as_deref().map(redact_secret),
            )
            .finish()
    }
}

impl AppConfig {
    /// Loads the file named by `ADS_NAVIGATOR_CONFIG` (or `config.toml`) and
    /// applies environment overrides.
    ///
    /// A missing default file means defaults; a missing file that was named
    /// explicitly is an error.
    pub fn load() -> anyhow::Result<Self> {
        let explicit = std::env::var(CONFIG_PATH_ENV).ok();
        let path = PathBuf::from(explicit.as_deref().unwrap_or(DEFAULT_CONFIG_PATH));

        let mut config = if explicit.is_some() || path.exists() {
            Self::from_file(&path)?
        } else {
            Self::default()
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Overrides from `GOOGLE_CLIENT_ID`, `GOOGLE_CLIENT_SECRET`,
    /// `GOOGLE_ADS_DEVELOPER_TOKEN`, `PORT`, `NODE_ENV` and
    /// `ADS_NAVIGATOR_PRODUCTION`.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(v) = lookup("GOOGLE_CLIENT_ID") {
            self.google_ads.client_id = v;
        }
        if let Some(v) = lookup("GOOGLE_CLIENT_SECRET") {
            self.google_ads.client_secret = v;
        }
        if let Some(v) = lookup("GOOGLE_ADS_DEVELOPER_TOKEN") {
            self.google_ads.developer_token = v;
        }
        if let Some(port) = lookup("PORT").and_then(|v| v.parse().ok()) {
            self.server.port = port;
        }
        if lookup("NODE_ENV").is_some_and(|v| v == "production")
            || lookup("ADS_NAVIGATOR_PRODUCTION").is_some_and(|v| v == "1" || v == "true")
        {
            self.server.production = true;
        }
    }

    pub fn workers(&self) -> usize {
        self.server.workers.unwrap_or_else(num_cpus::get).max(1)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn empty_file_is_all_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.log.level, "info");
        assert_eq!(config.session.cookie_name, "sid");
        assert_eq!(config.google_ads.api_version, "v17");
        assert_eq!(config.google_ads.max_retries, 3);
        assert!(!config.server.production);
    }

    #[test]
    fn sections_parse() {
        let config = AppConfig::from_toml(
            r#"
            [server]
            port = 8080
            workers = 2

            [log]
            level = "debug"
            format = "json"

            [google_ads]
            client_id = "cid"
            developer_token = "dev"

            [[session.dev_sessions]]
            id = "local"
            refresh_token = "1//abc"
            "#,
        )
        .unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.workers(), 2);
        assert_eq!(config.log.format, LogFormat::Json);
        assert_eq!(config.google_ads.client_id, "cid");
        assert_eq!(config.google_ads.api_base, "https://googleads.googleapis.com");
        assert_eq!(config.session.dev_sessions.len(), 1);
        assert_eq!(
            config.session.dev_sessions[0].refresh_token.as_deref(),
            Some("1//abc")
        );
    }

    #[test]
    fn env_overrides_file() {
        let env: HashMap<&str, &str> = [
            ("GOOGLE_CLIENT_SECRET", "from-env"),
            ("PORT", "9000"),
            ("NODE_ENV", "production"),
        ]
        .into_iter()
        .collect();
        let mut config = AppConfig::from_toml("[server]\nport = 8080").unwrap();
        config.apply_env(|k| env.get(k).map(|v| (*v).to_string()));

        assert_eq!(config.google_ads.client_secret, "from-env");
        assert_eq!(config.server.port, 9000);
        assert!(config.server.production);
    }

    #[test]
    fn unparsable_port_is_ignored() {
        let mut config = AppConfig::default();
        config.apply_env(|k| (k == "PORT").then(|| "abc".to_string()));
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn dev_session_debug_hides_token() {
        let session = DevSession {
            id: "local".into(),
            refresh_token: Some("1//very-secret-refresh-token".into()),
        };
        assert!(!format!("{session:?}").contains("very-secret-refresh-token"));
    }
}
