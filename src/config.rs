use crate::error::{BotdashError, Result};
use serde::Deserialize;
use std::env;
use std::path::Path;

/// Resolved application settings
///
/// Built once at startup from the config file plus environment overrides and
/// shared read-only with every handler. Precedence per key: environment
/// variable > new config key > legacy config key > hardcoded default.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Host of the upstream bot API (default: 127.0.0.1)
    pub bot_host: String,
    /// Port of the upstream bot API, kept as a string for URL splicing (default: 8888)
    pub bot_port: String,
    /// Address the dashboard listens on (default: 0.0.0.0)
    pub dashboard_host: String,
    /// Port the dashboard listens on (default: 80)
    pub dashboard_port: u16,
    /// Dev-mode toggle; raises the default log level
    pub debug: bool,
}

/// Raw shape of the config file
///
/// Carries the current keys plus the legacy aliases the old frontend shipped with.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileConfig {
    #[serde(rename = "bot-ip")]
    pub bot_ip: Option<String>,
    /// Legacy alias for `bot-ip`
    pub ip: Option<String>,
    #[serde(rename = "bot-port")]
    pub bot_port: Option<String>,
    /// Legacy alias for `bot-port`
    pub port: Option<String>,
    #[serde(rename = "dashboard-port")]
    pub dashboard_port: Option<String>,
}

impl Settings {
    /// Load settings from a config file, applying environment overrides
    ///
    /// A missing or unparsable file is a fatal startup error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            BotdashError::InvalidConfig(format!("cannot read {}: {}", path.display(), e))
        })?;
        let file: FileConfig = toml::from_str(&raw).map_err(|e| {
            BotdashError::InvalidConfig(format!("cannot parse {}: {}", path.display(), e))
        })?;
        Self::resolve(&file)
    }

    /// Resolve settings from an already-parsed file config plus the process environment
    pub fn resolve(file: &FileConfig) -> Result<Self> {
        let bot_host = env::var("BOT_IP")
            .ok()
            .or_else(|| file.bot_ip.clone())
            .or_else(|| file.ip.clone())
            .map(|v| clean(&v))
            .unwrap_or_else(|| "127.0.0.1".to_string());

        let bot_port = env::var("BOT_PORT")
            .ok()
            .or_else(|| file.bot_port.clone())
            .or_else(|| file.port.clone())
            .map(|v| clean(&v))
            .unwrap_or_else(|| "8888".to_string());

        let dashboard_port_raw = env::var("PORT")
            .ok()
            .or_else(|| file.dashboard_port.clone())
            .map(|v| clean(&v))
            .unwrap_or_else(|| "80".to_string());
        let dashboard_port: u16 = dashboard_port_raw.parse().map_err(|_| {
            BotdashError::InvalidConfig(format!(
                "dashboard port must be a valid port number, got {:?}",
                dashboard_port_raw
            ))
        })?;

        let dashboard_host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let debug = env::var("DEBUG")
            .map(|v| v.to_lowercase() == "true")
            .unwrap_or(false);

        Ok(Settings {
            bot_host,
            bot_port,
            dashboard_host,
            dashboard_port,
            debug,
        })
    }

    /// Base URL of the upstream bot API
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.bot_host, self.bot_port)
    }

    /// Address the dashboard server binds to
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.dashboard_host, self.dashboard_port)
    }
}

/// Strip whitespace and stray quotes; the old YAML config tolerated both.
fn clean(value: &str) -> String {
    value.trim().trim_matches('"').to_string()
}
