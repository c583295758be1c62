use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{
    CONFIG_PATH, DEFAULT_BASE_URL, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT,
    DEFAULT_TIMEOUT_SECONDS, DEFAULT_USER_AGENT,
};
use crate::error::{Result, ScraperError};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub http: HttpConfig,
    pub server: ServerConfig,
    /// Replaces the built-in team table when set
    pub teams_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_SERVER_HOST.to_string(),
            port: DEFAULT_SERVER_PORT,
        }
    }
}

impl Config {
    /// Loads `config.toml` from the working directory (defaults if absent),
    /// then applies environment overrides.
    pub fn load() -> Result<Self> {
        dotenv::dotenv().ok();
        let mut config = Self::from_path(CONFIG_PATH)?;
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|e| ScraperError::read(path, e))?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(url) = lookup("MLB_BASE_URL") {
            self.http.base_url = url;
        }
        if let Some(timeout) = lookup("MLB_HTTP_TIMEOUT") {
            self.http.timeout_seconds = timeout.parse().map_err(|_| {
                ScraperError::Config(format!("MLB_HTTP_TIMEOUT must be seconds, got '{timeout}'"))
            })?;
        }
        if let Some(host) = lookup("MLB_SERVER_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("MLB_SERVER_PORT") {
            self.server.port = port.parse().map_err(|_| {
                ScraperError::Config(format!("MLB_SERVER_PORT must be a port number, got '{port}'"))
            })?;
        }
        Ok(())
    }
}
