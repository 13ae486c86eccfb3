//! Configuration system for Big Tac.
//!
//! Resolution order: environment variables → config file → defaults.
//!
//! Config file location:
//!   1. $BIGTAC_CONFIG (explicit override)
//!   2. $XDG_CONFIG_HOME/bigtac/config.toml
//!   3. ~/.config/bigtac/config.toml

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BigtacConfig {
    pub network: NetworkConfig,
    pub sessions: SessionsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Address the HTTP API binds to.
    pub bind_addr: String,
    /// TCP port for the HTTP API.
    pub api_port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionsConfig {
    /// Default bound on every blocking call (wait, move). 0 = wait forever.
    pub wait_timeout_secs: u64,
    /// Drop sessions with no activity for this long. 0 = never.
    pub idle_eviction_secs: u64,
    /// How often the eviction sweep runs.
    pub eviction_interval_secs: u64,
}

// ── Defaults ──────────────────────────────────────────────────────────────────

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1".to_string(),
            api_port: 8080,
        }
    }
}

impl Default for SessionsConfig {
    fn default() -> Self {
        Self {
            wait_timeout_secs: 0,
            idle_eviction_secs: 0,
            eviction_interval_secs: 60,
        }
    }
}

impl SessionsConfig {
    /// Default wait bound, `None` when waits are unbounded.
    pub fn wait_timeout(&self) -> Option<Duration> {
        (self.wait_timeout_secs > 0).then(|| Duration::from_secs(self.wait_timeout_secs))
    }

    /// Idle threshold for eviction, `None` when sessions are kept forever.
    pub fn idle_eviction(&self) -> Option<Duration> {
        (self.idle_eviction_secs > 0).then(|| Duration::from_secs(self.idle_eviction_secs))
    }

    pub fn eviction_interval(&self) -> Duration {
        Duration::from_secs(self.eviction_interval_secs.max(1))
    }
}

// ── Path helpers ──────────────────────────────────────────────────────────────

fn config_dir() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_or_tmp().join(".config"))
        .join("bigtac")
}

fn home_or_tmp() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/tmp"))
}

// ── Errors ────────────────────────────────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {0}: {1}")]
    ReadFailed(PathBuf, std::io::Error),
    #[error("failed to parse {0}: {1}")]
    ParseFailed(PathBuf, toml::de::Error),
    #[error("failed to write {0}: {1}")]
    WriteFailed(PathBuf, std::io::Error),
    #[error("failed to serialize: {0}")]
    SerializeFailed(toml::ser::Error),
}

// ── Loading ───────────────────────────────────────────────────────────────────

impl BigtacConfig {
    /// Load config: env vars → file → defaults.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::file_path();
        let mut config = if path.exists() {
            Self::from_file(&path)?
        } else {
            BigtacConfig::default()
        };
        config.apply_env_overrides();
        Ok(config)
    }

    fn from_file(path: &PathBuf) -> Result<Self, ConfigError> {
        let text =
            std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed(path.clone(), e))?;
        toml::from_str(&text).map_err(|e| ConfigError::ParseFailed(path.clone(), e))
    }

    /// Config file path.
    pub fn file_path() -> PathBuf {
        std::env::var("BIGTAC_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| config_dir().join("config.toml"))
    }

    /// Write default config if none exists. Returns the path.
    pub fn write_default_if_missing() -> Result<PathBuf, ConfigError> {
        let path = Self::file_path();
        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| ConfigError::WriteFailed(path.clone(), e))?;
            }
            let text = toml::to_string_pretty(&BigtacConfig::default())
                .map_err(ConfigError::SerializeFailed)?;
            std::fs::write(&path, text).map_err(|e| ConfigError::WriteFailed(path.clone(), e))?;
        }
        Ok(path)
    }

    /// Apply BIGTAC_* env var overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(v) = lookup("BIGTAC_NETWORK__BIND_ADDR") {
            self.network.bind_addr = v;
        }
        if let Some(p) = lookup("BIGTAC_NETWORK__API_PORT").and_then(|v| v.parse().ok()) {
            self.network.api_port = p;
        }
        if let Some(s) = lookup("BIGTAC_SESSIONS__WAIT_TIMEOUT_SECS").and_then(|v| v.parse().ok())
        {
            self.sessions.wait_timeout_secs = s;
        }
        if let Some(s) = lookup("BIGTAC_SESSIONS__IDLE_EVICTION_SECS").and_then(|v| v.parse().ok())
        {
            self.sessions.idle_eviction_secs = s;
        }
        if let Some(s) =
            lookup("BIGTAC_SESSIONS__EVICTION_INTERVAL_SECS").and_then(|v| v.parse().ok())
        {
            self.sessions.eviction_interval_secs = s;
        }
    }
}
