//! Client configuration.
//!
//! # Config File Format
//!
//! ```toml
//! [api]
//! base_url = "http://localhost:3000"
//! request_timeout_secs = 10
//! connect_timeout_secs = 3
//!
//! [session]
//! token_path = "/home/me/.menu-client/session.json"
//! token_key = "token"
//! clear_on_unauthorized = false
//!
//! [browse]
//! require_sign_in = true
//! ```
//!
//! Every key is optional. Environment variables `MENU_API_URL` and
//! `MENU_TOKEN_PATH` override the file.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::adapters::DEFAULT_TOKEN_KEY;
use crate::domain::UnauthorizedPolicy;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
pub const ENV_API_URL: &str = "MENU_API_URL";
pub const ENV_TOKEN_PATH: &str = "MENU_TOKEN_PATH";

/// Errors that can occur during config loading.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {error}")]
    Io { path: String, error: String },

    #[error("failed to parse config: {0}")]
    Parse(String),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    /// Whole-request timeout. Unset means no timeout.
    pub request_timeout_secs: Option<u64>,
    pub connect_timeout_secs: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: None,
            connect_timeout_secs: None,
        }
    }
}

impl ApiConfig {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout_secs.map(Duration::from_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Token file. Defaults to `~/.menu-client/session.json`.
    pub token_path: Option<PathBuf>,
    pub token_key: String,
    /// Drop the session when an authenticated request gets a 401.
    pub clear_on_unauthorized: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            token_path: None,
            token_key: DEFAULT_TOKEN_KEY.to_string(),
            clear_on_unauthorized: false,
        }
    }
}

impl SessionConfig {
    pub fn token_path(&self) -> PathBuf {
        self.token_path.clone().unwrap_or_else(default_token_path)
    }

    pub fn unauthorized_policy(&self) -> UnauthorizedPolicy {
        if self.clear_on_unauthorized {
            UnauthorizedPolicy::ClearSession
        } else {
            UnauthorizedPolicy::KeepSession
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BrowseConfig {
    /// Hide the catalog until signed in.
    pub require_sign_in: bool,
}

impl Default for BrowseConfig {
    fn default() -> Self {
        Self {
            require_sign_in: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub api: ApiConfig,
    pub session: SessionConfig,
    pub browse: BrowseConfig,
}

impl ClientConfig {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            error: e.to_string(),
        })?;
        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply `MENU_API_URL` / `MENU_TOKEN_PATH` from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from any key lookup. Empty values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if let Some(url) = non_empty(ENV_API_URL) {
            self.api.base_url = url;
        }
        if let Some(path) = non_empty(ENV_TOKEN_PATH) {
            self.session.token_path = Some(PathBuf::from(path));
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.api.base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::Invalid(format!(
                "api.base_url must start with http:// or https://, got {url:?}"
            )));
        }
        if self.session.token_key.trim().is_empty() {
            return Err(ConfigError::Invalid("session.token_key must not be empty".into()));
        }
        if self.api.request_timeout_secs == Some(0) || self.api.connect_timeout_secs == Some(0) {
            return Err(ConfigError::Invalid("timeouts must be at least one second".into()));
        }
        Ok(())
    }
}

/// `$HOME/.menu-client/session.json`, or a relative path without `HOME`.
pub fn default_token_path() -> PathBuf {
    let dir = match std::env::var_os("HOME") {
        Some(home) => PathBuf::from(home).join(".menu-client"),
        None => PathBuf::from(".menu-client"),
    };
    dir.join("session.json")
}
