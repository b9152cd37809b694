//! Top-level application configuration.
//!
//! Configuration is stored in `.officehub/config.yaml` and includes:
//! - The API origin and request timeout
//! - The bearer token sent with every request
//! - The signed-in user (id, display name, role)

use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{OfficeError, Result};
use crate::paths;
use crate::session::{Role, Session};

/// Origin of the hosted office-management service.
pub const DEFAULT_API_URL: &str = "https://office-mangement-ss17.onrender.com";

/// Request timeout in seconds when none is configured.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Environment variable that overrides `api.url`.
pub const API_URL_ENV: &str = "OFFICEHUB_API_URL";

/// Environment variable that overrides `auth.token`.
pub const TOKEN_ENV: &str = "OFFICEHUB_TOKEN";

/// Keys accepted by `config get` and `config set`.
pub const CONFIG_KEYS: &[&str] = &[
    "api.url",
    "api.timeout",
    "auth.token",
    "session.user_id",
    "session.name",
    "session.role",
];

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "ApiConfig::is_default")]
    pub api: ApiConfig,

    #[serde(default, skip_serializing_if = "AuthConfig::is_empty")]
    pub auth: AuthConfig,

    #[serde(default, skip_serializing_if = "SessionConfig::is_empty")]
    pub session: SessionConfig,
}

/// Service connection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// API origin (default: the hosted service)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            url: None,
            timeout: default_timeout(),
        }
    }
}

impl ApiConfig {
    pub fn is_default(&self) -> bool {
        self.url.is_none() && self.timeout == default_timeout()
    }
}

/// Authentication configuration
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl AuthConfig {
    pub fn is_empty(&self) -> bool {
        self.token.is_none()
    }
}

/// The signed-in user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

impl SessionConfig {
    pub fn is_empty(&self) -> bool {
        self.user_id.is_none() && self.name.is_none() && self.role.is_none()
    }
}

impl Config {
    /// Get the path to the config file
    pub fn config_path() -> PathBuf {
        paths::config_path()
    }

    /// Load configuration from file, or return default if not found
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|e| {
            OfficeError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read config at {}: {}", path.display(), e),
            ))
        })?;
        let config: Config = serde_yaml_ng::from_str(&content)?;
        if config.api.timeout == 0 {
            return Err(invalid_timeout("0"));
        }
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| {
                OfficeError::Io(std::io::Error::new(
                    e.kind(),
                    format!(
                        "Failed to create directory for config at {}: {}",
                        parent.display(),
                        e
                    ),
                ))
            })?;
        }

        let content = serde_yaml_ng::to_string(self)?;
        fs::write(path, content).map_err(|e| {
            OfficeError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to write config at {}: {}", path.display(), e),
            ))
        })?;

        // The file holds the bearer token: owner read/write only
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = fs::Permissions::from_mode(0o600);
            fs::set_permissions(path, permissions).map_err(|e| {
                OfficeError::Io(std::io::Error::new(
                    e.kind(),
                    format!(
                        "Failed to set permissions on config at {}: {}",
                        path.display(),
                        e
                    ),
                ))
            })?;
        }

        Ok(())
    }

    /// API origin from the environment, the config file, or the default
    pub fn api_url(&self) -> String {
        if let Ok(url) = env::var(API_URL_ENV)
            && !url.trim().is_empty()
        {
            return url;
        }

        self.api
            .url
            .clone()
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
    }

    /// Get the request timeout duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout)
    }

    /// Bearer token from the environment or the config file
    pub fn auth_token(&self) -> Option<String> {
        if let Ok(token) = env::var(TOKEN_ENV)
            && !token.is_empty()
        {
            return Some(token);
        }

        self.auth.token.clone()
    }

    /// The signed-in user, if a user id is configured
    pub fn session(&self) -> Option<Session> {
        let user_id = self.session.user_id.as_ref()?;
        let mut session = Session::new(user_id.clone(), self.session.role.unwrap_or_default());
        session.name = self.session.name.clone();
        Some(session)
    }

    /// Read a value by dotted key. `Ok(None)` means the key is valid but unset.
    pub fn get_value(&self, key: &str) -> Result<Option<String>> {
        let value = match key {
            "api.url" => Some(self.api_url()),
            "api.timeout" => Some(self.api.timeout.to_string()),
            "auth.token" => self.auth_token(),
            "session.user_id" => self.session.user_id.clone(),
            "session.name" => self.session.name.clone(),
            "session.role" => self.session.role.map(|r| r.to_string()),
            _ => return Err(unknown_key(key)),
        };
        Ok(value)
    }

    /// Set a value by dotted key, validating it first.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "api.url" => {
                let url = url::Url::parse(value.trim())
                    .map_err(|e| OfficeError::InvalidUrl(value.to_string(), e.to_string()))?;
                if !matches!(url.scheme(), "http" | "https") {
                    return Err(OfficeError::InvalidUrl(
                        value.to_string(),
                        "scheme must be http or https".to_string(),
                    ));
                }
                self.api.url = Some(value.trim().to_string());
            }
            "api.timeout" => {
                let seconds = value
                    .trim()
                    .parse::<u64>()
                    .ok()
                    .filter(|s| *s > 0)
                    .ok_or_else(|| invalid_timeout(value))?;
                self.api.timeout = seconds;
            }
            "auth.token" => self.auth.token = non_empty(value),
            "session.user_id" => self.session.user_id = non_empty(value),
            "session.name" => self.session.name = non_empty(value),
            "session.role" => self.session.role = Some(value.parse()?),
            _ => return Err(unknown_key(key)),
        }
        Ok(())
    }
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn invalid_timeout(value: &str) -> OfficeError {
    OfficeError::Config(format!(
        "invalid value '{value}' for api.timeout. Expected: a positive number of seconds"
    ))
}

fn unknown_key(key: &str) -> OfficeError {
    OfficeError::Config(format!(
        "unknown config key '{key}'. Valid keys: {}",
        CONFIG_KEYS.join(", ")
    ))
}

/// Validate a config key, suggesting dot notation for underscore-style keys.
pub fn validate_config_key(key: &str) -> Result<&str> {
    if CONFIG_KEYS.contains(&key) {
        return Ok(key);
    }

    // Only the first underscore becomes a dot (api_url -> api.url)
    if let Some(pos) = key.find('_') {
        let dot_version = format!("{}.{}", &key[..pos], &key[pos + 1..]);
        return Err(OfficeError::Config(format!(
            "invalid config key '{key}'. Use dot notation: '{dot_version}'"
        )));
    }

    Err(unknown_key(key))
}
