//! Application configuration.
//!
//! Layers, lowest to highest priority:
//! - Built-in defaults embedded from `src-tauri/config/default.toml`
//! - User file at `<config dir>/hrdocs/config.toml`
//! - `HRDOCS_*` environment variables
//!
//! Credentials have no built-in default. Without them every login attempt fails.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use url::Url;

use crate::error::HrDocsError;

const DEFAULT_CONFIG: &str = include_str!("../config/default.toml");

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub service: ServiceConfig,
    #[serde(default)]
    pub credentials: Option<Credentials>,
    #[serde(default)]
    pub downloads: DownloadConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    /// Root of the document service, e.g. `http://127.0.0.1:8000`.
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub response_policy: ResponsePolicy,
    #[serde(default = "default_use_system_proxy")]
    pub use_system_proxy: bool,
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_use_system_proxy() -> bool {
    true
}

/// How a successful generation response is handled.
///
/// `Inline` is the canonical contract: the artifact reference is returned to the
/// UI and downloading is a separate, explicit action. `AutoDownload` fetches the
/// file immediately and treats a response without `docx_file` as a failure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponsePolicy {
    #[default]
    Inline,
    AutoDownload,
}

impl FromStr for ResponsePolicy {
    type Err = HrDocsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "inline" => Ok(Self::Inline),
            "auto_download" | "auto-download" => Ok(Self::AutoDownload),
            other => Err(HrDocsError::Config(format!(
                "Unknown response policy '{}'",
                other
            ))),
        }
    }
}

/// The single username/password pair accepted by the login screen.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DownloadConfig {
    pub dir: Option<PathBuf>,
}

/// Settings the frontend is allowed to see.
#[derive(Debug, Clone, Serialize)]
pub struct ClientSettings {
    pub base_url: String,
    pub response_policy: ResponsePolicy,
    pub download_dir: String,
    pub credentials_configured: bool,
}

impl AppConfig {
    /// Built-in defaults only.
    pub fn defaults() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("embedded default.toml must be valid TOML")
    }

    /// Parse a user config document layered over the built-in defaults.
    pub fn from_toml_str(user: &str) -> Result<Self, HrDocsError> {
        let mut base: toml::Table = toml::from_str(DEFAULT_CONFIG)
            .map_err(|e| HrDocsError::Config(format!("Invalid built-in config: {}", e)))?;
        let overlay: toml::Table = toml::from_str(user)
            .map_err(|e| HrDocsError::Config(format!("Invalid config file: {}", e)))?;
        merge_tables(&mut base, overlay);

        let config: AppConfig = toml::Value::Table(base)
            .try_into()
            .map_err(|e: toml::de::Error| HrDocsError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if it exists, otherwise use the defaults.
    pub fn load_from(path: &Path) -> Result<Self, HrDocsError> {
        if !path.exists() {
            info!("No config file at {:?}, using defaults", path);
            return Ok(Self::defaults());
        }
        let content = std::fs::read_to_string(path)
            .map_err(|e| HrDocsError::Config(format!("Failed to read {:?}: {}", path, e)))?;
        info!("Loaded config from {:?}", path);
        Self::from_toml_str(&content)
    }

    /// Full startup load: user file, then environment overrides.
    pub fn load() -> Result<Self, HrDocsError> {
        let mut config = match user_config_path() {
            Some(path) => Self::load_from(&path)?,
            None => Self::defaults(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `HRDOCS_*` overrides read through `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), HrDocsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("HRDOCS_SERVICE_URL") {
            self.service.base_url = url;
        }
        if let Some(policy) = lookup("HRDOCS_RESPONSE_POLICY") {
            self.service.response_policy = policy.parse()?;
        }
        if let Some(dir) = lookup("HRDOCS_DOWNLOAD_DIR") {
            self.downloads.dir = Some(PathBuf::from(dir));
        }

        match (lookup("HRDOCS_USERNAME"), lookup("HRDOCS_PASSWORD")) {
            (Some(username), Some(password)) => {
                self.credentials = Some(Credentials { username, password });
            }
            (Some(username), None) => match self.credentials.as_mut() {
                Some(existing) => existing.username = username,
                None => warn!("HRDOCS_USERNAME set without a password, ignoring"),
            },
            (None, Some(password)) => match self.credentials.as_mut() {
                Some(existing) => existing.password = password,
                None => warn!("HRDOCS_PASSWORD set without a username, ignoring"),
            },
            (None, None) => {}
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), HrDocsError> {
        let url = Url::parse(self.service.base_url.trim()).map_err(|e| {
            HrDocsError::Config(format!(
                "Invalid service URL '{}': {}",
                self.service.base_url, e
            ))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(HrDocsError::Config(format!(
                "Service URL must be http or https, got '{}'",
                url.scheme()
            )));
        }
        if self.service.timeout_secs == 0 {
            return Err(HrDocsError::Config("timeout_secs must be positive".to_string()));
        }
        Ok(())
    }

    /// Service root without trailing slashes, ready for path concatenation.
    pub fn base_url(&self) -> &str {
        self.service.base_url.trim().trim_end_matches('/')
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.service.timeout_secs)
    }

    pub fn download_dir(&self) -> PathBuf {
        if let Some(dir) = &self.downloads.dir {
            return dir.clone();
        }
        dirs::download_dir()
            .or_else(|| dirs::data_dir().map(|d| d.join("hrdocs").join("downloads")))
            .unwrap_or_else(|| std::env::temp_dir().join("hrdocs"))
    }

    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            base_url: self.base_url().to_string(),
            response_policy: self.service.response_policy,
            download_dir: self.download_dir().display().to_string(),
            credentials_configured: self.credentials.is_some(),
        }
    }
}

/// `<config dir>/hrdocs/config.toml`, if the platform has a config dir.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("hrdocs").join("config.toml"))
}

fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        if let (Some(toml::Value::Table(existing)), toml::Value::Table(incoming)) =
            (base.get_mut(&key), &value)
        {
            merge_tables(existing, incoming.clone());
            continue;
        }
        base.insert(key, value);
    }
}
