//! Configuration for sandbox-tools.
//!
//! Loaded once at startup from `~/.sandbox-tools/config.toml` (or an explicit
//! path), then overlaid with environment variables by the binary. The library
//! never reads the environment on its own: [`crate::tools::init`] only sees
//! the [`Config`] it is handed.

use crate::error::ConfigurationError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_DAYTONA_API_URL: &str = "https://app.daytona.io/api";
pub const DEFAULT_E2B_API_URL: &str = "https://api.e2b.dev";
pub const DEFAULT_E2B_TEMPLATE: &str = "code-interpreter-v1";

const CONFIG_DIR: &str = ".sandbox-tools";
const CONFIG_FILE: &str = "config.toml";

/// Environment variables recognised by [`Config::apply_env_overrides`].
pub const ENV_DAYTONA_API_KEY: &str = "DAYTONA_API_KEY";
pub const ENV_DAYTONA_API_URL: &str = "DAYTONA_API_URL";
pub const ENV_E2B_API_KEY: &str = "E2B_API_KEY";
pub const ENV_E2B_API_URL: &str = "E2B_API_URL";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where this config was loaded from (not serialized).
    #[serde(skip)]
    pub config_path: PathBuf,
    pub daytona: DaytonaConfig,
    pub e2b: E2bConfig,
    pub tools: ToolsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DaytonaConfig {
    pub api_key: Option<String>,
    pub api_url: String,
    pub request_timeout_secs: u64,
}

impl Default for DaytonaConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: DEFAULT_DAYTONA_API_URL.to_string(),
            request_timeout_secs: 120,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct E2bConfig {
    pub api_key: Option<String>,
    pub api_url: String,
    /// Template used when `create_sandbox` is called without one.
    pub template: String,
    /// Sandbox lifetime requested at creation.
    pub sandbox_timeout_ms: u64,
    pub request_timeout_secs: u64,
}

impl Default for E2bConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: DEFAULT_E2B_API_URL.to_string(),
            template: DEFAULT_E2B_TEMPLATE.to_string(),
            sandbox_timeout_ms: 600_000,
            request_timeout_secs: 120,
        }
    }
}

/// Defaults applied by the tools when a caller leaves an argument out.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    pub default_workdir: String,
    pub command_timeout_ms: u64,
    pub watch_duration_ms: u64,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            default_workdir: "/home/user".to_string(),
            command_timeout_ms: 120_000,
            watch_duration_ms: 5_000,
        }
    }
}

/// The two provider credentials, as seen by the resolver.
#[derive(Clone, Default)]
pub struct Credentials {
    pub daytona_api_key: Option<String>,
    pub e2b_api_key: Option<String>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let shown = |key: &Option<String>| match key {
            Some(k) if !k.is_empty() => "<set>",
            Some(_) => "<empty>",
            None => "<unset>",
        };
        f.debug_struct("Credentials")
            .field("daytona_api_key", &shown(&self.daytona_api_key))
            .field("e2b_api_key", &shown(&self.e2b_api_key))
            .finish()
    }
}

impl Config {
    /// Load config from `path`, or from `~/.sandbox-tools/config.toml` when
    /// no path is given. A missing file yields the defaults.
    pub fn load(path: Option<&str>) -> Result<Self, ConfigurationError> {
        let config_path = match path {
            Some(p) => PathBuf::from(shellexpand::tilde(p).as_ref()),
            None => default_config_path()?,
        };
        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigurationError> {
        if !path.exists() {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self {
                config_path: path.to_path_buf(),
                ..Self::default()
            });
        }

        let raw = std::fs::read_to_string(path).map_err(|source| ConfigurationError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: Config =
            toml::from_str(&raw).map_err(|source| ConfigurationError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.config_path = path.to_path_buf();
        Ok(config)
    }

    /// Overlay values from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_with(|name| std::env::var(name).ok());
    }

    /// Overlay values from an arbitrary lookup. Empty values are ignored.
    pub fn apply_overrides_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.is_empty());

        if let Some(key) = get(ENV_DAYTONA_API_KEY) {
            self.daytona.api_key = Some(key);
        }
        if let Some(url) = get(ENV_DAYTONA_API_URL) {
            self.daytona.api_url = url;
        }
        if let Some(key) = get(ENV_E2B_API_KEY) {
            self.e2b.api_key = Some(key);
        }
        if let Some(url) = get(ENV_E2B_API_URL) {
            self.e2b.api_url = url;
        }
    }

    pub fn credentials(&self) -> Credentials {
        Credentials {
            daytona_api_key: self.daytona.api_key.clone(),
            e2b_api_key: self.e2b.api_key.clone(),
        }
    }
}

fn default_config_path() -> Result<PathBuf, ConfigurationError> {
    let dirs = directories::UserDirs::new().ok_or(ConfigurationError::NoHomeDir)?;
    Ok(dirs.home_dir().join(CONFIG_DIR).join(CONFIG_FILE))
}
