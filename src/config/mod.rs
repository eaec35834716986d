//! Configuration management for ddop
//!
//! Settings come from `~/.ddop/config.yaml` and are overlaid with the
//! standard Datadog environment variables (`DD_API_KEY`, `DD_APP_KEY`,
//! `DD_SITE`).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::error::{ConfigError, Result};

/// Default Datadog site
pub const DEFAULT_SITE: &str = "datadoghq.com";

/// Sites accepted for `site`.
pub const KNOWN_SITES: [&str; 6] = [
    "datadoghq.com",
    "us3.datadoghq.com",
    "us5.datadoghq.com",
    "ap1.datadoghq.com",
    "datadoghq.eu",
    "ddog-gov.com",
];

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Datadog API key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Datadog application key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_key: Option<String>,

    /// Datadog site (e.g. `datadoghq.eu`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site: Option<String>,

    /// Full URL replacing both the API and logs intake hosts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_host: Option<String>,

    /// Accept compressed responses
    #[serde(default = "default_compress")]
    pub compress: bool,

    /// Unstable operations switched on, keyed by operation id (`v2.ListIncidents`)
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub unstable_operations: BTreeMap<String, bool>,

    /// Retry behaviour for 429 and 5xx responses
    #[serde(default)]
    pub retry: RetryConfig,

    /// User preferences
    #[serde(default)]
    pub preferences: Preferences,
}

/// Retry settings.
///
/// 429 responses wait for `X-RateLimit-Reset`; 5xx responses wait
/// `backoff_base * backoff_multiplier^attempt` seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetryConfig {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Base delay in seconds
    #[serde(default = "default_backoff_base")]
    pub backoff_base: u64,

    #[serde(default = "default_backoff_multiplier")]
    pub backoff_multiplier: f64,
}

/// User preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preferences {
    /// Default output format
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    /// Default page size for paginated requests
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

fn default_compress() -> bool {
    true
}

fn default_max_retries() -> u32 {
    3
}

fn default_backoff_base() -> u64 {
    2
}

fn default_backoff_multiplier() -> f64 {
    2.0
}

fn default_page_size() -> usize {
    100
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            max_retries: default_max_retries(),
            backoff_base: default_backoff_base(),
            backoff_multiplier: default_backoff_multiplier(),
        }
    }
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            format: None,
            page_size: default_page_size(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            app_key: None,
            site: None,
            api_host: None,
            compress: default_compress(),
            unstable_operations: BTreeMap::new(),
            retry: RetryConfig::default(),
            preferences: Preferences::default(),
        }
    }
}

/// Environment values that override the config file.
#[derive(Debug, Clone, Default)]
pub struct EnvOverrides {
    pub api_key: Option<String>,
    pub app_key: Option<String>,
    pub site: Option<String>,
    pub api_host: Option<String>,
}

impl EnvOverrides {
    /// Read overrides from the process environment.
    pub fn from_env() -> Self {
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.is_empty());
        Self {
            api_key: var("DD_API_KEY"),
            app_key: var("DD_APP_KEY").or_else(|| var("DD_APPLICATION_KEY")),
            site: var("DD_SITE"),
            api_host: var("DDOP_API_HOST"),
        }
    }
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".ddop").join("config.yaml"))
    }

    /// Resolve an optional path override to a concrete path.
    pub fn resolve_path(path: Option<&str>) -> Result<PathBuf> {
        match path {
            Some(p) => Ok(PathBuf::from(p)),
            None => Self::default_path(),
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: PathBuf) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound.into());
        }

        let contents = std::fs::read_to_string(&path)?;
        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;

        Ok(config)
    }

    /// Load configuration from an optional path override
    pub fn load_at(path: Option<&str>) -> Result<Self> {
        Self::load_from(Self::resolve_path(path)?)
    }

    /// Load the config file if present, then apply environment overrides.
    ///
    /// A missing file is not an error: keys may come from the environment.
    pub fn resolve(path: Option<&str>) -> Result<Self> {
        let mut config = match Self::load_at(path) {
            Ok(config) => config,
            Err(crate::error::Error::Config(ConfigError::NotFound)) => Self::default(),
            Err(e) => return Err(e),
        };
        config.apply_overrides(EnvOverrides::from_env());
        Ok(config)
    }

    /// Overlay non-empty environment values on top of file values.
    pub fn apply_overrides(&mut self, env: EnvOverrides) {
        if env.api_key.is_some() {
            self.api_key = env.api_key;
        }
        if env.app_key.is_some() {
            self.app_key = env.app_key;
        }
        if env.site.is_some() {
            self.site = env.site;
        }
        if env.api_host.is_some() {
            self.api_host = env.api_host;
        }
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents =
            serde_yaml::to_string(self).map_err(|e| ConfigError::SaveError(e.to_string()))?;

        std::fs::write(&path, contents)?;

        // Keys live in this file
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(&path)?.permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(&path, perms)?;
        }

        Ok(())
    }

    /// Save configuration to an optional path override
    pub fn save_at(&self, path: Option<&str>) -> Result<()> {
        self.save_to(Self::resolve_path(path)?)
    }

    /// The configured site, or the default one.
    pub fn site(&self) -> &str {
        self.site.as_deref().unwrap_or(DEFAULT_SITE)
    }

    /// Check the site against the known Datadog sites.
    pub fn validate_site(&self) -> Result<()> {
        let site = self.site();
        if KNOWN_SITES.contains(&site) {
            Ok(())
        } else {
            Err(ConfigError::UnknownSite(site.to_string()).into())
        }
    }

    /// Base URL for API requests.
    pub fn api_base_url(&self) -> String {
        match &self.api_host {
            Some(host) => host.trim_end_matches('/').to_string(),
            None => format!("https://api.{}", self.site()),
        }
    }

    /// Base URL for log submission.
    pub fn logs_intake_url(&self) -> String {
        match &self.api_host {
            Some(host) => host.trim_end_matches('/').to_string(),
            None => format!("https://http-intake.logs.{}", self.site()),
        }
    }

    /// Validate that both keys are present
    pub fn validate_auth(&self) -> Result<()> {
        if self.api_key.is_none() {
            return Err(ConfigError::MissingApiKey.into());
        }
        if self.app_key.is_none() {
            return Err(ConfigError::MissingAppKey.into());
        }
        Ok(())
    }

    /// Whether an unstable operation has been switched on.
    pub fn is_unstable_operation_enabled(&self, operation_id: &str) -> bool {
        self.unstable_operations
            .get(operation_id)
            .copied()
            .unwrap_or(false)
    }
}
