//! Command execution context
//!
//! Provides a unified context for command execution, eliminating boilerplate
//! for config loading, key validation, and client initialization.

use log::debug;

use crate::cli::OutputFormat;
use crate::cli::args::GlobalOptions;
use crate::client::DatadogClient;
use crate::config::Config;
use crate::error::Result;

/// Context for command execution containing config, client, and runtime options.
pub struct CommandContext {
    /// Loaded and validated configuration
    pub config: Config,
    /// API client built from the configuration
    pub client: DatadogClient,
    /// Output format preference
    pub format: OutputFormat,
}

impl CommandContext {
    /// Create a new command context with full initialization.
    ///
    /// This handles:
    /// - Loading the config file (if any) and environment overrides
    /// - Applying `--site` and `--api-host`
    /// - Validating the site and that both keys are present
    /// - Creating the API client
    ///
    /// # Errors
    /// Returns error if config cannot be parsed, a key is missing or the site
    /// is unknown.
    pub fn new(opts: &GlobalOptions) -> Result<Self> {
        let config = Self::load_config(opts)?;
        config.validate_auth()?;

        debug!("Using API at {}", config.api_base_url());
        let client = DatadogClient::from_config(&config)?;
        let format = opts.resolve_format(&config);

        Ok(Self {
            config,
            client,
            format,
        })
    }

    /// Load config with CLI overrides applied, without requiring keys.
    pub fn load_config(opts: &GlobalOptions) -> Result<Config> {
        let config = Self::resolve_config(opts)?;
        config.validate_site()?;
        Ok(config)
    }

    /// Config file, environment and CLI layers merged, unvalidated.
    pub fn resolve_config(opts: &GlobalOptions) -> Result<Config> {
        let mut config = Config::resolve(opts.config_ref())?;
        if let Some(site) = &opts.site {
            config.site = Some(site.clone());
        }
        if let Some(host) = &opts.api_host {
            config.api_host = Some(host.clone());
        }
        Ok(config)
    }

    /// Preferred page size from the config file.
    pub fn page_size(&self) -> usize {
        self.config.preferences.page_size
    }
}
