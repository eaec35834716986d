//! Global CLI options shared across all commands

use clap::ValueEnum;
use log::warn;

use crate::cli::{Cli, OutputFormat};
use crate::config::Config;

/// Global CLI options passed to all command handlers.
///
/// Precedence is CLI flag > environment variable > config file > default.
/// This struct captures the CLI/env layer; the config file is merged in
/// `CommandContext`.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Output format (table, json); `None` defers to the config file
    pub format: Option<OutputFormat>,

    /// Custom config file path (defaults to ~/.ddop/config.yaml)
    pub config: Option<String>,

    /// Datadog site override
    pub site: Option<String>,

    /// Custom API host for proxies and testing
    pub api_host: Option<String>,
}

impl GlobalOptions {
    /// Create GlobalOptions from a parsed CLI struct.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            format: cli.format,
            config: cli.config.clone(),
            site: cli.site.clone(),
            api_host: cli.api_host.clone(),
        }
    }

    /// Get config path as `Option<&str>`.
    pub fn config_ref(&self) -> Option<&str> {
        self.config.as_deref()
    }

    /// Output format from the flag, else the config preference, else table.
    pub fn resolve_format(&self, config: &Config) -> OutputFormat {
        if let Some(format) = self.format {
            return format;
        }
        match config.preferences.format.as_deref() {
            Some(pref) => OutputFormat::from_str(pref, true).unwrap_or_else(|_| {
                warn!("Ignoring unknown format preference '{}'", pref);
                OutputFormat::default()
            }),
            None => OutputFormat::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_from_cli_copies_global_flags() {
        let cli = Cli::try_parse_from([
            "ddop",
            "--format",
            "json",
            "--config",
            "/tmp/ddop.yaml",
            "--site",
            "datadoghq.eu",
            "status",
        ])
        .unwrap();

        let opts = GlobalOptions::from_cli(&cli);

        assert_eq!(opts.format, Some(OutputFormat::Json));
        assert_eq!(opts.config_ref(), Some("/tmp/ddop.yaml"));
        assert_eq!(opts.site.as_deref(), Some("datadoghq.eu"));
    }

    #[test]
    fn test_defaults() {
        let opts = GlobalOptions::default();
        assert_eq!(opts.format, None);
        assert_eq!(opts.config_ref(), None);
        assert_eq!(opts.api_host, None);
        assert_eq!(opts.resolve_format(&Config::default()), OutputFormat::Table);
    }

    #[test]
    fn test_format_precedence() {
        let mut config = Config::default();
        config.preferences.format = Some("json".into());

        let opts = GlobalOptions::default();
        assert_eq!(opts.resolve_format(&config), OutputFormat::Json);

        let opts = GlobalOptions {
            format: Some(OutputFormat::Table),
            ..Default::default()
        };
        assert_eq!(opts.resolve_format(&config), OutputFormat::Table);

        config.preferences.format = Some("yaml".into());
        assert_eq!(
            GlobalOptions::default().resolve_format(&config),
            OutputFormat::Table
        );
    }
}
