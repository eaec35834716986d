//! Status command implementation

use colored::Colorize;

use crate::cli::CommandContext;
use crate::cli::args::GlobalOptions;
use crate::client::{DatadogClient, ValidationApi};
use crate::config::Config;
use crate::error::{ApiError, Error, Result};

/// Outcome of checking the API key against the site
#[derive(Debug, Clone, PartialEq)]
pub enum KeyCheck {
    Valid,
    Rejected,
    Failed(String),
}

/// Run the status command to display configuration status
pub async fn run(opts: &GlobalOptions) -> Result<()> {
    println!("{}\n", "ddop Configuration Status".bold());

    let config_path = Config::resolve_path(opts.config_ref())?;
    if config_path.exists() {
        println!("Config file: {}", config_path.display().to_string().cyan());
    } else {
        println!(
            "Config file: {} {}",
            config_path.display(),
            "(not found)".dimmed()
        );
    }

    let config = match CommandContext::resolve_config(opts) {
        Ok(config) => config,
        Err(e) => {
            println!("{} Configuration could not be read: {}", "✗".red(), e);
            println!();
            println!("Run {} to create a configuration file.", "ddop init".cyan());
            println!();
            return Ok(());
        }
    };

    println!();

    let site_ok = config.validate_site().is_ok();
    if site_ok {
        println!("{} Site: {}", "✓".green(), config.site());
    } else {
        println!("{} Unknown site: {}", "✗".red(), config.site());
    }

    if let Some(ref host) = config.api_host {
        println!("{} Custom API host: {}", "○".dimmed(), host.cyan());
    }

    match config.api_key.as_deref() {
        Some(key) => println!("{} API key configured ({})", "✓".green(), mask_key(key)),
        None => {
            println!("{} API key not configured", "✗".red());
            println!("  → Run 'ddop init' or set DD_API_KEY");
        }
    }

    match config.app_key.as_deref() {
        Some(key) => println!(
            "{} Application key configured ({})",
            "✓".green(),
            mask_key(key)
        ),
        None => {
            println!("{} Application key not configured", "✗".red());
            println!("  → Run 'ddop init' or set DD_APP_KEY");
        }
    }

    let unstable = enabled_unstable_operations(&config);
    if unstable.is_empty() {
        println!("{} No unstable operations enabled", "○".dimmed());
    } else {
        println!(
            "{} Unstable operations: {}",
            "⚠".yellow(),
            unstable.join(", ")
        );
    }

    if site_ok && config.api_key.is_some() {
        let client = DatadogClient::from_config(&config)?;
        match check_api_key(&client).await {
            KeyCheck::Valid => println!("{} API key accepted by {}", "✓".green(), config.site()),
            KeyCheck::Rejected => {
                println!("{} API key rejected by {}", "✗".red(), config.site())
            }
            KeyCheck::Failed(reason) => {
                println!("{} Could not validate API key: {}", "⚠".yellow(), reason)
            }
        }
    }

    println!();
    Ok(())
}

/// Ask the API whether the key is valid.
pub async fn check_api_key<C: ValidationApi>(client: &C) -> KeyCheck {
    match client.validate_api_key().await {
        Ok(validation) if validation.valid == Some(false) => KeyCheck::Rejected,
        Ok(_) => KeyCheck::Valid,
        Err(Error::Api(ApiError::Unauthorized(_) | ApiError::Forbidden(_))) => KeyCheck::Rejected,
        Err(e) => KeyCheck::Failed(e.to_string()),
    }
}

/// Show only the last four characters of a key.
pub fn mask_key(key: &str) -> String {
    let count = key.chars().count();
    if count <= 4 {
        return "*".repeat(count);
    }
    let tail: String = key.chars().skip(count - 4).collect();
    format!("{}{}", "*".repeat(8), tail)
}

fn enabled_unstable_operations(config: &Config) -> Vec<&str> {
    config
        .unstable_operations
        .iter()
        .filter(|(_, enabled)| **enabled)
        .map(|(op, _)| op.as_str())
        .collect()
}
