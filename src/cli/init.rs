//! Init command implementation

use colored::Colorize;
use dialoguer::{Password, Select, theme::ColorfulTheme};

use crate::cli::args::GlobalOptions;
use crate::client::{DatadogClient, ValidationApi};
use crate::config::{Config, DEFAULT_SITE, KNOWN_SITES};
use crate::error::{ApiError, ConfigError, Error, Result};

/// Run the init command
///
/// Prompts for both keys and the site, checks the API key against the
/// selected site, then writes the config file. Other settings already in the
/// file are kept.
pub async fn run(opts: &GlobalOptions) -> Result<()> {
    println!("{}", "Welcome to ddop!".bold().green());
    println!("Let's set up your Datadog configuration.\n");

    let existing = Config::load_at(opts.config_ref()).unwrap_or_default();
    let theme = ColorfulTheme::default();

    let api_key: String = Password::with_theme(&theme)
        .with_prompt("Enter your Datadog API key")
        .interact()?;

    let app_key: String = Password::with_theme(&theme)
        .with_prompt("Enter your Datadog application key")
        .interact()?;

    let current_site = opts
        .site
        .as_deref()
        .or(existing.site.as_deref())
        .unwrap_or(DEFAULT_SITE);
    let selection = Select::with_theme(&theme)
        .with_prompt("Select your Datadog site")
        .items(&KNOWN_SITES)
        .default(site_index(current_site))
        .interact()?;
    let site = KNOWN_SITES.get(selection).copied().unwrap_or(DEFAULT_SITE);

    let config = apply_setup(existing, api_key, app_key, site);

    println!("\n{}", "Validating API key...".cyan());
    let mut client_config = config.clone();
    if let Some(host) = &opts.api_host {
        client_config.api_host = Some(host.clone());
    }
    let client = DatadogClient::from_config(&client_config)?;
    verify_api_key(&client, site).await?;
    println!("{}", "✓ API key is valid".green());

    config.save_at(opts.config_ref())?;

    let config_path = Config::resolve_path(opts.config_ref())?;
    println!(
        "\n{} Configuration saved to: {}",
        "✓".green(),
        config_path.display()
    );
    println!("  Site: {}", site.bold());

    println!("\n{}", "You're all set! Try running:".bold());
    println!("  {} - Show configuration status", "ddop status".cyan());
    println!("  {} - Recent security signals", "ddop signal list".cyan());
    println!("  {} - Search logs", "ddop log list -q 'status:error'".cyan());

    Ok(())
}

/// Position of `site` in the site picker.
fn site_index(site: &str) -> usize {
    KNOWN_SITES.iter().position(|s| *s == site).unwrap_or(0)
}

/// Merge freshly entered keys and site into an existing config.
pub fn apply_setup(mut config: Config, api_key: String, app_key: String, site: &str) -> Config {
    config.api_key = Some(api_key);
    config.app_key = Some(app_key);
    config.site = if site == DEFAULT_SITE {
        None
    } else {
        Some(site.to_string())
    };
    config
}

/// Check the API key, turning a rejection into a config error.
pub async fn verify_api_key<C: ValidationApi>(client: &C, site: &str) -> Result<()> {
    match client.validate_api_key().await {
        Ok(validation) if validation.valid == Some(false) => Err(rejected(site)),
        Ok(_) => Ok(()),
        Err(Error::Api(ApiError::Unauthorized(_) | ApiError::Forbidden(_))) => Err(rejected(site)),
        Err(e) => Err(e),
    }
}

fn rejected(site: &str) -> Error {
    ConfigError::Invalid(format!("The API key was rejected by {}", site)).into()
}
