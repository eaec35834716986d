//! CLI command definitions and handlers

use clap::{Parser, Subcommand};

pub mod args;
pub mod audit;
pub mod context;
pub mod event;
pub mod handlers;
pub mod incident;
pub mod init;
pub mod logs;
pub mod rum;
pub mod signal;
pub mod status;

pub use args::{GlobalOptions, LimitArgs, OutputFormat, QueryArgs, SortDir};
pub use context::CommandContext;

use crate::error::Result;
use incident::IncidentCommands;
use logs::LogCommands;
use signal::SignalCommands;

/// ddop - command-line companion for the Datadog API
#[derive(Parser, Debug)]
#[command(name = "ddop")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (table, json)
    #[arg(
        long,
        global = true,
        env = "DDOP_FORMAT",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: Option<OutputFormat>,

    /// Override config file location
    #[arg(long, global = true, env = "DDOP_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Datadog site (datadoghq.com, datadoghq.eu, us3.datadoghq.com, ...)
    #[arg(long, global = true)]
    pub site: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "DDOP_DEBUG", hide_env = true)]
    pub debug: bool,

    /// Send every request to this base URL (proxies, testing)
    #[arg(long, global = true, env = "DDOP_API_HOST", hide = true)]
    pub api_host: Option<String>,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize ddop configuration
    Init,

    /// Show key and configuration status
    Status,

    /// Display version information
    Version,

    /// Search and triage security signals
    #[command(subcommand)]
    Signal(SignalCommands),

    /// Search and submit logs
    #[command(subcommand)]
    Log(LogCommands),

    /// List RUM events
    #[command(subcommand)]
    Rum(ListOnlyCommands),

    /// List audit trail events
    #[command(subcommand)]
    Audit(ListOnlyCommands),

    /// List events from the event stream
    #[command(subcommand)]
    Event(ListOnlyCommands),

    /// View incidents (unstable API)
    #[command(subcommand)]
    Incident(IncidentCommands),
}

/// Subcommands of resources that can only be listed
#[derive(Subcommand, Debug)]
pub enum ListOnlyCommands {
    /// List matching events, newest first
    #[command(
        visible_alias = "ls",
        after_help = "EXAMPLES:\n  \
            ddop audit list --from 7d -q '@evt.name:Dashboard'\n  \
            ddop rum list -q '@type:error' --limit 20\n  \
            ddop event list --from 2024-06-01 --to 2024-06-02 --all --format json"
    )]
    List {
        #[command(flatten)]
        query: QueryArgs,

        #[command(flatten)]
        limit: LimitArgs,
    },
}

/// Run the parsed command line.
pub async fn dispatch(cli: Cli) -> Result<()> {
    let opts = GlobalOptions::from_cli(&cli);

    match cli.command {
        Commands::Init => init::run(&opts).await,
        Commands::Status => status::run(&opts).await,
        Commands::Version => {
            println!("ddop version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::Signal(cmd) => signal::run(&opts, cmd).await,
        Commands::Log(cmd) => logs::run(&opts, cmd).await,
        Commands::Rum(ListOnlyCommands::List { query, limit }) => {
            rum::list(&opts, &query, &limit).await
        }
        Commands::Audit(ListOnlyCommands::List { query, limit }) => {
            audit::list(&opts, &query, &limit).await
        }
        Commands::Event(ListOnlyCommands::List { query, limit }) => {
            event::list(&opts, &query, &limit).await
        }
        Commands::Incident(cmd) => incident::run(&opts, cmd).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_list_defaults() {
        let cli = Cli::try_parse_from(["ddop", "audit", "list"]).unwrap();
        match cli.command {
            Commands::Audit(ListOnlyCommands::List { query, limit }) => {
                assert_eq!(query.from, "15m");
                assert_eq!(query.to, None);
                assert_eq!(query.sort, SortDir::Desc);
                assert_eq!(limit.limit, 100);
                assert!(!limit.all);
            }
            other => panic!("Unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_all_conflicts_with_limit() {
        assert!(Cli::try_parse_from(["ddop", "rum", "list", "--all", "--limit", "5"]).is_err());
        assert!(Cli::try_parse_from(["ddop", "rum", "list", "--all"]).is_ok());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "ddop", "event", "list", "-q", "source:github", "--format", "json",
        ])
        .unwrap();
        assert_eq!(cli.format, Some(OutputFormat::Json));
    }
}
