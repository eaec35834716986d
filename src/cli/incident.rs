//! Incident commands
//!
//! The incidents API is unstable: its operations must be switched on in the
//! config file before use.

use clap::Subcommand;

use crate::cli::args::GlobalOptions;
use crate::cli::handlers::print_listing;
use crate::cli::{CommandContext, LimitArgs};
use crate::client::models::IncidentResponseData;
use crate::client::{GetIncidentParams, IncidentsApi, ListIncidentsParams};
use crate::error::{ApiError, Error, Result};
use crate::models::IncidentDisplay;
use crate::models::display::incident_details;
use crate::output::print_item;

/// Incident subcommands
#[derive(Subcommand, Debug)]
pub enum IncidentCommands {
    /// List incidents
    #[command(
        visible_alias = "ls",
        after_help = "Requires in ~/.ddop/config.yaml:\n  \
            unstable_operations:\n    \
            v2.ListIncidents: true"
    )]
    List {
        #[command(flatten)]
        limit: LimitArgs,
    },

    /// Show a single incident
    #[command(
        visible_alias = "g",
        after_help = "Requires in ~/.ddop/config.yaml:\n  \
            unstable_operations:\n    \
            v2.GetIncident: true"
    )]
    Get {
        /// Incident ID (UUID)
        incident_id: String,
    },
}

/// Run an incident subcommand
pub async fn run(opts: &GlobalOptions, cmd: IncidentCommands) -> Result<()> {
    let result = match cmd {
        IncidentCommands::List { limit } => list(opts, &limit).await,
        IncidentCommands::Get { incident_id } => get(opts, &incident_id).await,
    };
    result.map_err(explain_unstable)
}

/// Run the incident list command
pub async fn list(opts: &GlobalOptions, limit: &LimitArgs) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let params = list_params(limit, ctx.page_size());
    let stream = ctx.client.list_incidents_with_pagination(params);
    print_listing::<IncidentResponseData, IncidentDisplay>(
        stream,
        limit.max_items(),
        "incidents",
        ctx.format,
    )
    .await
}

/// Run the incident get command
pub async fn get(opts: &GlobalOptions, incident_id: &str) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let incident = fetch_incident(&ctx.client, incident_id).await?;
    print_item(&incident, &incident_details(&incident), ctx.format)
}

/// Query parameters of an incident listing.
pub fn list_params(limit: &LimitArgs, preferred_page_size: usize) -> ListIncidentsParams {
    ListIncidentsParams::new().page_size(limit.page_size(preferred_page_size) as i64)
}

pub async fn fetch_incident<C: IncidentsApi>(
    client: &C,
    incident_id: &str,
) -> Result<IncidentResponseData> {
    let response = client
        .get_incident(incident_id, GetIncidentParams::new())
        .await?;
    Ok(response.data)
}

/// Add the config needed to enable a disabled unstable operation.
fn explain_unstable(err: Error) -> Error {
    match err {
        Error::Api(ApiError::UnstableOperationDisabled(op)) => Error::Other(format!(
            "Unstable operation '{}' is disabled. Enable it in your config file:\n  \
             unstable_operations:\n    {}: true",
            op, op
        )),
        other => other,
    }
}
