//! Security signal commands

use clap::{Subcommand, ValueEnum};
use colored::Colorize;
use log::debug;

use crate::cli::args::GlobalOptions;
use crate::cli::handlers::print_listing;
use crate::cli::{CommandContext, LimitArgs, OutputFormat, QueryArgs};
use crate::client::models::{
    ArchiveReason, AssigneeUpdateRequest, IncidentsUpdateRequest, Signal, SignalListRequest,
    SignalState, StateUpdateRequest, TriageUpdateResponse, TriageUser,
};
use crate::client::{ListSignalsParams, SearchSignalsParams, SecurityMonitoringApi};
use crate::error::{ApiError, Error, Result};
use crate::models::SignalDisplay;
use crate::models::display::{signal_details, triage_details};
use crate::output::print_item;

/// Security signal subcommands
#[derive(Subcommand, Debug)]
pub enum SignalCommands {
    /// List signals matching a query
    #[command(
        visible_alias = "ls",
        after_help = "EXAMPLES:\n  \
            ddop signal list                              # Last 15 minutes\n  \
            ddop signal list --from 24h -q 'status:high'  # High severity, last day\n  \
            ddop signal list --from 7d --all --format json"
    )]
    List {
        #[command(flatten)]
        query: QueryArgs,

        #[command(flatten)]
        limit: LimitArgs,
    },

    /// Search signals with a request body (same filters as list)
    Search {
        #[command(flatten)]
        query: QueryArgs,

        #[command(flatten)]
        limit: LimitArgs,
    },

    /// Show a single signal
    #[command(visible_alias = "g")]
    Get {
        /// Signal ID
        signal_id: String,
    },

    /// Change the triage state of a signal
    #[command(after_help = "EXAMPLES:\n  \
            ddop signal state <ID> under-review\n  \
            ddop signal state <ID> archived --reason false-positive --comment 'Pentest'\n  \
            ddop signal state <ID> open")]
    State {
        /// Signal ID
        signal_id: String,

        /// New state
        #[arg(value_enum)]
        state: TriageState,

        /// Why the signal is archived (only with `archived`)
        #[arg(long, value_enum)]
        reason: Option<ArchiveReasonArg>,

        /// Free-form archive comment (only with `archived`)
        #[arg(long)]
        comment: Option<String>,

        /// Expected triage version, rejected by the API when stale
        #[arg(long)]
        version: Option<i64>,
    },

    /// Assign a signal to a user, or unassign it
    #[command(after_help = "EXAMPLES:\n  \
            ddop signal assign <ID> 773b045d-ccf8-4808-bd3b-955ef6a8c940\n  \
            ddop signal assign <ID> --unassign")]
    Assign {
        /// Signal ID
        signal_id: String,

        /// UUID of the assignee
        #[arg(required_unless_present = "unassign")]
        assignee: Option<String>,

        /// Remove the current assignee
        #[arg(long, conflicts_with = "assignee")]
        unassign: bool,

        /// Expected triage version
        #[arg(long)]
        version: Option<i64>,
    },

    /// Link a signal to incidents (replaces the current list)
    Incidents {
        /// Signal ID
        signal_id: String,

        /// Incident IDs, comma-separated or repeated
        #[arg(value_delimiter = ',', required_unless_present = "clear")]
        incident_ids: Vec<i64>,

        /// Remove every incident link
        #[arg(long, conflicts_with = "incident_ids")]
        clear: bool,

        /// Expected triage version
        #[arg(long)]
        version: Option<i64>,
    },
}

/// Triage states accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TriageState {
    Open,
    UnderReview,
    Archived,
}

impl From<TriageState> for SignalState {
    fn from(state: TriageState) -> Self {
        match state {
            TriageState::Open => SignalState::Open,
            TriageState::UnderReview => SignalState::UnderReview,
            TriageState::Archived => SignalState::Archived,
        }
    }
}

/// Archive reasons accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ArchiveReasonArg {
    #[value(name = "none")]
    Unspecified,
    FalsePositive,
    TestingOrMaintenance,
    InvestigatedCaseOpened,
    Other,
}

impl From<ArchiveReasonArg> for ArchiveReason {
    fn from(reason: ArchiveReasonArg) -> Self {
        match reason {
            ArchiveReasonArg::Unspecified => ArchiveReason::Unspecified,
            ArchiveReasonArg::FalsePositive => ArchiveReason::FalsePositive,
            ArchiveReasonArg::TestingOrMaintenance => ArchiveReason::TestingOrMaintenance,
            ArchiveReasonArg::InvestigatedCaseOpened => ArchiveReason::InvestigatedCaseOpened,
            ArchiveReasonArg::Other => ArchiveReason::Other,
        }
    }
}

/// Run a signal subcommand
pub async fn run(opts: &GlobalOptions, cmd: SignalCommands) -> Result<()> {
    match cmd {
        SignalCommands::List { query, limit } => list(opts, &query, &limit).await,
        SignalCommands::Search { query, limit } => search(opts, &query, &limit).await,
        SignalCommands::Get { signal_id } => get(opts, &signal_id).await,
        SignalCommands::State {
            signal_id,
            state,
            reason,
            comment,
            version,
        } => {
            let body = state_request(state, reason, comment, version)?;
            let ctx = CommandContext::new(opts)?;
            let response = ctx
                .client
                .edit_security_monitoring_signal_state(&signal_id, body)
                .await?;
            print_triage(&ctx, &response, "State updated")
        }
        SignalCommands::Assign {
            signal_id,
            assignee,
            unassign: _,
            version,
        } => {
            let ctx = CommandContext::new(opts)?;
            let response = assign(&ctx.client, &signal_id, assignee, version).await?;
            print_triage(&ctx, &response, "Assignee updated")
        }
        SignalCommands::Incidents {
            signal_id,
            incident_ids,
            clear: _,
            version,
        } => {
            let mut body = IncidentsUpdateRequest::new(incident_ids);
            body.data.attributes.version = version;
            let ctx = CommandContext::new(opts)?;
            let response = ctx
                .client
                .edit_security_monitoring_signal_incidents(&signal_id, body)
                .await?;
            print_triage(&ctx, &response, "Incidents updated")
        }
    }
}

/// Run the signal list command
pub async fn list(opts: &GlobalOptions, query: &QueryArgs, limit: &LimitArgs) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let params = list_params(query, limit, ctx.page_size())?;
    let stream = ctx
        .client
        .list_security_monitoring_signals_with_pagination(params);
    print_listing::<Signal, SignalDisplay>(stream, limit.max_items(), "signals", ctx.format).await
}

/// Run the signal search command
pub async fn search(opts: &GlobalOptions, query: &QueryArgs, limit: &LimitArgs) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let params = search_params(query, limit, ctx.page_size())?;
    let stream = ctx
        .client
        .search_security_monitoring_signals_with_pagination(params);
    print_listing::<Signal, SignalDisplay>(stream, limit.max_items(), "signals", ctx.format).await
}

/// Run the signal get command
pub async fn get(opts: &GlobalOptions, signal_id: &str) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let signal = fetch_signal(&ctx.client, signal_id).await?;
    print_item(&signal, &signal_details(&signal), ctx.format)
}

/// Query parameters of a signal listing.
pub fn list_params(
    query: &QueryArgs,
    limit: &LimitArgs,
    preferred_page_size: usize,
) -> Result<ListSignalsParams> {
    let (from, to) = query.time_range()?;
    let mut params = ListSignalsParams::new()
        .filter_from(from)
        .sort(query.sort.into())
        .page_limit(limit.page_size(preferred_page_size) as i32);
    if let Some(q) = &query.query {
        params = params.filter_query(q.clone());
    }
    if let Some(to) = to {
        params = params.filter_to(to);
    }
    Ok(params)
}

/// Request body of a signal search.
pub fn search_params(
    query: &QueryArgs,
    limit: &LimitArgs,
    preferred_page_size: usize,
) -> Result<SearchSignalsParams> {
    let (from, to) = query.time_range()?;
    let mut body = SignalListRequest::new()
        .from(from)
        .sort(query.sort.into())
        .page_limit(limit.page_size(preferred_page_size) as i32);
    if let Some(q) = &query.query {
        body = body.query(q.clone());
    }
    if let Some(to) = to {
        body = body.to(to);
    }
    Ok(SearchSignalsParams::new().body(body))
}

/// Fetch one signal, treating an empty response as not found.
pub async fn fetch_signal<C: SecurityMonitoringApi>(client: &C, signal_id: &str) -> Result<Signal> {
    debug!("Fetching signal {}", signal_id);
    client
        .get_security_monitoring_signal(signal_id)
        .await?
        .data
        .ok_or_else(|| {
            Error::Api(ApiError::InvalidResponse(format!(
                "Signal {} returned no data",
                signal_id
            )))
        })
}

/// Body of a state change, checking archive-only options.
pub fn state_request(
    state: TriageState,
    reason: Option<ArchiveReasonArg>,
    comment: Option<String>,
    version: Option<i64>,
) -> Result<StateUpdateRequest> {
    if state != TriageState::Archived && (reason.is_some() || comment.is_some()) {
        return Err(Error::Other(
            "--reason and --comment can only be used when archiving a signal".to_string(),
        ));
    }

    let mut body = StateUpdateRequest::new(state.into());
    if let Some(reason) = reason {
        body = body.archive_reason(reason.into());
    }
    if let Some(comment) = comment {
        body = body.archive_comment(comment);
    }
    if let Some(version) = version {
        body = body.version(version);
    }
    Ok(body)
}

/// Assign or unassign (`None`) a signal.
pub async fn assign<C: SecurityMonitoringApi>(
    client: &C,
    signal_id: &str,
    assignee: Option<String>,
    version: Option<i64>,
) -> Result<TriageUpdateResponse> {
    // An empty UUID clears the assignee
    let user = TriageUser::new(assignee.unwrap_or_default());
    let mut body = AssigneeUpdateRequest::new(user);
    body.data.attributes.version = version;
    client
        .edit_security_monitoring_signal_assignee(signal_id, body)
        .await
}

fn print_triage(ctx: &CommandContext, response: &TriageUpdateResponse, action: &str) -> Result<()> {
    if ctx.format == OutputFormat::Table {
        println!("{} {}", "✓".green(), action);
    }
    print_item(response, &triage_details(response), ctx.format)
}
