//! Event stream commands

use crate::cli::args::GlobalOptions;
use crate::cli::handlers::print_listing;
use crate::cli::{CommandContext, LimitArgs, QueryArgs};
use crate::client::models::EventResponse;
use crate::client::params::format_datetime;
use crate::client::{EventsApi, ListEventsParams};
use crate::error::Result;
use crate::models::EventDisplay;

/// Run the event list command
pub async fn list(opts: &GlobalOptions, query: &QueryArgs, limit: &LimitArgs) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let params = list_params(query, limit, ctx.page_size())?;
    let stream = ctx.client.list_events_with_pagination(params);
    print_listing::<EventResponse, EventDisplay>(stream, limit.max_items(), "events", ctx.format)
        .await
}

/// Query parameters of an event listing.
pub fn list_params(
    query: &QueryArgs,
    limit: &LimitArgs,
    preferred_page_size: usize,
) -> Result<ListEventsParams> {
    let (from, to) = query.time_range()?;
    let mut params = ListEventsParams::new()
        .filter_from(format_datetime(&from))
        .sort(query.sort.into())
        .page_limit(limit.page_size(preferred_page_size) as i32);
    if let Some(q) = &query.query {
        params = params.filter_query(q.clone());
    }
    if let Some(to) = to {
        params = params.filter_to(format_datetime(&to));
    }
    Ok(params)
}
