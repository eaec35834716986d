//! RUM event commands

use crate::cli::args::GlobalOptions;
use crate::cli::handlers::print_listing;
use crate::cli::{CommandContext, LimitArgs, QueryArgs};
use crate::client::models::RumEvent;
use crate::client::{EventQueryParams, ListRumEventsParams, RumApi};
use crate::error::Result;
use crate::models::RumEventDisplay;

/// Run the rum list command
pub async fn list(opts: &GlobalOptions, query: &QueryArgs, limit: &LimitArgs) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let params: ListRumEventsParams = event_query_params(query, limit, ctx.page_size())?;
    let stream = ctx.client.list_rum_events_with_pagination(params);
    print_listing::<RumEvent, RumEventDisplay>(stream, limit.max_items(), "RUM events", ctx.format)
        .await
}

/// Query parameters shared by the RUM and audit GET listings.
pub fn event_query_params(
    query: &QueryArgs,
    limit: &LimitArgs,
    preferred_page_size: usize,
) -> Result<EventQueryParams> {
    let (from, to) = query.time_range()?;
    let mut params = EventQueryParams::new()
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
