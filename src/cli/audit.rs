//! Audit trail commands

use crate::cli::args::GlobalOptions;
use crate::cli::handlers::print_listing;
use crate::cli::rum::event_query_params;
use crate::cli::{CommandContext, LimitArgs, QueryArgs};
use crate::client::models::AuditLogsEvent;
use crate::client::{AuditApi, ListAuditLogsParams};
use crate::error::Result;
use crate::models::AuditDisplay;

/// Run the audit list command
pub async fn list(opts: &GlobalOptions, query: &QueryArgs, limit: &LimitArgs) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let params: ListAuditLogsParams = event_query_params(query, limit, ctx.page_size())?;
    let stream = ctx.client.list_audit_logs_with_pagination(params);
    print_listing::<AuditLogsEvent, AuditDisplay>(
        stream,
        limit.max_items(),
        "audit events",
        ctx.format,
    )
    .await
}
