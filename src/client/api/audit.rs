//! Audit trail operations

use async_trait::async_trait;
use reqwest::Method;

use crate::client::datadog::{ApiRequest, DatadogClient};
use crate::client::models::{AuditLogsEvent, AuditLogsEventsResponse};
use crate::client::pagination::{PaginatedStream, paginate};
use crate::client::params::{ListAuditLogsParams, SearchAuditLogsParams};
use crate::error::Result;

/// Audit trail operations
#[async_trait]
pub trait AuditApi: Send + Sync {
    async fn list_audit_logs(&self, params: ListAuditLogsParams) -> Result<AuditLogsEventsResponse>;

    async fn search_audit_logs(
        &self,
        params: SearchAuditLogsParams,
    ) -> Result<AuditLogsEventsResponse>;

    fn list_audit_logs_with_pagination(
        &self,
        params: ListAuditLogsParams,
    ) -> PaginatedStream<AuditLogsEvent>
    where
        Self: Clone + Sized + 'static,
    {
        let api = self.clone();
        paginate(params, move |page| {
            let api = api.clone();
            async move { api.list_audit_logs(page).await }
        })
    }

    fn search_audit_logs_with_pagination(
        &self,
        params: SearchAuditLogsParams,
    ) -> PaginatedStream<AuditLogsEvent>
    where
        Self: Clone + Sized + 'static,
    {
        let api = self.clone();
        paginate(params, move |page| {
            let api = api.clone();
            async move { api.search_audit_logs(page).await }
        })
    }
}

#[async_trait]
impl AuditApi for DatadogClient {
    async fn list_audit_logs(&self, params: ListAuditLogsParams) -> Result<AuditLogsEventsResponse> {
        let request = ApiRequest::new("v2.ListAuditLogs", Method::GET, "/api/v2/audit/events");
        self.execute(params.apply(request)).await
    }

    async fn search_audit_logs(
        &self,
        params: SearchAuditLogsParams,
    ) -> Result<AuditLogsEventsResponse> {
        let mut request =
            ApiRequest::new("v2.SearchAuditLogs", Method::POST, "/api/v2/audit/events/search");
        if let Some(body) = &params.body {
            request = request.json(body)?;
        }
        self.execute(request).await
    }
}
