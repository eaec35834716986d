//! Log search and intake operations

use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;

use crate::client::datadog::{ApiRequest, AuthScheme, DatadogClient, Server};
use crate::client::models::{HttpLogItem, Log, LogsListResponse};
use crate::client::pagination::{PaginatedStream, paginate};
use crate::client::params::{ListLogsGetParams, ListLogsParams, SubmitLogParams};
use crate::error::Result;

/// Log operations
#[async_trait]
pub trait LogsApi: Send + Sync {
    /// Search logs with a JSON body
    async fn list_logs(&self, params: ListLogsParams) -> Result<LogsListResponse>;

    /// Search logs with query-string filters
    async fn list_logs_get(&self, params: ListLogsGetParams) -> Result<LogsListResponse>;

    /// Send logs to the intake
    ///
    /// Authenticates with the API key only. The intake answers with an empty
    /// object on success.
    async fn submit_log(&self, body: Vec<HttpLogItem>, params: SubmitLogParams) -> Result<Value>;

    fn list_logs_with_pagination(&self, params: ListLogsParams) -> PaginatedStream<Log>
    where
        Self: Clone + Sized + 'static,
    {
        let api = self.clone();
        paginate(params, move |page| {
            let api = api.clone();
            async move { api.list_logs(page).await }
        })
    }

    fn list_logs_get_with_pagination(&self, params: ListLogsGetParams) -> PaginatedStream<Log>
    where
        Self: Clone + Sized + 'static,
    {
        let api = self.clone();
        paginate(params, move |page| {
            let api = api.clone();
            async move { api.list_logs_get(page).await }
        })
    }
}

#[async_trait]
impl LogsApi for DatadogClient {
    async fn list_logs(&self, params: ListLogsParams) -> Result<LogsListResponse> {
        let mut request =
            ApiRequest::new("v2.ListLogs", Method::POST, "/api/v2/logs/events/search");
        if let Some(body) = &params.body {
            request = request.json(body)?;
        }
        self.execute(request).await
    }

    async fn list_logs_get(&self, params: ListLogsGetParams) -> Result<LogsListResponse> {
        let request = ApiRequest::new("v2.ListLogsGet", Method::GET, "/api/v2/logs/events");
        self.execute(params.apply(request)).await
    }

    async fn submit_log(&self, body: Vec<HttpLogItem>, params: SubmitLogParams) -> Result<Value> {
        let request = ApiRequest::new("v2.SubmitLog", Method::POST, "/api/v2/logs")
            .server(Server::LogsIntake)
            .auth(AuthScheme::ApiKey)
            .query_opt("ddtags", params.ddtags.as_ref())
            .content_encoding(params.content_encoding)
            .json(&body)?;
        self.execute(request).await
    }
}
