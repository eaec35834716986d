//! RUM event operations

use async_trait::async_trait;
use reqwest::Method;

use crate::client::datadog::{ApiRequest, DatadogClient};
use crate::client::models::{RumEvent, RumEventsResponse, RumSearchEventsRequest};
use crate::client::pagination::{PaginatedStream, paginate};
use crate::client::params::{ListRumEventsParams, SearchParams};
use crate::error::Result;

/// Real User Monitoring event operations
#[async_trait]
pub trait RumApi: Send + Sync {
    async fn list_rum_events(&self, params: ListRumEventsParams) -> Result<RumEventsResponse>;

    /// Search RUM events; unlike the other searches the body is required
    async fn search_rum_events(&self, body: RumSearchEventsRequest) -> Result<RumEventsResponse>;

    fn list_rum_events_with_pagination(
        &self,
        params: ListRumEventsParams,
    ) -> PaginatedStream<RumEvent>
    where
        Self: Clone + Sized + 'static,
    {
        let api = self.clone();
        paginate(params, move |page| {
            let api = api.clone();
            async move { api.list_rum_events(page).await }
        })
    }

    fn search_rum_events_with_pagination(
        &self,
        body: RumSearchEventsRequest,
    ) -> PaginatedStream<RumEvent>
    where
        Self: Clone + Sized + 'static,
    {
        let api = self.clone();
        let params: SearchParams<RumSearchEventsRequest> = SearchParams::new().body(body);
        paginate(params, move |page| {
            let api = api.clone();
            async move { api.search_rum_events(page.body.unwrap_or_default()).await }
        })
    }
}

#[async_trait]
impl RumApi for DatadogClient {
    async fn list_rum_events(&self, params: ListRumEventsParams) -> Result<RumEventsResponse> {
        let request = ApiRequest::new("v2.ListRUMEvents", Method::GET, "/api/v2/rum/events");
        self.execute(params.apply(request)).await
    }

    async fn search_rum_events(&self, body: RumSearchEventsRequest) -> Result<RumEventsResponse> {
        let request =
            ApiRequest::new("v2.SearchRUMEvents", Method::POST, "/api/v2/rum/events/search")
                .json(&body)?;
        self.execute(request).await
    }
}
