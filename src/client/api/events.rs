//! Event stream operations

use async_trait::async_trait;
use reqwest::Method;

use crate::client::datadog::{ApiRequest, DatadogClient};
use crate::client::models::{EventResponse, EventsListResponse};
use crate::client::pagination::{PaginatedStream, paginate};
use crate::client::params::{ListEventsParams, SearchEventsParams};
use crate::error::Result;

/// Event operations
#[async_trait]
pub trait EventsApi: Send + Sync {
    async fn list_events(&self, params: ListEventsParams) -> Result<EventsListResponse>;

    async fn search_events(&self, params: SearchEventsParams) -> Result<EventsListResponse>;

    fn list_events_with_pagination(
        &self,
        params: ListEventsParams,
    ) -> PaginatedStream<EventResponse>
    where
        Self: Clone + Sized + 'static,
    {
        let api = self.clone();
        paginate(params, move |page| {
            let api = api.clone();
            async move { api.list_events(page).await }
        })
    }

    fn search_events_with_pagination(
        &self,
        params: SearchEventsParams,
    ) -> PaginatedStream<EventResponse>
    where
        Self: Clone + Sized + 'static,
    {
        let api = self.clone();
        paginate(params, move |page| {
            let api = api.clone();
            async move { api.search_events(page).await }
        })
    }
}

#[async_trait]
impl EventsApi for DatadogClient {
    async fn list_events(&self, params: ListEventsParams) -> Result<EventsListResponse> {
        let request = ApiRequest::new("v2.ListEvents", Method::GET, "/api/v2/events");
        self.execute(params.apply(request)).await
    }

    async fn search_events(&self, params: SearchEventsParams) -> Result<EventsListResponse> {
        let mut request =
            ApiRequest::new("v2.SearchEvents", Method::POST, "/api/v2/events/search");
        if let Some(body) = &params.body {
            request = request.json(body)?;
        }
        self.execute(request).await
    }
}
