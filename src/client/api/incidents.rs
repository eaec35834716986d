//! Incident operations
//!
//! Both operations are unstable and fail with
//! [`ApiError::UnstableOperationDisabled`](crate::error::ApiError) until
//! enabled in the client options.

use async_trait::async_trait;
use reqwest::Method;

use crate::client::datadog::{ApiRequest, DatadogClient};
use crate::client::models::{IncidentResponse, IncidentResponseData, IncidentsResponse};
use crate::client::pagination::{PaginatedStream, paginate};
use crate::client::params::{GetIncidentParams, ListIncidentsParams};
use crate::error::Result;

/// Incident management operations
#[async_trait]
pub trait IncidentsApi: Send + Sync {
    async fn list_incidents(&self, params: ListIncidentsParams) -> Result<IncidentsResponse>;

    async fn get_incident(
        &self,
        incident_id: &str,
        params: GetIncidentParams,
    ) -> Result<IncidentResponse>;

    /// Stream every incident, advancing `page[offset]` by the page size.
    fn list_incidents_with_pagination(
        &self,
        params: ListIncidentsParams,
    ) -> PaginatedStream<IncidentResponseData>
    where
        Self: Clone + Sized + 'static,
    {
        let api = self.clone();
        paginate(params, move |page| {
            let api = api.clone();
            async move { api.list_incidents(page).await }
        })
    }
}

#[async_trait]
impl IncidentsApi for DatadogClient {
    async fn list_incidents(&self, params: ListIncidentsParams) -> Result<IncidentsResponse> {
        let request = ApiRequest::new("v2.ListIncidents", Method::GET, "/api/v2/incidents")
            .unstable();
        self.execute(params.apply(request)).await
    }

    async fn get_incident(
        &self,
        incident_id: &str,
        params: GetIncidentParams,
    ) -> Result<IncidentResponse> {
        let request = ApiRequest::new(
            "v2.GetIncident",
            Method::GET,
            "/api/v2/incidents/{incident_id}",
        )
        .path_param("incident_id", incident_id)
        .unstable();
        self.execute(params.apply(request)).await
    }
}
