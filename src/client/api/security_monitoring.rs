//! Security signal operations

use async_trait::async_trait;
use reqwest::Method;

use crate::client::datadog::{ApiRequest, DatadogClient};
use crate::client::models::{
    AssigneeUpdateRequest, IncidentsUpdateRequest, Signal, SignalResponse, SignalsListResponse,
    StateUpdateRequest, TriageUpdateResponse,
};
use crate::client::pagination::{PaginatedStream, paginate};
use crate::client::params::{ListSignalsParams, SearchSignalsParams};
use crate::error::Result;

/// Security monitoring signal operations
#[async_trait]
pub trait SecurityMonitoringApi: Send + Sync {
    /// List signals matching a query (GET, filters in the query string)
    async fn list_security_monitoring_signals(
        &self,
        params: ListSignalsParams,
    ) -> Result<SignalsListResponse>;

    /// Search signals with a JSON body
    async fn search_security_monitoring_signals(
        &self,
        params: SearchSignalsParams,
    ) -> Result<SignalsListResponse>;

    async fn get_security_monitoring_signal(&self, signal_id: &str) -> Result<SignalResponse>;

    /// Change the triage state of a signal
    async fn edit_security_monitoring_signal_state(
        &self,
        signal_id: &str,
        body: StateUpdateRequest,
    ) -> Result<TriageUpdateResponse>;

    /// Assign a signal; an empty UUID unassigns it
    async fn edit_security_monitoring_signal_assignee(
        &self,
        signal_id: &str,
        body: AssigneeUpdateRequest,
    ) -> Result<TriageUpdateResponse>;

    /// Replace the incidents linked to a signal
    async fn edit_security_monitoring_signal_incidents(
        &self,
        signal_id: &str,
        body: IncidentsUpdateRequest,
    ) -> Result<TriageUpdateResponse>;

    /// Stream every signal of a listing, page by page.
    fn list_security_monitoring_signals_with_pagination(
        &self,
        params: ListSignalsParams,
    ) -> PaginatedStream<Signal>
    where
        Self: Clone + Sized + 'static,
    {
        let api = self.clone();
        paginate(params, move |page| {
            let api = api.clone();
            async move { api.list_security_monitoring_signals(page).await }
        })
    }

    /// Stream every signal of a search, page by page.
    fn search_security_monitoring_signals_with_pagination(
        &self,
        params: SearchSignalsParams,
    ) -> PaginatedStream<Signal>
    where
        Self: Clone + Sized + 'static,
    {
        let api = self.clone();
        paginate(params, move |page| {
            let api = api.clone();
            async move { api.search_security_monitoring_signals(page).await }
        })
    }
}

#[async_trait]
impl SecurityMonitoringApi for DatadogClient {
    async fn list_security_monitoring_signals(
        &self,
        params: ListSignalsParams,
    ) -> Result<SignalsListResponse> {
        let request = ApiRequest::new(
            "v2.ListSecurityMonitoringSignals",
            Method::GET,
            "/api/v2/security_monitoring/signals",
        );
        self.execute(params.apply(request)).await
    }

    async fn search_security_monitoring_signals(
        &self,
        params: SearchSignalsParams,
    ) -> Result<SignalsListResponse> {
        let mut request = ApiRequest::new(
            "v2.SearchSecurityMonitoringSignals",
            Method::POST,
            "/api/v2/security_monitoring/signals/search",
        );
        if let Some(body) = &params.body {
            request = request.json(body)?;
        }
        self.execute(request).await
    }

    async fn get_security_monitoring_signal(&self, signal_id: &str) -> Result<SignalResponse> {
        let request = ApiRequest::new(
            "v2.GetSecurityMonitoringSignal",
            Method::GET,
            "/api/v2/security_monitoring/signals/{signal_id}",
        )
        .path_param("signal_id", signal_id);
        self.execute(request).await
    }

    async fn edit_security_monitoring_signal_state(
        &self,
        signal_id: &str,
        body: StateUpdateRequest,
    ) -> Result<TriageUpdateResponse> {
        let request = ApiRequest::new(
            "v2.EditSecurityMonitoringSignalState",
            Method::PATCH,
            "/api/v2/security_monitoring/signals/{signal_id}/state",
        )
        .path_param("signal_id", signal_id)
        .json(&body)?;
        self.execute(request).await
    }

    async fn edit_security_monitoring_signal_assignee(
        &self,
        signal_id: &str,
        body: AssigneeUpdateRequest,
    ) -> Result<TriageUpdateResponse> {
        let request = ApiRequest::new(
            "v2.EditSecurityMonitoringSignalAssignee",
            Method::PATCH,
            "/api/v2/security_monitoring/signals/{signal_id}/assignee",
        )
        .path_param("signal_id", signal_id)
        .json(&body)?;
        self.execute(request).await
    }

    async fn edit_security_monitoring_signal_incidents(
        &self,
        signal_id: &str,
        body: IncidentsUpdateRequest,
    ) -> Result<TriageUpdateResponse> {
        let request = ApiRequest::new(
            "v2.EditSecurityMonitoringSignalIncidents",
            Method::PATCH,
            "/api/v2/security_monitoring/signals/{signal_id}/incidents",
        )
        .path_param("signal_id", signal_id)
        .json(&body)?;
        self.execute(request).await
    }
}
