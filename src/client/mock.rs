//! Mock Datadog API client for testing
//!
//! Serves configured items through the same page and cursor shapes the real
//! API uses, so the `*_with_pagination` helpers and command handlers can be
//! exercised without a network.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Value, json};
use tokio::sync::Mutex;

use super::api::{
    AuditApi, EventsApi, IncidentsApi, LogsApi, RumApi, SecurityMonitoringApi, ValidationApi,
};
use super::models::{
    ApiKeyValidation, AssigneeUpdateRequest, AuditLogsEvent, AuditLogsEventsResponse,
    EventResponse, EventSearchRequest, EventsListResponse, HttpLogItem, IncidentPagination,
    IncidentResponse, IncidentResponseData, IncidentResponseMeta, IncidentsResponse,
    IncidentsUpdateRequest, Log, LogsListResponse, ResponseMetadata, ResponsePage, RumEvent,
    RumEventsResponse, RumSearchEventsRequest, Signal, SignalMetadataType, SignalResponse,
    SignalState, SignalsListResponse, StateUpdateRequest, TriageAttributes, TriageUpdateData,
    TriageUpdateResponse, TriageUser,
};
use super::params::{
    GetIncidentParams, ListAuditLogsParams, ListEventsParams, ListIncidentsParams,
    ListLogsGetParams, ListLogsParams, ListRumEventsParams, ListSignalsParams,
    SearchAuditLogsParams, SearchEventsParams, SearchSignalsParams, SubmitLogParams,
};
use crate::error::{ApiError, Result};

/// Mock API client for testing.
///
/// Configure items via the `with_*` builders; list and search operations
/// serve them in pages sized by the request's page limit, with the next
/// offset as cursor.
///
/// # Example
/// ```ignore
/// let mock = MockDatadogClient::new().with_signals(signals).await;
/// let all: Vec<_> = mock
///     .list_security_monitoring_signals_with_pagination(ListSignalsParams::new())
///     .collect()
///     .await;
/// ```
#[derive(Clone, Default)]
pub struct MockDatadogClient {
    signals: Arc<Mutex<Vec<Signal>>>,
    logs: Arc<Mutex<Vec<Log>>>,
    rum_events: Arc<Mutex<Vec<RumEvent>>>,
    audit_events: Arc<Mutex<Vec<AuditLogsEvent>>>,
    events: Arc<Mutex<Vec<EventResponse>>>,
    incidents: Arc<Mutex<Vec<IncidentResponseData>>>,
    /// Triage state per signal id, updated by the edit operations
    triage: Arc<Mutex<HashMap<String, TriageAttributes>>>,
    /// Logs received by submit_log
    submitted_logs: Arc<Mutex<Vec<HttpLogItem>>>,
    invalid_key: Arc<Mutex<bool>>,
    /// Error to return on the next call, consumed on first use
    error: Arc<Mutex<Option<ApiError>>>,
    /// Answer 429 once this many calls have been made
    rate_limit_after: Arc<Mutex<Option<usize>>>,
    call_count: Arc<Mutex<CallCounts>>,
    captured_requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

/// Tracks API call counts for test verification
#[derive(Default, Debug, Clone)]
pub struct CallCounts {
    pub list_signals: usize,
    pub search_signals: usize,
    pub get_signal: usize,
    pub edit_signal: usize,
    pub list_logs: usize,
    pub submit_log: usize,
    pub list_rum_events: usize,
    pub list_audit_logs: usize,
    pub list_events: usize,
    pub list_incidents: usize,
    pub get_incident: usize,
    pub validate_api_key: usize,
}

impl CallCounts {
    pub fn total(&self) -> usize {
        self.list_signals
            + self.search_signals
            + self.get_signal
            + self.edit_signal
            + self.list_logs
            + self.submit_log
            + self.list_rum_events
            + self.list_audit_logs
            + self.list_events
            + self.list_incidents
            + self.get_incident
            + self.validate_api_key
    }
}

/// A captured API request for test assertions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CapturedRequest {
    /// Trait method called (e.g. "list_logs")
    pub method: String,
    pub query: Option<String>,
    pub cursor: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl MockDatadogClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn with_signals(self, signals: Vec<Signal>) -> Self {
        *self.signals.lock().await = signals;
        self
    }

    pub async fn with_logs(self, logs: Vec<Log>) -> Self {
        *self.logs.lock().await = logs;
        self
    }

    pub async fn with_rum_events(self, events: Vec<RumEvent>) -> Self {
        *self.rum_events.lock().await = events;
        self
    }

    pub async fn with_audit_events(self, events: Vec<AuditLogsEvent>) -> Self {
        *self.audit_events.lock().await = events;
        self
    }

    pub async fn with_events(self, events: Vec<EventResponse>) -> Self {
        *self.events.lock().await = events;
        self
    }

    pub async fn with_incidents(self, incidents: Vec<IncidentResponseData>) -> Self {
        *self.incidents.lock().await = incidents;
        self
    }

    /// Make validate_api_key report the key as invalid (403).
    pub async fn with_invalid_key(self) -> Self {
        *self.invalid_key.lock().await = true;
        self
    }

    /// Configure an error to return on the next API call.
    /// The error is consumed after one use.
    pub async fn with_error(self, error: ApiError) -> Self {
        *self.error.lock().await = Some(error);
        self
    }

    /// Answer every call after the first `calls` with a 429.
    pub async fn rate_limit_after(self, calls: usize) -> Self {
        *self.rate_limit_after.lock().await = Some(calls);
        self
    }

    pub async fn call_counts(&self) -> CallCounts {
        self.call_count.lock().await.clone()
    }

    pub async fn captured_requests(&self) -> Vec<CapturedRequest> {
        self.captured_requests.lock().await.clone()
    }

    pub async fn submitted_logs(&self) -> Vec<HttpLogItem> {
        self.submitted_logs.lock().await.clone()
    }

    async fn check_error(&self) -> Result<()> {
        {
            let mut error = self.error.lock().await;
            if let Some(e) = error.take() {
                return Err(e.into());
            }
        }

        {
            let rate_limit = self.rate_limit_after.lock().await;
            if let Some(threshold) = *rate_limit {
                let counts = self.call_count.lock().await;
                if counts.total() >= threshold {
                    return Err(ApiError::from_status(
                        429,
                        r#"{"errors":["Too many requests"]}"#,
                        Some(Duration::from_secs(1)),
                    )
                    .into());
                }
            }
        }

        Ok(())
    }

    async fn capture(&self, request: CapturedRequest) {
        self.captured_requests.lock().await.push(request);
    }

    async fn count(&self, bump: impl FnOnce(&mut CallCounts)) {
        bump(&mut *self.call_count.lock().await);
    }

    async fn triage_for(&self, signal_id: &str) -> TriageAttributes {
        self.triage
            .lock()
            .await
            .get(signal_id)
            .cloned()
            .unwrap_or_else(|| TriageAttributes {
                archive_comment: None,
                archive_comment_timestamp: None,
                archive_comment_user: None,
                archive_reason: None,
                assignee: TriageUser::new(""),
                incident_ids: Vec::new(),
                state: SignalState::Open,
                state_update_timestamp: None,
                state_update_user: None,
                additional_properties: Default::default(),
            })
    }

    async fn store_triage(&self, signal_id: &str, attributes: TriageAttributes) -> TriageUpdateResponse {
        self.triage
            .lock()
            .await
            .insert(signal_id.to_string(), attributes.clone());
        TriageUpdateResponse {
            data: TriageUpdateData {
                attributes: Some(attributes),
                id: Some(signal_id.to_string()),
                data_type: Some(SignalMetadataType::SignalMetadata),
                additional_properties: Default::default(),
            },
            additional_properties: Default::default(),
        }
    }
}

/// Slice a cursor page out of `items`; the cursor is the next start offset.
fn cursor_page<T: Clone>(
    items: &[T],
    cursor: Option<&str>,
    limit: Option<i32>,
) -> (Vec<T>, Option<ResponseMetadata>) {
    let start = cursor
        .and_then(|c| c.parse::<usize>().ok())
        .unwrap_or(0)
        .min(items.len());
    let limit = limit.map(|l| l.max(0) as usize).unwrap_or(items.len());
    let end = start.saturating_add(limit).min(items.len());

    let meta = (end < items.len()).then(|| ResponseMetadata {
        page: Some(ResponsePage {
            after: Some(end.to_string()),
            ..Default::default()
        }),
        ..Default::default()
    });
    (items[start..end].to_vec(), meta)
}

fn search_query(body: Option<&EventSearchRequest>) -> CapturedRequest {
    let body = body.cloned().unwrap_or_default();
    CapturedRequest {
        query: body.filter.and_then(|f| f.query),
        cursor: body.page.as_ref().and_then(|p| p.cursor.clone()),
        limit: body.page.as_ref().and_then(|p| p.limit).map(i64::from),
        ..Default::default()
    }
}

// ============================================================================
// SecurityMonitoringApi
// ============================================================================

#[async_trait]
impl SecurityMonitoringApi for MockDatadogClient {
    async fn list_security_monitoring_signals(
        &self,
        params: ListSignalsParams,
    ) -> Result<SignalsListResponse> {
        self.capture(CapturedRequest {
            method: "list_security_monitoring_signals".into(),
            query: params.filter_query.clone(),
            cursor: params.page_cursor.clone(),
            limit: params.page_limit.map(i64::from),
            offset: None,
        })
        .await;
        self.check_error().await?;
        self.count(|c| c.list_signals += 1).await;

        let signals = self.signals.lock().await;
        let (data, meta) =
            cursor_page(&signals, params.page_cursor.as_deref(), params.page_limit);
        Ok(SignalsListResponse {
            data: Some(data),
            meta,
            ..Default::default()
        })
    }

    async fn search_security_monitoring_signals(
        &self,
        params: SearchSignalsParams,
    ) -> Result<SignalsListResponse> {
        let body = params.body.unwrap_or_default();
        let cursor = body.page.as_ref().and_then(|p| p.cursor.clone());
        let limit = body.page.as_ref().and_then(|p| p.limit);
        self.capture(CapturedRequest {
            method: "search_security_monitoring_signals".into(),
            query: body.filter.as_ref().and_then(|f| f.query.clone()),
            cursor: cursor.clone(),
            limit: limit.map(i64::from),
            offset: None,
        })
        .await;
        self.check_error().await?;
        self.count(|c| c.search_signals += 1).await;

        let signals = self.signals.lock().await;
        let (data, meta) = cursor_page(&signals, cursor.as_deref(), limit);
        Ok(SignalsListResponse {
            data: Some(data),
            meta,
            ..Default::default()
        })
    }

    async fn get_security_monitoring_signal(&self, signal_id: &str) -> Result<SignalResponse> {
        self.check_error().await?;
        self.count(|c| c.get_signal += 1).await;

        let signals = self.signals.lock().await;
        let signal = signals
            .iter()
            .find(|s| s.id.as_deref() == Some(signal_id))
            .cloned()
            .ok_or_else(|| ApiError::from_status(404, r#"{"errors":["Not Found"]}"#, None))?;
        Ok(SignalResponse {
            data: Some(signal),
            ..Default::default()
        })
    }

    async fn edit_security_monitoring_signal_state(
        &self,
        signal_id: &str,
        body: StateUpdateRequest,
    ) -> Result<TriageUpdateResponse> {
        self.check_error().await?;
        self.count(|c| c.edit_signal += 1).await;

        let mut triage = self.triage_for(signal_id).await;
        let update = body.data.attributes;
        triage.state = update.state;
        triage.archive_reason = update.archive_reason;
        triage.archive_comment = update.archive_comment;
        Ok(self.store_triage(signal_id, triage).await)
    }

    async fn edit_security_monitoring_signal_assignee(
        &self,
        signal_id: &str,
        body: AssigneeUpdateRequest,
    ) -> Result<TriageUpdateResponse> {
        self.check_error().await?;
        self.count(|c| c.edit_signal += 1).await;

        let mut triage = self.triage_for(signal_id).await;
        triage.assignee = body.data.attributes.assignee;
        Ok(self.store_triage(signal_id, triage).await)
    }

    async fn edit_security_monitoring_signal_incidents(
        &self,
        signal_id: &str,
        body: IncidentsUpdateRequest,
    ) -> Result<TriageUpdateResponse> {
        self.check_error().await?;
        self.count(|c| c.edit_signal += 1).await;

        let mut triage = self.triage_for(signal_id).await;
        triage.incident_ids = body.data.attributes.incident_ids;
        Ok(self.store_triage(signal_id, triage).await)
    }
}

// ============================================================================
// LogsApi
// ============================================================================

#[async_trait]
impl LogsApi for MockDatadogClient {
    async fn list_logs(&self, params: ListLogsParams) -> Result<LogsListResponse> {
        let body = params.body.unwrap_or_default();
        let cursor = body.page.as_ref().and_then(|p| p.cursor.clone());
        let limit = body.page.as_ref().and_then(|p| p.limit);
        self.capture(CapturedRequest {
            method: "list_logs".into(),
            query: body.filter.as_ref().and_then(|f| f.query.clone()),
            cursor: cursor.clone(),
            limit: limit.map(i64::from),
            offset: None,
        })
        .await;
        self.check_error().await?;
        self.count(|c| c.list_logs += 1).await;

        let logs = self.logs.lock().await;
        let (data, meta) = cursor_page(&logs, cursor.as_deref(), limit);
        Ok(LogsListResponse {
            data: Some(data),
            meta,
            ..Default::default()
        })
    }

    async fn list_logs_get(&self, params: ListLogsGetParams) -> Result<LogsListResponse> {
        self.capture(CapturedRequest {
            method: "list_logs_get".into(),
            query: params.filter_query.clone(),
            cursor: params.page_cursor.clone(),
            limit: params.page_limit.map(i64::from),
            offset: None,
        })
        .await;
        self.check_error().await?;
        self.count(|c| c.list_logs += 1).await;

        let logs = self.logs.lock().await;
        let (data, meta) = cursor_page(&logs, params.page_cursor.as_deref(), params.page_limit);
        Ok(LogsListResponse {
            data: Some(data),
            meta,
            ..Default::default()
        })
    }

    async fn submit_log(&self, body: Vec<HttpLogItem>, _params: SubmitLogParams) -> Result<Value> {
        self.check_error().await?;
        self.count(|c| c.submit_log += 1).await;

        self.submitted_logs.lock().await.extend(body);
        Ok(json!({}))
    }
}

// ============================================================================
// RumApi, AuditApi, EventsApi
// ============================================================================

#[async_trait]
impl RumApi for MockDatadogClient {
    async fn list_rum_events(&self, params: ListRumEventsParams) -> Result<RumEventsResponse> {
        self.capture(CapturedRequest {
            method: "list_rum_events".into(),
            query: params.filter_query.clone(),
            cursor: params.page_cursor.clone(),
            limit: params.page_limit.map(i64::from),
            offset: None,
        })
        .await;
        self.check_error().await?;
        self.count(|c| c.list_rum_events += 1).await;

        let events = self.rum_events.lock().await;
        let (data, meta) = cursor_page(&events, params.page_cursor.as_deref(), params.page_limit);
        Ok(RumEventsResponse {
            data: Some(data),
            meta,
            ..Default::default()
        })
    }

    async fn search_rum_events(&self, body: RumSearchEventsRequest) -> Result<RumEventsResponse> {
        let captured = search_query(Some(&body));
        let (cursor, limit) = (captured.cursor.clone(), captured.limit);
        self.capture(CapturedRequest {
            method: "search_rum_events".into(),
            ..captured
        })
        .await;
        self.check_error().await?;
        self.count(|c| c.list_rum_events += 1).await;

        let events = self.rum_events.lock().await;
        let (data, meta) = cursor_page(&events, cursor.as_deref(), limit.map(|l| l as i32));
        Ok(RumEventsResponse {
            data: Some(data),
            meta,
            ..Default::default()
        })
    }
}

#[async_trait]
impl AuditApi for MockDatadogClient {
    async fn list_audit_logs(&self, params: ListAuditLogsParams) -> Result<AuditLogsEventsResponse> {
        self.capture(CapturedRequest {
            method: "list_audit_logs".into(),
            query: params.filter_query.clone(),
            cursor: params.page_cursor.clone(),
            limit: params.page_limit.map(i64::from),
            offset: None,
        })
        .await;
        self.check_error().await?;
        self.count(|c| c.list_audit_logs += 1).await;

        let events = self.audit_events.lock().await;
        let (data, meta) = cursor_page(&events, params.page_cursor.as_deref(), params.page_limit);
        Ok(AuditLogsEventsResponse {
            data: Some(data),
            meta,
            ..Default::default()
        })
    }

    async fn search_audit_logs(
        &self,
        params: SearchAuditLogsParams,
    ) -> Result<AuditLogsEventsResponse> {
        let captured = search_query(params.body.as_ref());
        let (cursor, limit) = (captured.cursor.clone(), captured.limit);
        self.capture(CapturedRequest {
            method: "search_audit_logs".into(),
            ..captured
        })
        .await;
        self.check_error().await?;
        self.count(|c| c.list_audit_logs += 1).await;

        let events = self.audit_events.lock().await;
        let (data, meta) = cursor_page(&events, cursor.as_deref(), limit.map(|l| l as i32));
        Ok(AuditLogsEventsResponse {
            data: Some(data),
            meta,
            ..Default::default()
        })
    }
}

#[async_trait]
impl EventsApi for MockDatadogClient {
    async fn list_events(&self, params: ListEventsParams) -> Result<EventsListResponse> {
        self.capture(CapturedRequest {
            method: "list_events".into(),
            query: params.filter_query.clone(),
            cursor: params.page_cursor.clone(),
            limit: params.page_limit.map(i64::from),
            offset: None,
        })
        .await;
        self.check_error().await?;
        self.count(|c| c.list_events += 1).await;

        let events = self.events.lock().await;
        let (data, meta) = cursor_page(&events, params.page_cursor.as_deref(), params.page_limit);
        Ok(EventsListResponse {
            data: Some(data),
            meta,
            ..Default::default()
        })
    }

    async fn search_events(&self, params: SearchEventsParams) -> Result<EventsListResponse> {
        let captured = search_query(params.body.as_ref());
        let (cursor, limit) = (captured.cursor.clone(), captured.limit);
        self.capture(CapturedRequest {
            method: "search_events".into(),
            ..captured
        })
        .await;
        self.check_error().await?;
        self.count(|c| c.list_events += 1).await;

        let events = self.events.lock().await;
        let (data, meta) = cursor_page(&events, cursor.as_deref(), limit.map(|l| l as i32));
        Ok(EventsListResponse {
            data: Some(data),
            meta,
            ..Default::default()
        })
    }
}

// ============================================================================
// IncidentsApi, ValidationApi
// ============================================================================

#[async_trait]
impl IncidentsApi for MockDatadogClient {
    async fn list_incidents(&self, params: ListIncidentsParams) -> Result<IncidentsResponse> {
        self.capture(CapturedRequest {
            method: "list_incidents".into(),
            limit: params.page_size,
            offset: params.page_offset,
            ..Default::default()
        })
        .await;
        self.check_error().await?;
        self.count(|c| c.list_incidents += 1).await;

        let incidents = self.incidents.lock().await;
        let offset = params.page_offset.unwrap_or(0).max(0) as usize;
        let start = offset.min(incidents.len());
        let size = params
            .page_size
            .map(|s| s.max(0) as usize)
            .unwrap_or(incidents.len());
        let end = start.saturating_add(size).min(incidents.len());

        Ok(IncidentsResponse {
            data: incidents[start..end].to_vec(),
            meta: Some(IncidentResponseMeta {
                pagination: Some(IncidentPagination {
                    next_offset: Some(end as i64),
                    offset: Some(start as i64),
                    size: Some((end - start) as i64),
                    ..Default::default()
                }),
                ..Default::default()
            }),
            ..Default::default()
        })
    }

    async fn get_incident(
        &self,
        incident_id: &str,
        _params: GetIncidentParams,
    ) -> Result<IncidentResponse> {
        self.check_error().await?;
        self.count(|c| c.get_incident += 1).await;

        let incidents = self.incidents.lock().await;
        let data = incidents
            .iter()
            .find(|i| i.id == incident_id)
            .cloned()
            .ok_or_else(|| ApiError::from_status(404, r#"{"errors":["Not Found"]}"#, None))?;
        Ok(IncidentResponse {
            data,
            included: None,
            additional_properties: Default::default(),
        })
    }
}

#[async_trait]
impl ValidationApi for MockDatadogClient {
    async fn validate_api_key(&self) -> Result<ApiKeyValidation> {
        self.check_error().await?;
        self.count(|c| c.validate_api_key += 1).await;

        if *self.invalid_key.lock().await {
            return Err(ApiError::from_status(403, r#"{"errors":["Forbidden"]}"#, None).into());
        }
        Ok(ApiKeyValidation {
            valid: Some(true),
            ..Default::default()
        })
    }
}

/// Builders for fixture items shared by tests across the crate.
pub mod fixtures {
    use super::*;
    use crate::client::models::{
        IncidentResponseAttributes, IncidentType, LogAttributes, SignalAttributes,
    };

    pub fn signal(id: &str, message: &str) -> Signal {
        Signal {
            id: Some(id.to_string()),
            attributes: Some(SignalAttributes {
                message: Some(message.to_string()),
                tags: Some(vec!["source:cloudtrail".to_string()]),
                timestamp: "2024-06-01T12:00:00Z".parse().ok(),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    pub fn signals(count: usize) -> Vec<Signal> {
        (0..count)
            .map(|i| signal(&format!("sig-{}", i), &format!("Signal {}", i)))
            .collect()
    }

    pub fn log(id: &str, message: &str) -> Log {
        Log {
            id: Some(id.to_string()),
            attributes: Some(LogAttributes {
                message: Some(message.to_string()),
                service: Some("web".to_string()),
                status: Some("info".to_string()),
                host: Some("i-0123".to_string()),
                timestamp: "2024-06-01T12:00:00Z".parse().ok(),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    pub fn logs(count: usize) -> Vec<Log> {
        (0..count)
            .map(|i| log(&format!("log-{}", i), &format!("line {}", i)))
            .collect()
    }

    pub fn incident(id: &str, title: &str) -> IncidentResponseData {
        IncidentResponseData {
            attributes: Some(IncidentResponseAttributes {
                title: title.to_string(),
                ..Default::default()
            }),
            id: id.to_string(),
            relationships: None,
            incident_type: IncidentType::Incidents,
            additional_properties: Default::default(),
            unparsed_object: None,
        }
    }

    pub fn incidents(count: usize) -> Vec<IncidentResponseData> {
        (0..count)
            .map(|i| incident(&format!("inc-{}", i), &format!("Incident {}", i)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use crate::client::models::{ArchiveReason, SignalListRequest};
    use crate::error::Error;
    use futures::StreamExt;

    fn assert_full_api<T: crate::client::DatadogApi>() {}

    #[test]
    fn test_real_and_mock_clients_cover_every_api() {
        assert_full_api::<crate::client::DatadogClient>();
        assert_full_api::<MockDatadogClient>();
    }

    #[tokio::test]
    async fn test_signal_pagination_walks_every_page() {
        let mock = MockDatadogClient::new().with_signals(signals(5)).await;

        let ids: Vec<String> = mock
            .list_security_monitoring_signals_with_pagination(
                ListSignalsParams::new().filter_query("*").page_limit(2),
            )
            .map(|r| r.unwrap().id.unwrap())
            .collect()
            .await;

        assert_eq!(ids, vec!["sig-0", "sig-1", "sig-2", "sig-3", "sig-4"]);
        let cursors: Vec<_> = mock
            .captured_requests()
            .await
            .into_iter()
            .map(|r| r.cursor)
            .collect();
        assert_eq!(cursors, vec![None, Some("2".into()), Some("4".into())]);
    }

    #[tokio::test]
    async fn test_search_pagination_keeps_query_across_pages() {
        let mock = MockDatadogClient::new().with_signals(signals(3)).await;

        let count = mock
            .search_security_monitoring_signals_with_pagination(
                SearchSignalsParams::new().body(SignalListRequest::new().query("env:prod").page_limit(2)),
            )
            .count()
            .await;

        assert_eq!(count, 3);
        let requests = mock.captured_requests().await;
        assert_eq!(requests.len(), 2);
        assert!(requests.iter().all(|r| r.query.as_deref() == Some("env:prod")));
        assert!(requests.iter().all(|r| r.limit == Some(2)));
    }

    #[tokio::test]
    async fn test_exact_multiple_needs_one_extra_page() {
        let mock = MockDatadogClient::new().with_logs(logs(4)).await;

        let count = mock
            .list_logs_get_with_pagination(ListLogsGetParams::new().page_limit(2))
            .count()
            .await;

        assert_eq!(count, 4);
        // The second page is full but carries no cursor, which ends the walk.
        assert_eq!(mock.call_counts().await.list_logs, 2);
    }

    #[tokio::test]
    async fn test_default_page_size_is_applied() {
        let mock = MockDatadogClient::new().with_logs(logs(12)).await;

        let count = mock
            .list_logs_with_pagination(ListLogsParams::new())
            .count()
            .await;

        assert_eq!(count, 12);
        let requests = mock.captured_requests().await;
        assert_eq!(requests[0].limit, Some(10));
        assert_eq!(requests[1].cursor.as_deref(), Some("10"));
    }

    #[tokio::test]
    async fn test_incident_pagination_advances_offset() {
        let mock = MockDatadogClient::new().with_incidents(incidents(5)).await;

        let ids: Vec<String> = mock
            .list_incidents_with_pagination(ListIncidentsParams::new().page_size(2))
            .map(|r| r.unwrap().id)
            .collect()
            .await;

        assert_eq!(ids.len(), 5);
        let offsets: Vec<_> = mock
            .captured_requests()
            .await
            .into_iter()
            .map(|r| r.offset)
            .collect();
        assert_eq!(offsets, vec![None, Some(2), Some(4)]);
    }

    #[tokio::test]
    async fn test_error_ends_stream_after_yielding_it() {
        let mock = MockDatadogClient::new()
            .with_signals(signals(5))
            .await
            .rate_limit_after(1)
            .await;

        let results: Vec<_> = mock
            .list_security_monitoring_signals_with_pagination(ListSignalsParams::new().page_limit(2))
            .collect()
            .await;

        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok() && results[1].is_ok());
        assert!(matches!(
            results[2],
            Err(Error::Api(ApiError::RateLimit { .. }))
        ));
    }

    #[tokio::test]
    async fn test_one_shot_error_is_consumed() {
        let mock = MockDatadogClient::new()
            .with_error(ApiError::Network("connection reset".into()))
            .await;

        assert!(mock.validate_api_key().await.is_err());
        assert_eq!(mock.validate_api_key().await.unwrap().valid, Some(true));
    }

    #[tokio::test]
    async fn test_triage_edits_accumulate() {
        let mock = MockDatadogClient::new().with_signals(signals(1)).await;

        mock.edit_security_monitoring_signal_assignee(
            "sig-0",
            AssigneeUpdateRequest::new(TriageUser::new("user-1")),
        )
        .await
        .unwrap();
        let resp = mock
            .edit_security_monitoring_signal_state(
                "sig-0",
                StateUpdateRequest::new(SignalState::Archived)
                    .archive_reason(ArchiveReason::FalsePositive),
            )
            .await
            .unwrap();

        let attrs = resp.data.attributes.unwrap();
        assert_eq!(attrs.state, SignalState::Archived);
        assert_eq!(attrs.assignee.uuid, "user-1");
        assert_eq!(attrs.archive_reason, Some(ArchiveReason::FalsePositive));
    }

    #[tokio::test]
    async fn test_get_unknown_signal_is_not_found() {
        let mock = MockDatadogClient::new().with_signals(signals(1)).await;

        let err = mock.get_security_monitoring_signal("missing").await.unwrap_err();
        assert!(matches!(err, Error::Api(ApiError::NotFound(_))));
    }
}
