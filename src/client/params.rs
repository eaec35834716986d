//! Optional-parameter bundles for API operations
//!
//! Each paginated bundle implements [`PageRequest`], and each paginated
//! response implements [`PagedResponse`], so every list or search operation
//! can be drained through [`paginate`](super::pagination::paginate).

use std::fmt::Display;

use chrono::{DateTime, SecondsFormat, Utc};

use super::datadog::ApiRequest;
use super::models::{
    AuditLogsEvent, AuditLogsEventsResponse, ContentEncoding, EventResponse, EventSearchRequest,
    EventsListResponse, IncidentRelatedObject, IncidentResponseData, IncidentsResponse, Log,
    LogsListRequest, LogsListRequestPage, LogsListResponse, LogsSort, LogsStorageTier,
    QueryPageOptions, QuerySort, RumEvent, RumEventsResponse, Signal, SignalListRequest,
    SignalListRequestPage, SignalsListResponse, SignalsSort,
};
use super::pagination::{PageRequest, PagedResponse};

/// Render a timestamp parameter as RFC 3339 in UTC.
///
/// Milliseconds are included only when the sub-second part is non-zero.
pub fn format_datetime(value: &DateTime<Utc>) -> String {
    if value.timestamp_subsec_nanos() == 0 {
        value.to_rfc3339_opts(SecondsFormat::Secs, true)
    } else {
        value.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

/// Render a list parameter comma-separated.
pub fn csv<I>(values: I) -> String
where
    I: IntoIterator,
    I::Item: Display,
{
    values
        .into_iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

fn prepare_limit(limit: &mut Option<i32>, default: usize) -> usize {
    let default = i32::try_from(default).unwrap_or(i32::MAX);
    (*limit.get_or_insert(default)).max(0) as usize
}

fn advance_cursor(cursor: &mut Option<String>, next: Option<String>) -> bool {
    match next {
        Some(next) => {
            *cursor = Some(next);
            true
        }
        None => false,
    }
}

// ============================================================================
// Security signals
// ============================================================================

/// Optional parameters of `list_security_monitoring_signals`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListSignalsParams {
    pub filter_query: Option<String>,
    pub filter_from: Option<DateTime<Utc>>,
    pub filter_to: Option<DateTime<Utc>>,
    pub sort: Option<SignalsSort>,
    pub page_cursor: Option<String>,
    pub page_limit: Option<i32>,
}

impl ListSignalsParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter_query(mut self, query: impl Into<String>) -> Self {
        self.filter_query = Some(query.into());
        self
    }

    pub fn filter_from(mut self, from: DateTime<Utc>) -> Self {
        self.filter_from = Some(from);
        self
    }

    pub fn filter_to(mut self, to: DateTime<Utc>) -> Self {
        self.filter_to = Some(to);
        self
    }

    pub fn sort(mut self, sort: SignalsSort) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn page_cursor(mut self, cursor: impl Into<String>) -> Self {
        self.page_cursor = Some(cursor.into());
        self
    }

    pub fn page_limit(mut self, limit: i32) -> Self {
        self.page_limit = Some(limit);
        self
    }

    pub(crate) fn apply(&self, request: ApiRequest) -> ApiRequest {
        request
            .query_opt("filter[query]", self.filter_query.as_ref())
            .query_opt("filter[from]", self.filter_from.as_ref().map(format_datetime))
            .query_opt("filter[to]", self.filter_to.as_ref().map(format_datetime))
            .query_opt("sort", self.sort.as_ref())
            .query_opt("page[cursor]", self.page_cursor.as_ref())
            .query_opt("page[limit]", self.page_limit)
    }
}

impl PageRequest for ListSignalsParams {
    fn prepare_page_size(&mut self, default: usize) -> usize {
        prepare_limit(&mut self.page_limit, default)
    }

    fn advance(&mut self, next_cursor: Option<String>, _page_size: usize) -> bool {
        advance_cursor(&mut self.page_cursor, next_cursor)
    }
}

/// Search body whose cursor lives in `page.cursor`.
pub trait CursorBody: Clone + Default + Send + 'static {
    fn page_limit_mut(&mut self) -> &mut Option<i32>;
    fn page_cursor_mut(&mut self) -> &mut Option<String>;
}

impl CursorBody for SignalListRequest {
    fn page_limit_mut(&mut self) -> &mut Option<i32> {
        &mut self
            .page
            .get_or_insert_with(SignalListRequestPage::default)
            .limit
    }

    fn page_cursor_mut(&mut self) -> &mut Option<String> {
        &mut self
            .page
            .get_or_insert_with(SignalListRequestPage::default)
            .cursor
    }
}

impl CursorBody for LogsListRequest {
    fn page_limit_mut(&mut self) -> &mut Option<i32> {
        &mut self
            .page
            .get_or_insert_with(LogsListRequestPage::default)
            .limit
    }

    fn page_cursor_mut(&mut self) -> &mut Option<String> {
        &mut self
            .page
            .get_or_insert_with(LogsListRequestPage::default)
            .cursor
    }
}

impl CursorBody for EventSearchRequest {
    fn page_limit_mut(&mut self) -> &mut Option<i32> {
        &mut self.page.get_or_insert_with(QueryPageOptions::default).limit
    }

    fn page_cursor_mut(&mut self) -> &mut Option<String> {
        &mut self.page.get_or_insert_with(QueryPageOptions::default).cursor
    }
}

/// Optional body of a POST search operation
#[derive(Debug, Clone, PartialEq)]
pub struct SearchParams<B> {
    pub body: Option<B>,
}

impl<B> Default for SearchParams<B> {
    fn default() -> Self {
        Self { body: None }
    }
}

impl<B> SearchParams<B> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn body(mut self, body: B) -> Self {
        self.body = Some(body);
        self
    }
}

impl<B: CursorBody> PageRequest for SearchParams<B> {
    fn prepare_page_size(&mut self, default: usize) -> usize {
        let body = self.body.get_or_insert_with(B::default);
        prepare_limit(body.page_limit_mut(), default)
    }

    fn advance(&mut self, next_cursor: Option<String>, _page_size: usize) -> bool {
        let body = self.body.get_or_insert_with(B::default);
        advance_cursor(body.page_cursor_mut(), next_cursor)
    }
}

/// Optional parameters of `search_security_monitoring_signals`
pub type SearchSignalsParams = SearchParams<SignalListRequest>;

/// Optional parameters of `list_logs`
pub type ListLogsParams = SearchParams<LogsListRequest>;

/// Optional parameters of `search_audit_logs`
pub type SearchAuditLogsParams = SearchParams<EventSearchRequest>;

/// Optional parameters of `search_events`
pub type SearchEventsParams = SearchParams<EventSearchRequest>;

// ============================================================================
// Logs
// ============================================================================

/// Optional parameters of `list_logs_get`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListLogsGetParams {
    pub filter_query: Option<String>,
    pub filter_indexes: Option<Vec<String>>,
    pub filter_from: Option<DateTime<Utc>>,
    pub filter_to: Option<DateTime<Utc>>,
    pub filter_storage_tier: Option<LogsStorageTier>,
    pub sort: Option<LogsSort>,
    pub page_cursor: Option<String>,
    pub page_limit: Option<i32>,
}

impl ListLogsGetParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter_query(mut self, query: impl Into<String>) -> Self {
        self.filter_query = Some(query.into());
        self
    }

    pub fn filter_indexes(mut self, indexes: Vec<String>) -> Self {
        self.filter_indexes = Some(indexes);
        self
    }

    pub fn filter_from(mut self, from: DateTime<Utc>) -> Self {
        self.filter_from = Some(from);
        self
    }

    pub fn filter_to(mut self, to: DateTime<Utc>) -> Self {
        self.filter_to = Some(to);
        self
    }

    pub fn filter_storage_tier(mut self, tier: LogsStorageTier) -> Self {
        self.filter_storage_tier = Some(tier);
        self
    }

    pub fn sort(mut self, sort: LogsSort) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn page_cursor(mut self, cursor: impl Into<String>) -> Self {
        self.page_cursor = Some(cursor.into());
        self
    }

    pub fn page_limit(mut self, limit: i32) -> Self {
        self.page_limit = Some(limit);
        self
    }

    pub(crate) fn apply(&self, request: ApiRequest) -> ApiRequest {
        request
            .query_opt("filter[query]", self.filter_query.as_ref())
            .query_opt("filter[indexes]", self.filter_indexes.as_ref().map(csv))
            .query_opt("filter[from]", self.filter_from.as_ref().map(format_datetime))
            .query_opt("filter[to]", self.filter_to.as_ref().map(format_datetime))
            .query_opt("filter[storage_tier]", self.filter_storage_tier.as_ref())
            .query_opt("sort", self.sort.as_ref())
            .query_opt("page[cursor]", self.page_cursor.as_ref())
            .query_opt("page[limit]", self.page_limit)
    }
}

impl PageRequest for ListLogsGetParams {
    fn prepare_page_size(&mut self, default: usize) -> usize {
        prepare_limit(&mut self.page_limit, default)
    }

    fn advance(&mut self, next_cursor: Option<String>, _page_size: usize) -> bool {
        advance_cursor(&mut self.page_cursor, next_cursor)
    }
}

/// Optional parameters of `submit_log`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubmitLogParams {
    pub content_encoding: Option<ContentEncoding>,
    /// Comma-separated tags applied to every log of the payload
    pub ddtags: Option<String>,
}

impl SubmitLogParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content_encoding(mut self, encoding: ContentEncoding) -> Self {
        self.content_encoding = Some(encoding);
        self
    }

    pub fn ddtags(mut self, tags: impl Into<String>) -> Self {
        self.ddtags = Some(tags.into());
        self
    }
}

// ============================================================================
// RUM, audit and events
// ============================================================================

/// Optional parameters of the GET listings of RUM events and audit logs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventQueryParams {
    pub filter_query: Option<String>,
    pub filter_from: Option<DateTime<Utc>>,
    pub filter_to: Option<DateTime<Utc>>,
    pub sort: Option<QuerySort>,
    pub page_cursor: Option<String>,
    pub page_limit: Option<i32>,
}

/// Optional parameters of `list_rum_events`
pub type ListRumEventsParams = EventQueryParams;

/// Optional parameters of `list_audit_logs`
pub type ListAuditLogsParams = EventQueryParams;

impl EventQueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter_query(mut self, query: impl Into<String>) -> Self {
        self.filter_query = Some(query.into());
        self
    }

    pub fn filter_from(mut self, from: DateTime<Utc>) -> Self {
        self.filter_from = Some(from);
        self
    }

    pub fn filter_to(mut self, to: DateTime<Utc>) -> Self {
        self.filter_to = Some(to);
        self
    }

    pub fn sort(mut self, sort: QuerySort) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn page_cursor(mut self, cursor: impl Into<String>) -> Self {
        self.page_cursor = Some(cursor.into());
        self
    }

    pub fn page_limit(mut self, limit: i32) -> Self {
        self.page_limit = Some(limit);
        self
    }

    pub(crate) fn apply(&self, request: ApiRequest) -> ApiRequest {
        request
            .query_opt("filter[query]", self.filter_query.as_ref())
            .query_opt("filter[from]", self.filter_from.as_ref().map(format_datetime))
            .query_opt("filter[to]", self.filter_to.as_ref().map(format_datetime))
            .query_opt("sort", self.sort.as_ref())
            .query_opt("page[cursor]", self.page_cursor.as_ref())
            .query_opt("page[limit]", self.page_limit)
    }
}

impl PageRequest for EventQueryParams {
    fn prepare_page_size(&mut self, default: usize) -> usize {
        prepare_limit(&mut self.page_limit, default)
    }

    fn advance(&mut self, next_cursor: Option<String>, _page_size: usize) -> bool {
        advance_cursor(&mut self.page_cursor, next_cursor)
    }
}

/// Optional parameters of `list_events`
///
/// `filter_from`/`filter_to` take date math (`now-15m`), ISO 8601 or epoch
/// milliseconds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListEventsParams {
    pub filter_query: Option<String>,
    pub filter_from: Option<String>,
    pub filter_to: Option<String>,
    pub sort: Option<QuerySort>,
    pub page_cursor: Option<String>,
    pub page_limit: Option<i32>,
}

impl ListEventsParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter_query(mut self, query: impl Into<String>) -> Self {
        self.filter_query = Some(query.into());
        self
    }

    pub fn filter_from(mut self, from: impl Into<String>) -> Self {
        self.filter_from = Some(from.into());
        self
    }

    pub fn filter_to(mut self, to: impl Into<String>) -> Self {
        self.filter_to = Some(to.into());
        self
    }

    pub fn sort(mut self, sort: QuerySort) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn page_cursor(mut self, cursor: impl Into<String>) -> Self {
        self.page_cursor = Some(cursor.into());
        self
    }

    pub fn page_limit(mut self, limit: i32) -> Self {
        self.page_limit = Some(limit);
        self
    }

    pub(crate) fn apply(&self, request: ApiRequest) -> ApiRequest {
        request
            .query_opt("filter[query]", self.filter_query.as_ref())
            .query_opt("filter[from]", self.filter_from.as_ref())
            .query_opt("filter[to]", self.filter_to.as_ref())
            .query_opt("sort", self.sort.as_ref())
            .query_opt("page[cursor]", self.page_cursor.as_ref())
            .query_opt("page[limit]", self.page_limit)
    }
}

impl PageRequest for ListEventsParams {
    fn prepare_page_size(&mut self, default: usize) -> usize {
        prepare_limit(&mut self.page_limit, default)
    }

    fn advance(&mut self, next_cursor: Option<String>, _page_size: usize) -> bool {
        advance_cursor(&mut self.page_cursor, next_cursor)
    }
}

// ============================================================================
// Incidents
// ============================================================================

/// Optional parameters of `list_incidents`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListIncidentsParams {
    pub include: Option<Vec<IncidentRelatedObject>>,
    pub page_size: Option<i64>,
    pub page_offset: Option<i64>,
}

impl ListIncidentsParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn include(mut self, include: Vec<IncidentRelatedObject>) -> Self {
        self.include = Some(include);
        self
    }

    pub fn page_size(mut self, size: i64) -> Self {
        self.page_size = Some(size);
        self
    }

    pub fn page_offset(mut self, offset: i64) -> Self {
        self.page_offset = Some(offset);
        self
    }

    pub(crate) fn apply(&self, request: ApiRequest) -> ApiRequest {
        request
            .query_opt("include", self.include.as_ref().map(csv))
            .query_opt("page[size]", self.page_size)
            .query_opt("page[offset]", self.page_offset)
    }
}

impl PageRequest for ListIncidentsParams {
    fn prepare_page_size(&mut self, default: usize) -> usize {
        let default = i64::try_from(default).unwrap_or(i64::MAX);
        (*self.page_size.get_or_insert(default)).max(0) as usize
    }

    fn advance(&mut self, _next_cursor: Option<String>, page_size: usize) -> bool {
        let step = i64::try_from(page_size).unwrap_or(i64::MAX);
        self.page_offset = Some(self.page_offset.unwrap_or(0).saturating_add(step));
        true
    }
}

/// Optional parameters of `get_incident`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetIncidentParams {
    pub include: Option<Vec<IncidentRelatedObject>>,
}

impl GetIncidentParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn include(mut self, include: Vec<IncidentRelatedObject>) -> Self {
        self.include = Some(include);
        self
    }

    pub(crate) fn apply(&self, request: ApiRequest) -> ApiRequest {
        request.query_opt("include", self.include.as_ref().map(csv))
    }
}

// ============================================================================
// Paged responses
// ============================================================================

macro_rules! cursor_page {
    ($response:ty => $item:ty) => {
        impl PagedResponse for $response {
            type Item = $item;

            fn into_page(self) -> (Vec<$item>, Option<String>) {
                let cursor = self
                    .meta
                    .as_ref()
                    .and_then(|m| m.after())
                    .map(String::from);
                (self.data.unwrap_or_default(), cursor)
            }
        }
    };
}

cursor_page!(SignalsListResponse => Signal);
cursor_page!(LogsListResponse => Log);
cursor_page!(RumEventsResponse => RumEvent);
cursor_page!(AuditLogsEventsResponse => AuditLogsEvent);
cursor_page!(EventsListResponse => EventResponse);

impl PagedResponse for IncidentsResponse {
    type Item = IncidentResponseData;

    fn into_page(self) -> (Vec<IncidentResponseData>, Option<String>) {
        (self.data, None)
    }
}
