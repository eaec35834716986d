//! Datadog API client
//!
//! [`DatadogClient`] runs every operation through a single executor that
//! handles authentication, compression, rate limiting and error mapping. The
//! operations themselves live in per-product traits under [`api`].

pub mod api;
pub mod datadog;
#[cfg(test)]
pub mod mock;
pub mod models;
pub mod pagination;
pub mod params;
pub mod rate_limit;

pub use api::{
    AuditApi, EventsApi, IncidentsApi, LogsApi, RumApi, SecurityMonitoringApi, ValidationApi,
};
pub use datadog::{ApiRequest, AuthScheme, ClientOptions, DatadogClient, Server};
#[cfg(test)]
pub use mock::MockDatadogClient;
pub use pagination::{DEFAULT_PAGE_SIZE, PageRequest, PagedResponse, PaginatedStream, paginate};
pub use params::{
    EventQueryParams, GetIncidentParams, ListAuditLogsParams, ListEventsParams,
    ListIncidentsParams, ListLogsGetParams, ListLogsParams, ListRumEventsParams,
    ListSignalsParams, SearchAuditLogsParams, SearchEventsParams, SearchParams,
    SearchSignalsParams, SubmitLogParams,
};

/// Every Datadog API surface this crate covers.
///
/// Implemented automatically for any type implementing all the sub-traits,
/// which lets command handlers accept either the real client or the mock.
pub trait DatadogApi:
    SecurityMonitoringApi
    + LogsApi
    + RumApi
    + AuditApi
    + EventsApi
    + IncidentsApi
    + ValidationApi
    + Clone
    + 'static
{
}

impl<T> DatadogApi for T where
    T: SecurityMonitoringApi
        + LogsApi
        + RumApi
        + AuditApi
        + EventsApi
        + IncidentsApi
        + ValidationApi
        + Clone
        + 'static
{
}
