//! Datadog API data models
//!
//! Models mirror the v2 API schemas, organized by resource. Optional
//! properties are `Option`s skipped when unset, and every object keeps
//! unknown fields in `additional_properties`. List items that fail to decode
//! are kept raw (see [`UnparsedFallback`]) so one bad item never fails a page.

pub(crate) mod common;

pub mod audit;
pub mod events;
pub mod incidents;
pub mod logs;
pub mod rum;
pub mod security_monitoring;

pub use audit::{
    AuditEventType, AuditLogsEvent, AuditLogsEventAttributes, AuditLogsEventsResponse,
    AuditLogsSearchRequest,
};
pub use common::{
    AdditionalProperties, ApiErrorResponse, ApiKeyValidation, EventSearchRequest, QueryFilter,
    QueryOptions, QueryPageOptions, QuerySort, ResponseLinks, ResponseMetadata, ResponsePage,
    ResponseStatus, ResponseWarning, UnparsedFallback,
};
pub use events::{
    EventAttributes, EventPriority, EventResponse, EventResponseAttributes, EventStatusType,
    EventType, EventsListRequest, EventsListResponse,
};
pub use incidents::{
    IncidentAttachmentAttributes, IncidentAttachmentData, IncidentAttachmentDocument,
    IncidentAttachmentKind, IncidentAttachmentType, IncidentPagination, IncidentRelatedObject,
    IncidentResponse, IncidentResponseAttributes, IncidentResponseData,
    IncidentResponseIncludedItem, IncidentResponseMeta, IncidentType, IncidentUserAttributes,
    IncidentUserData, IncidentUserType, IncidentsResponse,
};
pub use logs::{
    ContentEncoding, HttpLogItem, Log, LogAttributes, LogType, LogsListRequest,
    LogsListRequestPage, LogsListResponse, LogsQueryFilter, LogsSort, LogsStorageTier,
};
pub use rum::{
    RumEvent, RumEventAttributes, RumEventType, RumEventsResponse, RumSearchEventsRequest,
};
pub use security_monitoring::{
    ArchiveReason, AssigneeUpdateAttributes, AssigneeUpdateRequest, IncidentsUpdateAttributes,
    IncidentsUpdateRequest, Signal, SignalAttributes, SignalListRequest, SignalListRequestFilter,
    SignalListRequestPage, SignalMetadataType, SignalResponse, SignalState, SignalType,
    SignalsListResponse, SignalsSort, StateUpdateAttributes, StateUpdateRequest,
    TriageAttributes, TriageUpdateData, TriageUpdateResponse, TriageUser, UpdateData,
};
