//! Security signal models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use super::common::{
    AdditionalProperties, ResponseLinks, ResponseMetadata, lenient_optional_items, string_enum,
    unparsed_fallback,
};

string_enum! {
    /// Resource type of a security signal
    SignalType {
        Signal => "signal",
    }
}

string_enum! {
    /// Sort order of a signal listing
    SignalsSort {
        TimestampAscending => "timestamp",
        TimestampDescending => "-timestamp",
    }
}

string_enum! {
    /// Triage state of a signal
    SignalState {
        Open => "open",
        Archived => "archived",
        UnderReview => "under_review",
    }
}

string_enum! {
    /// Reason a signal was archived
    ArchiveReason {
        Unspecified => "none",
        FalsePositive => "false_positive",
        TestingOrMaintenance => "testing_or_maintenance",
        InvestigatedCaseOpened => "investigated_case_opened",
        Other => "other",
    }
}

string_enum! {
    /// Resource type of signal triage metadata
    SignalMetadataType {
        SignalMetadata => "signal_metadata",
    }
}

/// Security signal
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<SignalAttributes>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub signal_type: Option<SignalType>,

    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,

    /// Raw payload when this list item did not match the model
    #[serde(skip)]
    pub unparsed_object: Option<Value>,
}

unparsed_fallback!(Signal);

impl Signal {
    /// Title of the signal, taken from its rule attributes when present.
    pub fn title(&self) -> Option<&str> {
        self.attributes
            .as_ref()
            .and_then(|a| a.attributes.as_ref())
            .and_then(|attrs| attrs.get("title"))
            .and_then(Value::as_str)
    }
}

/// Attributes of a security signal
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SignalAttributes {
    /// Custom attributes of the signal (rule, workflow, triage details)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<BTreeMap<String, Value>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,

    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

/// Single signal response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SignalResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Signal>,

    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

/// Page of security signals
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SignalsListResponse {
    #[serde(
        default,
        deserialize_with = "lenient_optional_items",
        skip_serializing_if = "Option::is_none"
    )]
    pub data: Option<Vec<Signal>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<ResponseLinks>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<ResponseMetadata>,

    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

/// Filter of a signal search
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SignalListRequestFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<DateTime<Utc>>,

    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

/// Paging options of a signal search
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SignalListRequestPage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i32>,

    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

/// Body of a signal search
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SignalListRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<SignalListRequestFilter>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<SignalListRequestPage>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<SignalsSort>,

    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

impl SignalListRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.filter
            .get_or_insert_with(SignalListRequestFilter::default)
            .query = Some(query.into());
        self
    }

    pub fn from(mut self, from: DateTime<Utc>) -> Self {
        self.filter
            .get_or_insert_with(SignalListRequestFilter::default)
            .from = Some(from);
        self
    }

    pub fn to(mut self, to: DateTime<Utc>) -> Self {
        self.filter
            .get_or_insert_with(SignalListRequestFilter::default)
            .to = Some(to);
        self
    }

    pub fn page_limit(mut self, limit: i32) -> Self {
        self.page
            .get_or_insert_with(SignalListRequestPage::default)
            .limit = Some(limit);
        self
    }

    pub fn sort(mut self, sort: SignalsSort) -> Self {
        self.sort = Some(sort);
        self
    }
}

/// User entity referenced by triage data
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TriageUser {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handle: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// UUID of the user; empty string unassigns
    pub uuid: String,

    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

impl TriageUser {
    pub fn new(uuid: impl Into<String>) -> Self {
        Self {
            uuid: uuid.into(),
            ..Default::default()
        }
    }
}

/// Triage state of a signal after an update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriageAttributes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archive_comment: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub archive_comment_timestamp: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub archive_comment_user: Option<TriageUser>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub archive_reason: Option<ArchiveReason>,

    pub assignee: TriageUser,

    pub incident_ids: Vec<i64>,

    pub state: SignalState,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_update_timestamp: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_update_user: Option<TriageUser>,

    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

/// Triage data returned by an update
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TriageUpdateData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<TriageAttributes>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub data_type: Option<SignalMetadataType>,

    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

/// Response to a state, assignee or incidents update
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TriageUpdateResponse {
    pub data: TriageUpdateData,

    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

/// Generic `{"data": {"attributes": ...}}` envelope of triage updates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateData<A> {
    pub attributes: A,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub data_type: Option<SignalMetadataType>,

    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

/// Attributes of a state update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateUpdateAttributes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archive_comment: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub archive_reason: Option<ArchiveReason>,

    pub state: SignalState,

    /// Version of the signal being updated; rejected with 409 if stale
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,

    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

/// Attributes of an assignee update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssigneeUpdateAttributes {
    pub assignee: TriageUser,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,

    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

/// Attributes of an incidents update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncidentsUpdateAttributes {
    pub incident_ids: Vec<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,

    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

/// Request to change the triage state of a signal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateUpdateRequest {
    pub data: UpdateData<StateUpdateAttributes>,

    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

impl StateUpdateRequest {
    pub fn new(state: SignalState) -> Self {
        Self {
            data: UpdateData::new(StateUpdateAttributes {
                archive_comment: None,
                archive_reason: None,
                state,
                version: None,
                additional_properties: AdditionalProperties::new(),
            }),
            additional_properties: AdditionalProperties::new(),
        }
    }

    pub fn archive_reason(mut self, reason: ArchiveReason) -> Self {
        self.data.attributes.archive_reason = Some(reason);
        self
    }

    pub fn archive_comment(mut self, comment: impl Into<String>) -> Self {
        self.data.attributes.archive_comment = Some(comment.into());
        self
    }

    pub fn version(mut self, version: i64) -> Self {
        self.data.attributes.version = Some(version);
        self
    }
}

/// Request to change the assignee of a signal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssigneeUpdateRequest {
    pub data: UpdateData<AssigneeUpdateAttributes>,

    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

impl AssigneeUpdateRequest {
    pub fn new(assignee: TriageUser) -> Self {
        Self {
            data: UpdateData::new(AssigneeUpdateAttributes {
                assignee,
                version: None,
                additional_properties: AdditionalProperties::new(),
            }),
            additional_properties: AdditionalProperties::new(),
        }
    }
}

/// Request to change the incidents linked to a signal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncidentsUpdateRequest {
    pub data: UpdateData<IncidentsUpdateAttributes>,

    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

impl IncidentsUpdateRequest {
    pub fn new(incident_ids: Vec<i64>) -> Self {
        Self {
            data: UpdateData::new(IncidentsUpdateAttributes {
                incident_ids,
                version: None,
                additional_properties: AdditionalProperties::new(),
            }),
            additional_properties: AdditionalProperties::new(),
        }
    }
}

impl<A> UpdateData<A> {
    fn new(attributes: A) -> Self {
        Self {
            attributes,
            id: None,
            data_type: None,
            additional_properties: AdditionalProperties::new(),
        }
    }
}
