//! Incident models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use super::common::{
    AdditionalProperties, UnparsedFallback, lenient_items, object_entries, string_enum,
};

string_enum! {
    /// Resource type of an incident
    IncidentType {
        Incidents => "incidents",
    }
}

string_enum! {
    /// Objects that can be side-loaded with an incident
    IncidentRelatedObject {
        Users => "users",
        Attachments => "attachments",
    }
}

string_enum! {
    /// Resource type of a side-loaded user
    IncidentUserType {
        Users => "users",
    }
}

string_enum! {
    /// Resource type of a side-loaded attachment
    IncidentAttachmentType {
        IncidentAttachments => "incident_attachments",
    }
}

string_enum! {
    /// Kind of incident attachment
    IncidentAttachmentKind {
        Link => "link",
        Postmortem => "postmortem",
    }
}

/// Incident
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncidentResponseData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<IncidentResponseAttributes>,

    pub id: String,

    /// Links to commander, creator, attachments and other related objects
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relationships: Option<Value>,

    #[serde(rename = "type")]
    pub incident_type: IncidentType,

    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,

    /// Raw payload when this list item did not match the model
    #[serde(skip)]
    pub unparsed_object: Option<Value>,
}

impl UnparsedFallback for IncidentResponseData {
    fn from_unparsed(raw: Value) -> Self {
        let mut additional_properties = object_entries(&raw);
        let id = match additional_properties.remove("id") {
            Some(Value::String(id)) => id,
            _ => String::new(),
        };
        let incident_type = additional_properties
            .remove("type")
            .and_then(|t| IncidentType::deserialize(t).ok())
            .unwrap_or(IncidentType::Incidents);

        Self {
            attributes: None,
            id,
            relationships: None,
            incident_type,
            additional_properties,
            unparsed_object: Some(raw),
        }
    }

    fn unparsed_object(&self) -> Option<&Value> {
        self.unparsed_object.as_ref()
    }
}

impl IncidentResponseData {
    pub fn title(&self) -> Option<&str> {
        self.attributes.as_ref().map(|a| a.title.as_str())
    }

    /// Value of the `state` field, e.g. `active` or `resolved`.
    pub fn state(&self) -> Option<&str> {
        self.field_value("state")
    }

    /// Value of the `severity` field, e.g. `SEV-2`.
    pub fn severity(&self) -> Option<&str> {
        self.field_value("severity")
    }

    fn field_value(&self, name: &str) -> Option<&str> {
        self.attributes
            .as_ref()?
            .fields
            .as_ref()?
            .get(name)?
            .get("value")?
            .as_str()
    }
}

/// Attributes of an incident
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IncidentResponseAttributes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,

    /// Seconds of customer impact
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_impact_duration: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_impact_end: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_impact_scope: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_impact_start: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_impacted: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub detected: Option<DateTime<Utc>>,

    /// User-defined fields keyed by name; each holds a `type` and a `value`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<BTreeMap<String, Value>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_handles: Option<Vec<Value>>,

    /// Monotonically increasing number shown as `IR-<n>`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_id: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_to_detect: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_to_internal_response: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_to_repair: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_to_resolve: Option<i64>,

    pub title: String,

    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

/// Offset pagination details of an incident listing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IncidentPagination {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_offset: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<i64>,

    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

/// Metadata of an incident listing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IncidentResponseMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<IncidentPagination>,

    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

/// Page of incidents
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IncidentsResponse {
    #[serde(deserialize_with = "lenient_items")]
    pub data: Vec<IncidentResponseData>,

    /// Side-loaded users and attachments
    #[serde(skip_serializing_if = "Option::is_none")]
    pub included: Option<Vec<IncidentResponseIncludedItem>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<IncidentResponseMeta>,

    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

/// Single incident
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncidentResponse {
    pub data: IncidentResponseData,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub included: Option<Vec<IncidentResponseIncludedItem>>,

    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

/// Object side-loaded with incidents, chosen by its `type`.
///
/// A type this client does not know, or a known type whose payload does not
/// match its model, is kept as `UnparsedObject`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum IncidentResponseIncludedItem {
    User(IncidentUserData),
    Attachment(IncidentAttachmentData),
    UnparsedObject(Value),
}

impl IncidentResponseIncludedItem {
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::User(user) => user.id.as_deref(),
            Self::Attachment(attachment) => Some(attachment.id.as_str()),
            Self::UnparsedObject(raw) => raw.get("id").and_then(Value::as_str),
        }
    }

    /// Whether the item matched one of the known models.
    pub fn is_valid(&self) -> bool {
        !matches!(self, Self::UnparsedObject(_))
    }
}

impl<'de> Deserialize<'de> for IncidentResponseIncludedItem {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        let item = match raw.get("type").and_then(Value::as_str) {
            Some("users") => IncidentUserData::deserialize(&raw).ok().map(Self::User),
            Some("incident_attachments") => IncidentAttachmentData::deserialize(&raw)
                .ok()
                .map(Self::Attachment),
            _ => None,
        };
        Ok(item.unwrap_or(Self::UnparsedObject(raw)))
    }
}

/// User referenced by an incident
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IncidentUserData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<IncidentUserAttributes>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub user_type: Option<IncidentUserType>,

    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IncidentUserAttributes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub handle: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,

    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

/// Postmortem or link attached to an incident
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncidentAttachmentData {
    pub attributes: IncidentAttachmentAttributes,

    pub id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub relationships: Option<Value>,

    #[serde(rename = "type")]
    pub attachment_type: IncidentAttachmentType,

    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncidentAttachmentAttributes {
    pub attachment: IncidentAttachmentDocument,

    pub attachment_type: IncidentAttachmentKind,

    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

/// Document an attachment points at
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IncidentAttachmentDocument {
    #[serde(rename = "documentUrl", skip_serializing_if = "Option::is_none")]
    pub document_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}
