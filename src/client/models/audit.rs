//! Audit trail models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use super::common::{
    AdditionalProperties, EventSearchRequest, ResponseLinks, ResponseMetadata,
    lenient_optional_items, string_enum, unparsed_fallback,
};

string_enum! {
    /// Resource type of an audit event
    AuditEventType {
        Audit => "audit",
    }
}

/// Body of an audit log search
pub type AuditLogsSearchRequest = EventSearchRequest;

/// Audit trail event
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuditLogsEvent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<AuditLogsEventAttributes>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub event_type: Option<AuditEventType>,

    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,

    /// Raw payload when this list item did not match the model
    #[serde(skip)]
    pub unparsed_object: Option<Value>,
}

unparsed_fallback!(AuditLogsEvent);

impl AuditLogsEvent {
    /// Nested attribute lookup by dotted path, e.g. `usr.email`.
    pub fn attribute(&self, path: &str) -> Option<&Value> {
        let attrs = self.attributes.as_ref()?.attributes.as_ref()?;
        let mut parts = path.split('.');
        let mut current = attrs.get(parts.next()?)?;
        for part in parts {
            current = current.get(part)?;
        }
        Some(current)
    }
}

/// Attributes of an audit event
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuditLogsEventAttributes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<BTreeMap<String, Value>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,

    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

/// Page of audit events
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuditLogsEventsResponse {
    #[serde(
        default,
        deserialize_with = "lenient_optional_items",
        skip_serializing_if = "Option::is_none"
    )]
    pub data: Option<Vec<AuditLogsEvent>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<ResponseLinks>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<ResponseMetadata>,

    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}
